//! Migration to create the clients table.
//!
//! One row here represents a single confirmed night of a guest's stay.
//! Rows are generated when a booking request is approved and stay around
//! independently of the originating booking, so the room reference does
//! not cascade.

use sea_orm_migration::prelude::*;

use crate::m2025_06_01_000002_create_rooms::Rooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::Surname).text().not_null())
                    .col(ColumnDef::new(Clients::Name).text().not_null())
                    .col(ColumnDef::new(Clients::Patronymic).text().null())
                    .col(ColumnDef::new(Clients::Phone).text().not_null())
                    .col(ColumnDef::new(Clients::Email).text().null())
                    .col(ColumnDef::new(Clients::CheckinDate).date().not_null())
                    .col(ColumnDef::new(Clients::CheckoutDate).date().not_null())
                    .col(ColumnDef::new(Clients::RoomId).integer().not_null())
                    .col(ColumnDef::new(Clients::CurrentRoomId).integer().null())
                    .col(ColumnDef::new(Clients::CheckoutRoomId).integer().null())
                    .col(ColumnDef::new(Clients::Comments).text().null())
                    .col(ColumnDef::new(Clients::Chronotype).text().null())
                    .col(ColumnDef::new(Clients::Country).text().null())
                    .col(ColumnDef::new(Clients::Region).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clients_room_id")
                            .from(Clients::Table, Clients::RoomId)
                            .to(Rooms::Table, Rooms::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    Surname,
    Name,
    Patronymic,
    Phone,
    Email,
    CheckinDate,
    CheckoutDate,
    RoomId,
    CurrentRoomId,
    CheckoutRoomId,
    Comments,
    Chronotype,
    Country,
    Region,
}
