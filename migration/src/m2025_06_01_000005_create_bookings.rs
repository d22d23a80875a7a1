//! Migration to create the bookings table for public booking requests.

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
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::ClientSurname).text().not_null())
                    .col(ColumnDef::new(Bookings::ClientName).text().not_null())
                    .col(ColumnDef::new(Bookings::ClientPatronymic).text().null())
                    .col(ColumnDef::new(Bookings::ClientPhone).text().not_null())
                    .col(ColumnDef::new(Bookings::ClientEmail).text().null())
                    .col(ColumnDef::new(Bookings::CheckinDate).date().not_null())
                    .col(ColumnDef::new(Bookings::CheckoutDate).date().not_null())
                    .col(ColumnDef::new(Bookings::RoomId).integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Bookings::RejectionReason).text().null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_room_id")
                            .from(Bookings::Table, Bookings::RoomId)
                            .to(Rooms::Table, Rooms::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    ClientSurname,
    ClientName,
    ClientPatronymic,
    ClientPhone,
    ClientEmail,
    CheckinDate,
    CheckoutDate,
    RoomId,
    Status,
    RejectionReason,
    CreatedAt,
}
