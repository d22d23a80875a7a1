//! Migration to create the room_images table.
//!
//! Images are exclusively owned by their room: the foreign key cascades on
//! room deletion.

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
                    .table(RoomImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomImages::RoomId).integer().not_null())
                    .col(ColumnDef::new(RoomImages::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(RoomImages::IsMain)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RoomImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_images_room_id")
                            .from(RoomImages::Table, RoomImages::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomImages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoomImages {
    Table,
    Id,
    RoomId,
    ImageUrl,
    IsMain,
    CreatedAt,
}
