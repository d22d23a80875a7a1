//! Room image entity model
//!
//! Images are exclusively owned by their room and are deleted with it.
//! At most one image per room carries the main flag.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Room image entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "room_images")]
pub struct Model {
    /// Unique identifier for the image (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning room
    pub room_id: i32,

    /// URL the image is served from
    pub image_url: String,

    /// Whether this is the room's representative image
    pub is_main: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_delete = "Cascade"
    )]
    Room,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
