//! Room entity model
//!
//! This module contains the SeaORM entity model for the rooms table,
//! the bookable inventory of the hotel.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Room category used for pricing tiers and presentation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[sea_orm(string_value = "vip")]
    Vip,
    #[sea_orm(string_value = "standard")]
    Standard,
    #[sea_orm(string_value = "economy")]
    Economy,
}

impl RoomStatus {
    /// Human-readable label used by the admin fragments.
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Vip => "VIP",
            RoomStatus::Standard => "Standard",
            RoomStatus::Economy => "Economy",
        }
    }
}

/// Room entity representing a bookable unit of inventory
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    /// Unique identifier for the room (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Building the room belongs to
    pub building: String,

    /// Room number within the building
    pub room_number: String,

    pub double_beds: i32,
    pub single_beds: i32,
    pub kettle: bool,
    pub tv: bool,
    pub balcony: bool,
    pub air_conditioning: bool,

    /// Number of separate rooms in the unit
    pub rooms_count: i32,

    pub status: RoomStatus,
    pub description: Option<String>,

    /// Nightly rate; must be positive
    pub price_per_night: f64,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_image::Entity")]
    RoomImages,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::occupancy::Entity")]
    Occupancies,
}

impl Related<super::room_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomImages.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::occupancy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Occupancies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
