//! Booking request entity model
//!
//! A booking request starts out pending and transitions exactly once to an
//! approved or rejected terminal state.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a booking request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Booking request entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    /// Unique identifier for the booking request (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    pub client_surname: String,
    pub client_name: String,
    pub client_patronymic: Option<String>,
    pub client_phone: String,
    pub client_email: Option<String>,

    /// First night of the requested stay (inclusive)
    pub checkin_date: Date,

    /// Day of departure (exclusive)
    pub checkout_date: Date,

    /// Requested room
    pub room_id: i32,

    pub status: BookingStatus,

    /// Free-text reason recorded on rejection
    pub rejection_reason: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
