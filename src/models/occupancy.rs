//! Occupancy entity model
//!
//! One row in the clients table represents a single confirmed night of a
//! guest's stay. Rows are generated exclusively by approving a booking
//! request and live on independently of it afterwards.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Guest chronotype classification used by the front desk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Chronotype {
    #[sea_orm(string_value = "owl")]
    Owl,
    #[sea_orm(string_value = "lark")]
    Lark,
    #[sea_orm(string_value = "dinosaur")]
    Dinosaur,
    #[sea_orm(string_value = "batman")]
    Batman,
}

/// Occupancy entity: one confirmed night of a stay
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Unique identifier for the occupancy row (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub phone: String,
    pub email: Option<String>,

    /// The night this row stands for
    pub checkin_date: Date,

    /// Departure date of the whole stay, repeated on every generated row
    pub checkout_date: Date,

    /// Room the stay was booked for
    pub room_id: i32,

    /// Room currently occupied, differs from room_id after a mid-stay move
    pub current_room_id: Option<i32>,

    /// Room to check out from when it differs from the current one
    pub checkout_room_id: Option<i32>,

    pub comments: Option<String>,
    pub chronotype: Option<Chronotype>,
    pub country: Option<String>,
    pub region: Option<String>,
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
