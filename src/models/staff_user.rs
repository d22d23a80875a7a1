//! Staff user entity model
//!
//! Accounts for the administration panel. Logins are globally unique and
//! passwords are stored as argon2 hashes, never returned over the API.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Staff user entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,

    /// Globally unique login
    #[sea_orm(unique)]
    pub login: String,

    /// Argon2 password hash
    pub password: String,

    /// Role or position label shown in the admin panel
    pub position: String,

    pub last_success_login: Option<DateTimeWithTimeZone>,
    pub last_failed_login: Option<DateTimeWithTimeZone>,
    pub password_change_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
