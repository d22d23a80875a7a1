//! Database migrations for the hotel booking backend.
//!
//! All schema changes go through SeaORM Migration so that the embedded
//! SQLite backend and PostgreSQL stay in lockstep.

pub use sea_orm_migration::prelude::*;

mod m2025_06_01_000001_create_users;
mod m2025_06_01_000002_create_rooms;
mod m2025_06_01_000003_create_room_images;
mod m2025_06_01_000004_create_clients;
mod m2025_06_01_000005_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_06_01_000001_create_users::Migration),
            Box::new(m2025_06_01_000002_create_rooms::Migration),
            Box::new(m2025_06_01_000003_create_room_images::Migration),
            Box::new(m2025_06_01_000004_create_clients::Migration),
            Box::new(m2025_06_01_000005_create_bookings::Migration),
        ]
    }
}
