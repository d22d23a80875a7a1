//! Database seeding functionality
//!
//! Populates a fresh database with the default admin account and, when
//! demo data is enabled, a handful of rooms, images and pending booking
//! requests so the panel has something to show.

use anyhow::Result;
use chrono::{Days, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::room::{Entity as Room, RoomStatus};
use crate::repositories::{
    BookingRepository, BookingRequestInput, NewUser, RoomImageRepository, RoomInput,
    RoomRepository, UserRepository,
};

const DEFAULT_ADMIN_LOGIN: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Seeds the default admin account and demo inventory when the database is
/// empty. Safe to call on every startup.
pub async fn seed_if_empty(db: &DatabaseConnection, config: &AppConfig) -> Result<()> {
    let db = Arc::new(db.clone());
    let users = UserRepository::new(db.clone());

    if users.count().await? > 0 {
        log::info!("Database already seeded, skipping");
        return Ok(());
    }

    log::info!("Seeding default admin account '{}'", DEFAULT_ADMIN_LOGIN);
    users
        .create(NewUser {
            surname: "Admin".to_string(),
            name: "Admin".to_string(),
            patronymic: None,
            login: DEFAULT_ADMIN_LOGIN.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            position: "administrator".to_string(),
        })
        .await?;

    if config.seed_demo_data {
        seed_demo_inventory(db, config).await?;
    }

    Ok(())
}

async fn seed_demo_inventory(db: Arc<DatabaseConnection>, config: &AppConfig) -> Result<()> {
    if Room::find().count(&*db).await? > 0 {
        return Ok(());
    }

    log::info!("Seeding demo rooms and bookings");

    let rooms = RoomRepository::new(db.clone());
    let images = RoomImageRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let demo_rooms = [
        (
            "Main",
            "101",
            RoomStatus::Standard,
            120.0,
            "Quiet room overlooking the garden",
        ),
        (
            "Main",
            "102",
            RoomStatus::Economy,
            80.0,
            "Compact single next to the stairs",
        ),
        (
            "Seaside",
            "201",
            RoomStatus::Vip,
            340.0,
            "Corner suite with a sea-view balcony",
        ),
        (
            "Seaside",
            "202",
            RoomStatus::Standard,
            150.0,
            "Twin room one floor above the restaurant",
        ),
    ];

    let mut created_ids = Vec::new();
    for (building, number, status, price, description) in demo_rooms {
        let room = rooms
            .create(
                RoomInput {
                    building: building.to_string(),
                    room_number: number.to_string(),
                    double_beds: if status == RoomStatus::Economy { 0 } else { 1 },
                    single_beds: if status == RoomStatus::Economy { 1 } else { 2 },
                    kettle: true,
                    tv: status != RoomStatus::Economy,
                    balcony: status == RoomStatus::Vip,
                    air_conditioning: status == RoomStatus::Vip,
                    rooms_count: if status == RoomStatus::Vip { 2 } else { 1 },
                    status,
                    description: Some(description.to_string()),
                    price_per_night: price,
                },
                None,
                &config.placeholder_image,
            )
            .await?;
        created_ids.push(room.id);
    }

    // A second, non-main image for the suite
    if let Some(&suite_id) = created_ids.get(2) {
        images
            .add(suite_id, "/images/seaside-201-balcony.jpg".to_string(), false)
            .await?;
    }

    let today = Utc::now().date_naive();
    let demo_bookings = [
        ("Ivanova", "Maria", "+7 900 111-22-33", created_ids[0], 3, 6),
        ("Smirnov", "Oleg", "+7 900 444-55-66", created_ids[2], 7, 10),
    ];
    for (surname, name, phone, room_id, from, to) in demo_bookings {
        bookings
            .submit(BookingRequestInput {
                client_surname: surname.to_string(),
                client_name: name.to_string(),
                client_patronymic: None,
                client_phone: phone.to_string(),
                client_email: None,
                checkin_date: today + Days::new(from),
                checkout_date: today + Days::new(to),
                room_id,
            })
            .await?;
    }

    Ok(())
}
