//! Tests for startup seeding ensuring the admin account and demo inventory
//! are created exactly once.

use anyhow::Result;
use hotelier::auth::verify_password;
use hotelier::config::AppConfig;
use hotelier::repositories::{BookingRepository, RoomImageRepository, RoomRepository, UserRepository};
use hotelier::seeds::seed_if_empty;
use std::sync::Arc;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::setup_test_db;

#[tokio::test]
async fn seed_creates_admin_and_demo_inventory() -> Result<()> {
    let db = setup_test_db().await?;
    let config = AppConfig::default();
    seed_if_empty(&db, &config).await?;

    let db = Arc::new(db);
    let users = UserRepository::new(db.clone());
    let admin = users
        .find_by_login("admin")
        .await?
        .expect("admin account should exist after seeding");
    assert!(verify_password("admin123", &admin.password));

    let rooms = RoomRepository::new(db.clone()).list_all(&config.placeholder_image).await?;
    assert_eq!(rooms.len(), 4);
    assert!(rooms.iter().all(|r| r.images_count >= 1));

    let suite = rooms
        .iter()
        .find(|r| r.room.building == "Seaside" && r.room.room_number == "201")
        .expect("seeded suite should exist");
    let suite_images = RoomImageRepository::new(db.clone())
        .list_for_room(suite.room.id)
        .await?;
    assert_eq!(suite_images.len(), 2);
    assert_eq!(suite_images.iter().filter(|i| i.is_main).count(), 1);

    let pending = BookingRepository::new(db).list_pending().await?;
    assert_eq!(pending.len(), 2);
    Ok(())
}

#[tokio::test]
async fn seeding_is_idempotent() -> Result<()> {
    let db = setup_test_db().await?;
    let config = AppConfig::default();
    seed_if_empty(&db, &config).await?;
    seed_if_empty(&db, &config).await?;

    let db = Arc::new(db);
    assert_eq!(UserRepository::new(db.clone()).count().await?, 1);
    let rooms = RoomRepository::new(db).list_all(&config.placeholder_image).await?;
    assert_eq!(rooms.len(), 4);
    Ok(())
}

#[tokio::test]
async fn demo_inventory_respects_flag() -> Result<()> {
    let db = setup_test_db().await?;
    let config = AppConfig {
        seed_demo_data: false,
        ..Default::default()
    };
    seed_if_empty(&db, &config).await?;

    let db = Arc::new(db);
    assert_eq!(UserRepository::new(db.clone()).count().await?, 1);
    let rooms = RoomRepository::new(db).list_all(&config.placeholder_image).await?;
    assert!(rooms.is_empty());
    Ok(())
}
