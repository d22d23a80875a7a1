//! Room repository for database operations
//!
//! This module provides the RoomRepository struct which encapsulates
//! SeaORM operations for the rooms table, including the media enrichment
//! (main image + image count) the listing surfaces need.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use crate::error::RepositoryError;
use crate::models::room::{self, Entity as Room, RoomStatus};
use crate::models::room_image::{self, Entity as RoomImage};

/// A room together with its representative image and image count.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    #[serde(flatten)]
    pub room: room::Model,
    pub main_image: String,
    pub images_count: usize,
}

/// Mutable attribute set accepted by create and update.
#[derive(Debug, Clone)]
pub struct RoomInput {
    pub building: String,
    pub room_number: String,
    pub double_beds: i32,
    pub single_beds: i32,
    pub kettle: bool,
    pub tv: bool,
    pub balcony: bool,
    pub air_conditioning: bool,
    pub rooms_count: i32,
    pub status: RoomStatus,
    pub description: Option<String>,
    pub price_per_night: f64,
}

impl RoomInput {
    fn validate(&self) -> Result<(), RepositoryError> {
        if self.building.trim().is_empty() {
            return Err(RepositoryError::validation("building is required"));
        }
        if self.room_number.trim().is_empty() {
            return Err(RepositoryError::validation("room_number is required"));
        }
        if self.price_per_night <= 0.0 {
            return Err(RepositoryError::validation(
                "price_per_night must be positive",
            ));
        }
        if self.rooms_count < 1 {
            return Err(RepositoryError::validation(
                "rooms_count must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Repository for room database operations
#[derive(Debug, Clone)]
pub struct RoomRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl RoomRepository {
    /// Creates a new RoomRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a room by its id
    pub async fn find_by_id(&self, id: i32) -> Result<Option<room::Model>, RepositoryError> {
        let room = Room::find_by_id(id).one(&*self.db).await?;
        Ok(room)
    }

    /// Returns a single room with its media enrichment, or NotFound.
    pub async fn get_with_media(
        &self,
        id: i32,
        placeholder: &str,
    ) -> Result<RoomSummary, RepositoryError> {
        let room = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("Room {} not found", id)))?;

        let mut summaries = summarize(&self.db, vec![room], placeholder).await?;
        // summarize preserves the input, so exactly one summary comes back
        summaries
            .pop()
            .ok_or_else(|| RepositoryError::not_found(format!("Room {} not found", id)))
    }

    /// Lists all rooms with media enrichment, ordered by building then
    /// room number.
    pub async fn list_all(&self, placeholder: &str) -> Result<Vec<RoomSummary>, RepositoryError> {
        let rooms = Room::find()
            .order_by_asc(room::Column::Building)
            .order_by_asc(room::Column::RoomNumber)
            .all(&*self.db)
            .await?;
        summarize(&self.db, rooms, placeholder).await
    }

    /// Creates a room and attaches exactly one main image: the supplied
    /// URL, or the placeholder when none is given. Both inserts happen in
    /// one transaction.
    pub async fn create(
        &self,
        input: RoomInput,
        image_url: Option<String>,
        placeholder: &str,
    ) -> Result<room::Model, RepositoryError> {
        input.validate()?;

        let now = Utc::now().into();
        let txn = self.db.begin().await?;

        let room = room::ActiveModel {
            id: NotSet,
            building: Set(input.building),
            room_number: Set(input.room_number),
            double_beds: Set(input.double_beds),
            single_beds: Set(input.single_beds),
            kettle: Set(input.kettle),
            tv: Set(input.tv),
            balcony: Set(input.balcony),
            air_conditioning: Set(input.air_conditioning),
            rooms_count: Set(input.rooms_count),
            status: Set(input.status),
            description: Set(input.description),
            price_per_night: Set(input.price_per_night),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let url = image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| placeholder.to_string());
        room_image::ActiveModel {
            id: NotSet,
            room_id: Set(room.id),
            image_url: Set(url),
            is_main: Set(true),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(room_id = room.id, building = %room.building, "Created room");
        Ok(room)
    }

    /// Replaces the full mutable attribute set of a room and bumps its
    /// updated timestamp. Fails with NotFound for unknown ids.
    pub async fn update(&self, id: i32, input: RoomInput) -> Result<room::Model, RepositoryError> {
        input.validate()?;

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("Room {} not found", id)))?;

        let mut active: room::ActiveModel = existing.into();
        active.building = Set(input.building);
        active.room_number = Set(input.room_number);
        active.double_beds = Set(input.double_beds);
        active.single_beds = Set(input.single_beds);
        active.kettle = Set(input.kettle);
        active.tv = Set(input.tv);
        active.balcony = Set(input.balcony);
        active.air_conditioning = Set(input.air_conditioning);
        active.rooms_count = Set(input.rooms_count);
        active.status = Set(input.status);
        active.description = Set(input.description);
        active.price_per_night = Set(input.price_per_night);
        active.updated_at = Set(Utc::now().into());

        let room = active.update(&*self.db).await?;
        Ok(room)
    }

    /// Deletes a room; its images go with it via the FK cascade.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = Room::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(format!("Room {} not found", id)));
        }
        tracing::info!(room_id = id, "Deleted room");
        Ok(())
    }
}

/// Attaches the main image URL (or the placeholder) and image count to each
/// room, preserving input order.
pub(crate) async fn summarize(
    db: &DatabaseConnection,
    rooms: Vec<room::Model>,
    placeholder: &str,
) -> Result<Vec<RoomSummary>, RepositoryError> {
    if rooms.is_empty() {
        return Ok(Vec::new());
    }

    let room_ids: Vec<i32> = rooms.iter().map(|r| r.id).collect();
    let images = RoomImage::find()
        .filter(room_image::Column::RoomId.is_in(room_ids))
        .all(db)
        .await?;

    let mut main_by_room: HashMap<i32, String> = HashMap::new();
    let mut count_by_room: HashMap<i32, usize> = HashMap::new();
    for image in images {
        *count_by_room.entry(image.room_id).or_default() += 1;
        if image.is_main {
            main_by_room.insert(image.room_id, image.image_url);
        }
    }

    Ok(rooms
        .into_iter()
        .map(|room| {
            let main_image = main_by_room
                .remove(&room.id)
                .unwrap_or_else(|| placeholder.to_string());
            let images_count = count_by_room.get(&room.id).copied().unwrap_or(0);
            RoomSummary {
                room,
                main_image,
                images_count,
            }
        })
        .collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    pub(crate) fn room_input(building: &str, number: &str) -> RoomInput {
        RoomInput {
            building: building.to_string(),
            room_number: number.to_string(),
            double_beds: 1,
            single_beds: 0,
            kettle: false,
            tv: true,
            balcony: false,
            air_conditioning: false,
            rooms_count: 1,
            status: RoomStatus::Standard,
            description: None,
            price_per_night: 120.0,
        }
    }

    pub(crate) async fn setup_db() -> Arc<DatabaseConnection> {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        Arc::new(db)
    }

    #[tokio::test]
    async fn test_create_attaches_single_main_image() {
        let db = setup_db().await;
        let repo = RoomRepository::new(db.clone());

        let room = repo
            .create(room_input("A", "101"), None, "/images/placeholder.jpg")
            .await
            .unwrap();

        let images = RoomImage::find()
            .filter(room_image::Column::RoomId.eq(room.id))
            .all(&*db)
            .await
            .unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].is_main);
        assert_eq!(images[0].image_url, "/images/placeholder.jpg");
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_price() {
        let db = setup_db().await;
        let repo = RoomRepository::new(db);

        let mut input = room_input("A", "101");
        input.price_per_night = 0.0;
        let err = repo.create(input, None, "/p.jpg").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_attributes() {
        let db = setup_db().await;
        let repo = RoomRepository::new(db);

        let room = repo
            .create(room_input("A", "101"), None, "/p.jpg")
            .await
            .unwrap();

        let mut input = room_input("B", "202");
        input.status = RoomStatus::Vip;
        input.price_per_night = 300.0;
        let updated = repo.update(room.id, input).await.unwrap();

        assert_eq!(updated.building, "B");
        assert_eq!(updated.room_number, "202");
        assert_eq!(updated.status, RoomStatus::Vip);
        assert!(updated.updated_at >= room.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_room_is_not_found() {
        let db = setup_db().await;
        let repo = RoomRepository::new(db);

        let err = repo.update(999, room_input("A", "101")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_images() {
        let db = setup_db().await;
        let repo = RoomRepository::new(db.clone());

        let room = repo
            .create(room_input("A", "101"), Some("/a.jpg".to_string()), "/p.jpg")
            .await
            .unwrap();
        repo.delete(room.id).await.unwrap();

        assert!(repo.find_by_id(room.id).await.unwrap().is_none());
        let images = RoomImage::find()
            .filter(room_image::Column::RoomId.eq(room.id))
            .all(&*db)
            .await
            .unwrap();
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_room_is_not_found() {
        let db = setup_db().await;
        let repo = RoomRepository::new(db);
        let err = repo.delete(42).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_all_orders_and_enriches() {
        let db = setup_db().await;
        let repo = RoomRepository::new(db);

        repo.create(room_input("B", "201"), Some("/b.jpg".to_string()), "/p.jpg")
            .await
            .unwrap();
        repo.create(room_input("A", "102"), None, "/p.jpg")
            .await
            .unwrap();

        let rooms = repo.list_all("/p.jpg").await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room.building, "A");
        assert_eq!(rooms[0].main_image, "/p.jpg");
        assert_eq!(rooms[1].main_image, "/b.jpg");
        assert_eq!(rooms[1].images_count, 1);
    }
}
