//! Room image repository for database operations
//!
//! Encapsulates the media side of inventory management. Every multi-step
//! write (clear-then-set of the main flag, delete-then-promote) runs in a
//! single transaction so the at-most-one-main invariant holds even across
//! failures.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

use crate::error::RepositoryError;
use crate::models::room::Entity as Room;
use crate::models::room_image::{self, Entity as RoomImage};

/// Repository for room image database operations
#[derive(Debug, Clone)]
pub struct RoomImageRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl RoomImageRepository {
    /// Creates a new RoomImageRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists a room's images, main image first, then newest.
    pub async fn list_for_room(
        &self,
        room_id: i32,
    ) -> Result<Vec<room_image::Model>, RepositoryError> {
        let images = RoomImage::find()
            .filter(room_image::Column::RoomId.eq(room_id))
            .order_by_desc(room_image::Column::IsMain)
            .order_by_desc(room_image::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(images)
    }

    /// Adds an image to a room. When flagged main, every other image of
    /// the room loses its main flag in the same transaction.
    pub async fn add(
        &self,
        room_id: i32,
        image_url: String,
        is_main: bool,
    ) -> Result<room_image::Model, RepositoryError> {
        if image_url.trim().is_empty() {
            return Err(RepositoryError::validation("image_url is required"));
        }

        let room = Room::find_by_id(room_id).one(&*self.db).await?;
        if room.is_none() {
            return Err(RepositoryError::not_found(format!(
                "Room {} not found",
                room_id
            )));
        }

        let txn = self.db.begin().await?;

        if is_main {
            clear_main_flag(&txn, room_id).await?;
        }

        let image = room_image::ActiveModel {
            id: NotSet,
            room_id: Set(room_id),
            image_url: Set(image_url),
            is_main: Set(is_main),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(image)
    }

    /// Deletes an image, failing with NotFound when it does not belong to
    /// the given room. If the deleted image was main and others remain,
    /// exactly one remaining image is promoted.
    pub async fn delete(&self, room_id: i32, image_id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let image = RoomImage::find_by_id(image_id)
            .filter(room_image::Column::RoomId.eq(room_id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                RepositoryError::not_found(format!(
                    "Image {} not found for room {}",
                    image_id, room_id
                ))
            })?;

        let was_main = image.is_main;
        RoomImage::delete_by_id(image.id).exec(&txn).await?;

        if was_main {
            let successor = RoomImage::find()
                .filter(room_image::Column::RoomId.eq(room_id))
                .order_by_asc(room_image::Column::Id)
                .limit(1)
                .one(&txn)
                .await?;
            if let Some(successor) = successor {
                let mut active: room_image::ActiveModel = successor.into();
                active.is_main = Set(true);
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;
        Ok(())
    }

    /// Makes the given image the room's main image: clears the flag on all
    /// of the room's images, then sets it on the target. Fails with
    /// NotFound when the image does not belong to the room. Idempotent.
    pub async fn set_main(&self, room_id: i32, image_id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let image = RoomImage::find_by_id(image_id)
            .filter(room_image::Column::RoomId.eq(room_id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                RepositoryError::not_found(format!(
                    "Image {} not found for room {}",
                    image_id, room_id
                ))
            })?;

        clear_main_flag(&txn, room_id).await?;

        let mut active: room_image::ActiveModel = image.into();
        active.is_main = Set(true);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}

async fn clear_main_flag<C: sea_orm::ConnectionTrait>(
    conn: &C,
    room_id: i32,
) -> Result<(), RepositoryError> {
    RoomImage::update_many()
        .col_expr(room_image::Column::IsMain, Expr::value(false))
        .filter(room_image::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    Ok(())
}
