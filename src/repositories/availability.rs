//! Availability engine
//!
//! Computes which rooms are free for a requested half-open date interval
//! [checkin, checkout). A room is unavailable when any occupancy row or any
//! approved booking overlaps the interval; pending and rejected bookings
//! never constrain availability. Two intervals [a,b) and [c,d) overlap iff
//! a < d and c < b.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::error::RepositoryError;
use crate::models::booking::{self, BookingStatus, Entity as Booking};
use crate::models::occupancy::{self, Entity as Occupancy};
use crate::models::room::{self, Entity as Room};
use crate::repositories::room::{RoomSummary, summarize};

/// Repository answering availability queries.
#[derive(Debug, Clone)]
pub struct AvailabilityRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl AvailabilityRepository {
    /// Creates a new AvailabilityRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Returns all rooms free over [checkin, checkout), enriched with
    /// their main image (or the placeholder) and image count. An empty
    /// result is a valid answer, not an error.
    pub async fn available_rooms(
        &self,
        checkin: NaiveDate,
        checkout: NaiveDate,
        placeholder: &str,
    ) -> Result<Vec<RoomSummary>, RepositoryError> {
        let mut conflicting = self.occupied_room_ids(checkin, checkout).await?;
        conflicting.extend(self.approved_room_ids(checkin, checkout).await?);
        conflicting.sort_unstable();
        conflicting.dedup();

        let mut query = Room::find()
            .order_by_asc(room::Column::Building)
            .order_by_asc(room::Column::RoomNumber);
        if !conflicting.is_empty() {
            query = query.filter(room::Column::Id.is_not_in(conflicting));
        }
        let rooms = query.all(&*self.db).await?;

        summarize(&self.db, rooms, placeholder).await
    }

    /// Room ids with an occupancy row overlapping the interval.
    async fn occupied_room_ids(
        &self,
        checkin: NaiveDate,
        checkout: NaiveDate,
    ) -> Result<Vec<i32>, RepositoryError> {
        let ids = Occupancy::find()
            .select_only()
            .column(occupancy::Column::RoomId)
            .distinct()
            .filter(occupancy::Column::CheckinDate.lt(checkout))
            .filter(occupancy::Column::CheckoutDate.gt(checkin))
            .into_tuple::<i32>()
            .all(&*self.db)
            .await?;
        Ok(ids)
    }

    /// Room ids with an approved booking overlapping the interval.
    async fn approved_room_ids(
        &self,
        checkin: NaiveDate,
        checkout: NaiveDate,
    ) -> Result<Vec<i32>, RepositoryError> {
        let ids = Booking::find()
            .select_only()
            .column(booking::Column::RoomId)
            .distinct()
            .filter(booking::Column::Status.eq(BookingStatus::Approved))
            .filter(booking::Column::CheckinDate.lt(checkout))
            .filter(booking::Column::CheckoutDate.gt(checkin))
            .into_tuple::<i32>()
            .all(&*self.db)
            .await?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::booking::BookingRepository;
    use crate::repositories::booking::tests::booking_input;
    use crate::repositories::room::RoomRepository;
    use crate::repositories::room::tests::{room_input, setup_db};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn setup_rooms(db: Arc<DatabaseConnection>, count: usize) -> Vec<i32> {
        let repo = RoomRepository::new(db);
        let mut ids = Vec::new();
        for i in 0..count {
            let room = repo
                .create(room_input("A", &format!("10{}", i + 1)), None, "/p.jpg")
                .await
                .unwrap();
            ids.push(room.id);
        }
        ids
    }

    #[tokio::test]
    async fn test_room_with_no_history_is_available() {
        let db = setup_db().await;
        let ids = setup_rooms(db.clone(), 2).await;
        let repo = AvailabilityRepository::new(db);

        let available = repo
            .available_rooms(date("2024-01-15"), date("2024-01-20"), "/p.jpg")
            .await
            .unwrap();

        let got: Vec<i32> = available.iter().map(|s| s.room.id).collect();
        assert_eq!(got, ids);
    }

    #[tokio::test]
    async fn test_approved_booking_blocks_overlapping_range() {
        let db = setup_db().await;
        let ids = setup_rooms(db.clone(), 2).await;
        let bookings = BookingRepository::new(db.clone());
        let repo = AvailabilityRepository::new(db);

        let booking = bookings
            .submit(booking_input(ids[0], "2024-01-15", "2024-01-20"))
            .await
            .unwrap();
        bookings.approve(booking.id).await.unwrap();

        let available = repo
            .available_rooms(date("2024-01-18"), date("2024-01-25"), "/p.jpg")
            .await
            .unwrap();
        let got: Vec<i32> = available.iter().map(|s| s.room.id).collect();
        assert_eq!(got, vec![ids[1]]);
    }

    #[tokio::test]
    async fn test_pending_and_rejected_do_not_block() {
        let db = setup_db().await;
        let ids = setup_rooms(db.clone(), 1).await;
        let bookings = BookingRepository::new(db.clone());
        let repo = AvailabilityRepository::new(db);

        bookings
            .submit(booking_input(ids[0], "2024-01-15", "2024-01-20"))
            .await
            .unwrap();
        let rejected = bookings
            .submit(booking_input(ids[0], "2024-01-15", "2024-01-20"))
            .await
            .unwrap();
        bookings
            .reject(rejected.id, Some("overbooked".to_string()))
            .await
            .unwrap();

        let available = repo
            .available_rooms(date("2024-01-15"), date("2024-01-20"), "/p.jpg")
            .await
            .unwrap();
        assert_eq!(available.len(), 1);
    }

    #[tokio::test]
    async fn test_half_open_intervals_touching_ranges_do_not_overlap() {
        let db = setup_db().await;
        let ids = setup_rooms(db.clone(), 1).await;
        let bookings = BookingRepository::new(db.clone());
        let repo = AvailabilityRepository::new(db);

        let booking = bookings
            .submit(booking_input(ids[0], "2024-01-15", "2024-01-20"))
            .await
            .unwrap();
        bookings.approve(booking.id).await.unwrap();

        // A stay starting on the previous checkout day is allowed.
        let after = repo
            .available_rooms(date("2024-01-20"), date("2024-01-25"), "/p.jpg")
            .await
            .unwrap();
        assert_eq!(after.len(), 1);

        // Ending on the previous checkin day is allowed too.
        let before = repo
            .available_rooms(date("2024-01-10"), date("2024-01-15"), "/p.jpg")
            .await
            .unwrap();
        assert_eq!(before.len(), 1);

        // One night of overlap blocks.
        let overlapping = repo
            .available_rooms(date("2024-01-19"), date("2024-01-21"), "/p.jpg")
            .await
            .unwrap();
        assert!(overlapping.is_empty());
    }
}
