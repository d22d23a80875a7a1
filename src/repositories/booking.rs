//! Booking repository for database operations
//!
//! Models the booking request lifecycle: public submission creates a
//! pending request, staff approve or reject it exactly once. Approval
//! expands the stay into one occupancy row per night inside a single
//! transaction, so a crash can never leave nights persisted for a booking
//! still advertised as pending.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::models::booking::{self, BookingStatus, Entity as Booking};
use crate::models::occupancy;
use crate::models::room::{self, Entity as Room};

/// Fields accepted from a public booking submission.
#[derive(Debug, Clone)]
pub struct BookingRequestInput {
    pub client_surname: String,
    pub client_name: String,
    pub client_patronymic: Option<String>,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub room_id: i32,
}

impl BookingRequestInput {
    fn validate(&self) -> Result<(), RepositoryError> {
        if self.client_surname.trim().is_empty() {
            return Err(RepositoryError::validation("surname is required"));
        }
        if self.client_name.trim().is_empty() {
            return Err(RepositoryError::validation("name is required"));
        }
        if self.client_phone.trim().is_empty() {
            return Err(RepositoryError::validation("phone is required"));
        }
        Ok(())
    }
}

/// Repository for booking database operations
#[derive(Debug, Clone)]
pub struct BookingRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl BookingRepository {
    /// Creates a new BookingRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a pending booking request. Availability is deliberately not
    /// checked here; overlapping submissions are resolved by staff at
    /// approval time.
    pub async fn submit(
        &self,
        input: BookingRequestInput,
    ) -> Result<booking::Model, RepositoryError> {
        input.validate()?;

        let room = Room::find_by_id(input.room_id).one(&*self.db).await?;
        if room.is_none() {
            return Err(RepositoryError::not_found(format!(
                "Room {} not found",
                input.room_id
            )));
        }

        let booking = booking::ActiveModel {
            id: NotSet,
            client_surname: Set(input.client_surname),
            client_name: Set(input.client_name),
            client_patronymic: Set(input.client_patronymic),
            client_phone: Set(input.client_phone),
            client_email: Set(input.client_email),
            checkin_date: Set(input.checkin_date),
            checkout_date: Set(input.checkout_date),
            room_id: Set(input.room_id),
            status: Set(BookingStatus::Pending),
            rejection_reason: Set(None),
            created_at: Set(Utc::now().into()),
        }
        .insert(&*self.db)
        .await?;

        tracing::info!(booking_id = booking.id, room_id = booking.room_id, "Booking request submitted");
        Ok(booking)
    }

    /// Finds a booking by its id
    pub async fn find_by_id(&self, id: i32) -> Result<Option<booking::Model>, RepositoryError> {
        let booking = Booking::find_by_id(id).one(&*self.db).await?;
        Ok(booking)
    }

    /// Lists pending bookings with their rooms, newest first.
    pub async fn list_pending(
        &self,
    ) -> Result<Vec<(booking::Model, Option<room::Model>)>, RepositoryError> {
        let bookings = Booking::find()
            .filter(booking::Column::Status.eq(BookingStatus::Pending))
            .find_also_related(Room)
            .order_by_desc(booking::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(bookings)
    }

    /// Approves a pending booking: inserts one occupancy row per night of
    /// the stay and flips the status, all in one transaction.
    ///
    /// Every generated row keeps the booking's original checkout date; the
    /// night it stands for is its checkin date. No cross-check against
    /// other approved bookings is made, matching the established admin
    /// workflow where staff resolve overlaps by hand.
    pub async fn approve(&self, id: i32) -> Result<booking::Model, RepositoryError> {
        let txn = self.db.begin().await?;

        let booking = Booking::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("Booking {} not found", id)))?;

        if booking.status != BookingStatus::Pending {
            return Err(RepositoryError::conflict(format!(
                "Booking {} has already been resolved",
                id
            )));
        }

        let nights = (booking.checkout_date - booking.checkin_date)
            .num_days()
            .max(0) as u64;
        for i in 0..nights {
            let night = booking
                .checkin_date
                .checked_add_days(Days::new(i))
                .ok_or_else(|| RepositoryError::validation("checkin date out of range"))?;
            occupancy::ActiveModel {
                id: NotSet,
                surname: Set(booking.client_surname.clone()),
                name: Set(booking.client_name.clone()),
                patronymic: Set(booking.client_patronymic.clone()),
                phone: Set(booking.client_phone.clone()),
                email: Set(booking.client_email.clone()),
                checkin_date: Set(night),
                checkout_date: Set(booking.checkout_date),
                room_id: Set(booking.room_id),
                current_room_id: Set(Some(booking.room_id)),
                checkout_room_id: Set(None),
                comments: Set(None),
                chronotype: Set(None),
                country: Set(None),
                region: Set(None),
            }
            .insert(&txn)
            .await?;
        }

        let mut active: booking::ActiveModel = booking.into();
        active.status = Set(BookingStatus::Approved);
        let approved = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(booking_id = approved.id, nights, "Booking approved");
        Ok(approved)
    }

    /// Rejects a pending booking, storing the supplied reason. Unknown ids
    /// fail with NotFound; already-resolved bookings with Conflict.
    pub async fn reject(
        &self,
        id: i32,
        reason: Option<String>,
    ) -> Result<booking::Model, RepositoryError> {
        let booking = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("Booking {} not found", id)))?;

        if booking.status != BookingStatus::Pending {
            return Err(RepositoryError::conflict(format!(
                "Booking {} has already been resolved",
                id
            )));
        }

        let mut active: booking::ActiveModel = booking.into();
        active.status = Set(BookingStatus::Rejected);
        active.rejection_reason = Set(reason);
        let rejected = active.update(&*self.db).await?;

        tracing::info!(booking_id = rejected.id, "Booking rejected");
        Ok(rejected)
    }
}
