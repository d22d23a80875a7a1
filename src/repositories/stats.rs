//! Statistics repository
//!
//! Aggregate counts for the admin dashboard: staff headcount, rooms per
//! building, occupancy nights per guest country and region, and the
//! booked/free room split for a target date.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::RepositoryError;
use crate::models::occupancy::{self, Entity as Occupancy};
use crate::models::room::{self, Entity as Room};
use crate::models::staff_user::Entity as StaffUser;

/// One labelled count in a grouped aggregate.
#[derive(Debug, Clone, Serialize, FromQueryResult, ToSchema)]
pub struct GroupCount {
    pub label: String,
    pub count: i64,
}

/// Dashboard statistics response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HotelStats {
    pub users_count: u64,
    pub rooms_per_building: Vec<GroupCount>,
    pub guests_per_country: Vec<GroupCount>,
    pub guests_per_region: Vec<GroupCount>,
    /// Date the booked/free split was computed for
    pub date: NaiveDate,
    pub booked_rooms: u64,
    pub free_rooms: u64,
}

/// Repository answering dashboard statistics queries.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl StatsRepository {
    /// Creates a new StatsRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Gathers all dashboard statistics for the given target date.
    pub async fn gather(&self, date: NaiveDate) -> Result<HotelStats, RepositoryError> {
        let users_count = StaffUser::find().count(&*self.db).await?;
        let total_rooms = Room::find().count(&*self.db).await?;

        let rooms_per_building = Room::find()
            .select_only()
            .column_as(room::Column::Building, "label")
            .column_as(room::Column::Id.count(), "count")
            .group_by(room::Column::Building)
            .order_by_asc(room::Column::Building)
            .into_model::<GroupCount>()
            .all(&*self.db)
            .await?;

        let guests_per_country = self.occupancy_group(occupancy::Column::Country).await?;
        let guests_per_region = self.occupancy_group(occupancy::Column::Region).await?;

        let booked_rooms = self.booked_rooms_on(date).await?;
        let free_rooms = total_rooms.saturating_sub(booked_rooms);

        Ok(HotelStats {
            users_count,
            rooms_per_building,
            guests_per_country,
            guests_per_region,
            date,
            booked_rooms,
            free_rooms,
        })
    }

    /// Distinct rooms with an occupancy row covering the date.
    async fn booked_rooms_on(&self, date: NaiveDate) -> Result<u64, RepositoryError> {
        let ids: Vec<i32> = Occupancy::find()
            .select_only()
            .column(occupancy::Column::RoomId)
            .distinct()
            .filter(occupancy::Column::CheckinDate.lte(date))
            .filter(occupancy::Column::CheckoutDate.gt(date))
            .into_tuple::<i32>()
            .all(&*self.db)
            .await?;
        Ok(ids.len() as u64)
    }

    /// Occupancy rows grouped by a nullable label column; unset rows are
    /// excluded.
    async fn occupancy_group(
        &self,
        column: occupancy::Column,
    ) -> Result<Vec<GroupCount>, RepositoryError> {
        let groups = Occupancy::find()
            .select_only()
            .column_as(column, "label")
            .column_as(occupancy::Column::Id.count(), "count")
            .filter(column.is_not_null())
            .group_by(column)
            .order_by_asc(column)
            .into_model::<GroupCount>()
            .all(&*self.db)
            .await?;
        Ok(groups)
    }
}
