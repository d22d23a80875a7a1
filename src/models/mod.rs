//! # Data Models
//!
//! SeaORM entity models for the five-table hotel schema, plus the basic
//! service information response.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod booking;
pub mod occupancy;
pub mod room;
pub mod room_image;
pub mod staff_user;

pub use booking::Entity as Booking;
pub use occupancy::Entity as Occupancy;
pub use room::Entity as Room;
pub use room_image::Entity as RoomImage;
pub use staff_user::Entity as StaffUser;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "hotelier".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
