//! # Repository Layer
//!
//! Repository structs encapsulating SeaORM operations for the hotel
//! schema. Multi-step writes (booking approval, main-image reassignment)
//! run inside explicit transactions here rather than in the handlers.

pub mod availability;
pub mod booking;
pub mod room;
pub mod room_image;
pub mod stats;
pub mod user;

pub use availability::AvailabilityRepository;
pub use booking::{BookingRepository, BookingRequestInput};
pub use room::{RoomInput, RoomRepository, RoomSummary};
pub use room_image::RoomImageRepository;
pub use stats::{HotelStats, StatsRepository};
pub use user::{NewUser, UserRepository, UserUpdate};
