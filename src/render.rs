//! HTML fragment rendering
//!
//! View models and askama templates for the partial-page updates the admin
//! panel and the public search use, plus the full page shells.

use askama::Template;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::models::booking;
use crate::models::room;
use crate::repositories::RoomSummary;

/// Renders a template to an HTML response, mapping render failures to a
/// plain 500.
pub fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Template render error: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// One room card or table row.
pub struct RoomCardView {
    pub id: i32,
    pub building: String,
    pub room_number: String,
    pub double_beds: i32,
    pub single_beds: i32,
    pub amenities: Vec<&'static str>,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub description: String,
    pub price: String,
    pub main_image: String,
    pub images_count: usize,
}

impl From<RoomSummary> for RoomCardView {
    fn from(summary: RoomSummary) -> Self {
        let room = summary.room;
        let mut amenities = Vec::new();
        if room.kettle {
            amenities.push("Kettle");
        }
        if room.tv {
            amenities.push("TV");
        }
        if room.balcony {
            amenities.push("Balcony");
        }
        if room.air_conditioning {
            amenities.push("Air conditioning");
        }

        Self {
            id: room.id,
            building: room.building,
            room_number: room.room_number,
            double_beds: room.double_beds,
            single_beds: room.single_beds,
            amenities,
            status_label: room.status.label(),
            status_class: status_class(room.status),
            description: room.description.unwrap_or_default(),
            price: format!("{:.2}", room.price_per_night),
            main_image: summary.main_image,
            images_count: summary.images_count,
        }
    }
}

fn status_class(status: room::RoomStatus) -> &'static str {
    match status {
        room::RoomStatus::Vip => "vip",
        room::RoomStatus::Standard => "standard",
        room::RoomStatus::Economy => "economy",
    }
}

/// One pending booking card.
pub struct BookingCardView {
    pub id: i32,
    pub client_full_name: String,
    pub phone: String,
    pub email: String,
    pub checkin: String,
    pub checkout: String,
    pub room_label: String,
    pub created_at: String,
}

impl BookingCardView {
    pub fn from_booking(booking: booking::Model, room: Option<room::Model>) -> Self {
        let mut client_full_name = format!("{} {}", booking.client_surname, booking.client_name);
        if let Some(patronymic) = &booking.client_patronymic {
            client_full_name.push(' ');
            client_full_name.push_str(patronymic);
        }

        let room_label = match room {
            Some(room) => format!("Building {}, room {}", room.building, room.room_number),
            None => format!("Room #{}", booking.room_id),
        };

        Self {
            id: booking.id,
            client_full_name,
            phone: booking.client_phone,
            email: booking.client_email.unwrap_or_default(),
            checkin: booking.checkin_date.format("%Y-%m-%d").to_string(),
            checkout: booking.checkout_date.format("%Y-%m-%d").to_string(),
            room_label,
            created_at: booking.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "available_rooms.html")]
pub struct AvailableRoomsTemplate {
    pub rooms: Vec<RoomCardView>,
}

#[derive(Template)]
#[template(path = "rooms_table.html")]
pub struct RoomsTableTemplate {
    pub rooms: Vec<RoomCardView>,
}

#[derive(Template)]
#[template(path = "pending_bookings.html")]
pub struct PendingBookingsTemplate {
    pub bookings: Vec<BookingCardView>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub hotel_name: String,
    pub hotel_address: String,
    pub hotel_phone: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub hotel_name: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub hotel_name: String,
}

#[derive(Template)]
#[template(path = "root.html")]
pub struct RootTemplate {
    pub hotel_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i32, description: &str) -> RoomCardView {
        RoomCardView {
            id,
            building: "A".to_string(),
            room_number: "101".to_string(),
            double_beds: 1,
            single_beds: 1,
            amenities: vec!["TV"],
            status_label: "Standard",
            status_class: "standard",
            description: description.to_string(),
            price: "120.00".to_string(),
            main_image: "/images/a.jpg".to_string(),
            images_count: 2,
        }
    }

    #[test]
    fn test_available_rooms_empty_state() {
        let html = AvailableRoomsTemplate { rooms: vec![] }.render().unwrap();
        assert!(html.contains("No rooms are available"));
    }

    #[test]
    fn test_available_rooms_escapes_description() {
        let html = AvailableRoomsTemplate {
            rooms: vec![card(1, "<script>alert(1)</script>")],
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("data-room-id=\"1\""));
    }

    #[test]
    fn test_pending_bookings_fragment() {
        let html = PendingBookingsTemplate {
            bookings: vec![BookingCardView {
                id: 7,
                client_full_name: "Ivanov Ivan".to_string(),
                phone: "+7 900".to_string(),
                email: String::new(),
                checkin: "2024-01-15".to_string(),
                checkout: "2024-01-20".to_string(),
                room_label: "Building A, room 101".to_string(),
                created_at: "2024-01-10 12:00".to_string(),
            }],
        }
        .render()
        .unwrap();
        assert!(html.contains("/api/admin/bookings/7/approve"));
        assert!(html.contains("Ivanov Ivan"));
    }

    #[test]
    fn test_rooms_table_lists_rows() {
        let html = RoomsTableTemplate {
            rooms: vec![card(1, ""), card(2, "")],
        }
        .render()
        .unwrap();
        assert_eq!(html.matches("<tr data-room-id=").count(), 2);
    }
}
