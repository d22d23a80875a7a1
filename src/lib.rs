//! # Hotelier Library
//!
//! This library provides the core functionality for the hotel booking
//! administration backend, including handlers, models, repositories and
//! server configuration.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;
pub mod repositories;
pub mod seeds;
pub mod server;
pub mod telemetry;
pub use migration;
