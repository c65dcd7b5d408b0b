//! Service Booking Backend
//!
//! Backend for the service appointment widget. It offers the bookable dates
//! and time slots from a static rule table and forwards completed bookings to
//! a remote endpoint as JSON.
//!
//! # Modules
//!
//! - `services::availability`: candidate dates and time slots from the rule table
//! - `services::assembler`: normalized booking records
//! - `client`: transport to the booking endpoint
//! - `identity`: per-request requester identity
//! - `handlers` / `routes`: the JSON API used by the widget page

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod routes;
pub mod services;


// Re-export the main API types for ease of use
pub use client::{BookingEndpointClient, BookingTransport, SimulatedTransport};
pub use config::AppConfig;
pub use error::{BookingError, BookingResult};
pub use handlers::api::AppState;
pub use routes::{create_app, create_router, request_timeout_for};
