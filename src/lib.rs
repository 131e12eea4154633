//! Headless client for a virtual apartment tour.
//!
//! A visitor registers through a gate, then browses one listing through a
//! summary, a floor plan and a room-by-room photo / 360° tour with a
//! simulated time-of-day lighting filter. The listing backend is reached
//! through [`api::ListingApi`].

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod tour;

pub use config::Config;
pub use error::{Result, TourError};
