//! Radius - great-circle proximity filtering
//!
//! This library provides the proximity filter and finder used by the
//! `nearby` binary.

pub mod error;
pub mod models;
pub mod proximity;

pub use error::{GeoError, Result};
pub use models::{GeoPoint, Located};
pub use proximity::{deg_to_rad, GeoProximityFilter};
