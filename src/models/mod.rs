//! Core data models shared by the filter and the finder.

pub mod point;

pub use point::{validate_latitude, validate_longitude, validate_radius_km, GeoPoint, Located};
