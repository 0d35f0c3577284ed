//! Great-circle proximity filtering.
//!
//! A [`GeoProximityFilter`] precomputes a latitude/longitude bounding box
//! around a center and radius. Candidates are rejected against the box
//! first and only the survivors get an exact haversine distance.

mod bbox;
mod filter;
mod finder;
mod haversine;

pub use bbox::{compute_bounding_box, BoundingBox, DegreeBounds};
pub use filter::GeoProximityFilter;
pub use finder::{nearest, par_within_radius, within_radius, Match, PointIndex};
pub use haversine::{deg_to_rad, haversine_km, rad_to_deg, EARTH_RADIUS_KM};
