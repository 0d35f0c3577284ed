//! Proximity filter around a fixed center and radius.

use tracing::debug;

use super::bbox::{compute_bounding_box, BoundingBox};
use super::haversine::haversine_km;
use crate::error::Result;
use crate::models::{validate_latitude, validate_longitude, validate_radius_km, GeoPoint};

/// Finds points within a radius of a center.
///
/// The bounding box is computed once at construction. Callers test
/// candidates against it with [`is_within_bounding_box`] and only run the
/// exact [`distance_to`] on the survivors.
///
/// [`is_within_bounding_box`]: GeoProximityFilter::is_within_bounding_box
/// [`distance_to`]: GeoProximityFilter::distance_to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoProximityFilter {
    center: GeoPoint,
    radius_km: f64,
    bbox: BoundingBox,
}

impl GeoProximityFilter {
    /// Build a filter for `radius_km` around (`center_lat`, `center_lon`) in degrees.
    ///
    /// Rejects a negative or non-finite radius and coordinates outside
    /// [-90, 90] / [-180, 180].
    pub fn new(radius_km: f64, center_lat: f64, center_lon: f64) -> Result<Self> {
        let radius_km = validate_radius_km(radius_km)?;
        let center = GeoPoint::new(
            validate_latitude(center_lat)?,
            validate_longitude(center_lon)?,
        );
        let bbox = compute_bounding_box(radius_km, center.lat, center.lon);

        debug!(
            "Proximity filter at ({}, {}) r={}km: bbox {:?}",
            center.lat,
            center.lon,
            radius_km,
            bbox.to_degrees()
        );

        Ok(Self {
            center,
            radius_km,
            bbox,
        })
    }

    pub fn around(center: GeoPoint, radius_km: f64) -> Result<Self> {
        Self::new(radius_km, center.lat, center.lon)
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Great-circle distance in km from the center to a point in degrees.
    ///
    /// The point is not validated; latitudes beyond ±90° give meaningless
    /// values but never panic.
    pub fn distance_to(&self, lat: f64, lon: f64) -> f64 {
        haversine_km(self.center.lat, self.center.lon, lat, lon)
    }

    /// Cheap pre-filter. Points on the box edge are outside.
    pub fn is_within_bounding_box(&self, lat: f64, lon: f64) -> bool {
        self.bbox.contains_degrees(lat, lon)
    }

    /// Run both stages for one point: box reject, then exact distance.
    ///
    /// Returns the distance when the point lies within the radius.
    pub fn matches(&self, lat: f64, lon: f64) -> Option<f64> {
        if !self.is_within_bounding_box(lat, lon) {
            return None;
        }
        let distance = self.distance_to(lat, lon);
        (distance <= self.radius_km).then_some(distance)
    }
}
