//! Geographic point in degrees.

use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::{GeoError, Result};

/// Geographic point (lat/lon, degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point without range checks
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a point, rejecting coordinates outside the valid ranges
    pub fn validated(lat: f64, lon: f64) -> Result<Self> {
        Ok(Self {
            lat: validate_latitude(lat)?,
            lon: validate_longitude(lon)?,
        })
    }

    /// `[lon, lat]` pair, the axis order used by the spatial index
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        GeoPoint::new(p.y(), p.x())
    }
}

/// Anything that sits at a geographic position.
///
/// Implemented by candidate records so the finder can search them
/// without copying coordinates out first.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Located> Located for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

fn ensure_within(
    value: f64,
    limit: f64,
    name: &'static str,
    range: &'static str,
) -> Result<f64> {
    // NaN fails both comparisons, so test the accepted range positively
    if value >= -limit && value <= limit {
        Ok(value)
    } else if value.is_nan() {
        Err(GeoError::invalid(name, value, "must be a number"))
    } else {
        Err(GeoError::invalid(name, value, range))
    }
}

pub fn validate_latitude(value: f64) -> Result<f64> {
    ensure_within(value, 90.0, "latitude", "must be within [-90, 90]")
}

pub fn validate_longitude(value: f64) -> Result<f64> {
    ensure_within(value, 180.0, "longitude", "must be within [-180, 180]")
}

/// Radius must be a finite, non-negative number of kilometers
pub fn validate_radius_km(value: f64) -> Result<f64> {
    if value.is_nan() || value.is_infinite() {
        return Err(GeoError::invalid("radius_km", value, "must be finite"));
    }
    if value < 0.0 {
        return Err(GeoError::invalid("radius_km", value, "must not be negative"));
    }
    Ok(value)
}
