//! Latitude/longitude bounding box around a search circle.
//!
//! The box covers the circle: points within the radius fall inside it,
//! and some points outside the radius do too. It only serves as a cheap
//! reject before the exact distance check. Containment is strict, so a
//! point lying exactly on an edge is rejected even when it is within the
//! radius.

use std::f64::consts::{FRAC_PI_2, PI};

use geo_types::{Coord, Rect};
use rstar::AABB;

use super::haversine::{deg_to_rad, rad_to_deg, EARTH_RADIUS_KM};

/// Bounding box in radians. Immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

/// The same bounds expressed in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Strict containment test on radian coordinates.
    ///
    /// Points exactly on an edge are outside.
    #[inline]
    pub fn contains_radians(&self, lat: f64, lon: f64) -> bool {
        lat < self.max_lat && lat > self.min_lat && lon < self.max_lon && lon > self.min_lon
    }

    /// Strict containment test on degree coordinates
    #[inline]
    pub fn contains_degrees(&self, lat: f64, lon: f64) -> bool {
        self.contains_radians(deg_to_rad(lat), deg_to_rad(lon))
    }

    /// True when the longitude bounds were widened to the whole globe
    pub fn spans_all_longitudes(&self) -> bool {
        self.min_lon == -PI && self.max_lon == PI
    }

    pub fn to_degrees(&self) -> DegreeBounds {
        DegreeBounds {
            min_lat: rad_to_deg(self.min_lat),
            max_lat: rad_to_deg(self.max_lat),
            min_lon: rad_to_deg(self.min_lon),
            max_lon: rad_to_deg(self.max_lon),
        }
    }

    /// Degree rectangle with x = longitude, y = latitude
    pub fn to_rect(&self) -> Rect<f64> {
        let b = self.to_degrees();
        Rect::new(
            Coord {
                x: b.min_lon,
                y: b.min_lat,
            },
            Coord {
                x: b.max_lon,
                y: b.max_lat,
            },
        )
    }

    /// R-tree query envelope (`[lon, lat]` degrees), grown by `pad` degrees
    /// on every side so radian/degree rounding never drops a candidate.
    pub fn envelope(&self, pad: f64) -> AABB<[f64; 2]> {
        let b = self.to_degrees();
        AABB::from_corners(
            [b.min_lon - pad, b.min_lat - pad],
            [b.max_lon + pad, b.max_lat + pad],
        )
    }
}

/// Compute the bounding box of the circle of `radius_km` around a center
/// given in degrees.
///
/// Circles reaching over a pole keep every meridian. Circles crossing the
/// antimeridian also get the full longitude range instead of a wrapped
/// pair of intervals, which over-selects near ±180°.
///
/// Clamped edges sit exactly on the pole (±π/2) and on ±π. Because the
/// containment test is strict, points exactly at the pole or on the ±180°
/// meridian are always rejected, even when they are within the radius.
pub fn compute_bounding_box(radius_km: f64, center_lat: f64, center_lon: f64) -> BoundingBox {
    let angular = radius_km / EARTH_RADIUS_KM;
    let lat = deg_to_rad(center_lat);
    let lon = deg_to_rad(center_lon);

    let mut min_lat = lat - angular;
    let mut max_lat = lat + angular;

    let delta_lon = (angular.sin() / lat.cos()).asin();
    let mut min_lon = lon - delta_lon;
    let mut max_lon = lon + delta_lon;

    if max_lat > FRAC_PI_2 {
        max_lat = FRAC_PI_2;
        min_lon = -PI;
        max_lon = PI;
    } else if min_lat < -FRAC_PI_2 {
        min_lat = -FRAC_PI_2;
        min_lon = -PI;
        max_lon = PI;
    }

    // asin of a ratio above 1 is NaN; fall through to the full range
    let outside = |v: f64| v.is_nan() || !(-PI..=PI).contains(&v);
    if outside(min_lon) || outside(max_lon) {
        min_lon = -PI;
        max_lon = PI;
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;
    use geo_types::Point;

    #[test]
    fn test_box_contains_center() {
        let bbox = compute_bounding_box(10.0, 40.7128, -74.0060);
        assert!(bbox.contains_degrees(40.7128, -74.0060));
        assert!(!bbox.spans_all_longitudes());
    }

    #[test]
    fn test_latitude_span() {
        // 20 km of latitude is ~0.18 degrees
        let b = compute_bounding_box(10.0, 40.7128, -74.0060).to_degrees();
        let span = b.max_lat - b.min_lat;
        assert!((span - 0.18).abs() < 0.01, "span {}", span);
        // Longitude span grows with latitude
        assert!(b.max_lon - b.min_lon > span);
    }

    #[test]
    fn test_far_point_rejected() {
        let bbox = compute_bounding_box(10.0, 40.7128, -74.0060);
        assert!(!bbox.contains_degrees(50.0, -80.0));
        assert!(!bbox.contains_degrees(40.7128, -73.0));
    }

    #[test]
    fn test_edges_are_excluded() {
        let bbox = compute_bounding_box(100.0, 10.0, 20.0);
        let lon = deg_to_rad(20.0);
        let lat = deg_to_rad(10.0);
        assert!(!bbox.contains_radians(bbox.max_lat(), lon));
        assert!(!bbox.contains_radians(bbox.min_lat(), lon));
        assert!(!bbox.contains_radians(lat, bbox.max_lon()));
        assert!(!bbox.contains_radians(lat, bbox.min_lon()));
        assert!(bbox.contains_radians(lat, lon));
    }

    #[test]
    fn test_zero_radius_box_is_empty() {
        let bbox = compute_bounding_box(0.0, 0.0, 0.0);
        assert_eq!(bbox.min_lat(), 0.0);
        assert_eq!(bbox.max_lat(), 0.0);
        assert!(!bbox.contains_degrees(0.0, 0.0));
    }

    #[test]
    fn test_north_pole_clamp() {
        let bbox = compute_bounding_box(50.0, 89.9, 10.0);
        assert_eq!(bbox.max_lat(), FRAC_PI_2);
        assert!(bbox.spans_all_longitudes());

        let b = bbox.to_degrees();
        assert!((b.max_lat - 90.0).abs() < 1e-9);
        assert!((b.min_lon + 180.0).abs() < 1e-9);
        assert!((b.max_lon - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_south_pole_clamp() {
        let bbox = compute_bounding_box(50.0, -89.9, -45.0);
        assert_eq!(bbox.min_lat(), -FRAC_PI_2);
        assert!(bbox.spans_all_longitudes());
        assert!(bbox.max_lat() < -FRAC_PI_2 + 0.01);
    }

    #[test]
    fn test_antimeridian_widens_longitude() {
        let bbox = compute_bounding_box(50.0, 0.0, 179.9);
        assert!(bbox.spans_all_longitudes());
        let b = bbox.to_degrees();
        assert!((b.min_lon + 180.0).abs() < 1e-9);
        assert!((b.max_lon - 180.0).abs() < 1e-9);
        // Latitude bounds are untouched
        assert!(b.max_lat < 1.0 && b.min_lat > -1.0);

        let bbox = compute_bounding_box(50.0, 0.0, -179.9);
        assert!(bbox.spans_all_longitudes());
    }

    #[test]
    fn test_huge_radius_covers_globe() {
        let bbox = compute_bounding_box(30_000.0, 0.0, 0.0);
        assert_eq!(bbox.max_lat(), FRAC_PI_2);
        assert!(bbox.spans_all_longitudes());
    }

    #[test]
    fn test_rect_matches_degree_bounds() {
        let bbox = compute_bounding_box(25.0, 52.52, 13.405);
        let rect = bbox.to_rect();
        let b = bbox.to_degrees();
        assert_eq!(rect.min().x, b.min_lon);
        assert_eq!(rect.max().y, b.max_lat);
        assert!(rect.contains(&Point::new(13.405, 52.52)));
        assert!(!rect.contains(&Point::new(14.0, 52.52)));
    }

    #[test]
    fn test_envelope_padding() {
        let bbox = compute_bounding_box(25.0, 52.52, 13.405);
        let b = bbox.to_degrees();
        let env = bbox.envelope(0.5);
        assert_eq!(env.lower(), [b.min_lon - 0.5, b.min_lat - 0.5]);
        assert_eq!(env.upper(), [b.max_lon + 0.5, b.max_lat + 0.5]);
    }
}
