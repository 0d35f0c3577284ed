//! Two-stage search over a set of candidates.
//!
//! Every search rejects on the bounding box first and computes the exact
//! distance only for the survivors. Results come back ordered by distance.

use geo::BoundingRect;
use geo_types::{MultiPoint, Point, Rect};
use rayon::prelude::*;
use rstar::{RTree, RTreeObject, AABB};
use tracing::{debug, info};

use super::filter::GeoProximityFilter;
use crate::models::Located;

/// Envelope padding in degrees for index queries.
///
/// The exact strict test runs after the index lookup, so this only has to
/// cover radian/degree rounding.
const ENVELOPE_PAD_DEG: f64 = 1e-9;

/// A candidate that passed both stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a, T> {
    pub item: &'a T,
    pub distance_km: f64,
}

fn sort_by_distance<T>(matches: &mut [Match<'_, T>]) {
    matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

/// All candidates within the filter radius, nearest first
pub fn within_radius<'a, T: Located>(
    filter: &GeoProximityFilter,
    candidates: &'a [T],
) -> Vec<Match<'a, T>> {
    let mut in_box = 0usize;
    let mut matches: Vec<Match<'a, T>> = candidates
        .iter()
        .filter(|c| {
            let p = c.location();
            let keep = filter.is_within_bounding_box(p.lat, p.lon);
            in_box += keep as usize;
            keep
        })
        .filter_map(|c| {
            let p = c.location();
            let distance_km = filter.distance_to(p.lat, p.lon);
            (distance_km <= filter.radius_km()).then_some(Match {
                item: c,
                distance_km,
            })
        })
        .collect();

    sort_by_distance(&mut matches);

    debug!(
        "Scanned {} candidates: {} in bbox, {} within {}km",
        candidates.len(),
        in_box,
        matches.len(),
        filter.radius_km()
    );

    matches
}

/// Same result as [`within_radius`], split across the rayon pool
pub fn par_within_radius<'a, T: Located + Sync>(
    filter: &GeoProximityFilter,
    candidates: &'a [T],
) -> Vec<Match<'a, T>> {
    let mut matches: Vec<Match<'a, T>> = candidates
        .par_iter()
        .filter_map(|c| {
            let p = c.location();
            filter
                .matches(p.lat, p.lon)
                .map(|distance_km| Match {
                    item: c,
                    distance_km,
                })
        })
        .collect();

    // Stable sort keeps input order for ties, like the sequential path
    sort_by_distance(&mut matches);

    debug!(
        "Parallel scan of {} candidates: {} within {}km",
        candidates.len(),
        matches.len(),
        filter.radius_km()
    );

    matches
}

/// The `limit` nearest candidates within the radius
pub fn nearest<'a, T: Located>(
    filter: &GeoProximityFilter,
    candidates: &'a [T],
    limit: usize,
) -> Vec<Match<'a, T>> {
    let mut matches = within_radius(filter, candidates);
    matches.truncate(limit);
    matches
}

/// Wrapper for R-tree indexing of candidates
#[derive(Debug, Clone, Copy)]
struct IndexedCandidate {
    slot: usize,
    position: [f64; 2],
}

impl RTreeObject for IndexedCandidate {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Spatial index over a fixed set of candidates.
///
/// The R-tree narrows the candidates to the bounding box envelope; the
/// strict box test and the distance check then run as in [`within_radius`],
/// so both paths return the same matches.
pub struct PointIndex<T> {
    items: Vec<T>,
    tree: RTree<IndexedCandidate>,
}

impl<T: Located> PointIndex<T> {
    /// Build spatial index from candidates
    pub fn build(items: Vec<T>) -> Self {
        info!("Building spatial index for {} candidates...", items.len());

        let indexed: Vec<IndexedCandidate> = items
            .iter()
            .enumerate()
            .map(|(slot, item)| IndexedCandidate {
                slot,
                position: item.location().lon_lat(),
            })
            .collect();

        let tree = RTree::bulk_load(indexed);
        info!("Spatial index built with {} entries", tree.size());

        Self { items, tree }
    }

    /// Candidates within the filter radius, nearest first
    pub fn query(&self, filter: &GeoProximityFilter) -> Vec<Match<'_, T>> {
        let envelope = filter.bounding_box().envelope(ENVELOPE_PAD_DEG);

        // Sort by slot first so ties keep insertion order, as in a slice scan
        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|ic| ic.slot)
            .collect();
        slots.sort_unstable();

        let in_envelope = slots.len();
        let mut matches: Vec<Match<'_, T>> = slots
            .into_iter()
            .filter_map(|slot| {
                let item = &self.items[slot];
                let p = item.location();
                filter
                    .matches(p.lat, p.lon)
                    .map(|distance_km| Match { item, distance_km })
            })
            .collect();

        sort_by_distance(&mut matches);

        debug!(
            "Index query: {} in envelope, {} within {}km",
            in_envelope,
            matches.len(),
            filter.radius_km()
        );

        matches
    }

    /// Extent of all indexed candidates (x = lon, y = lat)
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let points: MultiPoint<f64> = self
            .items
            .iter()
            .map(|item| Point::from(item.location()))
            .collect();
        points.bounding_rect()
    }

    /// Get total number of indexed candidates
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
