//! Radius-searchable point index.
//!
//! [`SpatialIndex`] holds the current item set behind a reader-writer lock.
//! Radius queries take the read lock and may run concurrently; `insert`,
//! `remove` and `replace_with` take the write lock, so a query never sees a
//! half-applied mutation.
//!
//! Candidates are pruned with an R-tree over (longitude, latitude) and then
//! filtered with the exact haversine distance, so results are identical to a
//! brute-force scan.

use crate::compute::distance::{EARTH_RADIUS_METERS, haversine};
use crate::compute::validation::{validate_coordinate, validate_radius};
use crate::error::Result;
use geotrip_types::point::{Coordinate, GeoPoint, ItemId};
use parking_lot::RwLock;
use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Slack in degrees added to every candidate window to absorb rounding.
const WINDOW_PAD_DEGREES: f64 = 1e-7;

/// Distances up to this many meters past the radius still match, so a zero
/// radius finds points that are the same place written differently
/// (lng 180 and -180, any longitude at a pole).
pub const RADIUS_TOLERANCE_METERS: f64 = 1e-6;

/// Points within `radius` meters of a center, nearest first.
pub type RadiusQueryResult = Vec<(GeoPoint, f64)>;

/// R-tree entry: a position plus the insertion sequence of its item.
#[derive(Debug, Clone, PartialEq)]
struct IndexedEntry {
    lng: f64,
    lat: f64,
    seq: u64,
}

impl IndexedEntry {
    fn new(point: &GeoPoint, seq: u64) -> Self {
        Self {
            lng: point.longitude,
            lat: point.latitude,
            seq,
        }
    }
}

impl RTreeObject for IndexedEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lng, self.lat])
    }
}

#[derive(Debug, Default)]
struct IndexState {
    /// Items keyed by insertion sequence; iteration order is insertion order
    items: BTreeMap<u64, GeoPoint>,
    ids: FxHashMap<ItemId, u64>,
    tree: RTree<IndexedEntry>,
    next_seq: u64,
}

impl IndexState {
    fn insert(&mut self, point: GeoPoint) -> Option<GeoPoint> {
        match self.ids.get(&point.id).copied() {
            Some(seq) => {
                self.tree.insert(IndexedEntry::new(&point, seq));
                let previous = self.items.insert(seq, point);
                if let Some(old) = &previous {
                    self.tree.remove(&IndexedEntry::new(old, seq));
                }
                previous
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.ids.insert(point.id, seq);
                self.tree.insert(IndexedEntry::new(&point, seq));
                self.items.insert(seq, point);
                None
            }
        }
    }

    fn remove(&mut self, id: ItemId) -> Option<GeoPoint> {
        let seq = self.ids.remove(&id)?;
        let point = self.items.remove(&seq)?;
        self.tree.remove(&IndexedEntry::new(&point, seq));
        Some(point)
    }

    fn get(&self, id: ItemId) -> Option<&GeoPoint> {
        self.ids.get(&id).and_then(|seq| self.items.get(seq))
    }
}

/// Concurrent point index answering "which items lie within R meters of C".
///
/// # Examples
///
/// ```rust
/// use geotrip::{Coordinate, GeoPoint, ItemId, SpatialIndex};
///
/// let index = SpatialIndex::new();
/// index.insert(GeoPoint::new(ItemId(1), "MASP", Coordinate::new(-23.5615, -46.6559)))?;
/// index.insert(GeoPoint::new(ItemId(2), "Ibirapuera", Coordinate::new(-23.5874, -46.6576)))?;
///
/// let nearby = index.radius_query(&Coordinate::new(-23.5620, -46.6560), 1_000.0)?;
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].0.name, "MASP");
/// # Ok::<(), geotrip::GeoTripError>(())
/// ```
#[derive(Debug, Default)]
pub struct SpatialIndex {
    state: RwLock<IndexState>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from points in order. Later duplicates replace earlier ones.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let index = Self::new();
        {
            let mut state = index.state.write();
            for point in points {
                validate_coordinate(&point.coordinate())?;
                state.insert(point);
            }
        }
        Ok(index)
    }

    /// Adds a point, or replaces the stored version with the same id.
    ///
    /// A replaced item keeps its original insertion position for tie-breaking
    /// and snapshot order. Returns the previous version, if any.
    pub fn insert(&self, point: GeoPoint) -> Result<Option<GeoPoint>> {
        validate_coordinate(&point.coordinate())?;
        Ok(self.state.write().insert(point))
    }

    /// Adds a point only if its id is not stored yet.
    ///
    /// The check and the insert happen under one write lock. Returns `false`
    /// and leaves the index untouched when the id is taken.
    pub fn insert_if_absent(&self, point: GeoPoint) -> Result<bool> {
        validate_coordinate(&point.coordinate())?;
        let mut state = self.state.write();
        if state.ids.contains_key(&point.id) {
            return Ok(false);
        }
        state.insert(point);
        Ok(true)
    }

    /// Deletes a point by id. Absent ids are a no-op.
    pub fn remove(&self, id: ItemId) -> Option<GeoPoint> {
        self.state.write().remove(id)
    }

    /// Atomically derives a new version of an item from its current one.
    ///
    /// `f` runs under the write lock. Returns `Ok(None)` when the id is
    /// unknown; if `f` fails or yields invalid coordinates nothing changes.
    /// The stored id is always `id`, whatever `f` returns.
    pub fn replace_with<F>(&self, id: ItemId, f: F) -> Result<Option<GeoPoint>>
    where
        F: FnOnce(&GeoPoint) -> Result<GeoPoint>,
    {
        let mut state = self.state.write();
        let Some(current) = state.get(id) else {
            return Ok(None);
        };

        let mut next = f(current)?;
        next.id = id;
        validate_coordinate(&next.coordinate())?;

        state.insert(next.clone());
        Ok(Some(next))
    }

    pub fn get(&self, id: ItemId) -> Option<GeoPoint> {
        self.state.read().get(id).cloned()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.state.read().ids.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        state.items.clear();
        state.ids.clear();
        state.tree = RTree::new();
    }

    /// Point-in-time copy of every item, in insertion order.
    pub fn snapshot(&self) -> Vec<GeoPoint> {
        self.state.read().items.values().cloned().collect()
    }

    /// Every stored point within `radius_meters` of `center`.
    ///
    /// Results are sorted by ascending haversine distance; equal distances
    /// keep insertion order. Matching allows [`RADIUS_TOLERANCE_METERS`] of
    /// slack, so a radius of zero returns only points coincident
    /// with the center.
    ///
    /// # Errors
    ///
    /// `Validation` for a negative or non-finite radius, or an invalid center.
    pub fn radius_query(
        &self,
        center: &Coordinate,
        radius_meters: f64,
    ) -> Result<RadiusQueryResult> {
        validate_coordinate(center)?;
        validate_radius(radius_meters)?;

        let state = self.state.read();
        if state.items.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<(u64, f64)> = Vec::new();
        for window in candidate_windows(center, radius_meters) {
            for entry in state.tree.locate_in_envelope(&window) {
                let Some(point) = state.items.get(&entry.seq) else {
                    continue;
                };
                let distance = haversine(center, &point.coordinate());
                if distance <= radius_meters + RADIUS_TOLERANCE_METERS {
                    hits.push((entry.seq, distance));
                }
            }
        }

        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        Ok(hits
            .into_iter()
            .filter_map(|(seq, distance)| state.items.get(&seq).map(|p| (p.clone(), distance)))
            .collect())
    }

    /// The `k` points closest to `center`, nearest first, ties by insertion order.
    pub fn nearest(&self, center: &Coordinate, k: usize) -> Result<RadiusQueryResult> {
        validate_coordinate(center)?;

        let state = self.state.read();
        let mut scored: Vec<(&GeoPoint, f64)> = state
            .items
            .values()
            .map(|p| (p, haversine(center, &p.coordinate())))
            .collect();

        // Stable sort: items are already in insertion order
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(p, distance)| (p.clone(), distance))
            .collect())
    }
}

/// Longitude/latitude boxes guaranteed to contain every point within
/// `radius_meters` of `center`.
///
/// The latitude band is exact for great circles (|Δφ| ≤ δ). The longitude
/// half-width is asin(sin δ / cos φ) while the circle excludes both poles;
/// otherwise every longitude qualifies. Windows crossing the antimeridian are
/// split in two.
fn candidate_windows(center: &Coordinate, radius_meters: f64) -> Vec<AABB<[f64; 2]>> {
    let full = || vec![AABB::from_corners([-180.0, -90.0], [180.0, 90.0])];

    let delta = radius_meters / EARTH_RADIUS_METERS;
    if delta >= std::f64::consts::PI {
        return full();
    }

    let delta_deg = delta.to_degrees();
    let lat_min = center.latitude - delta_deg - WINDOW_PAD_DEGREES;
    let lat_max = center.latitude + delta_deg + WINDOW_PAD_DEGREES;

    if lat_min <= -90.0 || lat_max >= 90.0 {
        return vec![AABB::from_corners(
            [-180.0, lat_min.max(-90.0)],
            [180.0, lat_max.min(90.0)],
        )];
    }

    let ratio = delta.sin() / center.latitude.to_radians().cos();
    if ratio >= 1.0 {
        return vec![AABB::from_corners([-180.0, lat_min], [180.0, lat_max])];
    }

    let half_width = ratio.asin().to_degrees() + WINDOW_PAD_DEGREES;
    let lng_min = center.longitude - half_width;
    let lng_max = center.longitude + half_width;

    if lng_min < -180.0 {
        vec![
            AABB::from_corners([lng_min + 360.0, lat_min], [180.0, lat_max]),
            AABB::from_corners([-180.0, lat_min], [lng_max, lat_max]),
        ]
    } else if lng_max > 180.0 {
        vec![
            AABB::from_corners([lng_min, lat_min], [180.0, lat_max]),
            AABB::from_corners([-180.0, lat_min], [lng_max - 360.0, lat_max]),
        ]
    } else {
        vec![AABB::from_corners([lng_min, lat_min], [lng_max, lat_max])]
    }
}
