//! Capacitated nearest-neighbor trip clustering.
//!
//! Partitions a snapshot of items into trips of at most `capacity` stops by
//! greedy chaining:
//!
//! 1. The first remaining item seeds a new trip and becomes `current`.
//! 2. While the trip has room, the remaining item nearest to `current` is
//!    appended and becomes `current`. Exact ties go to the item that comes
//!    first in the remaining order.
//! 3. Repeat until every item is placed.
//!
//! This is a locality heuristic, not a tour optimizer. Output is fully
//! determined by the input order, the capacity and the metric. Runs are
//! O(n²).

use crate::compute::distance::DistanceMetric;
use crate::compute::validation::validate_points;
use crate::error::{GeoTripError, Result};
use geotrip_types::point::{GeoPoint, ItemId};

/// An ordered, non-empty group of stops borrowed from the clustered snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip<'a> {
    stops: Vec<&'a GeoPoint>,
}

impl<'a> Trip<'a> {
    /// Stops in visiting order.
    pub fn stops(&self) -> &[&'a GeoPoint] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<&'a GeoPoint> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a GeoPoint> + '_ {
        self.stops.iter().copied()
    }

    pub fn seed(&self) -> Option<&'a GeoPoint> {
        self.stops.first().copied()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.stops.iter().map(|p| p.id).collect()
    }

    /// Sum of leg distances between consecutive stops.
    pub fn path_length(&self, metric: DistanceMetric) -> f64 {
        self.stops
            .windows(2)
            .map(|leg| metric.between(leg[0], leg[1]))
            .sum()
    }
}

/// Greedy nearest-neighbor trip builder.
///
/// # Examples
///
/// ```rust
/// use geotrip::{Coordinate, GeoPoint, ItemId, TripClusterer};
///
/// let points = vec![
///     GeoPoint::new(ItemId(1), "MASP", Coordinate::new(-23.5615, -46.6559)),
///     GeoPoint::new(ItemId(2), "Ibirapuera", Coordinate::new(-23.5874, -46.6576)),
///     GeoPoint::new(ItemId(3), "Trianon", Coordinate::new(-23.5621, -46.6572)),
/// ];
///
/// let trips = TripClusterer::new().build_trips(&points, 2)?;
/// assert_eq!(trips.len(), 2);
/// assert_eq!(trips[0].ids(), vec![ItemId(1), ItemId(3)]);
/// assert_eq!(trips[1].ids(), vec![ItemId(2)]);
/// # Ok::<(), geotrip::GeoTripError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripClusterer {
    metric: DistanceMetric,
}

impl TripClusterer {
    /// Clusterer using the haversine metric.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metric(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Partitions `points` into trips of at most `capacity` stops.
    ///
    /// Every point lands in exactly one trip; all trips but the last hold
    /// exactly `capacity` stops.
    ///
    /// # Errors
    ///
    /// `Validation` if `capacity` is zero or any point has a non-finite or
    /// out-of-range coordinate. Validation runs before clustering, so no
    /// partial result is ever produced.
    pub fn build_trips<'a>(
        &self,
        points: &'a [GeoPoint],
        capacity: usize,
    ) -> Result<Vec<Trip<'a>>> {
        if capacity == 0 {
            return Err(GeoTripError::validation("Capacity must be >= 1, got: 0"));
        }
        validate_points(points)?;

        let mut unvisited: Vec<&'a GeoPoint> = points.iter().collect();
        let mut trips = Vec::with_capacity(points.len().div_ceil(capacity));

        while !unvisited.is_empty() {
            let mut current = unvisited.remove(0);
            let mut stops = Vec::with_capacity(capacity.min(unvisited.len() + 1));
            stops.push(current);

            while stops.len() < capacity && !unvisited.is_empty() {
                let next = self.nearest_position(current, &unvisited);
                current = unvisited.remove(next);
                stops.push(current);
            }

            trips.push(Trip { stops });
        }

        Ok(trips)
    }

    /// Position in `candidates` of the point nearest to `from`; first wins ties.
    fn nearest_position(&self, from: &GeoPoint, candidates: &[&GeoPoint]) -> usize {
        let origin = from.coordinate();
        let mut best = 0;
        let mut best_distance = f64::INFINITY;

        for (idx, candidate) in candidates.iter().enumerate() {
            let d = self.metric.measure(&origin, &candidate.coordinate());
            if d < best_distance {
                best = idx;
                best_distance = d;
            }
        }

        best
    }
}

/// Clusters with the default haversine metric.
pub fn build_trips(points: &[GeoPoint], capacity: usize) -> Result<Vec<Trip<'_>>> {
    TripClusterer::new().build_trips(points, capacity)
}
