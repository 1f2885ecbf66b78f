//! Distance metrics between geographic coordinates.
//!
//! The default metric is the haversine great-circle distance on a sphere of
//! radius [`EARTH_RADIUS_METERS`]:
//!
//! ```text
//! a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
//! c = 2 · atan2(√a, √(1−a))
//! d = R · c
//! ```
//!
//! with φ latitude and λ longitude in radians and R = 6,371,000 m. Results
//! are bit-for-bit reproducible given identical floating point semantics.
//! Ellipsoidal correction is available through [`DistanceMetric::Geodesic`].

use crate::compute::validation::validate_finite;
use crate::error::Result;
use geo::{Distance, Euclidean, Geodesic};
use geotrip_types::point::{Coordinate, GeoPoint};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine metric.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distance metrics for proximity calculations.
///
/// - **Haversine**: spherical great-circle distance in meters (default)
/// - **Geodesic**: ellipsoidal distance in meters (Karney 2013), slower
/// - **Planar**: Euclidean distance on raw degrees; only useful for ranking,
///   matches how older deployments ordered stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
    Planar,
}

impl DistanceMetric {
    /// Distance between two coordinates without input checks.
    ///
    /// Callers must have validated both coordinates; non-finite input yields
    /// NaN.
    #[inline]
    pub fn measure(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        match self {
            DistanceMetric::Haversine => haversine(a, b),
            DistanceMetric::Geodesic => {
                Geodesic.distance(geo::Point::from(*a), geo::Point::from(*b))
            }
            DistanceMetric::Planar => {
                Euclidean.distance(geo::Point::from(*a), geo::Point::from(*b))
            }
        }
    }

    /// Distance between two coordinates, rejecting non-finite components.
    pub fn distance(&self, a: &Coordinate, b: &Coordinate) -> Result<f64> {
        validate_finite(a)?;
        validate_finite(b)?;
        Ok(self.measure(a, b))
    }

    /// Distance between two items.
    #[inline]
    pub fn between(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        self.measure(&a.coordinate(), &b.coordinate())
    }
}

/// Haversine distance in meters. No input checks.
#[inline]
pub fn haversine(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for antipodal points
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Great-circle distance in meters between two coordinates.
///
/// # Examples
///
/// ```rust
/// use geotrip::{distance, Coordinate};
///
/// let masp = Coordinate::new(-23.5615, -46.6559);
/// let trianon = Coordinate::new(-23.5621, -46.6572);
///
/// let d = distance(&masp, &trianon)?;
/// assert!(d > 100.0 && d < 200.0);
/// assert_eq!(distance(&masp, &masp)?, 0.0);
/// assert!(distance(&Coordinate::new(f64::NAN, 0.0), &masp).is_err());
/// # Ok::<(), geotrip::GeoTripError>(())
/// ```
pub fn distance(a: &Coordinate, b: &Coordinate) -> Result<f64> {
    DistanceMetric::Haversine.distance(a, b)
}
