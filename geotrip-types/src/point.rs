use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, opaque identifier of a geo-referenced item.
///
/// Two [`GeoPoint`]s with the same id are the same logical item at
/// different versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Raw numeric value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A WGS84 position in decimal degrees.
///
/// # Examples
///
/// ```
/// use geotrip_types::point::Coordinate;
///
/// let c = Coordinate::new(-23.5615, -46.6559);
/// let p: geo::Point = c.into();
/// assert_eq!(p.x(), -46.6559);
/// assert_eq!(p.y(), -23.5615);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude (in that order).
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn lng(&self) -> f64 {
        self.longitude
    }

    /// True when both components are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Self::new(p.y(), p.x())
    }
}

/// A named, geo-referenced item.
///
/// Created by the item layer before it reaches the engine. The engine only
/// reads and reorders references to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(id: ItemId, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Project onto a `geo::Point` (x = longitude, y = latitude).
    #[inline]
    pub fn to_geo(&self) -> geo::Point<f64> {
        self.coordinate().into()
    }
}
