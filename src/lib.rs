//! Geospatial proximity search and capacitated nearest-neighbor trip
//! clustering for logistics planning.
//!
//! ```rust
//! use geotrip::{Coordinate, GeoPoint, ItemId, SpatialIndex, TripClusterer};
//!
//! let index = SpatialIndex::new();
//! index.insert(GeoPoint::new(ItemId(1), "MASP", Coordinate::new(-23.5615, -46.6559)))?;
//! index.insert(GeoPoint::new(ItemId(2), "Trianon", Coordinate::new(-23.5621, -46.6572)))?;
//! index.insert(GeoPoint::new(ItemId(3), "Ibirapuera", Coordinate::new(-23.5874, -46.6576)))?;
//!
//! let nearby = index.radius_query(&Coordinate::new(-23.5615, -46.6559), 500.0)?;
//! assert_eq!(nearby.len(), 2);
//!
//! let snapshot = index.snapshot();
//! let trips = TripClusterer::new().build_trips(&snapshot, 2)?;
//! assert_eq!(trips[0].ids(), vec![ItemId(1), ItemId(2)]);
//! assert_eq!(trips[1].ids(), vec![ItemId(3)]);
//! # Ok::<(), geotrip::GeoTripError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod service;
pub mod spatial_index;

pub use builder::ServiceBuilder;
pub use config::Config;
pub use error::{GeoTripError, Result};
pub use service::ItemService;
pub use spatial_index::{RADIUS_TOLERANCE_METERS, RadiusQueryResult, SpatialIndex};

pub use compute::clustering::{Trip, TripClusterer, build_trips};
pub use compute::distance::{DistanceMetric, EARTH_RADIUS_METERS, distance};
pub use compute::validation;

#[cfg(feature = "geojson")]
pub use compute::geojson;

pub use geotrip_types::point::{Coordinate, GeoPoint, ItemId};
pub use geotrip_types::record::{
    ItemPatch, ItemRecord, NearbyQuery, NewItem, OptimizeQuery, TripPlan,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, GeoTripError, ItemService, Result, ServiceBuilder};

    pub use crate::{Coordinate, GeoPoint, ItemId};

    pub use crate::{DistanceMetric, SpatialIndex, Trip, TripClusterer, distance};

    pub use crate::{ItemPatch, ItemRecord, NearbyQuery, NewItem, TripPlan};
}
