//! # geotrip-types
//!
//! Core data types shared by the geotrip engine and its transports.
//!
//! - **Point types**: `ItemId`, `Coordinate`, `GeoPoint`
//! - **Wire records**: `ItemRecord`, `NewItem`, `ItemPatch`, `NearbyQuery`, `TripPlan`
//!
//! All types are serializable with Serde. Coordinates convert to and from the
//! `geo` crate's `Point` (x = longitude, y = latitude).
//!
//! ## Examples
//!
//! ```rust
//! use geotrip_types::point::{Coordinate, GeoPoint, ItemId};
//!
//! let masp = GeoPoint::new(ItemId(1), "MASP", Coordinate::new(-23.5615, -46.6559))
//!     .with_description("Paulista");
//! assert_eq!(masp.latitude(), -23.5615);
//! ```

pub mod point;
pub mod record;
