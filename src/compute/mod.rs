//! Compute layer: distance metrics, validation and trip clustering.
//!
//! Everything here is pure, synchronous computation over values supplied by
//! the caller. Nothing in this module logs or holds locks.

pub mod clustering;
pub mod distance;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod validation;
