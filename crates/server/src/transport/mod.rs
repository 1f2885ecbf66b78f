//! Transport layer for the geotrip server
//!
//! Only an HTTP/JSON transport is provided.

pub mod http;
