//! geotrip server
//!
//! HTTP front end for the geotrip item service: nearby search, item CRUD
//! and capacitated trip optimization.
//!
//! # Example
//!
//! ```ignore
//! use geotrip_server::run_server;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! run_server(listener, service, shutdown).await?;
//! ```

pub mod handler;
pub mod transport;

pub use handler::{ApiError, AppState};
pub use transport::http::{router, run_server};
