//! Error types for geotrip.

use geotrip_types::point::ItemId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoTripError>;

#[derive(Debug, Error)]
pub enum GeoTripError {
    /// Bad radius, capacity, coordinate or item field. Never retryable.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("item {0} not found")]
    NotFound(ItemId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl GeoTripError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for GeoTripError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
