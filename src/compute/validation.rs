//! Validation for coordinates, radii, capacities and item fields.

use crate::error::{GeoTripError, Result};
use geotrip_types::point::{Coordinate, GeoPoint};

/// Rejects NaN and infinite components. Range is not checked.
pub fn validate_finite(coordinate: &Coordinate) -> Result<()> {
    if !coordinate.latitude.is_finite() {
        return Err(GeoTripError::Validation(format!(
            "Latitude must be finite, got: {}",
            coordinate.latitude
        )));
    }

    if !coordinate.longitude.is_finite() {
        return Err(GeoTripError::Validation(format!(
            "Longitude must be finite, got: {}",
            coordinate.longitude
        )));
    }

    Ok(())
}

/// Validates a coordinate is finite and in range.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use geotrip::compute::validation::validate_coordinate;
/// use geotrip::Coordinate;
///
/// assert!(validate_coordinate(&Coordinate::new(-23.5615, -46.6559)).is_ok());
/// assert!(validate_coordinate(&Coordinate::new(95.0, 0.0)).is_err());
/// assert!(validate_coordinate(&Coordinate::new(0.0, 200.0)).is_err());
/// ```
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<()> {
    validate_finite(coordinate)?;

    if !(-90.0..=90.0).contains(&coordinate.latitude) {
        return Err(GeoTripError::Validation(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            coordinate.latitude
        )));
    }

    if !(-180.0..=180.0).contains(&coordinate.longitude) {
        return Err(GeoTripError::Validation(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            coordinate.longitude
        )));
    }

    Ok(())
}

/// Validates every point of a snapshot, reporting the first offender.
pub fn validate_points(points: &[GeoPoint]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_coordinate(&point.coordinate()).map_err(|e| {
            GeoTripError::Validation(format!("Point {} at index {}: {}", point.id, idx, e))
        })?;
    }
    Ok(())
}

/// A search radius must be a finite, non-negative number of meters.
pub fn validate_radius(radius_meters: f64) -> Result<()> {
    if !radius_meters.is_finite() {
        return Err(GeoTripError::Validation(format!(
            "Radius must be finite, got: {}",
            radius_meters
        )));
    }

    if radius_meters < 0.0 {
        return Err(GeoTripError::Validation(format!(
            "Radius must be >= 0 meters, got: {}",
            radius_meters
        )));
    }

    Ok(())
}

/// Converts a signed capacity from an outer layer into a trip size.
///
/// # Examples
///
/// ```
/// use geotrip::compute::validation::validate_capacity;
///
/// assert_eq!(validate_capacity(3).unwrap(), 3);
/// assert!(validate_capacity(0).is_err());
/// assert!(validate_capacity(-2).is_err());
/// ```
pub fn validate_capacity(capacity: i64) -> Result<usize> {
    if capacity <= 0 {
        return Err(GeoTripError::Validation(format!(
            "Capacity must be >= 1, got: {}",
            capacity
        )));
    }

    usize::try_from(capacity).map_err(|_| {
        GeoTripError::Validation(format!("Capacity too large for this platform: {}", capacity))
    })
}

/// Item names are required and may not be blank.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GeoTripError::validation("Item name must not be empty"));
    }
    Ok(())
}
