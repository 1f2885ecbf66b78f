//! GeoJSON rendering of trip plans and item lists.

use crate::error::{GeoTripError, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use geotrip_types::record::{ItemRecord, TripPlan};
use serde_json::json;

fn position(item: &ItemRecord) -> Vec<f64> {
    vec![item.longitude, item.latitude]
}

/// Converts one item to a Point feature carrying its fields as properties.
pub fn item_to_feature(item: &ItemRecord) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), json!(item.name));
    properties.insert("description".to_string(), json!(item.description));
    if let Some(distance) = item.distance_meters {
        properties.insert("distanceMeters".to_string(), json!(distance));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(position(item)))),
        id: Some(Id::Number(item.id.get().into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Converts a list of items (e.g. a nearby search result) to Point features.
pub fn items_to_feature_collection(items: &[ItemRecord]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: items.iter().map(item_to_feature).collect(),
        foreign_members: None,
    }
}

/// Converts a trip plan to one feature per trip.
///
/// Trips with two or more stops become LineStrings in visiting order; a
/// single-stop trip becomes a Point. Properties hold the trip number and the
/// ordered stop ids.
pub fn trip_plan_to_feature_collection(plan: &TripPlan) -> FeatureCollection {
    let features = plan
        .trips
        .iter()
        .enumerate()
        .map(|(idx, trip)| {
            let geometry = match trip.as_slice() {
                [only] => Value::Point(position(only)),
                stops => Value::LineString(stops.iter().map(position).collect()),
            };

            let mut properties = JsonObject::new();
            properties.insert("trip".to_string(), json!(idx + 1));
            properties.insert("stopCount".to_string(), json!(trip.len()));
            properties.insert(
                "stops".to_string(),
                json!(trip.iter().map(|s| s.id.get()).collect::<Vec<_>>()),
            );

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geometry)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let mut foreign_members = JsonObject::new();
    foreign_members.insert("capacity".to_string(), json!(plan.capacity));
    foreign_members.insert("totalItems".to_string(), json!(plan.total_items));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}

/// Serializes a trip plan as a GeoJSON FeatureCollection string.
pub fn trip_plan_to_geojson(plan: &TripPlan) -> Result<String> {
    serde_json::to_string(&trip_plan_to_feature_collection(plan)).map_err(|e| {
        GeoTripError::Serialization(format!("Failed to serialize trip plan: {}", e))
    })
}
