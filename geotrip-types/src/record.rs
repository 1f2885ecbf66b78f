//! Plain records exchanged with the item service and its transports.

use crate::point::{Coordinate, GeoPoint, ItemId};
use serde::{Deserialize, Serialize};

/// Serialized view of an item, optionally annotated with its distance to a
/// query center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance in meters, present only for radius searches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
}

impl ItemRecord {
    pub fn with_distance(point: &GeoPoint, distance_meters: f64) -> Self {
        Self {
            distance_meters: Some(distance_meters),
            ..Self::from(point)
        }
    }
}

impl From<&GeoPoint> for ItemRecord {
    fn from(point: &GeoPoint) -> Self {
        Self {
            id: point.id,
            name: point.name.clone(),
            description: point.description.clone(),
            latitude: point.latitude,
            longitude: point.longitude,
            distance_meters: None,
        }
    }
}

/// Payload for creating an item. The id is assigned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            latitude,
            longitude,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Partial update of an item.
///
/// The location only changes when both `latitude` and `longitude` are given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl ItemPatch {
    /// The new location, if the patch carries a complete one.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

/// Parameters of a nearby search. Missing any of the three means "list all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NearbyQuery {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
}

impl NearbyQuery {
    pub fn new(lat: f64, lng: f64, radius: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            radius: Some(radius),
        }
    }

    /// Center and radius, when all three parameters are present.
    pub fn as_radius_query(&self) -> Option<(Coordinate, f64)> {
        match (self.lat, self.lng, self.radius) {
            (Some(lat), Some(lng), Some(radius)) => Some((Coordinate::new(lat, lng), radius)),
            _ => None,
        }
    }
}

/// Parameters of a trip optimization request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeQuery {
    #[serde(default)]
    pub capacity: Option<i64>,
}

/// Result of a trip optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub total_items: usize,
    pub capacity: usize,
    pub trip_count: usize,
    pub trips: Vec<Vec<ItemRecord>>,
}

impl TripPlan {
    pub fn empty(capacity: usize) -> Self {
        Self {
            total_items: 0,
            capacity,
            trip_count: 0,
            trips: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_omits_missing_distance() {
        let point = GeoPoint::new(ItemId(1), "MASP", Coordinate::new(-23.5615, -46.6559));
        let json = serde_json::to_value(ItemRecord::from(&point)).unwrap();
        assert!(json.get("distanceMeters").is_none());
        assert_eq!(json["name"], "MASP");

        let json = serde_json::to_value(ItemRecord::with_distance(&point, 12.5)).unwrap();
        assert_eq!(json["distanceMeters"], 12.5);
    }

    #[test]
    fn test_patch_requires_both_coordinates() {
        let patch = ItemPatch {
            latitude: Some(1.0),
            ..Default::default()
        };
        assert!(patch.coordinate().is_none());

        let patch = ItemPatch {
            latitude: Some(1.0),
            longitude: Some(2.0),
            ..Default::default()
        };
        assert_eq!(patch.coordinate(), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn test_nearby_query_requires_all_parameters() {
        let partial = NearbyQuery {
            lat: Some(-23.5),
            lng: Some(-46.6),
            radius: None,
        };
        assert!(partial.as_radius_query().is_none());

        let full = NearbyQuery::new(-23.5, -46.6, 5000.0);
        let (center, radius) = full.as_radius_query().unwrap();
        assert_eq!(center, Coordinate::new(-23.5, -46.6));
        assert_eq!(radius, 5000.0);
    }

    #[test]
    fn test_new_item_description_defaults_to_none() {
        let item: NewItem =
            serde_json::from_str(r#"{"name":"A","latitude":1.0,"longitude":2.0}"#).unwrap();
        assert!(item.description.is_none());
        assert_eq!(item.coordinate(), Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn test_trip_plan_wire_names() {
        let json = serde_json::to_value(TripPlan::empty(3)).unwrap();
        assert_eq!(json["totalItems"], 0);
        assert_eq!(json["tripCount"], 0);
        assert_eq!(json["capacity"], 3);
        assert!(json.get("total_items").is_none());
    }
}
