//! Item service: the operations exposed to transports.
//!
//! `ItemService` owns a [`SpatialIndex`] handle and turns plain records into
//! index mutations, radius searches and trip plans. Every operation is a
//! synchronous in-memory computation; transports may call it inline.

use crate::builder::ServiceBuilder;
use crate::compute::clustering::TripClusterer;
use crate::compute::validation::{validate_capacity, validate_coordinate, validate_name};
use crate::config::Config;
use crate::error::{GeoTripError, Result};
use crate::spatial_index::SpatialIndex;
use geotrip_types::point::{GeoPoint, ItemId};
use geotrip_types::record::{ItemPatch, ItemRecord, NearbyQuery, NewItem, TripPlan};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Item CRUD, nearby search and trip optimization over a shared index.
///
/// # Examples
///
/// ```rust
/// use geotrip::{ItemService, NearbyQuery, NewItem};
///
/// let service = ItemService::builder().build()?;
/// service.create_item(NewItem::new("MASP", -23.5615, -46.6559))?;
/// service.create_item(NewItem::new("Trianon", -23.5621, -46.6572))?;
/// service.create_item(NewItem::new("Ibirapuera", -23.5874, -46.6576))?;
///
/// let nearby = service.nearby_search(&NearbyQuery::new(-23.5615, -46.6559, 500.0))?;
/// assert_eq!(nearby.len(), 2);
///
/// let plan = service.optimize_trips(Some(2))?;
/// assert_eq!(plan.trip_count, 2);
/// assert_eq!(plan.trips[0][1].name, "Trianon");
/// # Ok::<(), geotrip::GeoTripError>(())
/// ```
#[derive(Debug)]
pub struct ItemService {
    index: Arc<SpatialIndex>,
    config: Config,
    clusterer: TripClusterer,
    next_id: AtomicU64,
}

impl ItemService {
    /// Service over a fresh, empty index.
    pub fn new(config: Config) -> Self {
        Self::with_index(Arc::new(SpatialIndex::new()), config)
    }

    /// Service over an existing index. New ids continue after the largest
    /// id already stored.
    pub fn with_index(index: Arc<SpatialIndex>, config: Config) -> Self {
        let next_id = index
            .snapshot()
            .iter()
            .map(|p| p.id.get())
            .max()
            .map_or(1, |max| max + 1);

        Self {
            clusterer: TripClusterer::with_metric(config.distance_metric),
            index,
            config,
            next_id: AtomicU64::new(next_id),
        }
    }

    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    pub fn index(&self) -> &Arc<SpatialIndex> {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates and stores a new item under a freshly issued id.
    ///
    /// Ids already present in a shared index are skipped, never overwritten.
    pub fn create_item(&self, item: NewItem) -> Result<ItemRecord> {
        validate_name(&item.name)?;
        let coordinate = item.coordinate();
        validate_coordinate(&coordinate)?;

        loop {
            let id = ItemId(self.next_id.fetch_add(1, Ordering::Relaxed));
            let mut point = GeoPoint::new(id, item.name.clone(), coordinate);
            point.description = item.description.clone();

            let record = ItemRecord::from(&point);
            if self.index.insert_if_absent(point)? {
                log::info!("Created item {} ({})", id, record.name);
                return Ok(record);
            }
            log::debug!("Item id {} already taken, issuing the next one", id);
        }
    }

    pub fn get_item(&self, id: ItemId) -> Result<ItemRecord> {
        self.index
            .get(id)
            .map(|p| ItemRecord::from(&p))
            .ok_or(GeoTripError::NotFound(id))
    }

    /// Applies a partial update. The location changes only when the patch
    /// carries both latitude and longitude.
    pub fn update_item(&self, id: ItemId, patch: ItemPatch) -> Result<ItemRecord> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        let coordinate = patch.coordinate();
        if let Some(c) = &coordinate {
            validate_coordinate(c)?;
        }

        let updated = self.index.replace_with(id, |current| {
            let mut next = current.clone();
            if let Some(name) = patch.name {
                next.name = name;
            }
            if let Some(description) = patch.description {
                next.description = Some(description);
            }
            if let Some(c) = coordinate {
                next.latitude = c.latitude;
                next.longitude = c.longitude;
            }
            Ok(next)
        })?;

        match updated {
            Some(point) => {
                log::info!("Updated item {}", id);
                Ok(ItemRecord::from(&point))
            }
            None => Err(GeoTripError::NotFound(id)),
        }
    }

    /// Removes an item, returning its last version.
    pub fn delete_item(&self, id: ItemId) -> Result<ItemRecord> {
        let removed = self.index.remove(id).ok_or(GeoTripError::NotFound(id))?;
        log::info!("Deleted item {}", id);
        Ok(ItemRecord::from(&removed))
    }

    /// Every item, in insertion order, without distances.
    pub fn list_items(&self) -> Vec<ItemRecord> {
        self.index.snapshot().iter().map(ItemRecord::from).collect()
    }

    /// Radius search when `lat`, `lng` and `radius` are all present; the
    /// full item list otherwise.
    pub fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<ItemRecord>> {
        let Some((center, radius)) = query.as_radius_query() else {
            return Ok(self.list_items());
        };

        let hits = self.index.radius_query(&center, radius)?;
        log::debug!(
            "Nearby search at ({}, {}) within {} m matched {} items",
            center.latitude,
            center.longitude,
            radius,
            hits.len()
        );

        Ok(hits
            .iter()
            .map(|(point, distance)| ItemRecord::with_distance(point, *distance))
            .collect())
    }

    /// Clusters a snapshot of the current items into trips.
    ///
    /// `capacity` defaults to [`Config::default_capacity`]. An empty index
    /// yields a plan with no trips.
    pub fn optimize_trips(&self, capacity: Option<i64>) -> Result<TripPlan> {
        let capacity = match capacity {
            Some(raw) => validate_capacity(raw)?,
            None => self.config.default_capacity,
        };

        let snapshot = self.index.snapshot();
        if snapshot.is_empty() {
            return Ok(TripPlan::empty(capacity));
        }

        let trips = self.clusterer.build_trips(&snapshot, capacity)?;
        let trips: Vec<Vec<ItemRecord>> = trips
            .iter()
            .map(|trip| trip.iter().map(ItemRecord::from).collect())
            .collect();

        log::debug!(
            "Planned {} trips for {} items at capacity {}",
            trips.len(),
            snapshot.len(),
            capacity
        );

        Ok(TripPlan {
            total_items: snapshot.len(),
            capacity,
            trip_count: trips.len(),
            trips,
        })
    }

    /// [`optimize_trips`](Self::optimize_trips) rendered as a GeoJSON
    /// FeatureCollection.
    #[cfg(feature = "geojson")]
    pub fn optimize_trips_geojson(&self, capacity: Option<i64>) -> Result<String> {
        let plan = self.optimize_trips(capacity)?;
        crate::compute::geojson::trip_plan_to_geojson(&plan)
    }
}

impl Default for ItemService {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
