//! Builder for item services
//!
//! Assembles an [`ItemService`] from a configuration, an optional shared
//! index and optional seed items.

use crate::compute::distance::DistanceMetric;
use crate::config::Config;
use crate::error::Result;
use crate::service::ItemService;
use crate::spatial_index::SpatialIndex;
use geotrip_types::record::NewItem;
use std::path::Path;
use std::sync::Arc;

/// Builder for [`ItemService`].
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    config: Config,
    index: Option<Arc<SpatialIndex>>,
    seed: Vec<NewItem>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a JSON or TOML file.
    pub fn config_path<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.config = Config::from_path(path)?;
        Ok(self)
    }

    pub fn default_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_default_capacity(capacity);
        self
    }

    pub fn distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.config = self.config.with_distance_metric(metric);
        self
    }

    /// Share an existing index instead of creating a new one.
    pub fn index(mut self, index: Arc<SpatialIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Items created, in order, when the service is built.
    pub fn seed_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = NewItem>,
    {
        self.seed.extend(items);
        self
    }

    /// Validate the configuration and build the service.
    pub fn build(self) -> Result<ItemService> {
        self.config.validate()?;

        let service = match self.index {
            Some(index) => ItemService::with_index(index, self.config),
            None => ItemService::new(self.config),
        };

        for item in self.seed {
            service.create_item(item)?;
        }

        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let service = ServiceBuilder::new().build().unwrap();
        assert_eq!(service.config().default_capacity, 3);
        assert!(service.index().is_empty());
    }

    #[test]
    fn test_builder_settings() {
        let service = ServiceBuilder::new()
            .default_capacity(5)
            .distance_metric(DistanceMetric::Geodesic)
            .build()
            .unwrap();
        assert_eq!(service.config().default_capacity, 5);
        assert_eq!(service.config().distance_metric, DistanceMetric::Geodesic);
    }

    #[test]
    fn test_builder_seed_items() {
        let service = ServiceBuilder::new()
            .seed_items(vec![
                NewItem::new("a", 0.0, 0.0),
                NewItem::new("b", 0.0, 1.0),
            ])
            .build()
            .unwrap();
        assert_eq!(service.list_items().len(), 2);
    }

    #[test]
    fn test_builder_rejects_invalid_seed() {
        let result = ServiceBuilder::new()
            .seed_items(vec![NewItem::new("bad", 100.0, 0.0)])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_shares_index() {
        let index = Arc::new(SpatialIndex::new());
        let service = ServiceBuilder::new()
            .index(index.clone())
            .seed_items(vec![NewItem::new("a", 0.0, 0.0)])
            .build()
            .unwrap();
        assert_eq!(index.len(), 1);
        assert!(Arc::ptr_eq(service.index(), &index));
    }

    #[test]
    fn test_builder_config_path() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::io::Write::write_all(&mut file, br#"{"default_capacity": 4}"#).unwrap();

        let service = ServiceBuilder::new()
            .config_path(file.path())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(service.config().default_capacity, 4);

        assert!(ServiceBuilder::new().config_path("/nonexistent/geotrip.json").is_err());
    }
}
