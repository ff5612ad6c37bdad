//! Name-keyed carver lookup so callers can swap strategies without code changes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::carving::{Carver, OrganicCarver, StandardCarver};
use crate::config::CarveConfig;
use crate::error::{ConfigError, RegistryError};

/// Populated once at setup, then read. Registration needs `&mut self`, so a registry shared
/// across threads behind an `Arc` is effectively frozen.
#[derive(Clone, Default)]
pub struct CarverRegistry {
    carvers: BTreeMap<String, Arc<dyn Carver>>,
}

impl CarverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `standard` and `organic` with default settings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(Arc::new(StandardCarver::default()));
        registry.insert(Arc::new(OrganicCarver::default()));
        registry
    }

    /// Both built-in carvers configured from `config`. Fails if the selected carver is not
    /// one of them.
    pub fn from_config(config: &CarveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let organic = &config.organic;
        let mut registry = Self::new();
        registry.insert(Arc::new(StandardCarver::new(config.tile_width, config.tile_height)));
        registry.insert(Arc::new(
            OrganicCarver::new(organic.seed)
                .with_tile_size(config.tile_width, config.tile_height)
                .with_corridor_width(organic.corridor_width)
                .with_smooth_corners(organic.smooth_corners),
        ));
        registry.get(&config.carver)?;
        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        carver: Arc<dyn Carver>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.carvers.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.carvers.insert(name, carver);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Carver>, RegistryError> {
        self.carvers.get(name).cloned().ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Registered names. Sorted today, but callers should not depend on the order.
    pub fn list(&self) -> Vec<String> {
        self.carvers.keys().cloned().collect()
    }

    fn insert(&mut self, carver: Arc<dyn Carver>) {
        self.carvers.insert(carver.name().to_string(), carver);
    }
}

impl fmt::Debug for CarverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarverRegistry").field("carvers", &self.list()).finish()
    }
}
