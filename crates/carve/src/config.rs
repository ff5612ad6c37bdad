//! Carving settings, parsed from TOML text supplied by the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::carving::{Carver, DEFAULT_CORRIDOR_WIDTH, DEFAULT_TILE_SIZE, StandardCarver};
use crate::error::ConfigError;
use crate::registry::CarverRegistry;

/// Largest accepted tile edge, in pixels.
pub const MAX_TILE_SIZE: u32 = 4096;
/// Largest accepted organic corridor width, in tiles.
pub const MAX_CORRIDOR_WIDTH: u32 = 64;

/// ```toml
/// carver = "organic"
/// tile_width = 32
/// tile_height = 32
///
/// [organic]
/// seed = 42
/// corridor_width = 4
/// smooth_corners = false
/// ```
///
/// Every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveConfig {
    /// Registry name of the carver to use.
    pub carver: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub organic: OrganicSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganicSettings {
    pub seed: u64,
    pub corridor_width: u32,
    pub smooth_corners: bool,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self {
            carver: StandardCarver::NAME.to_string(),
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            organic: OrganicSettings::default(),
        }
    }
}

impl Default for OrganicSettings {
    fn default() -> Self {
        Self { seed: 0, corridor_width: DEFAULT_CORRIDOR_WIDTH, smooth_corners: true }
    }
}

impl CarveConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tile_sizes = 1..=MAX_TILE_SIZE;
        if !tile_sizes.contains(&self.tile_width) || !tile_sizes.contains(&self.tile_height) {
            return Err(ConfigError::Invalid(format!(
                "tile size must be within 1..={MAX_TILE_SIZE}, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        if !(1..=MAX_CORRIDOR_WIDTH).contains(&self.organic.corridor_width) {
            return Err(ConfigError::Invalid(format!(
                "organic.corridor_width must be within 1..={MAX_CORRIDOR_WIDTH}, got {}",
                self.organic.corridor_width
            )));
        }
        Ok(())
    }

    /// The configured carver, resolved through a registry built from these settings.
    pub fn selected_carver(&self) -> Result<Arc<dyn Carver>, ConfigError> {
        Ok(CarverRegistry::from_config(self)?.get(&self.carver)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    #[test]
    fn empty_text_gives_defaults() {
        let config = CarveConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, CarveConfig::default());
        assert_eq!(config.carver, "standard");
        assert_eq!(config.organic.corridor_width, 3);
        assert!(config.organic.smooth_corners);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = CarveConfig::from_toml_str(
            r#"
                carver = "organic"
                tile_width = 32

                [organic]
                seed = 42
            "#,
        )
        .expect("valid config");
        assert_eq!(config.tile_width, 32);
        assert_eq!(config.tile_height, 16);
        assert_eq!(config.organic.seed, 42);
        assert_eq!(config.organic.corridor_width, 3);
        assert_eq!(config.selected_carver().expect("organic is built in").name(), "organic");
    }

    #[test]
    fn zero_sizes_are_invalid() {
        assert!(matches!(
            CarveConfig::from_toml_str("tile_height = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CarveConfig::from_toml_str("[organic]\ncorridor_width = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn oversized_values_are_invalid() {
        for text in [
            "tile_width = 4097",
            "tile_height = 4294967295",
            "[organic]\ncorridor_width = 65",
            "[organic]\ncorridor_width = 4294967295",
        ] {
            assert!(
                matches!(CarveConfig::from_toml_str(text), Err(ConfigError::Invalid(_))),
                "{text}"
            );
        }
        let widest = "tile_width = 4096\n[organic]\ncorridor_width = 64";
        assert!(CarveConfig::from_toml_str(widest).is_ok());
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        assert!(matches!(
            CarveConfig::from_toml_str("tile_width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unknown_carver_names_surface_as_registry_errors() {
        let config = CarveConfig { carver: "voronoi".to_string(), ..CarveConfig::default() };
        assert!(matches!(
            config.selected_carver().map(|carver| carver.name().to_string()),
            Err(ConfigError::Registry(RegistryError::NotFound(name))) if name == "voronoi"
        ));
    }
}
