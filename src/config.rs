//! Catalog settings, read from `~/.config/pokedex-catalog/config.toml`.
//!
//! Every field has a default, so a missing file is not an error. Both
//! binaries accept `--config` to point somewhere else.

use crate::engine::TypeChart;
use crate::errors::{CatalogError, CatalogResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_ASSET_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// JSON array of records loaded into the store at startup.
    pub seed_file: Option<PathBuf>,
    /// Prefix applied to relative image paths during import.
    pub asset_base_url: String,
    /// RON file replacing the built-in type chart.
    pub type_chart: Option<PathBuf>,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            type_chart: None,
            log_level: "info".to_string(),
        }
    }
}

/// Canonical path to the settings file.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("pokedex-catalog").join("config.toml")
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> CatalogResult<CatalogConfig> {
        toml::from_str(content).map_err(|e| CatalogError::Config(e.to_string()))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicitly requested file must exist; the default one may not.
    pub fn load(path: Option<&Path>) -> CatalogResult<CatalogConfig> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (config_path(), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)?;
                log::debug!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                Ok(CatalogConfig::default())
            }
            Err(e) => Err(CatalogError::io(path, e)),
        }
    }

    /// The type chart this configuration selects.
    pub fn load_type_chart(&self) -> CatalogResult<TypeChart> {
        match &self.type_chart {
            Some(path) => TypeChart::load(path),
            None => TypeChart::builtin(),
        }
    }
}

/// Initialize `env_logger` on stderr. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_logging(config: &CatalogConfig) {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(
            CatalogConfig::from_toml_str("").unwrap(),
            CatalogConfig::default()
        );
    }

    #[test]
    fn test_fields_parse() {
        let config = CatalogConfig::from_toml_str(
            r#"
            seed_file = "data/pokemons.json"
            asset_base_url = "https://cdn.example.org"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed_file, Some(PathBuf::from("data/pokemons.json")));
        assert_eq!(config.asset_base_url, "https://cdn.example.org");
        assert_eq!(config.type_chart, None);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = CatalogConfig::from_toml_str("jwt_secret = \"x\"").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            CatalogConfig::load(Some(&missing)),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn test_load_from_file_and_chart_override() {
        let dir = tempfile::tempdir().unwrap();
        let chart_path = dir.path().join("chart.ron");
        std::fs::write(&chart_path, "{ Water: (weaknesses: [Grass]) }").unwrap();

        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "type_chart = {:?}", chart_path.display().to_string()).unwrap();

        let config = CatalogConfig::load(Some(&config_path)).unwrap();
        let chart = config.load_type_chart().unwrap();
        assert_eq!(chart.len(), 1);
        assert!(chart.effectiveness_of("water").is_weak_to("grass"));
    }

    #[test]
    fn test_default_chart_is_builtin() {
        let chart = CatalogConfig::default().load_type_chart().unwrap();
        assert_eq!(chart.len(), 18);
    }
}
