//! Server configuration.
//!
//! Loaded from a JSON or TOML file (chosen by extension) and then overridden by
//! command-line flags. Every field has a default, so an empty file is valid.

use crate::error::{Result, ServerError};
use crate::transport::DEFAULT_MAX_LINE_BYTES;
use parkspot::{Coordinate, IndexConfig, SpatialIndex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The three spots the demo deployment starts with.
pub const DEMO_SPOTS: [(f64, f64); 3] = [
    (37.33182, -122.03118),
    (37.3276574, -122.0350399),
    (37.3349285, -122.011033),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,

    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,

    /// Longest accepted request or header line, in bytes
    #[serde(default = "ServerConfig::default_max_line_bytes")]
    pub max_line_bytes: usize,

    /// Pre-populate the index with [`DEMO_SPOTS`]
    #[serde(default)]
    pub seed_demo_spots: bool,

    /// Extra spots to load at startup.
    ///
    /// Each entry is a point object in x/y order, longitude first:
    /// `{"x": <lon>, "y": <lat>}`. This is the reverse of the wire format and
    /// of `Coordinate::new(lat, lon)`.
    #[serde(default)]
    pub initial_spots: Vec<Coordinate>,

    #[serde(default)]
    pub index: IndexConfig,
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        8080
    }

    const fn default_max_line_bytes() -> usize {
        DEFAULT_MAX_LINE_BYTES
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_demo_spots(mut self, seed: bool) -> Self {
        self.seed_demo_spots = seed;
        self
    }

    pub fn with_initial_spots(mut self, spots: Vec<Coordinate>) -> Self {
        self.initial_spots = spots;
        self
    }

    pub fn with_index(mut self, index: IndexConfig) -> Self {
        self.index = index;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::Config("host must not be empty".to_string()));
        }
        if self.max_line_bytes < 16 {
            return Err(ServerError::Config(format!(
                "max_line_bytes must be at least 16, got {}",
                self.max_line_bytes
            )));
        }
        if let Some(bad) = self.initial_spots.iter().find(|c| !c.is_finite()) {
            return Err(ServerError::Config(format!(
                "initial spot {bad} is not a finite coordinate"
            )));
        }
        self.index.validate()?;
        Ok(())
    }

    /// The index the server starts from: demo spots (if enabled) followed by
    /// the configured initial spots.
    pub fn initial_index(&self) -> SpatialIndex {
        let demo = self
            .seed_demo_spots
            .then_some(DEMO_SPOTS)
            .into_iter()
            .flatten()
            .map(Coordinate::from);
        SpatialIndex::with_spots(
            self.index,
            demo.chain(self.initial_spots.iter().copied()),
        )
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ServerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            Some("json") => Self::from_json(&contents),
            _ => Err(ServerError::Config(format!(
                "unsupported config file {}: expected .toml or .json",
                path.display()
            ))),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            max_line_bytes: Self::default_max_line_bytes(),
            seed_demo_spots: false,
            initial_spots: Vec::new(),
            index: IndexConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
        assert!(!config.seed_demo_spots);
        assert!(config.validate().is_ok());
        assert!(config.initial_index().is_empty());
    }

    #[test]
    fn test_demo_seed() {
        let index = ServerConfig::default().with_demo_spots(true).initial_index();
        assert_eq!(index.len(), 3);
        assert!(
            index
                .coordinates()
                .any(|c| c == Coordinate::new(37.33182, -122.03118))
        );
    }

    #[test]
    fn test_initial_spots_follow_demo_spots() {
        let index = ServerConfig::default()
            .with_demo_spots(true)
            .with_initial_spots(vec![Coordinate::new(10.0, 20.0)])
            .initial_index();
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_from_toml() {
        let config = ServerConfig::from_toml(
            r#"
            port = 9000
            seed_demo_spots = true

            [index]
            removal_radius = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.seed_demo_spots);
        assert_eq!(config.index.removal_radius, 0.5);
        assert_eq!(config.index.query_tolerance, 5.0);
    }

    #[test]
    fn test_initial_spots_are_longitude_first() {
        let config = ServerConfig::from_json(
            r#"{"initial_spots": [{"x": 20.0, "y": 10.0}], "index": {"query_tolerance": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(config.initial_spots, vec![Coordinate::new(10.0, 20.0)]);
        assert_eq!(config.index.query_tolerance, 0.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ServerConfig::default()
            .with_port(1234)
            .with_initial_spots(vec![Coordinate::new(1.0, 2.0)]);
        let parsed = ServerConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ServerConfig::default().with_host(" ").validate().is_err());
        assert!(
            ServerConfig::default()
                .with_index(IndexConfig::default().with_removal_radius(-1.0))
                .validate()
                .is_err()
        );
        assert!(ServerConfig::from_json(r#"{"bogus": 1}"#).is_err());
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("parkspot_server_config_test.yaml");
        std::fs::write(&path, "port: 1").unwrap();
        let err = ServerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
        let _ = std::fs::remove_file(path);
    }
}
