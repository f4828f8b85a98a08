//! Index configuration.
//!
//! Tolerances are carried as configuration rather than global constants so the
//! query path and the removal path can be tuned (and tested) independently.

use crate::error::{ParkspotError, Result};
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};

/// Tolerance settings for the spatial index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Slack applied to range bounds and cross-tree membership, in degrees
    #[serde(default = "IndexConfig::default_query_tolerance")]
    pub query_tolerance: f64,

    /// Radius used by `REMOVE`, in degrees
    #[serde(default = "IndexConfig::default_removal_radius")]
    pub removal_radius: f64,
}

impl IndexConfig {
    pub const DEFAULT_QUERY_TOLERANCE: f64 = 5.0;
    pub const DEFAULT_REMOVAL_RADIUS: f64 = 0.0001;

    const fn default_query_tolerance() -> f64 {
        Self::DEFAULT_QUERY_TOLERANCE
    }

    const fn default_removal_radius() -> f64 {
        Self::DEFAULT_REMOVAL_RADIUS
    }

    pub fn with_query_tolerance(mut self, tolerance: f64) -> Self {
        self.query_tolerance = tolerance;
        self
    }

    pub fn with_removal_radius(mut self, radius: f64) -> Self {
        self.removal_radius = radius;
        self
    }

    pub fn query(&self) -> Tolerance {
        Tolerance::new(self.query_tolerance)
    }

    pub fn removal(&self) -> Tolerance {
        Tolerance::new(self.removal_radius)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.query_tolerance.is_finite() || self.query_tolerance < 0.0 {
            return Err(ParkspotError::InvalidConfig(format!(
                "query_tolerance must be a finite non-negative number, got {}",
                self.query_tolerance
            )));
        }

        // A zero radius matches nothing, so REMOVE would silently never work.
        if !self.removal_radius.is_finite() || self.removal_radius <= 0.0 {
            return Err(ParkspotError::InvalidConfig(format!(
                "removal_radius must be a finite positive number, got {}",
                self.removal_radius
            )));
        }

        if self.query_tolerance > 90.0 {
            log::warn!(
                "query tolerance of {} degrees spans more than a hemisphere; \
                every stored spot will match every query",
                self.query_tolerance
            );
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: IndexConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            query_tolerance: Self::DEFAULT_QUERY_TOLERANCE,
            removal_radius: Self::DEFAULT_REMOVAL_RADIUS,
        }
    }
}
