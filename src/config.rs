//! # Dashboard Configuration
//!
//! Thresholds and view defaults, read from a JSON file.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Granularity;

/// Configuration for the dashboard views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Bucket size of the sales trend
    pub granularity: Granularity,
    /// Emit zero-valued buckets for periods without sales
    pub dense_trend: bool,
    /// Cumulative share defining the top subgroups and products
    pub pareto_threshold_pct: f64,
    /// Cumulative share defining the most valuable customers
    pub customer_threshold_pct: f64,
    /// Quantile of customer value used by the alternative top-customer cut
    pub customer_quantile: f64,
    /// Rows shown in the top subgroup and product bar charts
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            dense_trend: true,
            pareto_threshold_pct: 80.0,
            customer_threshold_pct: 30.0,
            customer_quantile: 0.70,
            top_n: 10,
        }
    }
}

impl DashboardConfig {
    /// Default location: `<config dir>/salestats/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("salestats").join("config.json"))
    }

    /// Read and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`DashboardConfig::load`], falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, pct) in [
            ("pareto_threshold_pct", self.pareto_threshold_pct),
            ("customer_threshold_pct", self.customer_threshold_pct),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(Error::Config(format!("{} must be within [0, 100], got {}", name, pct)));
            }
        }
        if !(0.0..=1.0).contains(&self.customer_quantile) {
            return Err(Error::Config(format!(
                "customer_quantile must be within [0, 1], got {}",
                self.customer_quantile
            )));
        }
        if self.top_n == 0 {
            return Err(Error::Config("top_n must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Hash of the configuration, used as part of report cache keys.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.granularity.hash(&mut hasher);
        self.dense_trend.hash(&mut hasher);
        self.pareto_threshold_pct.to_bits().hash(&mut hasher);
        self.customer_threshold_pct.to_bits().hash(&mut hasher);
        self.customer_quantile.to_bits().hash(&mut hasher);
        self.top_n.hash(&mut hasher);
        hasher.finish()
    }
}
