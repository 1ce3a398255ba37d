//! Application configuration
//!
//! Loaded from a TOML file, by default `~/.config/energy-cost/config.toml`.
//! Every section is optional; missing values fall back to the demo setup
//! (three price plans, five smart meters).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DomainError, PricePlan};
use crate::infrastructure::StaticPricePlanCatalog;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("energy-cost")
        .join("config.toml")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error` (any `EnvFilter` directive)
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingsConfig {
    /// Fill the reading store with random readings for every configured meter
    pub seed_demo_data: bool,
    /// Fixed RNG seed for reproducible demo data
    pub seed: Option<u64>,
}

impl Default for ReadingsConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePlanConfig {
    pub id: String,
    pub supplier: String,
    pub rate: f64,
}

impl From<&PricePlanConfig> for PricePlan {
    fn from(c: &PricePlanConfig) -> Self {
        PricePlan::new(c.id.clone(), c.supplier.clone(), c.rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterConfig {
    pub id: String,
    /// Assigned price plan id; meters without one cannot report weekly usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_plan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub readings: ReadingsConfig,
    pub price_plans: Vec<PricePlanConfig>,
    pub meters: Vec<MeterConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let plan = |id: &str, supplier: &str, rate: f64| PricePlanConfig {
            id: id.to_string(),
            supplier: supplier.to_string(),
            rate,
        };
        let meter = |id: &str, price_plan: Option<&str>| MeterConfig {
            id: id.to_string(),
            price_plan: price_plan.map(str::to_string),
        };

        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            readings: ReadingsConfig::default(),
            price_plans: vec![
                plan("price-plan-0", "Dr Evil's Dark Energy", 10.0),
                plan("price-plan-1", "The Green Eco", 2.0),
                plan("price-plan-2", "Power for Everyone", 1.0),
            ],
            meters: vec![
                meter("smart-meter-0", Some("price-plan-0")),
                meter("smart-meter-1", Some("price-plan-1")),
                meter("smart-meter-2", Some("price-plan-2")),
                meter("smart-meter-3", None),
                meter("smart-meter-4", None),
            ],
        }
    }
}

impl AppConfig {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml(&contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.price_plan_catalog()?;
        Ok(())
    }

    /// Catalog of the configured plans with the meter assignments applied.
    pub fn price_plan_catalog(&self) -> Result<StaticPricePlanCatalog, ConfigError> {
        let plans = self.price_plans.iter().map(PricePlan::from).collect();
        let assignments = self
            .meters
            .iter()
            .filter_map(|m| m.price_plan.as_ref().map(|p| (m.id.clone(), p.clone())));

        Ok(StaticPricePlanCatalog::new(plans, assignments)?)
    }

    pub fn meter_ids(&self) -> impl Iterator<Item = &str> {
        self.meters.iter().map(|m| m.id.as_str())
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.api_address(), "0.0.0.0:8080");
        assert_eq!(cfg.meter_ids().count(), 5);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9100

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.price_plans.len(), 3);
    }

    #[test]
    fn custom_catalog_replaces_demo_plans() {
        let cfg = AppConfig::from_toml(
            r#"
            [readings]
            seed_demo_data = false

            [[price_plans]]
            id = "flat"
            supplier = "Flat Co"
            rate = 0.25

            [[meters]]
            id = "m-1"
            price_plan = "flat"

            [[meters]]
            id = "m-2"
            "#,
        )
        .unwrap();

        assert!(!cfg.readings.seed_demo_data);
        assert_eq!(cfg.price_plans.len(), 1);
        assert_eq!(cfg.meters[1].price_plan, None);
        assert_eq!(cfg.price_plan_catalog().unwrap().plans().len(), 1);
    }

    #[test]
    fn negative_rate_fails_validation() {
        let cfg = AppConfig::from_toml(
            r#"
            [[price_plans]]
            id = "refund"
            supplier = "Odd Energy"
            rate = -1.0
            "#,
        )
        .unwrap();

        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn meter_assigned_to_unknown_plan_fails_validation() {
        let mut cfg = AppConfig::default();
        cfg.meters[0].price_plan = Some("price-plan-42".into());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nport = "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn serialized_config_round_trips_sections() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.price_plans, AppConfig::default().price_plans);
        assert_eq!(parsed.meters, AppConfig::default().meters);
    }
}
