//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. PARKSIDE_CONFIG environment variable
//! 3. Default: config/dev.toml
//!
//! Every field has a default, so a missing or partial file still yields a
//! working configuration.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct FacilityConfig {
    /// Facility identifier used in logs (e.g., "lot-north")
    #[serde(default = "default_site_id")]
    pub site_id: String,
    /// Number of car spots; spot ids 1..=car_spots
    #[serde(default = "default_car_spots")]
    pub car_spots: u32,
    /// Number of bike spots; ids follow the car spots
    #[serde(default = "default_bike_spots")]
    pub bike_spots: u32,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            site_id: default_site_id(),
            car_spots: default_car_spots(),
            bike_spots: default_bike_spots(),
        }
    }
}

fn default_site_id() -> String {
    "parkside".to_string()
}

fn default_car_spots() -> u32 {
    3
}

fn default_bike_spots() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize)]
pub struct FareConfig {
    #[serde(default = "default_car_rate_per_hour")]
    pub car_rate_per_hour: f64,
    #[serde(default = "default_bike_rate_per_hour")]
    pub bike_rate_per_hour: f64,
    /// Sessions shorter than this are free
    #[serde(default = "default_free_minutes")]
    pub free_minutes: i64,
    /// Flat discount for returning customers
    #[serde(default = "default_discount_percent")]
    pub discount_percent: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            car_rate_per_hour: default_car_rate_per_hour(),
            bike_rate_per_hour: default_bike_rate_per_hour(),
            free_minutes: default_free_minutes(),
            discount_percent: default_discount_percent(),
        }
    }
}

fn default_car_rate_per_hour() -> f64 {
    1.5
}

fn default_bike_rate_per_hour() -> f64 {
    1.0
}

fn default_free_minutes() -> i64 {
    30
}

fn default_discount_percent() -> f64 {
    5.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct JournalConfig {
    /// File path for the closed-ticket journal (JSONL format)
    #[serde(default = "default_journal_file")]
    pub file: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self { file: default_journal_file() }
    }
}

fn default_journal_file() -> String {
    "tickets.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    facility: FacilityConfig,
    #[serde(default)]
    fare: FareConfig,
    #[serde(default)]
    journal: JournalConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    site_id: String,
    car_spots: u32,
    bike_spots: u32,
    fare: FareConfig,
    journal_file: String,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_id: default_site_id(),
            car_spots: default_car_spots(),
            bike_spots: default_bike_spots(),
            fare: FareConfig::default(),
            journal_file: default_journal_file(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            site_id: toml_config.facility.site_id,
            car_spots: toml_config.facility.car_spots,
            bike_spots: toml_config.facility.bike_spots,
            fare: toml_config.fare,
            journal_file: toml_config.journal.file,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the given path (or PARKSIDE_CONFIG when
    /// set), falls back to defaults with a warning
    pub fn load_from_path(cli_path: &str) -> Self {
        let config_path = env::var("PARKSIDE_CONFIG").unwrap_or_else(|_| cli_path.to_string());

        match Self::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %config_path, error = %e, "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn car_spots(&self) -> u32 {
        self.car_spots
    }

    pub fn bike_spots(&self) -> u32 {
        self.bike_spots
    }

    pub fn fare(&self) -> &FareConfig {
        &self.fare
    }

    pub fn journal_file(&self) -> &str {
        &self.journal_file
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}
