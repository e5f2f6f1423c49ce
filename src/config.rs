//! Configuration management for `rdt-bridge`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::RdtError;
use crate::models::ForecastQuery;
use crate::ontology::{InstanceModelOptions, OptimalConditionBounds};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdtConfig {
    /// Forecast service configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Location the step source queries
    #[serde(default)]
    pub location: LocationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Instance model parameters
    #[serde(default)]
    pub ontology: OntologyConfig,
}

/// Forecast service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the Locationforecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// User-Agent sent with every request (required by MET Norway)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Parameters of the emitted instance model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyConfig {
    /// Namespace the instance individuals are minted in
    #[serde(default = "default_base_iri")]
    pub base_iri: String,
    #[serde(default = "default_fidelity_seconds")]
    pub fidelity_seconds: i64,
    #[serde(default = "default_fmu_path")]
    pub fmu_path: String,
    #[serde(default = "default_optimal_min")]
    pub optimal_min: f64,
    #[serde(default = "default_true")]
    pub optimal_min_inclusive: bool,
    #[serde(default = "default_optimal_max")]
    pub optimal_max: f64,
    #[serde(default = "default_true")]
    pub optimal_max_inclusive: bool,
    #[serde(default = "default_true")]
    pub generate_combinations_only_from_optimal_conditions: bool,
    #[serde(default = "default_reached_in_maximum_seconds")]
    pub reached_in_maximum_seconds: i64,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.met.no/weatherapi/locationforecast/2.0".to_string()
}

fn default_user_agent() -> String {
    "YrWeather FMU v0.1".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_latitude() -> f64 {
    60.3913
}

fn default_longitude() -> f64 {
    5.3221
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_base_iri() -> String {
    "http://www.semanticweb.org/ivans/ontologies/2025/instance-model-1/".to_string()
}

fn default_fidelity_seconds() -> i64 {
    3600
}

fn default_fmu_path() -> String {
    "NordPool.fmu".to_string()
}

fn default_optimal_min() -> f64 {
    0.0
}

fn default_optimal_max() -> f64 {
    100.0
}

fn default_true() -> bool {
    true
}

fn default_reached_in_maximum_seconds() -> i64 {
    3600
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            base_iri: default_base_iri(),
            fidelity_seconds: default_fidelity_seconds(),
            fmu_path: default_fmu_path(),
            optimal_min: default_optimal_min(),
            optimal_min_inclusive: true,
            optimal_max: default_optimal_max(),
            optimal_max_inclusive: true,
            generate_combinations_only_from_optimal_conditions: true,
            reached_in_maximum_seconds: default_reached_in_maximum_seconds(),
        }
    }
}

impl Default for RdtConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            location: LocationConfig::default(),
            logging: LoggingConfig::default(),
            ontology: OntologyConfig::default(),
        }
    }
}

impl LocationConfig {
    /// Build the validated query for this location
    pub fn to_query(&self) -> crate::Result<ForecastQuery> {
        ForecastQuery::new(self.latitude, self.longitude)
    }
}

impl OntologyConfig {
    #[must_use]
    pub fn to_options(&self) -> InstanceModelOptions {
        InstanceModelOptions {
            base_iri: self.base_iri.clone(),
            fidelity_seconds: self.fidelity_seconds,
            fmu_path: self.fmu_path.clone(),
            optimal_condition_bounds: OptimalConditionBounds {
                min: self.optimal_min,
                min_inclusive: self.optimal_min_inclusive,
                max: self.optimal_max,
                max_inclusive: self.optimal_max_inclusive,
            },
            generate_combinations_only_from_optimal_conditions: self
                .generate_combinations_only_from_optimal_conditions,
            reached_in_maximum_seconds: self.reached_in_maximum_seconds,
        }
    }
}

impl RdtConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the given path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. RDT_LOCATION__LATITUDE=59.91
        builder = builder.add_source(
            Environment::with_prefix("RDT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: RdtConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rdt-bridge").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.user_agent.is_empty() {
            self.weather.user_agent = default_user_agent();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.ontology.base_iri.is_empty() {
            self.ontology.base_iri = default_base_iri();
        }
        if self.ontology.fmu_path.is_empty() {
            self.ontology.fmu_path = default_fmu_path();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.location.to_query()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                RdtError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.max_retries > 10 {
            return Err(RdtError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.ontology.fidelity_seconds <= 0 {
            return Err(RdtError::config("Simulation fidelity must be a positive number of seconds").into());
        }

        if self.ontology.reached_in_maximum_seconds < 0 {
            return Err(RdtError::config("reached_in_maximum_seconds cannot be negative").into());
        }

        if !self.ontology.optimal_min.is_finite()
            || !self.ontology.optimal_max.is_finite()
            || self.ontology.optimal_min > self.ontology.optimal_max
        {
            return Err(RdtError::config(format!(
                "Optimal condition bounds are invalid: min {} max {}",
                self.ontology.optimal_min, self.ontology.optimal_max
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RdtError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RdtError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(RdtError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RdtConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.met.no/weatherapi/locationforecast/2.0"
        );
        assert_eq!(config.weather.user_agent, "YrWeather FMU v0.1");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.location.latitude, 60.3913);
        assert_eq!(config.location.longitude, 5.3221);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.ontology.fmu_path, "NordPool.fmu");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = RdtConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = RdtConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_inverted_bounds() {
        let mut config = RdtConfig::default();
        config.ontology.optimal_min = 30.0;
        config.ontology.optimal_max = 10.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("bounds are invalid"));
    }

    #[test]
    fn test_config_validation_bad_location() {
        let mut config = RdtConfig::default();
        config.location.latitude = 123.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_strings() {
        let mut config = RdtConfig::default();
        config.weather.user_agent.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.weather.user_agent, "YrWeather FMU v0.1");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("rdt-bridge-test-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[location]\nlatitude = 59.9139\nlongitude = 10.7522\n\n[ontology]\nfmu_path = \"Weather.fmu\"\n",
        )
        .unwrap();

        let config = RdtConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.location.latitude, 59.9139);
        assert_eq!(config.location.longitude, 10.7522);
        assert_eq!(config.ontology.fmu_path, "Weather.fmu");
        assert_eq!(config.weather.max_retries, 3);
    }

    #[test]
    fn test_options_carry_bounds() {
        let mut config = RdtConfig::default();
        config.ontology.optimal_min = 18.0;
        config.ontology.optimal_max_inclusive = false;
        let options = config.ontology.to_options();
        assert_eq!(options.optimal_condition_bounds.min, 18.0);
        assert!(options.optimal_condition_bounds.min_inclusive);
        assert!(!options.optimal_condition_bounds.max_inclusive);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = RdtConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("rdt-bridge"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
