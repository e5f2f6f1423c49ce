//! `rdt-bridge` - glue components for ruleless digital twins
//!
//! This library provides a forecast-backed co-simulation step source that
//! exposes the forecasted air temperature at each simulated instant, and an
//! emitter for the ontology facts describing a twin's platform, sensors,
//! actuators and simulation models.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ontology;
pub mod step_source;
pub mod weather;

// Re-export core types for public API
pub use config::RdtConfig;
pub use error::RdtError;
pub use models::{ForecastQuery, ForecastReading, ForecastSeries, LookupOutcome, SimulatedClock};
pub use step_source::{ForecastStepSource, StepReading};
pub use weather::{ForecastFetcher, ForecastProvider, LocationForecastClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RdtError>;
