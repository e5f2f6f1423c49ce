//! Data models for the forecast step source
//!
//! This module contains the core domain models organized by concern:
//! - Location: the immutable forecast query
//! - Forecast: cached forecast series and the lookup over it
//! - Clock: simulated time to wall-clock mapping

pub mod clock;
pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use clock::SimulatedClock;
pub use forecast::{ForecastReading, ForecastSample, ForecastSeries, InstantDetails, LookupOutcome};
pub use location::ForecastQuery;
