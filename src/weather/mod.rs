use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::Result;
use crate::models::{ForecastQuery, ForecastSeries, LookupOutcome};

pub mod locationforecast;

pub use locationforecast::LocationForecastClient;

/// Source of forecast series for a location
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn get_forecast(&self, query: &ForecastQuery) -> Result<ForecastSeries>;
}

/// Holds the one forecast series fetched for a session.
///
/// The series is never refreshed; every lookup reads the same data.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    query: ForecastQuery,
    series: ForecastSeries,
}

impl ForecastFetcher {
    /// Query the provider once and cache the result
    #[instrument(name = "fetch_forecast", skip(provider), fields(lat = query.latitude(), lon = query.longitude()))]
    pub async fn fetch<P: ForecastProvider + ?Sized>(provider: &P, query: ForecastQuery) -> Result<Self> {
        let series = provider.get_forecast(&query).await?;
        info!(
            samples = series.samples().len(),
            window = ?series.window(),
            "Cached forecast for {}",
            query.format_coordinates()
        );
        Ok(Self::from_series(query, series))
    }

    #[must_use]
    pub fn from_series(query: ForecastQuery, series: ForecastSeries) -> Self {
        Self { query, series }
    }

    #[must_use]
    pub fn query(&self) -> ForecastQuery {
        self.query
    }

    #[must_use]
    pub fn series(&self) -> &ForecastSeries {
        &self.series
    }

    #[must_use]
    pub fn lookup(&self, at: DateTime<Utc>) -> LookupOutcome {
        self.series.lookup(at)
    }
}
