//! Forecast client for the MET Norway Locationforecast 2.0 API
//!
//! The service is keyless but requires an identifying `User-Agent`. Requests
//! are retried on transient failures according to the configured policy.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use super::ForecastProvider;
use crate::config::WeatherConfig;
use crate::models::{ForecastQuery, ForecastSample, ForecastSeries, InstantDetails};
use crate::{RdtError, Result};

/// Locationforecast response structures
#[derive(Debug, Deserialize)]
pub struct LocationForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub meta: Option<ForecastMeta>,
    #[serde(default)]
    pub timeseries: Vec<TimeStep>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastMeta {
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TimeStep {
    pub time: DateTime<Utc>,
    pub data: TimeStepData,
}

#[derive(Debug, Deserialize)]
pub struct TimeStepData {
    pub instant: Option<InstantData>,
}

#[derive(Debug, Deserialize)]
pub struct InstantData {
    #[serde(default)]
    pub details: InstantDetails,
}

impl LocationForecastResponse {
    /// Convert the response into a series; entries without instant data keep empty details
    #[must_use]
    pub fn into_series(self, query: ForecastQuery) -> ForecastSeries {
        let updated_at = self.properties.meta.and_then(|m| m.updated_at);
        let samples = self
            .properties
            .timeseries
            .into_iter()
            .map(|step| ForecastSample {
                time: step.time,
                details: step.data.instant.map(|i| i.details).unwrap_or_default(),
            })
            .collect();
        ForecastSeries::new(query, samples, updated_at)
    }
}

/// HTTP client for the Locationforecast API
pub struct LocationForecastClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl LocationForecastClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RdtError::api(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn compact_url(&self, query: &ForecastQuery) -> String {
        let (lat, lon) = query.rounded_coordinates();
        format!("{}/compact?lat={lat}&lon={lon}", self.base_url)
    }
}

#[async_trait]
impl ForecastProvider for LocationForecastClient {
    #[instrument(name = "locationforecast", skip(self))]
    async fn get_forecast(&self, query: &ForecastQuery) -> Result<ForecastSeries> {
        let url = self.compact_url(query);
        debug!("Locationforecast request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                error!("Forecast request failed: {}", e);
                RdtError::api(format!("Request to {url} failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Forecast service returned {}", status);
            return Err(RdtError::api(format!("Forecast service returned {status} for {url}")));
        }

        let body: LocationForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to parse forecast response: {}", e);
            RdtError::api(format!("Invalid forecast data received: {e}"))
        })?;

        let series = body.into_series(*query);
        info!(
            "Fetched {} forecast samples in {:?}",
            series.samples().len(),
            start_time.elapsed()
        );
        Ok(series)
    }
}
