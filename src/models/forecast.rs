//! Forecast series model and the time-indexed lookup over it

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::ForecastQuery;

/// Instant values of one forecast sample.
///
/// Every field is optional: the service drops values it has no data for.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct InstantDetails {
    /// Air temperature in Celsius
    pub air_temperature: Option<f64>,
    /// Cloud cover percentage (0-100)
    pub cloud_area_fraction: Option<f64>,
    /// Pressure at sea level in hPa
    pub air_pressure_at_sea_level: Option<f64>,
    /// Relative humidity percentage (0-100)
    pub relative_humidity: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_from_direction: Option<f64>,
}

/// One time-stamped forecast sample
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    pub details: InstantDetails,
}

/// The values a step source reads out of a sample
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ForecastReading {
    /// Temperature in Celsius
    pub air_temperature: f64,
    /// Cloud cover percentage (0-100)
    pub cloud_area_fraction: f64,
}

/// Result of looking up a single instant in a cached series
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// A complete sample exists for the instant
    Found(ForecastReading),
    /// No sample for the instant, or the sample lacks the values we read
    NotFound,
    /// The lookup itself failed; callers treat it as `NotFound` but report it
    TransientError(String),
}

impl LookupOutcome {
    #[must_use]
    pub fn reading(&self) -> Option<ForecastReading> {
        match self {
            LookupOutcome::Found(reading) => Some(*reading),
            LookupOutcome::NotFound | LookupOutcome::TransientError(_) => None,
        }
    }

    /// Emit an error event for a transient failure and pass the outcome on
    #[must_use]
    pub fn logged(self) -> Self {
        if let LookupOutcome::TransientError(details) = &self {
            error!("Forecast lookup failed, reporting not found: {details}");
        }
        self
    }
}

/// Forecast series returned by a single upstream query
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(from = "SeriesRecord")]
pub struct ForecastSeries {
    /// Location the series was requested for
    pub query: ForecastQuery,
    /// Samples, sorted by time
    samples: Vec<ForecastSample>,
    /// When the service last updated the forecast
    pub updated_at: Option<DateTime<Utc>>,
    /// When this series was retrieved
    pub retrieved_at: DateTime<Utc>,
}

/// Serialized form of a series; sorted on the way in
#[derive(Deserialize)]
struct SeriesRecord {
    query: ForecastQuery,
    samples: Vec<ForecastSample>,
    updated_at: Option<DateTime<Utc>>,
    retrieved_at: DateTime<Utc>,
}

impl From<SeriesRecord> for ForecastSeries {
    fn from(record: SeriesRecord) -> Self {
        Self {
            retrieved_at: record.retrieved_at,
            ..Self::new(record.query, record.samples, record.updated_at)
        }
    }
}

impl ForecastSeries {
    /// Create a series; samples are sorted by time
    #[must_use]
    pub fn new(
        query: ForecastQuery,
        mut samples: Vec<ForecastSample>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        samples.sort_by_key(|s| s.time);
        Self {
            query,
            samples,
            updated_at,
            retrieved_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First and last sample time, if any
    #[must_use]
    pub fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.samples.first()?.time, self.samples.last()?.time))
    }

    fn outside_window(&self, at: DateTime<Utc>) -> bool {
        self.window()
            .is_none_or(|(first, last)| at < first || at > last)
    }

    /// Look up the sample stamped at `at`, or else at the whole hour containing it.
    ///
    /// Both keys must match exactly. Past the hourly part of the service's
    /// horizon samples are sparser, so consecutive hours can alternate
    /// between found and not found.
    #[must_use]
    pub fn lookup(&self, at: DateTime<Utc>) -> LookupOutcome {
        let index = match self.samples.binary_search_by_key(&at, |s| s.time) {
            Ok(index) => index,
            Err(_) => {
                let hour = match at.duration_trunc(TimeDelta::hours(1)) {
                    Ok(hour) => hour,
                    Err(_) if self.outside_window(at) => return LookupOutcome::NotFound,
                    Err(e) => {
                        return LookupOutcome::TransientError(format!("cannot truncate {at}: {e}"));
                    }
                };
                let Ok(index) = self.samples.binary_search_by_key(&hour, |s| s.time) else {
                    return LookupOutcome::NotFound;
                };
                index
            }
        };
        let sample = &self.samples[index];

        let (Some(air_temperature), Some(cloud_area_fraction)) = (
            sample.details.air_temperature,
            sample.details.cloud_area_fraction,
        ) else {
            return LookupOutcome::NotFound;
        };

        if !air_temperature.is_finite() || !cloud_area_fraction.is_finite() {
            return LookupOutcome::TransientError(format!(
                "non-finite sample at {}: temperature {air_temperature}, cloud fraction {cloud_area_fraction}",
                sample.time
            ));
        }

        LookupOutcome::Found(ForecastReading {
            air_temperature,
            cloud_area_fraction,
        })
    }
}
