//! Forecast query model for the location of interest

use serde::{Deserialize, Serialize};

use crate::{RdtError, Result};

/// Immutable location a forecast session is bound to
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "Coordinates")]
pub struct ForecastQuery {
    /// Latitude in decimal degrees
    latitude: f64,
    /// Longitude in decimal degrees
    longitude: f64,
}

#[derive(Deserialize)]
struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<Coordinates> for ForecastQuery {
    type Error = RdtError;

    fn try_from(coordinates: Coordinates) -> Result<Self> {
        Self::new(coordinates.latitude, coordinates.longitude)
    }
}

impl ForecastQuery {
    /// Create a new query, rejecting coordinates outside the WGS84 ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(RdtError::validation(format!(
                "latitude {latitude} is outside -90..=90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(RdtError::validation(format!(
                "longitude {longitude} is outside -180..=180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Coordinates rounded to the four decimals the forecast service accepts
    #[must_use]
    pub fn rounded_coordinates(&self) -> (f64, f64) {
        let lat = (self.latitude * 10_000.0).round() / 10_000.0;
        let lon = (self.longitude * 10_000.0).round() / 10_000.0;
        (lat, lon)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl Default for ForecastQuery {
    /// Bergen, the location the weather step source ships with
    fn default() -> Self {
        Self {
            latitude: 60.3913,
            longitude: 5.3221,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_query_rounded_coordinates() {
        let query = ForecastQuery::new(60.391_349, 5.322_051).unwrap();
        assert_eq!(query.rounded_coordinates(), (60.3913, 5.3221));
        assert_eq!(query.format_coordinates(), "60.3913, 5.3221");
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(-91.0, 0.0)]
    #[case(0.0, 180.1)]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn test_query_rejects_invalid_coordinates(#[case] lat: f64, #[case] lon: f64) {
        let result = ForecastQuery::new(lat, lon);
        assert!(matches!(result, Err(RdtError::Validation { .. })));
    }

    #[test]
    fn test_deserialize_validates_coordinates() {
        let query: ForecastQuery =
            serde_json::from_str(r#"{"latitude": 60.3913, "longitude": 5.3221}"#).unwrap();
        assert_eq!(query, ForecastQuery::default());

        let err = serde_json::from_str::<ForecastQuery>(r#"{"latitude": 123.0, "longitude": 5.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("latitude 123"));
    }

    #[test]
    fn test_default_query_is_bergen() {
        let query = ForecastQuery::default();
        assert_eq!(query.latitude(), 60.3913);
        assert_eq!(query.longitude(), 5.3221);
    }
}
