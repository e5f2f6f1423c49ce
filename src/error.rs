//! Error types and handling for `rdt-bridge`

use thiserror::Error;

/// Main error type for the `rdt-bridge` crate
#[derive(Error, Debug)]
pub enum RdtError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast service communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Errors while reading the cached forecast series
    #[error("Forecast error: {message}")]
    Forecast { message: String },

    /// Errors while building ontology terms
    #[error("Ontology error: {message}")]
    Ontology { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl RdtError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new forecast error
    pub fn forecast<S: Into<String>>(message: S) -> Self {
        Self::Forecast {
            message: message.into(),
        }
    }

    /// Create a new ontology error
    pub fn ontology<S: Into<String>>(message: S) -> Self {
        Self::Ontology {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RdtError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            RdtError::Api { .. } => {
                "Unable to reach the forecast service. Please check your internet connection."
                    .to_string()
            }
            RdtError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            RdtError::Forecast { message } => {
                format!("Forecast lookup failed: {message}")
            }
            RdtError::Ontology { message } => {
                format!("Could not build the instance model: {message}")
            }
            RdtError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<oxrdf::IriParseError> for RdtError {
    fn from(err: oxrdf::IriParseError) -> Self {
        RdtError::ontology(err.to_string())
    }
}
