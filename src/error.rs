//! Error types and handling for the Hamro Weather application

use thiserror::Error;

/// Main error type for the Hamro Weather application
#[derive(Error, Debug)]
pub enum HamroWeatherError {
    /// Configuration-related errors (missing API key, bad storage path)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// The requested place could not be resolved by the provider
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// Input validation errors (empty search query, malformed coordinates)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Preference storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl HamroWeatherError {
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

    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message suitable for the error banner
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HamroWeatherError::Config { .. } => {
                "Configuration error. Please check your API keys.".to_string()
            }
            HamroWeatherError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            HamroWeatherError::LocationNotFound { query } => {
                format!("City not found: {query}")
            }
            HamroWeatherError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            HamroWeatherError::Storage { .. } => {
                "Could not read or write saved preferences.".to_string()
            }
            HamroWeatherError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = HamroWeatherError::config("missing API key");
        assert!(matches!(config_err, HamroWeatherError::Config { .. }));

        let api_err = HamroWeatherError::api("connection failed");
        assert!(matches!(api_err, HamroWeatherError::Api { .. }));

        let validation_err = HamroWeatherError::validation("empty query");
        assert!(matches!(
            validation_err,
            HamroWeatherError::Validation { .. }
        ));
    }

    #[test]
    fn test_user_messages() {
        let not_found = HamroWeatherError::location_not_found("Atlantis");
        assert!(not_found.user_message().contains("Atlantis"));

        let api_err = HamroWeatherError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let validation_err = HamroWeatherError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HamroWeatherError = io_err.into();
        assert!(matches!(err, HamroWeatherError::Io { .. }));
    }
}
