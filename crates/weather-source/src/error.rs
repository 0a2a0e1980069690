//! Weather Source Error Types

use thiserror::Error;

/// Errors that can occur while fetching weather
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Transport failure (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Request(String),

    /// Provider answered with a non-success status
    #[error("HTTP request failed with status {0}")]
    Http(u16),

    /// Body could not be decoded
    #[error("Invalid weather response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}
