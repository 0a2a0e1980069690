//! Open-Meteo HTTP Client
//!
//! Queries the `current` block of the Open-Meteo forecast API and runs the
//! result through the weather classifier.

use crate::{Location, WeatherError, WeatherSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use weather_classifier::{RawObservation, WeatherReading};

/// Public Open-Meteo endpoint
const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Variables requested in the `current` block
const CURRENT_PARAMS: &str = "temperature_2m,precipitation,weather_code";

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host of the API
    pub base_url: String,
    /// Connect timeout (milliseconds)
    pub connect_timeout_ms: u64,
    /// Whole-request timeout (milliseconds)
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_ms: 10_000,
            request_timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    #[serde(default)]
    precipitation: Option<f64>,
    weather_code: i32,
}

/// Decode an Open-Meteo forecast body into a raw observation
///
/// `temperature_2m` and `weather_code` are required; a missing or null
/// `precipitation` is left as `None`.
pub fn parse_current(body: &str) -> Result<RawObservation, WeatherError> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    let current = response.current;
    Ok(RawObservation {
        temperature_c: current.temperature_2m,
        precipitation_mm: current.precipitation,
        weather_code: current.weather_code,
    })
}

/// Open-Meteo weather client
pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl OpenMeteoClient {
    /// Create a client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        info!("Creating Open-Meteo client for {}", config.base_url);

        let client = reqwest::Client::builder()
            .user_agent(concat!("fleet-speed-advisor/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the raw observation without classifying it
    pub async fn fetch_observation(&self, location: Location) -> Result<RawObservation, WeatherError> {
        let url = format!("{}/v1/forecast", self.config.base_url.trim_end_matches('/'));
        debug!(
            "GET {} lat={} lon={}",
            url, location.latitude, location.longitude
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_PARAMS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Open-Meteo returned status {}", status);
            return Err(WeatherError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        parse_current(&body)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    async fn current(&self, location: Location) -> Result<WeatherReading, WeatherError> {
        let observation = self.fetch_observation(location).await?;
        let reading = observation.classify();
        info!(
            "Current weather: {:.1} °C, {:.1} mm, {}",
            reading.temperature_c, reading.precipitation_mm, reading.category
        );
        Ok(reading)
    }
}
