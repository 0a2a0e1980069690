//! Weather Data Sources
//!
//! Retrieves the current weather for a location and hands it back as a
//! canonical [`WeatherReading`]. A fetch either yields a reading or a
//! descriptive [`WeatherError`]; callers decide on the fallback.

mod error;
mod offline;
mod open_meteo;

pub use error::WeatherError;
pub use offline::OfflineSource;
pub use open_meteo::{parse_current, ClientConfig, OpenMeteoClient};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use weather_classifier::{WeatherCategory, WeatherReading};

/// Geographic location (decimal degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Comodoro Rivadavia, home of the fleet
    pub const COMODORO_RIVADAVIA: Location = Location {
        latitude: -45.86,
        longitude: -67.48,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::COMODORO_RIVADAVIA
    }
}

/// Reading used when weather is simulated or a fetch failed
pub fn fallback_reading() -> WeatherReading {
    WeatherReading::new(15.0, 0.0, WeatherCategory::Clear)
}

/// Source of current weather conditions
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Fetch and classify the current weather at a location
    async fn current(&self, location: Location) -> Result<WeatherReading, WeatherError>;
}
