//! Offline weather simulation

use crate::{fallback_reading, Location, WeatherError, WeatherSource};
use async_trait::async_trait;
use tracing::debug;
use weather_classifier::WeatherReading;

/// Source that never touches the network
///
/// Returns a fixed reading, 15 °C and dry unless configured otherwise.
#[derive(Debug, Clone)]
pub struct OfflineSource {
    reading: WeatherReading,
}

impl OfflineSource {
    pub fn new() -> Self {
        Self {
            reading: fallback_reading(),
        }
    }

    /// Simulate a specific reading
    pub fn with_reading(reading: WeatherReading) -> Self {
        Self { reading }
    }
}

impl Default for OfflineSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherSource for OfflineSource {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn current(&self, location: Location) -> Result<WeatherReading, WeatherError> {
        debug!(
            "Offline weather for ({}, {}): {}",
            location.latitude, location.longitude, self.reading.category
        );
        Ok(self.reading)
    }
}
