//! Weather Reading Types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical weather category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    /// Dry road, no precipitation
    Clear,
    /// Liquid precipitation
    Rain,
    /// Snow reported above freezing
    Snow,
    /// Freezing temperature, ice assumed
    Ice,
}

impl WeatherCategory {
    /// Lowercase label used in reasoning trails and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "clear",
            WeatherCategory::Rain => "rain",
            WeatherCategory::Snow => "snow",
            WeatherCategory::Ice => "ice",
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical weather reading produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature (°C)
    pub temperature_c: f64,
    /// Precipitation (mm)
    pub precipitation_mm: f64,
    /// Canonical category
    pub category: WeatherCategory,
}

impl WeatherReading {
    /// Create a reading from already-classified values
    pub fn new(temperature_c: f64, precipitation_mm: f64, category: WeatherCategory) -> Self {
        Self {
            temperature_c,
            precipitation_mm,
            category,
        }
    }
}

impl Default for WeatherReading {
    /// Mild dry weather, used when no observation is available
    fn default() -> Self {
        Self::new(20.0, 0.0, WeatherCategory::Clear)
    }
}

/// Raw observation as reported by a weather provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Air temperature (°C)
    pub temperature_c: f64,
    /// Precipitation (mm), some providers omit it
    #[serde(default)]
    pub precipitation_mm: Option<f64>,
    /// WMO weather code
    pub weather_code: i32,
}

impl RawObservation {
    /// Classify this observation into a canonical reading
    pub fn classify(&self) -> WeatherReading {
        crate::classify(
            self.temperature_c,
            self.precipitation_mm.unwrap_or(0.0),
            self.weather_code,
        )
    }
}
