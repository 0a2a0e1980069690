//! Weather Classification
//!
//! Converts raw provider observations (temperature, precipitation, WMO
//! condition code) into the canonical weather reading consumed by the
//! speed rule engine.

mod classifier;
mod reading;

pub use classifier::{classify, is_snow_code};
pub use reading::{RawObservation, WeatherCategory, WeatherReading};

/// WMO weather code ranges reported by Open-Meteo
pub mod wmo {
    /// Snow fall and snow grains
    pub const SNOW_FALL: (i32, i32) = (71, 77);
    /// Snow showers
    pub const SNOW_SHOWERS: (i32, i32) = (85, 86);
}
