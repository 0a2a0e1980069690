//! Weather Classifier
//!
//! First matching rule wins:
//! 1. temperature <= 0 °C → ice
//! 2. snow WMO code → snow
//! 3. any precipitation → rain
//! 4. otherwise clear

use crate::reading::{WeatherCategory, WeatherReading};
use crate::wmo;
use tracing::trace;

/// Check whether a WMO code reports snow
pub fn is_snow_code(code: i32) -> bool {
    let in_range = |(lo, hi): (i32, i32)| (lo..=hi).contains(&code);
    in_range(wmo::SNOW_FALL) || in_range(wmo::SNOW_SHOWERS)
}

/// Classify a raw observation into a canonical weather reading
///
/// Never fails: unknown codes fall through to the precipitation check.
pub fn classify(temperature_c: f64, precipitation_mm: f64, weather_code: i32) -> WeatherReading {
    let category = if temperature_c <= 0.0 {
        WeatherCategory::Ice
    } else if is_snow_code(weather_code) {
        WeatherCategory::Snow
    } else if precipitation_mm > 0.0 {
        WeatherCategory::Rain
    } else {
        WeatherCategory::Clear
    };

    trace!(
        temperature_c,
        precipitation_mm,
        weather_code,
        category = %category,
        "Classified weather observation"
    );

    WeatherReading::new(temperature_c, precipitation_mm, category)
}
