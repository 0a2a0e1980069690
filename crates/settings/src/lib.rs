//! Administrator Settings
//!
//! Minimum, maximum, and base speed configured by the fleet administrator.
//! Values come from built-in defaults, an optional config file, and
//! `SPEED_ADVISOR_*` environment variables, and can be updated at runtime
//! through [`SettingsStore`].

mod admin;
mod store;

pub use admin::{parse_speed_field, AdminSettings, ENV_PREFIX};
pub use store::SettingsStore;

use thiserror::Error;

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Config source could not be read or built
    #[error("Configuration error: {0}")]
    Config(String),
    /// Minimum speed configured above the maximum
    #[error("Inconsistent admin bounds: min {min} > max {max}")]
    InconsistentBounds { min: i32, max: i32 },
    /// Store lock poisoned
    #[error("Store error: {0}")]
    Store(String),
}

impl From<config::ConfigError> for SettingsError {
    fn from(err: config::ConfigError) -> Self {
        SettingsError::Config(err.to_string())
    }
}
