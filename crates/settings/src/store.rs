//! In-memory settings store

use crate::{AdminSettings, SettingsError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

const KEY_MIN_SPEED: &str = "min_speed";
const KEY_MAX_SPEED: &str = "max_speed";
const KEY_BASE_SPEED: &str = "base_speed";

/// Key-value store for admin settings
///
/// Keys that were never saved read back as the configured defaults.
pub struct SettingsStore {
    values: Mutex<HashMap<&'static str, i32>>,
    defaults: AdminSettings,
}

impl SettingsStore {
    /// Create an empty store backed by the built-in defaults
    pub fn new() -> Self {
        Self::with_defaults(AdminSettings::default())
    }

    /// Create an empty store with custom defaults (e.g. loaded from config)
    pub fn with_defaults(defaults: AdminSettings) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            defaults,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<&'static str, i32>>, SettingsError> {
        self.values
            .lock()
            .map_err(|e| SettingsError::Store(format!("Lock error: {}", e)))
    }

    fn get(&self, key: &str, default: i32) -> Result<i32, SettingsError> {
        Ok(self.lock()?.get(key).copied().unwrap_or(default))
    }

    /// Minimum speed
    pub fn min(&self) -> Result<i32, SettingsError> {
        self.get(KEY_MIN_SPEED, self.defaults.min_speed)
    }

    /// Maximum speed
    pub fn max(&self) -> Result<i32, SettingsError> {
        self.get(KEY_MAX_SPEED, self.defaults.max_speed)
    }

    /// Base speed
    pub fn base(&self) -> Result<i32, SettingsError> {
        self.get(KEY_BASE_SPEED, self.defaults.base_speed)
    }

    /// Current settings, read under a single lock so a concurrent `save`
    /// is seen entirely or not at all
    pub fn snapshot(&self) -> Result<AdminSettings, SettingsError> {
        let values = self.lock()?;
        let read = |key: &str, default: i32| values.get(key).copied().unwrap_or(default);
        Ok(AdminSettings {
            min_speed: read(KEY_MIN_SPEED, self.defaults.min_speed),
            max_speed: read(KEY_MAX_SPEED, self.defaults.max_speed),
            base_speed: read(KEY_BASE_SPEED, self.defaults.base_speed),
        })
    }

    /// Save all three values
    pub fn save(&self, min: i32, max: i32, base: i32) -> Result<(), SettingsError> {
        let mut values = self.lock()?;
        values.insert(KEY_MIN_SPEED, min);
        values.insert(KEY_MAX_SPEED, max);
        values.insert(KEY_BASE_SPEED, base);
        info!("Saved admin settings: min={} max={} base={}", min, max, base);
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
