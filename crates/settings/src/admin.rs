//! Admin settings loading and validation

use crate::SettingsError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use speed_rules::AdminBounds;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable prefix (`SPEED_ADVISOR_MIN_SPEED`, ...)
pub const ENV_PREFIX: &str = "SPEED_ADVISOR";

/// Administrator speed settings (km/h)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    /// Minimum allowed speed (default: 60)
    pub min_speed: i32,
    /// Maximum allowed speed (default: 120)
    pub max_speed: i32,
    /// Base speed before penalties (default: 80)
    pub base_speed: i32,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            min_speed: 60,
            max_speed: 120,
            base_speed: 80,
        }
    }
}

impl AdminSettings {
    /// Load settings from defaults, an optional file, and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(path, Some(ENV_PREFIX))
    }

    /// Load settings with an explicit environment prefix (`None` skips the environment)
    pub fn load_with_env(path: Option<&Path>, env_prefix: Option<&str>) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("min_speed", i64::from(defaults.min_speed))?
            .set_default("max_speed", i64::from(defaults.max_speed))?
            .set_default("base_speed", i64::from(defaults.base_speed))?;

        if let Some(path) = path {
            info!("Loading admin settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        if let Some(prefix) = env_prefix {
            builder = builder.add_source(Environment::with_prefix(prefix).try_parsing(true));
        }

        let config = builder.build()?;
        let settings = AdminSettings {
            min_speed: read_speed(&config, "min_speed", defaults.min_speed),
            max_speed: read_speed(&config, "max_speed", defaults.max_speed),
            base_speed: read_speed(&config, "base_speed", defaults.base_speed),
        };
        debug!("Admin settings: {:?}", settings);
        Ok(settings)
    }

    /// Check that the minimum does not exceed the maximum
    ///
    /// The rule engine applies the maximum last, so an inverted pair would
    /// silently recommend a speed below the configured minimum.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_speed > self.max_speed {
            Err(SettingsError::InconsistentBounds {
                min: self.min_speed,
                max: self.max_speed,
            })
        } else {
            Ok(())
        }
    }

    /// Administrator bounds for the rule engine
    pub fn bounds(&self) -> AdminBounds {
        AdminBounds::new(self.min_speed, self.max_speed)
    }
}

/// Read one speed key, falling back to the default when the value is not an integer
fn read_speed(config: &Config, key: &str, default: i32) -> i32 {
    let value = config.get_string(key).ok();
    match value.as_deref().and_then(parse_speed_field) {
        Some(speed) => speed,
        None => {
            warn!(
                "Invalid {} value {:?}, using default {}",
                key,
                value.unwrap_or_default(),
                default
            );
            default
        }
    }
}

/// Parse a speed typed into an admin form
///
/// Empty or malformed input yields `None` so the field is treated as unset.
pub fn parse_speed_field(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("Ignoring malformed speed field {:?}", text);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = AdminSettings::load_with_env(None, None).unwrap();
        assert_eq!(settings, AdminSettings::default());
        assert_eq!(settings.bounds(), AdminBounds::new(60, 120));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "min_speed = 40\nbase_speed = 90").unwrap();

        let settings = AdminSettings::load_with_env(Some(file.path()), None).unwrap();
        assert_eq!(settings.min_speed, 40);
        assert_eq!(settings.max_speed, 120);
        assert_eq!(settings.base_speed, 90);
    }

    #[test]
    fn test_malformed_file_value_uses_default() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "min_speed = \"abc\"\nmax_speed = 100\nbase_speed = 72.5").unwrap();

        let settings = AdminSettings::load_with_env(Some(file.path()), None).unwrap();
        assert_eq!(settings.min_speed, 60);
        assert_eq!(settings.max_speed, 100);
        assert_eq!(settings.base_speed, 80);
    }

    #[test]
    fn test_env_overrides_and_malformed_env_value() {
        // Prefix is unique to this test so parallel tests never see it
        std::env::set_var("SPEEDADVTEST_MIN_SPEED", "fast");
        std::env::set_var("SPEEDADVTEST_MAX_SPEED", "95");

        let settings = AdminSettings::load_with_env(None, Some("SPEEDADVTEST")).unwrap();
        assert_eq!(settings.min_speed, 60);
        assert_eq!(settings.max_speed, 95);
        assert_eq!(settings.base_speed, 80);

        std::env::remove_var("SPEEDADVTEST_MIN_SPEED");
        std::env::remove_var("SPEEDADVTEST_MAX_SPEED");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = AdminSettings::load_with_env(Some(Path::new("/nonexistent/admin.toml")), None);
        assert!(matches!(result, Err(SettingsError::Config(_))));
    }

    #[test]
    fn test_validate_inverted_bounds() {
        let settings = AdminSettings {
            min_speed: 100,
            max_speed: 50,
            base_speed: 80,
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InconsistentBounds { min: 100, max: 50 })
        ));
        assert!(AdminSettings::default().validate().is_ok());
    }

    #[test]
    fn test_parse_speed_field() {
        assert_eq!(parse_speed_field(" 70 "), Some(70));
        assert_eq!(parse_speed_field("0"), Some(0));
        assert_eq!(parse_speed_field("-10"), Some(-10));
        assert_eq!(parse_speed_field(""), None);
        assert_eq!(parse_speed_field("   "), None);
        assert_eq!(parse_speed_field("fast"), None);
        assert_eq!(parse_speed_field("80.5"), None);
    }
}
