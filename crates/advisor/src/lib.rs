//! Speed Advisor
//!
//! Wires the admin settings store, a weather source, and the speed rule
//! engine into one recommendation call.

use chrono::{DateTime, Utc};
use serde::Serialize;
use settings::{SettingsError, SettingsStore};
use speed_rules::{DrivingContext, RoadSurface, RuleError, SpeedDecision, SpeedRuleEngine, TimeOfDay};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use weather_classifier::WeatherReading;
use weather_source::{fallback_reading, Location, WeatherError, WeatherSource};

/// Advisor errors
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
}

/// Driver input for one recommendation
#[derive(Debug, Clone, Copy, Default)]
pub struct AdviceRequest {
    /// Road surface, required
    pub road_surface: Option<RoadSurface>,
    /// Time of day, required
    pub time_of_day: Option<TimeOfDay>,
    /// Use simulated weather instead of the source
    pub offline: bool,
    /// Where to fetch weather for
    pub location: Location,
}

/// A recommendation and the inputs it was based on
#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub decision: SpeedDecision,
    pub weather: WeatherReading,
    /// Whether the weather is the simulated/fallback reading
    pub weather_fallback: bool,
    pub computed_at: DateTime<Utc>,
}

/// Speed advisor
pub struct Advisor {
    source: Arc<dyn WeatherSource>,
    engine: SpeedRuleEngine,
    settings: SettingsStore,
}

impl Advisor {
    /// Create an advisor with the default rule constants
    pub fn new(source: Arc<dyn WeatherSource>, settings: SettingsStore) -> Self {
        info!("Creating speed advisor with {} weather source", source.name());
        Self {
            source,
            engine: SpeedRuleEngine::default(),
            settings,
        }
    }

    /// Replace the rule engine
    pub fn with_engine(mut self, engine: SpeedRuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Admin settings store
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Current weather, or the fallback reading when offline or the fetch fails
    ///
    /// The flag is `true` when the fallback was used.
    pub async fn weather(&self, request: &AdviceRequest) -> (WeatherReading, bool) {
        if request.offline {
            debug!("Offline mode, using simulated weather");
            return (fallback_reading(), true);
        }

        match self.source.current(request.location).await {
            Ok(reading) => (reading, false),
            Err(e) => {
                warn!("Weather fetch from {} failed: {}", self.source.name(), e);
                metrics::counter!("advisor_weather_fallback_total").increment(1);
                (fallback_reading(), true)
            }
        }
    }

    /// Compute a speed recommendation
    ///
    /// Fails only when the request lacks road surface or time of day; the
    /// context is checked before any weather is fetched.
    pub async fn recommend(&self, request: &AdviceRequest) -> Result<Advice, AdvisorError> {
        let admin = self.settings.snapshot()?;
        if let Err(e) = admin.validate() {
            warn!("{}; the maximum will take precedence", e);
        }

        let mut draft = DrivingContext::builder()
            .bounds(admin.bounds())
            .base_speed(admin.base_speed);
        if let Some(surface) = request.road_surface {
            draft = draft.road_surface(surface);
        }
        if let Some(time) = request.time_of_day {
            draft = draft.time_of_day(time);
        }
        let context = draft.build()?;

        let (weather, weather_fallback) = self.weather(request).await;
        let decision = self.engine.compute(&context, Some(&weather));

        metrics::counter!("advisor_decisions_total").increment(1);
        info!(
            "Speed computed: {} km/h - {}",
            decision.max_speed_kmh,
            decision.reason()
        );

        Ok(Advice {
            decision,
            weather,
            weather_fallback,
            computed_at: Utc::now(),
        })
    }
}

/// Initialize logging
///
/// Level comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(json: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}
