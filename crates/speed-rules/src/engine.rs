//! Speed Rule Engine Implementation

use crate::context::{DrivingContext, DrivingContextBuilder, RoadSurface, TimeOfDay};
use crate::defaults;
use crate::error::RuleError;
use crate::trail::{Adjustment, PenaltyCause, ReasoningTrail};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use weather_classifier::{WeatherCategory, WeatherReading};

/// Rule constants (km/h)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Base speed when the context has no override
    pub base_speed: i32,
    /// Global floor
    pub global_min_speed: i32,
    /// Global ceiling
    pub global_max_speed: i32,
    /// Unpaved road penalty
    pub gravel_penalty: i32,
    /// Night penalty
    pub night_penalty: i32,
    /// Rain penalty
    pub rain_penalty: i32,
    /// Snow penalty
    pub snow_penalty: i32,
    /// Ice penalty
    pub ice_penalty: i32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            base_speed: defaults::BASE_SPEED,
            global_min_speed: defaults::GLOBAL_MIN_SPEED,
            global_max_speed: defaults::GLOBAL_MAX_SPEED,
            gravel_penalty: defaults::GRAVEL_PENALTY,
            night_penalty: defaults::NIGHT_PENALTY,
            rain_penalty: defaults::RAIN_PENALTY,
            snow_penalty: defaults::SNOW_PENALTY,
            ice_penalty: defaults::ICE_PENALTY,
        }
    }
}

impl RuleConfig {
    /// Penalty for a weather category, `None` for clear weather
    pub fn weather_penalty(&self, category: WeatherCategory) -> Option<i32> {
        match category {
            WeatherCategory::Clear => None,
            WeatherCategory::Rain => Some(self.rain_penalty),
            WeatherCategory::Snow => Some(self.snow_penalty),
            WeatherCategory::Ice => Some(self.ice_penalty),
        }
    }
}

/// Result of one engine invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedDecision {
    /// Recommended maximum speed (km/h)
    pub max_speed_kmh: i32,
    /// Adjustments that produced it
    pub trail: ReasoningTrail,
}

impl SpeedDecision {
    /// Human-readable reasoning
    pub fn reason(&self) -> String {
        self.trail.to_string()
    }
}

impl fmt::Display for SpeedDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km/h ({})", self.max_speed_kmh, self.trail)
    }
}

/// Stateless rule engine
#[derive(Debug, Clone, Default)]
pub struct SpeedRuleEngine {
    config: RuleConfig,
}

impl SpeedRuleEngine {
    /// Create an engine with custom constants
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    /// Get the rule constants
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Validate a context draft, then compute
    ///
    /// Fails only when road surface or time of day is unset.
    pub fn decide(
        &self,
        context: DrivingContextBuilder,
        weather: Option<&WeatherReading>,
    ) -> Result<SpeedDecision, RuleError> {
        let context = context.build()?;
        Ok(self.compute(&context, weather))
    }

    /// Compute the maximum safe speed for a validated context
    ///
    /// A missing reading is treated as 20 °C, dry, clear.
    pub fn compute(&self, context: &DrivingContext, weather: Option<&WeatherReading>) -> SpeedDecision {
        let weather = weather.copied().unwrap_or_default();
        let cfg = &self.config;
        let mut trail = ReasoningTrail::new();

        let base = context.base_speed.unwrap_or(cfg.base_speed);
        let mut speed = base;
        trail.push(Adjustment::Base { speed: base });

        if context.road_surface == RoadSurface::Unpaved {
            speed = penalize(&mut trail, speed, PenaltyCause::Gravel, cfg.gravel_penalty);
        }

        if context.time_of_day == TimeOfDay::Night {
            speed = penalize(&mut trail, speed, PenaltyCause::Night, cfg.night_penalty);
        }

        if let Some(amount) = cfg.weather_penalty(weather.category) {
            speed = penalize(
                &mut trail,
                speed,
                PenaltyCause::Weather(weather.category),
                amount,
            );
        }

        let clamped = if speed < cfg.global_min_speed {
            cfg.global_min_speed
        } else if speed > cfg.global_max_speed {
            cfg.global_max_speed
        } else {
            speed
        };
        if clamped != speed {
            debug!("Global clamp {} -> {}", speed, clamped);
            trail.push(Adjustment::GlobalClamp { speed: clamped });
            speed = clamped;
        }

        if context.bounds.is_configured() {
            let bounded = context.bounds.apply(speed);
            if bounded != speed {
                debug!("Admin bounds {} -> {}", speed, bounded);
                trail.push(Adjustment::AdminBounds {
                    bounds: context.bounds,
                    speed: bounded,
                });
                speed = bounded;
            }
        }

        debug!(
            road = ?context.road_surface,
            time = ?context.time_of_day,
            weather = %weather.category,
            speed,
            "Computed max speed"
        );

        SpeedDecision {
            max_speed_kmh: speed,
            trail,
        }
    }
}

fn penalize(trail: &mut ReasoningTrail, speed: i32, cause: PenaltyCause, amount: i32) -> i32 {
    trail.push(Adjustment::Penalty { cause, amount });
    speed.saturating_sub(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AdminBounds;
    use weather_classifier::classify;

    fn context(surface: RoadSurface, time: TimeOfDay) -> DrivingContext {
        DrivingContext::new(surface, time)
    }

    fn reading(category: WeatherCategory) -> WeatherReading {
        WeatherReading::new(10.0, 0.0, category)
    }

    #[test]
    fn test_clear_day_paved_is_base() {
        let engine = SpeedRuleEngine::default();
        let ctx = DrivingContext {
            base_speed: Some(80),
            ..context(RoadSurface::Paved, TimeOfDay::Day)
        };
        let decision = engine.compute(&ctx, Some(&reading(WeatherCategory::Clear)));
        assert_eq!(decision.max_speed_kmh, 80);
        assert_eq!(decision.reason(), "base 80");
    }

    #[test]
    fn test_all_penalties_stack() {
        let engine = SpeedRuleEngine::default();
        let ctx = context(RoadSurface::Unpaved, TimeOfDay::Night);
        let decision = engine.compute(&ctx, Some(&reading(WeatherCategory::Rain)));
        assert_eq!(decision.max_speed_kmh, 40);
        assert_eq!(decision.reason(), "base 80, -20 gravel, -10 night, -10 rain");
    }

    #[test]
    fn test_freezing_reading_applies_ice_penalty() {
        let engine = SpeedRuleEngine::default();
        let ctx = context(RoadSurface::Paved, TimeOfDay::Day);
        let weather = classify(-5.0, 0.0, 0);
        let decision = engine.compute(&ctx, Some(&weather));
        assert_eq!(decision.max_speed_kmh, 50);
        assert_eq!(decision.reason(), "base 80, -30 ice");
    }

    #[test]
    fn test_admin_minimum_raises_speed() {
        let engine = SpeedRuleEngine::default();
        let ctx = DrivingContext {
            bounds: AdminBounds {
                min: Some(60),
                max: None,
            },
            base_speed: Some(80),
            ..context(RoadSurface::Unpaved, TimeOfDay::Night)
        };
        let decision = engine.compute(&ctx, Some(&reading(WeatherCategory::Clear)));
        assert_eq!(decision.max_speed_kmh, 60);
        assert_eq!(
            decision.reason(),
            "base 80, -20 gravel, -10 night → admin bounds [min=60] → final 60"
        );
    }

    #[test]
    fn test_missing_weather_equals_default_reading() {
        let engine = SpeedRuleEngine::default();
        let ctx = context(RoadSurface::Unpaved, TimeOfDay::Day);
        let explicit = WeatherReading::new(20.0, 0.0, WeatherCategory::Clear);
        assert_eq!(engine.compute(&ctx, None), engine.compute(&ctx, Some(&explicit)));
    }

    #[test]
    fn test_global_floor_clamp() {
        let engine = SpeedRuleEngine::default();
        let ctx = DrivingContext {
            base_speed: Some(40),
            ..context(RoadSurface::Unpaved, TimeOfDay::Night)
        };
        let decision = engine.compute(&ctx, Some(&reading(WeatherCategory::Ice)));
        assert_eq!(decision.max_speed_kmh, 20);
        assert_eq!(
            decision.reason(),
            "base 40, -20 gravel, -10 night, -30 ice, → clamp 20"
        );
    }

    #[test]
    fn test_global_ceiling_clamp() {
        let engine = SpeedRuleEngine::default();
        let ctx = DrivingContext {
            base_speed: Some(200),
            ..context(RoadSurface::Paved, TimeOfDay::Day)
        };
        let decision = engine.compute(&ctx, None);
        assert_eq!(decision.max_speed_kmh, 110);
        assert_eq!(decision.reason(), "base 200, → clamp 110");
    }

    #[test]
    fn test_admin_bounds_not_recorded_when_inactive() {
        let engine = SpeedRuleEngine::default();
        let ctx = DrivingContext {
            bounds: AdminBounds::new(60, 120),
            ..context(RoadSurface::Paved, TimeOfDay::Day)
        };
        let decision = engine.compute(&ctx, None);
        assert_eq!(decision.max_speed_kmh, 80);
        assert_eq!(decision.trail.len(), 1);
    }

    #[test]
    fn test_inverted_admin_bounds_max_wins() {
        let engine = SpeedRuleEngine::default();
        let ctx = DrivingContext {
            bounds: AdminBounds::new(90, 50),
            ..context(RoadSurface::Paved, TimeOfDay::Day)
        };
        let decision = engine.compute(&ctx, None);
        assert_eq!(decision.max_speed_kmh, 50);
        assert!(decision.reason().ends_with("admin bounds [min=90, max=50] → final 50"));
    }

    #[test]
    fn test_admin_zero_max_is_a_real_bound() {
        let engine = SpeedRuleEngine::default();
        let ctx = DrivingContext {
            bounds: AdminBounds {
                min: None,
                max: Some(0),
            },
            ..context(RoadSurface::Paved, TimeOfDay::Day)
        };
        assert_eq!(engine.compute(&ctx, None).max_speed_kmh, 0);
    }

    #[test]
    fn test_decide_rejects_incomplete_context() {
        let engine = SpeedRuleEngine::default();
        let draft = DrivingContext::builder().road_surface(RoadSurface::Paved);
        assert_eq!(
            engine.decide(draft, None).unwrap_err(),
            RuleError::InvalidContext { field: "time_of_day" }
        );
    }

    #[test]
    fn test_decide_with_complete_context() {
        let engine = SpeedRuleEngine::default();
        let draft = DrivingContext::builder()
            .road_surface(RoadSurface::Paved)
            .time_of_day(TimeOfDay::Night)
            .min_speed(60)
            .max_speed(120)
            .base_speed(80);
        let decision = engine.decide(draft, Some(&reading(WeatherCategory::Snow))).unwrap();
        assert_eq!(decision.max_speed_kmh, 60);
        assert_eq!(
            decision.reason(),
            "base 80, -10 night, -20 snow → admin bounds [min=60, max=120] → final 60"
        );
    }

    #[test]
    fn test_custom_config() {
        let engine = SpeedRuleEngine::new(RuleConfig {
            night_penalty: 25,
            ..Default::default()
        });
        let ctx = context(RoadSurface::Paved, TimeOfDay::Night);
        assert_eq!(engine.compute(&ctx, None).max_speed_kmh, 55);
    }

    #[test]
    fn test_extreme_base_does_not_overflow() {
        let engine = SpeedRuleEngine::default();
        let ctx = DrivingContext {
            base_speed: Some(i32::MIN),
            ..context(RoadSurface::Unpaved, TimeOfDay::Night)
        };
        assert_eq!(engine.compute(&ctx, Some(&reading(WeatherCategory::Ice))).max_speed_kmh, 20);
    }
}
