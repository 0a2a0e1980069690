//! Speed Rule Engine
//!
//! Combines the driving context (road surface, time of day, administrator
//! bounds) with a canonical weather reading to produce a bounded maximum
//! speed and the ordered list of adjustments that led to it.

mod context;
mod engine;
mod error;
mod trail;

pub use context::{AdminBounds, DrivingContext, DrivingContextBuilder, RoadSurface, TimeOfDay};
pub use engine::{RuleConfig, SpeedDecision, SpeedRuleEngine};
pub use error::RuleError;
pub use trail::{Adjustment, PenaltyCause, ReasoningTrail};

/// Default rule constants (km/h)
pub mod defaults {
    /// Base speed when the context carries no override
    pub const BASE_SPEED: i32 = 80;
    /// Global floor applied before administrator bounds
    pub const GLOBAL_MIN_SPEED: i32 = 20;
    /// Global ceiling applied before administrator bounds
    pub const GLOBAL_MAX_SPEED: i32 = 110;
    /// Unpaved road penalty
    pub const GRAVEL_PENALTY: i32 = 20;
    /// Night driving penalty
    pub const NIGHT_PENALTY: i32 = 10;
    /// Rain penalty
    pub const RAIN_PENALTY: i32 = 10;
    /// Snow penalty
    pub const SNOW_PENALTY: i32 = 20;
    /// Ice penalty
    pub const ICE_PENALTY: i32 = 30;
}
