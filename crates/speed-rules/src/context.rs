//! Driving Context

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Road surface the vehicle is driving on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadSurface {
    /// Asphalt or concrete
    #[serde(alias = "asphalt")]
    Paved,
    /// Gravel or dirt
    #[serde(alias = "gravel")]
    Unpaved,
}

/// Time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

/// Administrator-imposed speed bounds
///
/// Each side is independently optional; `Some(0)` is a real bound of zero,
/// not "unset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminBounds {
    /// Minimum speed (km/h)
    #[serde(default)]
    pub min: Option<i32>,
    /// Maximum speed (km/h)
    #[serde(default)]
    pub max: Option<i32>,
}

impl AdminBounds {
    /// No administrator bounds configured
    pub const NONE: AdminBounds = AdminBounds { min: None, max: None };

    /// Both bounds configured
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Check whether any bound is configured
    pub fn is_configured(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Apply the bounds to a speed, minimum first then maximum
    ///
    /// When `min > max` the maximum wins because it is applied last.
    pub fn apply(&self, speed: i32) -> i32 {
        let mut speed = speed;
        if let Some(min) = self.min {
            if speed < min {
                speed = min;
            }
        }
        if let Some(max) = self.max {
            if speed > max {
                speed = max;
            }
        }
        speed
    }
}

impl fmt::Display for AdminBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("admin bounds [")?;
        if let Some(min) = self.min {
            write!(f, "min={}", min)?;
        }
        if self.min.is_some() && self.max.is_some() {
            f.write_str(", ")?;
        }
        if let Some(max) = self.max {
            write!(f, "max={}", max)?;
        }
        f.write_str("]")
    }
}

/// Static driving context for one speed computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingContext {
    /// Road surface
    pub road_surface: RoadSurface,
    /// Time of day
    pub time_of_day: TimeOfDay,
    /// Administrator bounds
    #[serde(default)]
    pub bounds: AdminBounds,
    /// Base speed override (km/h)
    #[serde(default)]
    pub base_speed: Option<i32>,
}

impl DrivingContext {
    /// Create a context without bounds or base override
    pub fn new(road_surface: RoadSurface, time_of_day: TimeOfDay) -> Self {
        Self {
            road_surface,
            time_of_day,
            bounds: AdminBounds::NONE,
            base_speed: None,
        }
    }

    /// Start building a context
    pub fn builder() -> DrivingContextBuilder {
        DrivingContextBuilder::default()
    }
}

/// Builder for [`DrivingContext`]
///
/// Mirrors how settings arrive from the outside: every field may be missing
/// until `build` checks the mandatory ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrivingContextBuilder {
    road_surface: Option<RoadSurface>,
    time_of_day: Option<TimeOfDay>,
    bounds: AdminBounds,
    base_speed: Option<i32>,
}

impl DrivingContextBuilder {
    /// Set the road surface
    pub fn road_surface(mut self, surface: RoadSurface) -> Self {
        self.road_surface = Some(surface);
        self
    }

    /// Set the time of day
    pub fn time_of_day(mut self, time: TimeOfDay) -> Self {
        self.time_of_day = Some(time);
        self
    }

    /// Set the administrator minimum speed
    pub fn min_speed(mut self, min: i32) -> Self {
        self.bounds.min = Some(min);
        self
    }

    /// Set the administrator maximum speed
    pub fn max_speed(mut self, max: i32) -> Self {
        self.bounds.max = Some(max);
        self
    }

    /// Replace both administrator bounds
    pub fn bounds(mut self, bounds: AdminBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the base speed override
    pub fn base_speed(mut self, base: i32) -> Self {
        self.base_speed = Some(base);
        self
    }

    /// Validate and build the context
    pub fn build(self) -> Result<DrivingContext, RuleError> {
        let road_surface = self.road_surface.ok_or(RuleError::InvalidContext {
            field: "road_surface",
        })?;
        let time_of_day = self.time_of_day.ok_or(RuleError::InvalidContext {
            field: "time_of_day",
        })?;

        Ok(DrivingContext {
            road_surface,
            time_of_day,
            bounds: self.bounds,
            base_speed: self.base_speed,
        })
    }
}
