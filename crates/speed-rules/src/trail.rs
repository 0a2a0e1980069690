//! Reasoning Trail
//!
//! Structured record of every adjustment applied during one computation.
//! Text is produced only through `Display`.

use crate::context::AdminBounds;
use serde::{Deserialize, Serialize};
use std::fmt;
use weather_classifier::WeatherCategory;

/// Reason for a speed penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyCause {
    /// Unpaved road
    Gravel,
    /// Night driving
    Night,
    /// Adverse weather
    Weather(WeatherCategory),
}

impl fmt::Display for PenaltyCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenaltyCause::Gravel => f.write_str("gravel"),
            PenaltyCause::Night => f.write_str("night"),
            PenaltyCause::Weather(category) => write!(f, "{}", category),
        }
    }
}

/// A single adjustment step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    /// Starting speed
    Base { speed: i32 },
    /// Fixed subtraction
    Penalty { cause: PenaltyCause, amount: i32 },
    /// Global floor/ceiling changed the speed
    GlobalClamp { speed: i32 },
    /// Administrator bounds changed the speed
    AdminBounds { bounds: AdminBounds, speed: i32 },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::Base { speed } => write!(f, "base {}", speed),
            Adjustment::Penalty { cause, amount } => {
                write!(f, "{:+} {}", amount.saturating_neg(), cause)
            }
            Adjustment::GlobalClamp { speed } => write!(f, "→ clamp {}", speed),
            Adjustment::AdminBounds { bounds, speed } => {
                write!(f, "→ {} → final {}", bounds, speed)
            }
        }
    }
}

/// Ordered, append-only list of adjustments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasoningTrail {
    entries: Vec<Adjustment>,
}

impl ReasoningTrail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an adjustment
    pub fn push(&mut self, adjustment: Adjustment) {
        self.entries.push(adjustment);
    }

    /// Iterate adjustments in the order they were applied
    pub fn iter(&self) -> impl Iterator<Item = &Adjustment> {
        self.entries.iter()
    }

    /// Number of adjustments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the trail is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ReasoningTrail {
    /// Step entries are comma separated; the administrator segment is
    /// appended after a space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in &self.entries {
            match entry {
                Adjustment::AdminBounds { .. } => write!(f, " {}", entry)?,
                _ => {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", entry)?;
                }
            }
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_penalties() {
        let mut trail = ReasoningTrail::new();
        trail.push(Adjustment::Base { speed: 80 });
        trail.push(Adjustment::Penalty {
            cause: PenaltyCause::Gravel,
            amount: 20,
        });
        trail.push(Adjustment::Penalty {
            cause: PenaltyCause::Weather(WeatherCategory::Ice),
            amount: 30,
        });
        assert_eq!(trail.to_string(), "base 80, -20 gravel, -30 ice");
    }

    #[test]
    fn test_render_negative_penalty_as_bonus() {
        let mut trail = ReasoningTrail::new();
        trail.push(Adjustment::Base { speed: 80 });
        trail.push(Adjustment::Penalty {
            cause: PenaltyCause::Night,
            amount: -5,
        });
        assert_eq!(trail.to_string(), "base 80, +5 night");
    }

    #[test]
    fn test_render_clamp_and_admin() {
        let mut trail = ReasoningTrail::new();
        trail.push(Adjustment::Base { speed: 150 });
        trail.push(Adjustment::GlobalClamp { speed: 110 });
        trail.push(Adjustment::AdminBounds {
            bounds: AdminBounds::new(60, 100),
            speed: 100,
        });
        assert_eq!(
            trail.to_string(),
            "base 150, → clamp 110 → admin bounds [min=60, max=100] → final 100"
        );
    }

    #[test]
    fn test_serializes_structured_records() {
        let mut trail = ReasoningTrail::new();
        trail.push(Adjustment::Penalty {
            cause: PenaltyCause::Night,
            amount: 10,
        });
        let json = serde_json::to_value(&trail).unwrap();
        assert_eq!(json[0]["kind"], "penalty");
        assert_eq!(json[0]["cause"], "night");
        assert_eq!(json[0]["amount"], 10);
    }
}
