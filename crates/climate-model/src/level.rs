//! Severity levels and score bucketing
//!
//! One set of thresholds is shared by risk levels, action priorities and
//! extreme-event severities:
//!
//! | Score      | Level    |
//! |------------|----------|
//! | `>= 75`    | Critical |
//! | `50..75`   | High     |
//! | `25..50`   | Medium   |
//! | `< 25`     | Low      |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the Critical bucket
pub const CRITICAL_THRESHOLD: f64 = 75.0;
/// Lower bound of the High bucket
pub const HIGH_THRESHOLD: f64 = 50.0;
/// Lower bound of the Medium bucket
pub const MEDIUM_THRESHOLD: f64 = 25.0;

/// Four-step severity scale. Ordering is by severity (`Low < Critical`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Risk level of an assessment or a single factor
pub type RiskLevel = Level;
/// Priority of a recommended action
pub type Priority = Level;
/// Severity of an extreme weather event
pub type Severity = Level;

impl Level {
    pub const ALL: [Level; 4] = [Level::Low, Level::Medium, Level::High, Level::Critical];

    /// Bucket a 0-100 score. NaN falls through to `Low`.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= CRITICAL_THRESHOLD => Level::Critical,
            s if s >= HIGH_THRESHOLD => Level::High,
            s if s >= MEDIUM_THRESHOLD => Level::Medium,
            _ => Level::Low,
        }
    }

    /// Case-insensitive parse of the backend's level strings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Level::Critical),
            "high" => Some(Level::High),
            "medium" | "moderate" => Some(Level::Medium),
            "low" => Some(Level::Low),
            _ => None,
        }
    }

    /// Parse with the documented fallback for missing or unknown values.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    /// Display name, e.g. `"Critical"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::Critical => "Critical",
        }
    }

    /// Lower-case wire spelling, e.g. `"critical"`
    pub fn wire_name(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
            Level::Critical => "critical",
        }
    }

    /// Weight used in the priority matrix (Low = 1 .. Critical = 4)
    pub fn weight(&self) -> u8 {
        match self {
            Level::Low => 1,
            Level::Medium => 2,
            Level::High => 3,
            Level::Critical => 4,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a score into a [`Level`].
pub fn bucket(score: f64) -> Level {
    Level::from_score(score)
}
