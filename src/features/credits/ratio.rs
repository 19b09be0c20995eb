//! Share ratio health, derived locally from the ratio the server reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ratio every account is steered towards.
pub const TARGET_RATIO: f64 = 2.0;

const GOOD_RATIO: f64 = 1.0;
const WARNING_RATIO: f64 = 0.5;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RatioHealth {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl RatioHealth {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= TARGET_RATIO {
            Self::Excellent
        } else if ratio >= GOOD_RATIO {
            Self::Good
        } else if ratio >= WARNING_RATIO {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Health for a ratio as the API sends it. Anything unparsable is critical.
    #[must_use]
    pub fn from_ratio_str(ratio: &str) -> Self {
        parse_ratio(ratio).map_or(Self::Critical, Self::from_ratio)
    }

    /// Reads a server-side status label, case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "warning" => Some(Self::Warning),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent ratio achieved!",
            Self::Good => "Good ratio maintained.",
            Self::Warning | Self::Critical => "Consider uploading more content.",
        }
    }
}

impl fmt::Display for RatioHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_ascii_uppercase())
    }
}

/// Parses a ratio, rejecting non-finite values.
#[must_use]
pub fn parse_ratio(ratio: &str) -> Option<f64> {
    ratio
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Progress towards [`TARGET_RATIO`] in percent, within `0..=100`.
#[must_use]
pub fn progress_percent(ratio: f64) -> f64 {
    (ratio / TARGET_RATIO * 100.0).clamp(0.0, 100.0)
}

/// How much ratio is still missing to reach [`TARGET_RATIO`].
#[must_use]
pub fn remaining_to_target(ratio: f64) -> f64 {
    (TARGET_RATIO - ratio).max(0.0)
}

/// Everything derived from a single ratio value, ready for display.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RatioSummary {
    pub ratio: String,
    pub health: RatioHealth,
    pub message: &'static str,
    pub progress_percent: f64,
    pub remaining_to_target: f64,
}

impl RatioSummary {
    #[must_use]
    pub fn from_ratio_str(ratio: &str) -> Self {
        let value = parse_ratio(ratio);
        let health = value.map_or(RatioHealth::Critical, RatioHealth::from_ratio);
        let numeric = value.unwrap_or(0.0);

        Self {
            ratio: ratio.to_string(),
            health,
            message: health.message(),
            progress_percent: progress_percent(numeric),
            remaining_to_target: remaining_to_target(numeric),
        }
    }
}
