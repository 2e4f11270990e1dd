//! Risk labels and capital status
//!
//! Both are advisory: neither blocks editing nor export.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed ceiling on total investment, in rupees.
pub const CAPITAL_LIMIT: u64 = 100_000;

/// Standard deviation of `Your Qty` above which a portfolio is Aggressive.
pub const RISK_STD_DEV_THRESHOLD: u64 = 10;

/// Coarse risk posture derived from the dispersion of `Your Qty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    /// No quantity entered anywhere
    Neutral,
    /// Quantity standard deviation above the threshold
    Aggressive,
    /// Quantity standard deviation at or below the threshold
    Defensive,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Neutral => "Neutral",
            RiskLabel::Aggressive => "Aggressive",
            RiskLabel::Defensive => "Defensive",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total investment compared with the capital limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapitalStatus {
    /// total <= limit
    WithinLimit,
    /// total > limit
    Exceeded,
}

impl CapitalStatus {
    pub fn is_exceeded(&self) -> bool {
        matches!(self, CapitalStatus::Exceeded)
    }
}

/// Standard deviation formula for the risk label.
///
/// `Sample` divides by `n - 1` and is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dispersion {
    #[default]
    Sample,
    Population,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_label_display() {
        assert_eq!(RiskLabel::Neutral.to_string(), "Neutral");
        assert_eq!(RiskLabel::Aggressive.to_string(), "Aggressive");
        assert_eq!(RiskLabel::Defensive.to_string(), "Defensive");
    }

    #[test]
    fn test_capital_status() {
        assert!(CapitalStatus::Exceeded.is_exceeded());
        assert!(!CapitalStatus::WithinLimit.is_exceeded());
    }

    #[test]
    fn test_default_dispersion_is_sample() {
        assert_eq!(Dispersion::default(), Dispersion::Sample);
    }
}
