//! Scenario kinds and their profile table
//!
//! Every scenario-specific string and the carry-forward chain are keyed off
//! one static table, so the three scenario views share a single code path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the three what-if contexts, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Baseline,
    Shock,
    CapitalIncrease,
}

/// Static presentation and routing data for a scenario kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioProfile {
    /// File name suffix: `{roll}_{short}.xlsx`
    pub short: &'static str,
    /// Human-readable label, written to the Justification sheet
    pub label: &'static str,
    /// Heading of the scenario view
    pub title: &'static str,
    /// Label of the justification text area
    pub justification_prompt: &'static str,
    /// Label of the download action
    pub download_label: &'static str,
    /// Label of the carry-forward action, when there is a next scenario
    pub carry_label: Option<&'static str>,
    /// Carry-forward target
    pub next: Option<ScenarioKind>,
}

const BASELINE: ScenarioProfile = ScenarioProfile {
    short: "Baseline",
    label: "Baseline",
    title: "Baseline Scenario",
    justification_prompt: "Justification (Baseline)",
    download_label: "Download Baseline (Excel)",
    carry_label: Some("Carry Forward to War Scenario"),
    next: Some(ScenarioKind::Shock),
};

const SHOCK: ScenarioProfile = ScenarioProfile {
    short: "War",
    label: "War / Global Shock",
    title: "War / Global Shock Scenario",
    justification_prompt: "Justification (War Scenario)",
    download_label: "Download War Scenario (Excel)",
    carry_label: Some("Carry Forward to Capital Increase Scenario"),
    next: Some(ScenarioKind::CapitalIncrease),
};

const CAPITAL_INCREASE: ScenarioProfile = ScenarioProfile {
    short: "Capital",
    label: "Capital Increase",
    title: "Capital Increase Scenario",
    justification_prompt: "Justification (Capital Increase)",
    download_label: "Download Capital Increase (Excel)",
    carry_label: None,
    next: None,
};

impl ScenarioKind {
    /// All kinds in tab order.
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Baseline,
        ScenarioKind::Shock,
        ScenarioKind::CapitalIncrease,
    ];

    pub fn profile(&self) -> &'static ScenarioProfile {
        match self {
            ScenarioKind::Baseline => &BASELINE,
            ScenarioKind::Shock => &SHOCK,
            ScenarioKind::CapitalIncrease => &CAPITAL_INCREASE,
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.profile().short
    }

    pub fn label(&self) -> &'static str {
        self.profile().label
    }

    /// Carry-forward target, if any.
    pub fn next(&self) -> Option<ScenarioKind> {
        self.profile().next
    }

    /// Export file name for the given (already sanitized) roll number.
    pub fn export_file_name(&self, roll_stem: &str) -> String {
        format!("{}_{}.xlsx", roll_stem, self.short_name())
    }

    fn variant_name(&self) -> &'static str {
        match self {
            ScenarioKind::Baseline => "baseline",
            ScenarioKind::Shock => "shock",
            ScenarioKind::CapitalIncrease => "capital_increase",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognised scenario name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

impl FromStr for ScenarioKind {
    type Err = UnknownScenario;

    /// Accepts the short name, the label or the snake_case variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                let profile = kind.profile();
                key.eq_ignore_ascii_case(profile.short)
                    || key.eq_ignore_ascii_case(profile.label)
                    || key.eq_ignore_ascii_case(kind.variant_name())
            })
            .ok_or_else(|| UnknownScenario(key.to_owned()))
    }
}
