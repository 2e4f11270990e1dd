//! Scenario Analytics — derived values of a portfolio table
//!
//! Total investment, capital check and risk label. All functions are pure
//! over the table they are given.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::risk::{CapitalStatus, Dispersion, RiskLabel, CAPITAL_LIMIT, RISK_STD_DEV_THRESHOLD};
use types::scenario::ScenarioKind;
use types::table::ScenarioTable;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fixed headline text of the capital limit in the exceeded message.
const CAPITAL_LIMIT_DISPLAY: &str = "₹1,00,000";

// ---------------------------------------------------------------------------
// Total investment
// ---------------------------------------------------------------------------

/// Σ(price × your_qty) over every row.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn total_investment(table: &ScenarioTable) -> Decimal {
    table
        .rows()
        .iter()
        .map(|row| {
            row.price()
                .checked_mul(Decimal::from(row.your_qty()))
                .unwrap_or(Decimal::MAX)
        })
        .fold(Decimal::ZERO, |acc, value| {
            acc.checked_add(value).unwrap_or(Decimal::MAX)
        })
}

// ---------------------------------------------------------------------------
// Capital check
// ---------------------------------------------------------------------------

/// Compare a total against the fixed capital limit.
pub fn check_capital(total: Decimal) -> CapitalStatus {
    check_capital_against(total, Decimal::from(CAPITAL_LIMIT))
}

/// Compare a total against an arbitrary limit. Equality is within the limit.
pub fn check_capital_against(total: Decimal, limit: Decimal) -> CapitalStatus {
    if total <= limit {
        CapitalStatus::WithinLimit
    } else {
        CapitalStatus::Exceeded
    }
}

// ---------------------------------------------------------------------------
// Risk label
// ---------------------------------------------------------------------------

/// Risk label using the sample standard deviation.
pub fn classify_risk(table: &ScenarioTable) -> RiskLabel {
    classify_risk_with(table, Dispersion::Sample)
}

/// Risk label using the given standard deviation formula.
///
/// Neutral when no quantity is entered; otherwise Aggressive when the
/// deviation of `Your Qty` over all rows (zeros included) is strictly above
/// [`RISK_STD_DEV_THRESHOLD`], else Defensive.
pub fn classify_risk_with(table: &ScenarioTable, dispersion: Dispersion) -> RiskLabel {
    let quantities = table.your_quantities();

    if quantities.iter().all(|&q| q == 0) {
        return RiskLabel::Neutral;
    }

    if spread_exceeds(&quantities, RISK_STD_DEV_THRESHOLD, dispersion) {
        RiskLabel::Aggressive
    } else {
        RiskLabel::Defensive
    }
}

/// Standard deviation of `Your Qty`, for display.
pub fn quantity_std_dev(table: &ScenarioTable, dispersion: Dispersion) -> f64 {
    std_dev(&table.your_quantities(), dispersion)
}

/// Exact `std_dev > threshold` test.
///
/// Uses `n·Σx² − (Σx)²`, which equals `n(n−1)·s²` and `n²·σ²`, so the
/// comparison needs no square root. Falls back to floating point only when
/// the sums overflow `u128`.
fn spread_exceeds(quantities: &[u64], threshold: u64, dispersion: Dispersion) -> bool {
    let n = quantities.len() as u128;
    if dispersion == Dispersion::Sample && n < 2 {
        return false;
    }

    let exact = || -> Option<bool> {
        let sum = quantities
            .iter()
            .try_fold(0u128, |acc, &q| acc.checked_add(q as u128))?;
        let sum_sq = quantities.iter().try_fold(0u128, |acc, &q| {
            acc.checked_add((q as u128).checked_mul(q as u128)?)
        })?;
        let spread = n.checked_mul(sum_sq)?.checked_sub(sum.checked_mul(sum)?)?;

        let denominator = match dispersion {
            Dispersion::Sample => n * (n - 1),
            Dispersion::Population => n * n,
        };
        let limit = (threshold as u128)
            .checked_mul(threshold as u128)?
            .checked_mul(denominator)?;

        Some(spread > limit)
    };

    exact().unwrap_or_else(|| std_dev(quantities, dispersion) > threshold as f64)
}

fn std_dev(quantities: &[u64], dispersion: Dispersion) -> f64 {
    let n = quantities.len();
    let divisor = match dispersion {
        Dispersion::Sample if n < 2 => return 0.0,
        Dispersion::Sample => (n - 1) as f64,
        Dispersion::Population if n == 0 => return 0.0,
        Dispersion::Population => n as f64,
    };

    let mean = quantities.iter().map(|&q| q as f64).sum::<f64>() / n as f64;
    let sum_sq_dev: f64 = quantities
        .iter()
        .map(|&q| {
            let d = q as f64 - mean;
            d * d
        })
        .sum();

    (sum_sq_dev / divisor).sqrt()
}

// ---------------------------------------------------------------------------
// Scenario summary (serialization bridge)
// ---------------------------------------------------------------------------

/// Derived values for one scenario, suitable for JSON transport to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub kind: ScenarioKind,
    pub total_investment: Decimal,
    pub capital: CapitalStatus,
    pub risk: RiskLabel,
    pub quantity_std_dev: f64,
}

impl ScenarioSummary {
    /// Recompute every derived value of a table.
    pub fn compute(kind: ScenarioKind, table: &ScenarioTable) -> Self {
        let total = total_investment(table);
        Self {
            kind,
            total_investment: total,
            capital: check_capital(total),
            risk: classify_risk(table),
            quantity_std_dev: quantity_std_dev(table, Dispersion::Sample),
        }
    }

    /// Success or warning line for the total.
    pub fn capital_message(&self) -> String {
        let amount = format_rupees(self.total_investment);
        match self.capital {
            CapitalStatus::WithinLimit => format!("Total Investment: {}", amount),
            CapitalStatus::Exceeded => {
                format!("Total exceeds {} → {}", CAPITAL_LIMIT_DISPLAY, amount)
            }
        }
    }

    pub fn risk_message(&self) -> String {
        format!("Risk Profile: {}", self.risk)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Format an amount as whole rupees with thousands separators.
///
/// Rounds half to even, e.g. `70000.5` → `₹70,000`.
pub fn format_rupees(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = rounded.abs().trunc().to_string();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
