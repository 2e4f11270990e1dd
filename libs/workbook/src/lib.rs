//! Scenario Workbook — portfolio what-if scenarios for one student session
//!
//! Provides deterministic computation and serialization for:
//! - Total investment, capital check and risk label per scenario
//! - Session state: identity gate and three independent scenario tables
//! - Carry-forward of a table into the next scenario
//! - Two-sheet `.xlsx` export of a scenario
//!
//! # Determinism
//! Analytics are pure functions over a table: fixed-point `Decimal` for
//! money, exact integer arithmetic for the risk threshold.

pub mod analytics;
pub mod session;
pub mod export;
