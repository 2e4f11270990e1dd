//! Types library for the portfolio scenario workbook
//!
//! This library provides the value types shared by the workbook and any UI
//! layer driving it, keeping the fixed-shape invariants (row count, serial
//! numbering, non-negative cells) inside the types themselves.
//!
//! # Modules
//! - `identity`: Session and student identity
//! - `numeric`: Coercion of free-text cell input to non-negative numbers
//! - `row`: Portfolio rows, editable fields and cell edits
//! - `table`: Fixed 25-row scenario tables and per-scenario state
//! - `scenario`: Scenario kinds and their profile table
//! - `risk`: Risk labels, capital status and their constants
//! - `errors`: Error taxonomy

// Public modules
pub mod identity;
pub mod numeric;
pub mod row;
pub mod table;
pub mod scenario;
pub mod risk;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::identity::*;
    pub use crate::numeric::*;
    pub use crate::row::*;
    pub use crate::table::*;
    pub use crate::scenario::*;
    pub use crate::risk::*;
    pub use crate::errors::*;
}
