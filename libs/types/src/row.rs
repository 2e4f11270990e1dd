//! Portfolio rows and cell edits
//!
//! A row's serial number is assigned when its table is created and is the
//! lookup key for edits; it is never an editable field.

use crate::errors::TableError;
use crate::numeric::{clamp_price, clamp_quantity, parse_price, parse_quantity, MAX_QUANTITY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Header of the read-only serial column.
pub const SERIAL_HEADER: &str = "SL. NO.";

/// One line of a scenario table.
///
/// Invariant: `price` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    serial: u32,
    stock: String,
    price: Decimal,
    /// Quantity suggested by the AlgoTraSim simulator. Carried for the
    /// student's comparison only; no derived value reads it.
    simulator_qty: u64,
    your_qty: u64,
}

impl Row {
    /// Create a row with default cells.
    pub fn new(serial: u32) -> Self {
        Self {
            serial,
            stock: String::new(),
            price: Decimal::ZERO,
            simulator_qty: 0,
            your_qty: 0,
        }
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn stock(&self) -> &str {
        &self.stock
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn simulator_qty(&self) -> u64 {
        self.simulator_qty
    }

    pub fn your_qty(&self) -> u64 {
        self.your_qty
    }

    /// Apply a typed edit. Numeric values are clamped to zero.
    pub fn apply(&mut self, edit: CellEdit) {
        match edit {
            CellEdit::Stock(stock) => self.stock = stock,
            CellEdit::Price(price) => self.price = clamp_price(price),
            CellEdit::SimulatorQty(qty) => self.simulator_qty = clamp_quantity(qty),
            CellEdit::YourQty(qty) => self.your_qty = clamp_quantity(qty),
        }
    }

    /// Re-establish the non-negative price invariant after deserialization.
    pub(crate) fn normalize(&mut self) {
        self.price = clamp_price(self.price);
    }
}

/// Editable columns of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    Stock,
    Price,
    SimulatorQty,
    YourQty,
}

impl RowField {
    /// All editable fields in column order.
    pub const ALL: [RowField; 4] = [
        RowField::Stock,
        RowField::Price,
        RowField::SimulatorQty,
        RowField::YourQty,
    ];

    /// Column header used on screen and in the exported sheet.
    pub fn header(&self) -> &'static str {
        match self {
            RowField::Stock => "Stock",
            RowField::Price => "Price",
            RowField::SimulatorQty => "AlgoTraSim Qty",
            RowField::YourQty => "Your Qty",
        }
    }
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for RowField {
    type Err = TableError;

    /// Accepts a column header or a snake_case field name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "stock" => Ok(RowField::Stock),
            "price" | "price (₹)" => Ok(RowField::Price),
            "algotrasim qty" | "simulator_qty" | "simulatorqty" => Ok(RowField::SimulatorQty),
            "your qty" | "your_qty" | "yourqty" => Ok(RowField::YourQty),
            "sl. no." | "serial" => Err(TableError::ReadOnlyField {
                name: s.trim().to_owned(),
            }),
            _ => Err(TableError::UnknownField {
                name: s.trim().to_owned(),
            }),
        }
    }
}

/// A typed edit to one cell.
///
/// Quantities are signed so that negative input can be clamped rather than
/// rejected. Applying an edit clamps quantities to `0..=MAX_QUANTITY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum CellEdit {
    Stock(String),
    Price(Decimal),
    SimulatorQty(i64),
    YourQty(i64),
}

impl CellEdit {
    /// Build an edit from free-text input, coercing invalid numbers to zero.
    pub fn parse(field: RowField, raw: &str) -> Self {
        match field {
            RowField::Stock => CellEdit::Stock(raw.to_owned()),
            RowField::Price => CellEdit::Price(parse_price(raw)),
            RowField::SimulatorQty => CellEdit::SimulatorQty(quantity_input(raw)),
            RowField::YourQty => CellEdit::YourQty(quantity_input(raw)),
        }
    }

    /// The column this edit targets.
    pub fn field(&self) -> RowField {
        match self {
            CellEdit::Stock(_) => RowField::Stock,
            CellEdit::Price(_) => RowField::Price,
            CellEdit::SimulatorQty(_) => RowField::SimulatorQty,
            CellEdit::YourQty(_) => RowField::YourQty,
        }
    }
}

/// Parsed quantity, already within `0..=MAX_QUANTITY`.
fn quantity_input(raw: &str) -> i64 {
    i64::try_from(parse_quantity(raw)).unwrap_or(MAX_QUANTITY)
}
