//! Fixed-size scenario tables
//!
//! A table always holds exactly [`ROWS`] rows with serials `1..=ROWS` in
//! order. Rows are edited in place and never added or removed;
//! deserialization re-checks the shape.

use crate::errors::TableError;
use crate::row::{CellEdit, Row, RowField, SERIAL_HEADER};
use serde::{Deserialize, Serialize};

/// Number of rows in every scenario table.
pub const ROWS: usize = 25;

/// Column headers in sheet order.
pub const HEADERS: [&str; 5] = [SERIAL_HEADER, "Stock", "Price", "AlgoTraSim Qty", "Your Qty"];

/// Ordered, fixed-length portfolio table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Row>", into = "Vec<Row>")]
pub struct ScenarioTable {
    rows: Vec<Row>,
}

impl ScenarioTable {
    /// Create a table of default rows numbered `1..=ROWS`.
    pub fn new() -> Self {
        Self {
            rows: (1..=ROWS as u32).map(Row::new).collect(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by serial.
    pub fn row(&self, serial: u32) -> Option<&Row> {
        let index = Self::index_of(serial)?;
        self.rows.get(index)
    }

    /// Apply an edit to the row with the given serial.
    pub fn edit(&mut self, serial: u32, edit: CellEdit) -> Result<(), TableError> {
        let row = Self::index_of(serial)
            .and_then(|index| self.rows.get_mut(index))
            .ok_or(TableError::RowNotFound { serial, rows: ROWS })?;
        row.apply(edit);
        Ok(())
    }

    /// Apply free-text input to one cell, coercing invalid numbers.
    pub fn edit_raw(&mut self, serial: u32, field: RowField, raw: &str) -> Result<(), TableError> {
        self.edit(serial, CellEdit::parse(field, raw))
    }

    /// The `Your Qty` column in row order.
    pub fn your_quantities(&self) -> Vec<u64> {
        self.rows.iter().map(Row::your_qty).collect()
    }

    fn index_of(serial: u32) -> Option<usize> {
        let serial = usize::try_from(serial).ok()?;
        (1..=ROWS).contains(&serial).then(|| serial - 1)
    }
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Row>> for ScenarioTable {
    type Error = TableError;

    fn try_from(mut rows: Vec<Row>) -> Result<Self, Self::Error> {
        if rows.len() != ROWS {
            return Err(TableError::RowCount {
                expected: ROWS,
                got: rows.len(),
            });
        }

        for (position, row) in rows.iter_mut().enumerate() {
            let expected = position as u32 + 1;
            if row.serial() != expected {
                return Err(TableError::SerialOutOfOrder {
                    position,
                    expected,
                    got: row.serial(),
                });
            }
            row.normalize();
        }

        Ok(Self { rows })
    }
}

impl From<ScenarioTable> for Vec<Row> {
    fn from(table: ScenarioTable) -> Self {
        table.rows
    }
}

/// Table plus written justification for one scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioState {
    pub table: ScenarioTable,
    pub justification: String,
}

impl ScenarioState {
    pub fn new() -> Self {
        Self::default()
    }
}
