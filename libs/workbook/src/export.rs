//! Spreadsheet export
//!
//! Encodes one scenario as a two-sheet `.xlsx` workbook:
//!
//! ```text
//! Portfolio      SL. NO. | Stock | Price | AlgoTraSim Qty | Your Qty   (25 rows)
//! Justification  Student Name | Roll Number | Scenario | Justification (1 row)
//! ```
//!
//! Encoding happens entirely in memory; a failure leaves session state
//! untouched.

use crate::session::{Session, Workbook};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use types::errors::{ExportError, WorkbookError};
use types::identity::StudentIdentity;
use types::scenario::ScenarioKind;
use types::table::{ScenarioState, ScenarioTable, HEADERS};

// ── Constants ───────────────────────────────────────────────────────

pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const PORTFOLIO_SHEET: &str = "Portfolio";

pub const JUSTIFICATION_SHEET: &str = "Justification";

pub const JUSTIFICATION_HEADERS: [&str; 4] =
    ["Student Name", "Roll Number", "Scenario", "Justification"];

const PORTFOLIO_COLUMN_WIDTHS: [f64; 5] = [9.0, 24.0, 12.0, 16.0, 10.0];
const JUSTIFICATION_COLUMN_WIDTHS: [f64; 4] = [24.0, 14.0, 20.0, 80.0];

// ── Config ──────────────────────────────────────────────────────────

/// Where exported files are written.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Target directory, created on first write
    pub output_dir: PathBuf,
}

impl ExportConfig {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

// ── Export file ─────────────────────────────────────────────────────

/// An encoded scenario ready for download or writing to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// `{roll_number}_{short_name}.xlsx`
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode one scenario for the given student.
pub fn export_scenario(
    kind: ScenarioKind,
    state: &ScenarioState,
    identity: &StudentIdentity,
) -> Result<ExportFile, ExportError> {
    let bytes = encode_workbook(kind, state, identity).map_err(|e| {
        error!(scenario = %kind, error = %e, "Spreadsheet encoding failed");
        ExportError::Encoding {
            reason: e.to_string(),
        }
    })?;

    Ok(ExportFile {
        file_name: kind.export_file_name(&identity.file_stem()),
        mime_type: XLSX_MIME_TYPE,
        bytes,
    })
}

/// Write an encoded file into the configured directory.
pub fn write_export(file: &ExportFile, config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let path = config.output_dir.join(&file.file_name);
    let io_error = |e: std::io::Error| ExportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    fs::create_dir_all(&config.output_dir).map_err(io_error)?;
    fs::write(&path, &file.bytes).map_err(io_error)?;

    info!(path = %path.display(), bytes = file.bytes.len(), "Export written");
    Ok(path)
}

impl Workbook {
    /// Encode one scenario of this workbook.
    pub fn export_scenario(&self, kind: ScenarioKind) -> Result<ExportFile, ExportError> {
        let file = export_scenario(kind, self.state(kind), self.identity())?;
        info!(
            session_id = %self.session_id(),
            scenario = %kind,
            file_name = %file.file_name,
            bytes = file.bytes.len(),
            "Scenario exported"
        );
        Ok(file)
    }
}

impl Session {
    /// Encode one scenario; fails while the identity gate is closed.
    pub fn export_scenario(&self, kind: ScenarioKind) -> Result<ExportFile, WorkbookError> {
        Ok(self.workbook()?.export_scenario(kind)?)
    }
}

// ── Encoding ────────────────────────────────────────────────────────

fn encode_workbook(
    kind: ScenarioKind,
    state: &ScenarioState,
    identity: &StudentIdentity,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = XlsxWorkbook::new();
    let header = Format::new().set_bold();

    write_portfolio_sheet(workbook.add_worksheet(), &state.table, &header)?;
    write_justification_sheet(
        workbook.add_worksheet(),
        kind,
        &state.justification,
        identity,
        &header,
    )?;

    workbook.save_to_buffer()
}

fn write_portfolio_sheet(
    sheet: &mut Worksheet,
    table: &ScenarioTable,
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name(PORTFOLIO_SHEET)?;
    write_header_row(sheet, &HEADERS, &PORTFOLIO_COLUMN_WIDTHS, header)?;

    for (i, row) in table.rows().iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_number(r, 0, row.serial())?;
        // Blank stock cells stay empty rather than holding ""
        if !row.stock().is_empty() {
            sheet.write_string(r, 1, row.stock())?;
        }
        sheet.write_number(r, 2, price_cell(row.price()))?;
        // Quantities are capped at 2^53, so the cast is exact
        sheet.write_number(r, 3, row.simulator_qty() as f64)?;
        sheet.write_number(r, 4, row.your_qty() as f64)?;
    }

    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Nearest `f64` to a price. Prices carry at most 15 significant digits,
/// so reading the cell back yields the same decimal.
fn price_cell(price: Decimal) -> f64 {
    price.to_string().parse().unwrap_or_default()
}

fn write_justification_sheet(
    sheet: &mut Worksheet,
    kind: ScenarioKind,
    justification: &str,
    identity: &StudentIdentity,
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name(JUSTIFICATION_SHEET)?;
    write_header_row(
        sheet,
        &JUSTIFICATION_HEADERS,
        &JUSTIFICATION_COLUMN_WIDTHS,
        header,
    )?;

    let values = [identity.name(), identity.roll_number(), kind.label(), justification];
    let wrap = Format::new().set_text_wrap();
    for (col, value) in values.iter().enumerate() {
        if !value.is_empty() {
            sheet.write_string_with_format(1, col as u16, *value, &wrap)?;
        }
    }

    Ok(())
}

fn write_header_row(
    sheet: &mut Worksheet,
    headers: &[&str],
    widths: &[f64],
    format: &Format,
) -> Result<(), XlsxError> {
    for (col, (title, width)) in headers.iter().zip(widths).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, format)?;
        sheet.set_column_width(col, *width)?;
    }
    Ok(())
}
