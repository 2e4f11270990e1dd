//! Workbook Session — identity gate and per-scenario state
//!
//! A [`Session`] starts with the identity gate closed. Capturing a valid
//! identity opens it and creates a [`Workbook`] holding one independent
//! [`ScenarioState`] per scenario kind. All state lives in these values;
//! nothing is global and nothing outlives the session.

use crate::analytics::ScenarioSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use types::errors::{IdentityError, TableError};
use types::identity::{SessionId, StudentIdentity};
use types::row::{CellEdit, RowField};
use types::scenario::ScenarioKind;
use types::table::{ScenarioState, ScenarioTable};

// ---------------------------------------------------------------------------
// Session gate
// ---------------------------------------------------------------------------

/// Session lifecycle: `IdentityMissing → IdentityCaptured`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "workbook")]
pub enum Session {
    #[default]
    IdentityMissing,
    IdentityCaptured(Workbook),
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record the student identity.
    ///
    /// The first capture creates the three scenario states. Capturing again
    /// replaces the identity and keeps every table and justification.
    pub fn capture_identity(
        &mut self,
        name: &str,
        roll_number: &str,
    ) -> Result<&mut Workbook, IdentityError> {
        let identity = StudentIdentity::new(name, roll_number)?;

        match self {
            Session::IdentityMissing => {
                *self = Session::IdentityCaptured(Workbook::new(identity));
            }
            Session::IdentityCaptured(workbook) => {
                info!(
                    session_id = %workbook.session_id,
                    roll_number = identity.roll_number(),
                    "Student identity replaced"
                );
                workbook.identity = identity;
            }
        }

        self.workbook_mut()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Session::IdentityCaptured(_))
    }

    /// The workbook, once identity has been captured.
    pub fn workbook(&self) -> Result<&Workbook, IdentityError> {
        match self {
            Session::IdentityCaptured(workbook) => Ok(workbook),
            Session::IdentityMissing => Err(IdentityError::NotCaptured),
        }
    }

    pub fn workbook_mut(&mut self) -> Result<&mut Workbook, IdentityError> {
        match self {
            Session::IdentityCaptured(workbook) => Ok(workbook),
            Session::IdentityMissing => Err(IdentityError::NotCaptured),
        }
    }

    /// Tear the session down, discarding all state.
    pub fn end(&mut self) {
        if let Session::IdentityCaptured(workbook) = self {
            info!(session_id = %workbook.session_id, "Session ended");
        }
        *self = Session::IdentityMissing;
    }
}

// ---------------------------------------------------------------------------
// Workbook
// ---------------------------------------------------------------------------

/// Three scenario states plus the identity they belong to.
///
/// Each scenario owns its table; the only cross-scenario write is
/// [`Workbook::carry_forward`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    session_id: SessionId,
    started_at: DateTime<Utc>,
    identity: StudentIdentity,
    baseline: ScenarioState,
    shock: ScenarioState,
    capital_increase: ScenarioState,
}

impl Workbook {
    /// Create a workbook with empty tables and justifications.
    pub fn new(identity: StudentIdentity) -> Self {
        let workbook = Self {
            session_id: SessionId::new(),
            started_at: Utc::now(),
            identity,
            baseline: ScenarioState::new(),
            shock: ScenarioState::new(),
            capital_increase: ScenarioState::new(),
        };

        info!(
            session_id = %workbook.session_id,
            roll_number = workbook.identity.roll_number(),
            "Workbook session started"
        );

        workbook
    }

    // -- accessors ---------------------------------------------------------

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn identity(&self) -> &StudentIdentity {
        &self.identity
    }

    pub fn state(&self, kind: ScenarioKind) -> &ScenarioState {
        match kind {
            ScenarioKind::Baseline => &self.baseline,
            ScenarioKind::Shock => &self.shock,
            ScenarioKind::CapitalIncrease => &self.capital_increase,
        }
    }

    fn state_mut(&mut self, kind: ScenarioKind) -> &mut ScenarioState {
        match kind {
            ScenarioKind::Baseline => &mut self.baseline,
            ScenarioKind::Shock => &mut self.shock,
            ScenarioKind::CapitalIncrease => &mut self.capital_increase,
        }
    }

    pub fn table(&self, kind: ScenarioKind) -> &ScenarioTable {
        &self.state(kind).table
    }

    pub fn justification(&self, kind: ScenarioKind) -> &str {
        &self.state(kind).justification
    }

    // -- mutators ----------------------------------------------------------

    /// Edit one cell of a scenario table and return the recomputed summary.
    pub fn edit_row(
        &mut self,
        kind: ScenarioKind,
        serial: u32,
        edit: CellEdit,
    ) -> Result<ScenarioSummary, TableError> {
        let field = edit.field();
        self.state_mut(kind).table.edit(serial, edit)?;

        debug!(
            session_id = %self.session_id,
            scenario = %kind,
            serial,
            field = %field,
            "Cell edited"
        );

        Ok(self.summary(kind))
    }

    /// Edit one cell from free-text input, coercing invalid numbers.
    pub fn edit_cell(
        &mut self,
        kind: ScenarioKind,
        serial: u32,
        field: RowField,
        raw: &str,
    ) -> Result<ScenarioSummary, TableError> {
        self.edit_row(kind, serial, CellEdit::parse(field, raw))
    }

    /// Replace the justification text of a scenario.
    pub fn set_justification(&mut self, kind: ScenarioKind, text: impl Into<String>) {
        let text = text.into();
        debug!(
            session_id = %self.session_id,
            scenario = %kind,
            chars = text.chars().count(),
            "Justification updated"
        );
        self.state_mut(kind).justification = text;
    }

    /// Overwrite the target table with a deep copy of the source table.
    ///
    /// Justifications are not copied. Any pair of kinds is accepted.
    pub fn carry_forward(&mut self, source: ScenarioKind, target: ScenarioKind) {
        let table = self.state(source).table.clone();
        self.state_mut(target).table = table;

        info!(
            session_id = %self.session_id,
            source = %source,
            target = %target,
            "Table carried forward"
        );
    }

    /// Carry a table into the next scenario of the chain.
    ///
    /// Returns the target, or `None` when the source has no successor.
    pub fn carry_forward_next(&mut self, source: ScenarioKind) -> Option<ScenarioKind> {
        let target = source.next()?;
        self.carry_forward(source, target);
        Some(target)
    }

    // -- derived values ------------------------------------------------------

    /// Recompute the derived values of one scenario.
    pub fn summary(&self, kind: ScenarioKind) -> ScenarioSummary {
        let summary = ScenarioSummary::compute(kind, self.table(kind));
        if summary.capital.is_exceeded() {
            warn!(
                session_id = %self.session_id,
                scenario = %kind,
                total = %summary.total_investment,
                "Capital limit exceeded"
            );
        }
        summary
    }

    /// Summaries of all scenarios in tab order.
    pub fn summaries(&self) -> Vec<ScenarioSummary> {
        ScenarioKind::ALL
            .into_iter()
            .map(|kind| self.summary(kind))
            .collect()
    }

    // -- serialization bridge ----------------------------------------------

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use types::risk::{CapitalStatus, RiskLabel};
    use types::table::ROWS;

    fn sample_workbook() -> Workbook {
        let identity = StudentIdentity::new("Asha Rao", "21MBA042").unwrap();
        let mut workbook = Workbook::new(identity);
        workbook
            .edit_row(ScenarioKind::Baseline, 1, CellEdit::Stock("TCS".to_string()))
            .unwrap();
        workbook
            .edit_row(ScenarioKind::Baseline, 1, CellEdit::Price(Decimal::from(3500)))
            .unwrap();
        workbook
            .edit_row(ScenarioKind::Baseline, 1, CellEdit::YourQty(20))
            .unwrap();
        workbook
    }

    #[test]
    fn test_session_starts_gated() {
        let session = Session::new();
        assert!(!session.is_ready());
        assert_eq!(session.workbook().unwrap_err(), IdentityError::NotCaptured);
    }

    #[test]
    fn test_capture_identity_rejects_blank_fields() {
        let mut session = Session::new();
        assert_eq!(
            session.capture_identity("", "21MBA042").unwrap_err(),
            IdentityError::MissingName
        );
        assert_eq!(
            session.capture_identity("Asha Rao", " ").unwrap_err(),
            IdentityError::MissingRollNumber
        );
        assert!(!session.is_ready());
    }

    #[test]
    fn test_capture_identity_opens_gate() {
        let mut session = Session::new();
        let workbook = session.capture_identity("Asha Rao", "21MBA042").unwrap();
        for kind in ScenarioKind::ALL {
            assert_eq!(workbook.table(kind), &ScenarioTable::new());
            assert_eq!(workbook.justification(kind), "");
        }
        assert!(session.is_ready());
    }

    #[test]
    fn test_recapture_keeps_state() {
        let mut session = Session::new();
        session
            .capture_identity("Asha Rao", "21MBA042")
            .unwrap()
            .set_justification(ScenarioKind::Baseline, "Diversified across IT");

        let workbook = session.capture_identity("Asha R.", "21MBA042").unwrap();
        assert_eq!(workbook.identity().name(), "Asha R.");
        assert_eq!(
            workbook.justification(ScenarioKind::Baseline),
            "Diversified across IT"
        );
    }

    #[test]
    fn test_end_discards_state() {
        let mut session = Session::new();
        session.capture_identity("Asha Rao", "21MBA042").unwrap();
        session.end();
        assert!(!session.is_ready());
    }

    #[test]
    fn test_edit_row_returns_summary() {
        let mut workbook = sample_workbook();
        let summary = workbook
            .edit_cell(ScenarioKind::Baseline, 2, RowField::YourQty, "abc")
            .unwrap();
        assert_eq!(summary.total_investment, Decimal::from(70_000));
        assert_eq!(summary.capital, CapitalStatus::WithinLimit);
        assert_eq!(summary.risk, RiskLabel::Defensive);
    }

    #[test]
    fn test_edit_row_unknown_serial() {
        let mut workbook = sample_workbook();
        let err = workbook
            .edit_row(ScenarioKind::Shock, 30, CellEdit::YourQty(1))
            .unwrap_err();
        assert_eq!(err, TableError::RowNotFound { serial: 30, rows: ROWS });
    }

    #[test]
    fn test_scenarios_are_independent() {
        let workbook = sample_workbook();
        assert_eq!(workbook.table(ScenarioKind::Shock), &ScenarioTable::new());
        assert_eq!(
            workbook.table(ScenarioKind::CapitalIncrease),
            &ScenarioTable::new()
        );
    }

    #[test]
    fn test_set_justification_accepts_empty() {
        let mut workbook = sample_workbook();
        workbook.set_justification(ScenarioKind::Shock, "Cut exposure to oil");
        workbook.set_justification(ScenarioKind::Shock, "");
        assert_eq!(workbook.justification(ScenarioKind::Shock), "");
    }

    #[test]
    fn test_carry_forward_copies_table_not_justification() {
        let mut workbook = sample_workbook();
        workbook.set_justification(ScenarioKind::Baseline, "Baseline notes");
        workbook.set_justification(ScenarioKind::Shock, "Shock notes");

        workbook.carry_forward(ScenarioKind::Baseline, ScenarioKind::Shock);

        assert_eq!(
            workbook.table(ScenarioKind::Shock),
            workbook.table(ScenarioKind::Baseline)
        );
        assert_eq!(workbook.justification(ScenarioKind::Shock), "Shock notes");
    }

    #[test]
    fn test_carry_forward_overwrites_target() {
        let mut workbook = sample_workbook();
        workbook
            .edit_row(ScenarioKind::Shock, 5, CellEdit::Stock("ONGC".to_string()))
            .unwrap();

        workbook.carry_forward(ScenarioKind::Baseline, ScenarioKind::Shock);

        assert_eq!(workbook.table(ScenarioKind::Shock).row(5).unwrap().stock(), "");
    }

    #[test]
    fn test_carry_forward_does_not_alias() {
        let mut workbook = sample_workbook();
        workbook.carry_forward(ScenarioKind::Baseline, ScenarioKind::Shock);
        workbook
            .edit_row(ScenarioKind::Baseline, 1, CellEdit::Stock("WIPRO".to_string()))
            .unwrap();

        assert_eq!(workbook.table(ScenarioKind::Shock).row(1).unwrap().stock(), "TCS");
    }

    #[test]
    fn test_carry_forward_next_chain() {
        let mut workbook = sample_workbook();
        assert_eq!(
            workbook.carry_forward_next(ScenarioKind::Baseline),
            Some(ScenarioKind::Shock)
        );
        assert_eq!(
            workbook.carry_forward_next(ScenarioKind::Shock),
            Some(ScenarioKind::CapitalIncrease)
        );
        assert_eq!(workbook.carry_forward_next(ScenarioKind::CapitalIncrease), None);
        assert_eq!(
            workbook.table(ScenarioKind::CapitalIncrease),
            workbook.table(ScenarioKind::Baseline)
        );
    }

    #[test]
    fn test_summaries_in_tab_order() {
        let workbook = sample_workbook();
        let kinds: Vec<ScenarioKind> = workbook.summaries().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, ScenarioKind::ALL.to_vec());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut session = Session::new();
        session.capture_identity("Asha Rao", "21MBA042").unwrap();
        let workbook = session.workbook_mut().unwrap();
        workbook
            .edit_row(ScenarioKind::Shock, 4, CellEdit::Price(Decimal::new(12_345, 2)))
            .unwrap();
        workbook.set_justification(ScenarioKind::Shock, "Hedged");

        let json = workbook.to_json().unwrap();
        let restored = Workbook::from_json(&json).unwrap();
        assert_eq!(&restored, session.workbook().unwrap());
    }

    fn any_kind() -> impl Strategy<Value = ScenarioKind> {
        prop::sample::select(ScenarioKind::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_carry_forward_then_edit_source(
            source in any_kind(),
            target in any_kind(),
            serial in 1u32..=25,
            qty in 0i64..10_000,
        ) {
            prop_assume!(source != target);
            let mut workbook = sample_workbook();
            workbook.carry_forward(source, target);
            let copied = workbook.table(target).clone();
            prop_assert_eq!(&copied, workbook.table(source));

            workbook.edit_row(source, serial, CellEdit::YourQty(qty)).unwrap();
            prop_assert_eq!(workbook.table(target), &copied);
        }
    }
}
