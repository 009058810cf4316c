//! Reconciliation of previewed rows.
//!
//! The backend classifies every row of the upload once. [`Reconciliation`]
//! keeps one [`RowState`] per row index on top of that classification: what
//! the user wants done with the row, how each field conflict is resolved,
//! and whether each parent is created or linked. Inline edits reclassify the
//! edited row locally, without asking the backend again.
//!
//! Selection and merge live in different [`Disposition`] variants, so a row
//! can never be both imported as new and merged into an existing child.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use kita_model::{
    ChildRecord, ExecuteAction, ExecuteRequest, ExecuteRow, ParentDecision, ParentRecord,
    ParentSlot, PreviewRow,
};
use serde::{Deserialize, Serialize};

use crate::care_hours::normalized_child;
use crate::error::ReconcileError;

type Result<T> = std::result::Result<T, ReconcileError>;

/// Which side of a field conflict is kept on merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Keep the stored value.
    #[default]
    Existing,
    /// Overwrite with the imported value.
    New,
}

/// What to do with one parent of a submitted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentChoice {
    Create,
    /// Link to the stored parent with this id.
    Link(String),
}

/// What the user wants done with a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Required fields are missing; the row cannot be submitted.
    Error,
    /// Valid row without a stored counterpart.
    New { selected: bool },
    /// Row collides with a stored child or another row of the file.
    Duplicate {
        merge: bool,
        resolutions: BTreeMap<String, Resolution>,
    },
}

/// Status of a row as shown in the preview table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowStatus {
    Error,
    New,
    DuplicateUnresolved,
    DuplicateMerging,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Error => "error",
            RowStatus::New => "new",
            RowStatus::DuplicateUnresolved => "duplicate",
            RowStatus::DuplicateMerging => "merge",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local edit of a row's child record. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RowEdit {
    pub member_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub entry_date: Option<String>,
    /// An empty value clears the exit date.
    pub exit_date: Option<String>,
    pub care_hours: Option<f64>,
}

impl RowEdit {
    pub fn member_number(value: impl Into<String>) -> Self {
        Self {
            member_number: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, child: &mut ChildRecord) {
        let text_fields = [
            (&self.member_number, &mut child.member_number),
            (&self.first_name, &mut child.first_name),
            (&self.last_name, &mut child.last_name),
            (&self.birth_date, &mut child.birth_date),
            (&self.entry_date, &mut child.entry_date),
        ];
        for (edit, target) in text_fields {
            if let Some(value) = edit {
                target.clone_from(value);
            }
        }
        if let Some(exit_date) = &self.exit_date {
            child.exit_date = (!exit_date.trim().is_empty()).then(|| exit_date.clone());
        }
        if let Some(hours) = self.care_hours {
            child.care_hours = Some(hours);
        }
    }
}

/// Reconciliation state of one row.
#[derive(Debug, Clone)]
pub struct RowState {
    row: PreviewRow,
    /// Member number the backend classified; the stored match belongs to it.
    previewed_member_number: String,
    disposition: Disposition,
    parents: [Option<ParentChoice>; 2],
}

impl RowState {
    fn from_preview(row: PreviewRow) -> Self {
        let disposition = if !row.is_valid {
            Disposition::Error
        } else if row.is_duplicate {
            Disposition::Duplicate {
                merge: false,
                resolutions: BTreeMap::new(),
            }
        } else {
            Disposition::New { selected: true }
        };
        Self {
            previewed_member_number: member_key(&row.child.member_number),
            row,
            disposition,
            parents: [None, None],
        }
    }

    pub fn index(&self) -> usize {
        self.row.index
    }

    /// The row with local edits applied.
    pub fn row(&self) -> &PreviewRow {
        &self.row
    }

    pub fn disposition(&self) -> &Disposition {
        &self.disposition
    }

    pub fn status(&self) -> RowStatus {
        match &self.disposition {
            Disposition::Error => RowStatus::Error,
            Disposition::New { .. } => RowStatus::New,
            Disposition::Duplicate { merge: true, .. } => RowStatus::DuplicateMerging,
            Disposition::Duplicate { .. } => RowStatus::DuplicateUnresolved,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.disposition, Disposition::New { selected: true })
    }

    pub fn is_merging(&self) -> bool {
        matches!(self.disposition, Disposition::Duplicate { merge: true, .. })
    }

    /// Merge is offered only when the stored child is known.
    pub fn can_merge(&self) -> bool {
        matches!(self.disposition, Disposition::Duplicate { .. })
            && self.row.existing_child_id.is_some()
    }

    /// Resolution of a conflict; unresolved conflicts keep the stored value.
    pub fn resolution(&self, field: &str) -> Resolution {
        match &self.disposition {
            Disposition::Duplicate { resolutions, .. } => {
                resolutions.get(field).copied().unwrap_or_default()
            }
            _ => Resolution::default(),
        }
    }

    /// The explicitly chosen parent action, if any.
    pub fn parent_choice(&self, slot: ParentSlot) -> Option<&ParentChoice> {
        self.parents[slot_position(slot)].as_ref()
    }

    /// Parent decision sent on submit; defaults to creating the parent.
    pub fn parent_decision(&self, slot: ParentSlot) -> ParentDecision {
        match self.parent_choice(slot) {
            Some(ParentChoice::Link(id)) => ParentDecision::link(self.index(), slot, id.clone()),
            Some(ParentChoice::Create) | None => ParentDecision::create(self.index(), slot),
        }
    }

    /// The submission entry for this row, if it is submitted.
    pub fn execute_row(&self) -> Option<ExecuteRow> {
        match &self.disposition {
            Disposition::New { selected: true } => Some(self.base_execute_row(ExecuteAction::Create)),
            Disposition::Duplicate {
                merge: true,
                resolutions,
            } => {
                let existing_child_id = self.row.existing_child_id.clone()?;
                let field_updates = self
                    .row
                    .conflicts()
                    .iter()
                    .filter(|c| resolutions.get(&c.field) == Some(&Resolution::New))
                    .map(|c| (c.field.clone(), c.new_value.clone()))
                    .collect();
                Some(ExecuteRow {
                    existing_child_id: Some(existing_child_id),
                    merge_parents: Some(true),
                    field_updates: Some(field_updates),
                    ..self.base_execute_row(ExecuteAction::Merge)
                })
            }
            _ => None,
        }
    }

    fn base_execute_row(&self, action: ExecuteAction) -> ExecuteRow {
        ExecuteRow {
            index: self.index(),
            action,
            child: normalized_child(&self.row.child),
            parent1: self.row.parent1.clone(),
            parent2: self.row.parent2.clone(),
            existing_child_id: None,
            merge_parents: None,
            field_updates: None,
        }
    }
}

fn slot_position(slot: ParentSlot) -> usize {
    match slot {
        ParentSlot::First => 0,
        ParentSlot::Second => 1,
    }
}

fn member_key(member_number: &str) -> String {
    member_number.trim().to_string()
}

/// Counts over all rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub total: usize,
    pub valid: usize,
    pub errors: usize,
    pub duplicates: usize,
    pub selected: usize,
    pub merging: usize,
}

/// Reconciliation state for one preview.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    rows: BTreeMap<usize, RowState>,
    /// Member numbers the backend reported as duplicates.
    duplicate_member_numbers: BTreeSet<String>,
    valid_count: usize,
    error_count: usize,
}

impl Reconciliation {
    /// Seeds the state from a fresh preview.
    ///
    /// Valid non-duplicate rows start selected; nothing is merged and no
    /// conflict or parent decision is recorded.
    pub fn from_preview(rows: Vec<PreviewRow>) -> Self {
        let duplicate_member_numbers = rows
            .iter()
            .filter(|row| row.is_duplicate)
            .map(|row| member_key(&row.child.member_number))
            .filter(|member| !member.is_empty())
            .collect();
        let rows = rows
            .into_iter()
            .map(|row| (row.index, RowState::from_preview(row)))
            .collect();
        let mut reconciliation = Self {
            rows,
            duplicate_member_numbers,
            valid_count: 0,
            error_count: 0,
        };
        reconciliation.recount();

        let summary = reconciliation.summary();
        tracing::debug!(
            rows = summary.total,
            selected = summary.selected,
            duplicates = summary.duplicates,
            errors = summary.errors,
            "initialized reconciliation"
        );
        reconciliation
    }

    pub fn row(&self, index: usize) -> Option<&RowState> {
        self.rows.get(&index)
    }

    /// Rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &RowState> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn status(&self, index: usize) -> Option<RowStatus> {
        self.row(index).map(RowState::status)
    }

    pub fn selected_indices(&self) -> BTreeSet<usize> {
        self.rows
            .values()
            .filter(|state| state.is_selected())
            .map(RowState::index)
            .collect()
    }

    pub fn merge_indices(&self) -> BTreeSet<usize> {
        self.rows
            .values()
            .filter(|state| state.is_merging())
            .map(RowState::index)
            .collect()
    }

    pub fn duplicate_member_numbers(&self) -> &BTreeSet<String> {
        &self.duplicate_member_numbers
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn summary(&self) -> ReconcileSummary {
        let mut summary = ReconcileSummary {
            total: self.rows.len(),
            valid: self.valid_count,
            errors: self.error_count,
            ..ReconcileSummary::default()
        };
        for state in self.rows.values() {
            match state.status() {
                RowStatus::New if state.is_selected() => summary.selected += 1,
                RowStatus::DuplicateUnresolved => summary.duplicates += 1,
                RowStatus::DuplicateMerging => {
                    summary.duplicates += 1;
                    summary.merging += 1;
                }
                RowStatus::New | RowStatus::Error => {}
            }
        }
        summary
    }

    /// At least one row would be submitted.
    pub fn can_submit(&self) -> bool {
        self.rows.values().any(|state| state.execute_row().is_some())
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut RowState> {
        self.rows
            .get_mut(&index)
            .ok_or(ReconcileError::UnknownRow(index))
    }

    /// Selects or deselects a valid non-duplicate row.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<()> {
        let state = self.row_mut(index)?;
        let status = state.status();
        match &mut state.disposition {
            Disposition::New { selected: current } => {
                *current = selected;
                Ok(())
            }
            _ => Err(ReconcileError::NotSelectable { index, status }),
        }
    }

    /// Flips the selection of a row; returns the new value.
    pub fn toggle_selected(&mut self, index: usize) -> Result<bool> {
        let selected = !self
            .row(index)
            .ok_or(ReconcileError::UnknownRow(index))?
            .is_selected();
        self.set_selected(index, selected)?;
        Ok(selected)
    }

    /// Flags or unflags a duplicate row for merging into its stored child.
    pub fn set_merge(&mut self, index: usize, merge: bool) -> Result<()> {
        let state = self.row_mut(index)?;
        let status = state.status();
        let has_existing = state.row.existing_child_id.is_some();
        match &mut state.disposition {
            Disposition::Duplicate { merge: current, .. } if has_existing => {
                *current = merge;
                Ok(())
            }
            _ => Err(ReconcileError::NotMergeable {
                index,
                status,
                has_existing,
            }),
        }
    }

    /// Flips the merge flag of a row; returns the new value.
    pub fn toggle_merge(&mut self, index: usize) -> Result<bool> {
        let merge = !self
            .row(index)
            .ok_or(ReconcileError::UnknownRow(index))?
            .is_merging();
        self.set_merge(index, merge)?;
        Ok(merge)
    }

    /// Records which value wins for one conflicting field of a duplicate row.
    pub fn resolve_conflict(
        &mut self,
        index: usize,
        field: &str,
        resolution: Resolution,
    ) -> Result<()> {
        let state = self.row_mut(index)?;
        if state.row.conflict(field).is_none() {
            return Err(ReconcileError::UnknownConflict {
                index,
                field: field.to_string(),
            });
        }
        let status = state.status();
        let has_existing = state.row.existing_child_id.is_some();
        match &mut state.disposition {
            Disposition::Duplicate { resolutions, .. } => {
                resolutions.insert(field.to_string(), resolution);
                Ok(())
            }
            _ => Err(ReconcileError::NotMergeable {
                index,
                status,
                has_existing,
            }),
        }
    }

    /// Chooses whether a parent of the row is created or linked.
    ///
    /// A link must point at one of the stored matches offered for that parent.
    pub fn set_parent_decision(
        &mut self,
        index: usize,
        slot: ParentSlot,
        choice: ParentChoice,
    ) -> Result<()> {
        let state = self.row_mut(index)?;
        let parent = state
            .row
            .parent(slot)
            .filter(|parent| parent.has_name())
            .ok_or(ReconcileError::NoParent { index, slot })?;
        if let ParentChoice::Link(parent_id) = &choice
            && parent.find_match(parent_id).is_none()
        {
            return Err(ReconcileError::UnknownParentMatch {
                index,
                slot,
                parent_id: parent_id.clone(),
            });
        }
        state.parents[slot_position(slot)] = Some(choice);
        Ok(())
    }

    /// Removes an explicit parent decision; the parent will be created.
    pub fn clear_parent_decision(&mut self, index: usize, slot: ParentSlot) -> Result<()> {
        self.row_mut(index)?.parents[slot_position(slot)] = None;
        Ok(())
    }

    /// Applies a local edit to a row's child record and reclassifies the row.
    ///
    /// Validity is recomputed from the required fields. The duplicate flag is
    /// recomputed only when the member number changes: the row is a duplicate
    /// if its new number was reported as duplicate by the backend or equals
    /// another row's current number. Other rows are not reclassified.
    pub fn edit_row(&mut self, index: usize, edit: &RowEdit) -> Result<RowStatus> {
        let state = self.row(index).ok_or(ReconcileError::UnknownRow(index))?;

        let mut child = state.row.child.clone();
        edit.apply(&mut child);
        let new_member = member_key(&child.member_number);
        let member_changed = new_member != member_key(&state.row.child.member_number);
        let is_duplicate = if member_changed {
            !new_member.is_empty()
                && (self.duplicate_member_numbers.contains(&new_member)
                    || self.rows.values().any(|other| {
                        other.index() != index
                            && member_key(&other.row.child.member_number) == new_member
                    }))
        } else {
            state.row.is_duplicate
        };
        let is_valid = child.has_required_fields();
        // The stored match is only known for the number the backend classified.
        let keep_existing =
            is_duplicate && (!member_changed || new_member == state.previewed_member_number);

        let state = self.row_mut(index)?;
        let was_duplicate = state.row.is_duplicate;
        state.row.child = child;
        state.row.is_valid = is_valid;
        state.row.is_duplicate = is_duplicate;
        if !keep_existing {
            state.row.existing_child_id = None;
            state.row.existing_child = None;
            state.row.field_conflicts = None;
        }

        let previous = std::mem::replace(&mut state.disposition, Disposition::Error);
        state.disposition = match (is_valid, is_duplicate, previous) {
            (false, _, _) => Disposition::Error,
            (true, true, Disposition::Duplicate { merge, resolutions }) if keep_existing => {
                Disposition::Duplicate { merge, resolutions }
            }
            (true, true, _) => Disposition::Duplicate {
                merge: false,
                resolutions: BTreeMap::new(),
            },
            (true, false, Disposition::New { selected }) => Disposition::New { selected },
            (true, false, _) => Disposition::New { selected: true },
        };
        let status = state.status();

        self.recount();
        tracing::debug!(
            index,
            %status,
            was_duplicate,
            is_duplicate,
            is_valid,
            "edited row"
        );
        Ok(status)
    }

    /// Assembles the commit request.
    ///
    /// Selected rows become `create` entries and merge-flagged rows with a
    /// known stored child become `merge` entries. Every named parent of a
    /// submitted row gets a decision.
    pub fn build_execute_request(&self) -> Result<ExecuteRequest> {
        let mut rows = Vec::new();
        let mut parent_decisions = Vec::new();
        for state in self.rows.values() {
            let Some(execute_row) = state.execute_row() else {
                continue;
            };
            for slot in ParentSlot::BOTH {
                if state.row.parent(slot).is_some_and(ParentRecord::has_name) {
                    parent_decisions.push(state.parent_decision(slot));
                }
            }
            rows.push(execute_row);
        }
        if rows.is_empty() {
            return Err(ReconcileError::NothingToImport);
        }

        let request = ExecuteRequest {
            rows,
            parent_decisions,
        };
        tracing::info!(
            create = request.count(ExecuteAction::Create),
            merge = request.count(ExecuteAction::Merge),
            parent_decisions = request.parent_decisions.len(),
            "built execute request"
        );
        Ok(request)
    }

    fn recount(&mut self) {
        self.valid_count = self
            .rows
            .values()
            .filter(|state| state.row.is_valid)
            .count();
        self.error_count = self.rows.len() - self.valid_count;
    }
}

#[cfg(test)]
mod tests {
    use kita_model::{ExistingParent, FieldConflict, ParentAction};

    use super::*;

    fn child(member: &str) -> ChildRecord {
        ChildRecord {
            member_number: member.to_string(),
            first_name: "Mia".to_string(),
            last_name: "Weber".to_string(),
            birth_date: "2021-04-01".to_string(),
            entry_date: "2023-08-01".to_string(),
            ..ChildRecord::default()
        }
    }

    fn row(index: usize, member: &str) -> PreviewRow {
        PreviewRow {
            index,
            child: child(member),
            parent1: None,
            parent2: None,
            is_valid: true,
            is_duplicate: false,
            existing_child_id: None,
            existing_child: None,
            field_conflicts: None,
            warnings: Vec::new(),
        }
    }

    fn duplicate(index: usize, member: &str, existing: &str) -> PreviewRow {
        PreviewRow {
            is_duplicate: true,
            existing_child_id: Some(existing.to_string()),
            field_conflicts: Some(vec![FieldConflict {
                field: "city".to_string(),
                field_label: "Ort".to_string(),
                existing_value: "Köln".to_string(),
                new_value: "Bonn".to_string(),
            }]),
            ..row(index, member)
        }
    }

    #[test]
    fn toggle_rejects_wrong_row_kind() {
        let mut state = Reconciliation::from_preview(vec![row(0, "1"), duplicate(1, "2", "c2")]);

        assert_eq!(
            state.toggle_merge(0),
            Err(ReconcileError::NotMergeable {
                index: 0,
                status: RowStatus::New,
                has_existing: false,
            })
        );
        assert!(matches!(
            state.toggle_selected(1),
            Err(ReconcileError::NotSelectable { index: 1, .. })
        ));
        assert_eq!(state.toggle_selected(7), Err(ReconcileError::UnknownRow(7)));
        assert_eq!(state.selected_indices(), BTreeSet::from([0]));
        assert!(state.merge_indices().is_empty());
    }

    #[test]
    fn duplicate_without_existing_child_cannot_merge() {
        let mut row = duplicate(0, "1", "c1");
        row.existing_child_id = None;
        let mut state = Reconciliation::from_preview(vec![row]);
        assert!(!state.row(0).unwrap().can_merge());
        assert!(state.toggle_merge(0).is_err());
    }

    #[test]
    fn unresolved_conflicts_keep_existing_values() {
        let mut state = Reconciliation::from_preview(vec![duplicate(0, "1", "c1")]);
        state.toggle_merge(0).unwrap();
        assert_eq!(state.row(0).unwrap().resolution("city"), Resolution::Existing);

        let request = state.build_execute_request().unwrap();
        assert_eq!(request.rows[0].field_updates, Some(BTreeMap::new()));
        assert_eq!(request.rows[0].merge_parents, Some(true));
    }

    #[test]
    fn resolve_conflict_requires_listed_field() {
        let mut state = Reconciliation::from_preview(vec![duplicate(0, "1", "c1")]);
        assert_eq!(
            state.resolve_conflict(0, "careHours", Resolution::New),
            Err(ReconcileError::UnknownConflict {
                index: 0,
                field: "careHours".to_string(),
            })
        );
    }

    #[test]
    fn link_must_reference_offered_match() {
        let mut preview = row(0, "1");
        preview.parent1 = Some(ParentRecord {
            first_name: "Anna".to_string(),
            last_name: "Weber".to_string(),
            existing_matches: vec![ExistingParent {
                id: "p9".to_string(),
                first_name: "Anna".to_string(),
                last_name: "Weber".to_string(),
                email: None,
            }],
            ..ParentRecord::default()
        });
        let mut state = Reconciliation::from_preview(vec![preview]);

        assert!(matches!(
            state.set_parent_decision(0, ParentSlot::First, ParentChoice::Link("p1".to_string())),
            Err(ReconcileError::UnknownParentMatch { .. })
        ));
        assert_eq!(
            state.set_parent_decision(0, ParentSlot::Second, ParentChoice::Create),
            Err(ReconcileError::NoParent {
                index: 0,
                slot: ParentSlot::Second,
            })
        );

        state
            .set_parent_decision(0, ParentSlot::First, ParentChoice::Link("p9".to_string()))
            .unwrap();
        let request = state.build_execute_request().unwrap();
        assert_eq!(request.parent_decisions.len(), 1);
        assert_eq!(request.parent_decisions[0].action, ParentAction::Link);
        assert_eq!(request.parent_decisions[0].existing_parent_id.as_deref(), Some("p9"));

        state.clear_parent_decision(0, ParentSlot::First).unwrap();
        let request = state.build_execute_request().unwrap();
        assert_eq!(request.parent_decisions[0].action, ParentAction::Create);
    }

    #[test]
    fn edit_onto_another_rows_number_drops_stored_match() {
        let mut state = Reconciliation::from_preview(vec![duplicate(0, "1", "c1"), row(1, "2")]);
        state.toggle_merge(0).unwrap();

        // Colliding with row 1 is still a duplicate, but not of c1.
        assert_eq!(
            state.edit_row(0, &RowEdit::member_number("2")).unwrap(),
            RowStatus::DuplicateUnresolved
        );
        assert_eq!(state.row(0).unwrap().row().existing_child_id, None);
        assert!(state.merge_indices().is_empty());

        // A first-name edit leaves the duplicate flag alone.
        let edit = RowEdit {
            first_name: Some("Lea".to_string()),
            ..RowEdit::default()
        };
        assert_eq!(state.edit_row(0, &edit).unwrap(), RowStatus::DuplicateUnresolved);
    }

    #[test]
    fn blanking_a_required_field_moves_row_to_error() {
        let mut state = Reconciliation::from_preview(vec![row(0, "1"), row(1, "2")]);
        let edit = RowEdit {
            last_name: Some(" ".to_string()),
            ..RowEdit::default()
        };
        assert_eq!(state.edit_row(1, &edit).unwrap(), RowStatus::Error);
        assert_eq!((state.valid_count(), state.error_count()), (1, 1));
        assert_eq!(state.selected_indices(), BTreeSet::from([0]));

        let edit = RowEdit {
            last_name: Some("Schmidt".to_string()),
            ..RowEdit::default()
        };
        assert_eq!(state.edit_row(1, &edit).unwrap(), RowStatus::New);
        assert_eq!(state.selected_indices(), BTreeSet::from([0, 1]));
    }

    #[test]
    fn empty_exit_date_edit_clears_it() {
        let mut record = child("1");
        record.exit_date = Some("2025-07-31".to_string());
        let edit = RowEdit {
            exit_date: Some(String::new()),
            ..RowEdit::default()
        };
        edit.apply(&mut record);
        assert_eq!(record.exit_date, None);
        assert!(!edit.is_empty());
        assert!(RowEdit::default().is_empty());
    }

    #[test]
    fn nothing_selected_is_refused() {
        let mut state = Reconciliation::from_preview(vec![row(0, "1")]);
        state.toggle_selected(0).unwrap();
        assert!(!state.can_submit());
        assert_eq!(
            state.build_execute_request(),
            Err(ReconcileError::NothingToImport)
        );
    }
}
