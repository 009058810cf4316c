//! Import plans: the decisions a user would make in the wizard, written down.
//!
//! A plan is a TOML file applied after parsing (mapping overrides) and after
//! preview (row decisions). Rows are the 1-based numbers shown in the
//! preview table and in the results report.
//!
//! ```toml
//! unmap = ["city"]
//! deselect = [4]
//! merge = [2]
//!
//! [mapping]
//! memberNumber = "Mitgl.-Nr."
//! careHours = 7
//!
//! [[resolve]]
//! row = 2
//! field = "careHours"
//! use = "new"
//!
//! [[parent]]
//! row = 2
//! slot = 1
//! link = "p-17"
//!
//! [[edit]]
//! row = 3
//! set = { memberNumber = "1042", exitDate = "" }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use kita_import::{ParentChoice, Reconciliation, Resolution, RowEdit};
use kita_map::MappingState;
use kita_model::{FieldKey, ParentSlot};
use serde::Deserialize;
use tracing::{debug, info};

/// Column reference in a mapping override: a header name or a 0-based index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Header(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConflictChoice {
    pub row: usize,
    pub field: String,
    #[serde(rename = "use")]
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParentPlan {
    pub row: usize,
    pub slot: ParentSlot,
    /// Existing parent to link; absent means create a new one.
    #[serde(default)]
    pub link: Option<String>,
}

impl ParentPlan {
    pub fn choice(&self) -> ParentChoice {
        match &self.link {
            Some(id) => ParentChoice::Link(id.clone()),
            None => ParentChoice::Create,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditPlan {
    pub row: usize,
    pub set: RowEdit,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportPlan {
    /// Field wire name to column.
    pub mapping: BTreeMap<String, ColumnRef>,
    /// Fields to leave unmapped even when detected.
    pub unmap: Vec<String>,
    pub deselect: Vec<usize>,
    pub merge: Vec<usize>,
    #[serde(rename = "resolve")]
    pub resolutions: Vec<ConflictChoice>,
    #[serde(rename = "parent")]
    pub parents: Vec<ParentPlan>,
    #[serde(rename = "edit")]
    pub edits: Vec<EditPlan>,
}

/// Convert a displayed row number to the row index used by the backend.
pub fn row_index(row: usize) -> Result<usize> {
    match row.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("row numbers start at 1"),
    }
}

fn field(name: &str) -> Result<FieldKey> {
    name.parse::<FieldKey>()
        .with_context(|| format!("unknown field `{name}` in plan"))
}

impl ImportPlan {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("read plan {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parse plan {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply `unmap` then `mapping` to the detected mapping.
    pub fn apply_mapping(&self, state: &mut MappingState) -> Result<()> {
        for name in &self.unmap {
            let field = field(name)?;
            if state.clear(field) {
                debug!(field = field.as_str(), "unmapped by plan");
            }
        }
        for (name, column) in &self.mapping {
            let field = field(name)?;
            let displaced = match column {
                ColumnRef::Index(index) => state.assign(field, *index),
                ColumnRef::Header(header) => state.assign_by_header(field, header),
            }
            .with_context(|| format!("map `{name}`"))?;
            if let Some(previous) = displaced {
                info!(
                    field = field.as_str(),
                    displaced = previous.as_str(),
                    "plan moved a column to another field"
                );
            }
        }
        Ok(())
    }

    /// Apply row decisions to a fresh preview.
    ///
    /// Edits run first since they can change a row's status; the remaining
    /// decisions then see the edited rows.
    pub fn apply_reconciliation(&self, state: &mut Reconciliation) -> Result<()> {
        for edit in &self.edits {
            let status = state
                .edit_row(row_index(edit.row)?, &edit.set)
                .with_context(|| format!("edit row {}", edit.row))?;
            debug!(row = edit.row, %status, "row edited by plan");
        }
        for &row in &self.deselect {
            state
                .set_selected(row_index(row)?, false)
                .with_context(|| format!("deselect row {row}"))?;
        }
        for &row in &self.merge {
            state
                .set_merge(row_index(row)?, true)
                .with_context(|| format!("merge row {row}"))?;
        }
        for choice in &self.resolutions {
            state
                .resolve_conflict(row_index(choice.row)?, &choice.field, choice.resolution)
                .with_context(|| format!("resolve `{}` on row {}", choice.field, choice.row))?;
        }
        for parent in &self.parents {
            state
                .set_parent_decision(row_index(parent.row)?, parent.slot, parent.choice())
                .with_context(|| {
                    format!("parent {} on row {}", parent.slot.number(), parent.row)
                })?;
        }
        Ok(())
    }
}
