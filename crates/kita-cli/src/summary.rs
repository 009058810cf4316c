use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kita_import::{ImportReport, Reconciliation, RowState, RowStatus};
use kita_map::{FieldMappingStatus, HeaderMatch, MappingState, keywords_for};
use kita_model::{FieldKey, ParsedFile};

const KEYWORDS_SHOWN: usize = 3;

pub fn print_fields() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
        header_cell("Keywords"),
    ]);
    apply_table_style(&mut table);
    for field in FieldKey::ALL {
        let required = if field.is_required_for_preview() {
            Cell::new("preview").fg(Color::Yellow)
        } else if field.is_required_for_row() {
            Cell::new("row")
        } else {
            dim_cell("-")
        };
        let keywords = keywords_for(field);
        let mut shown = keywords
            .iter()
            .take(KEYWORDS_SHOWN)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if keywords.len() > KEYWORDS_SHOWN {
            shown.push_str(&format!(", +{}", keywords.len() - KEYWORDS_SHOWN));
        }
        table.add_row(vec![
            Cell::new(field.as_str()),
            Cell::new(field.label()),
            required,
            dim_cell(shown),
        ]);
    }
    println!("{table}");
}

pub fn print_inspection(
    parsed: &ParsedFile,
    fingerprint: &str,
    matches: &[HeaderMatch],
    state: &MappingState,
) {
    println!(
        "Separator: {} | Columns: {} | Rows: {}",
        parsed.detected_separator.name(),
        parsed.column_count(),
        parsed.total_rows
    );
    println!("SHA-256: {fingerprint}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Header"),
        header_cell("Sample"),
        header_cell("Field"),
        header_cell("Keyword"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (column, header) in parsed.headers.iter().enumerate() {
        let sample = parsed
            .sample_values(column)
            .into_iter()
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default()
            .to_string();
        let (field, keyword) = match matches.iter().find(|m| m.column == column) {
            Some(found) => (Cell::new(found.field.label()), dim_cell(found.keyword)),
            None => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(column),
            Cell::new(header),
            dim_cell(sample),
            field,
            keyword,
        ]);
    }
    println!("{table}");
    print_missing_required(state);
}

pub fn print_mapping(state: &MappingState) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    for field in FieldKey::ALL {
        let status = state.status(field);
        let column = match state.header_for(field) {
            Some(header) => Cell::new(header),
            None => dim_cell("-"),
        };
        let source = match status {
            FieldMappingStatus::Suggested => Cell::new("detected").fg(Color::Green),
            FieldMappingStatus::Manual => Cell::new("plan").fg(Color::Cyan),
            FieldMappingStatus::Unmapped => dim_cell("unmapped"),
        };
        table.add_row(vec![Cell::new(field.label()), column, source]);
    }
    println!("{table}");
    let summary = state.summary();
    println!(
        "Mapped {} of {} fields ({} of {} required for a row)",
        summary.mapped, summary.total_fields, summary.required_mapped, summary.required_total
    );
    let unmapped = state.unmapped_headers();
    if !unmapped.is_empty() {
        println!("Unused columns: {}", unmapped.join(", "));
    }
    print_missing_required(state);
}

pub fn print_preview(reconciliation: &Reconciliation) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Member"),
        header_cell("Name"),
        header_cell("Status"),
        header_cell("Import"),
        header_cell("Conflicts"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for state in reconciliation.rows() {
        let row = state.row();
        let conflicts = row.conflicts().len();
        let mut notes: Vec<String> = row
            .child
            .missing_required()
            .into_iter()
            .map(|field| format!("missing {}", field.label()))
            .collect();
        notes.extend(row.warnings.iter().cloned());
        table.add_row(vec![
            Cell::new(ImportReport::display_row(state.index())),
            Cell::new(&row.child.member_number),
            Cell::new(row.child.full_name()),
            status_cell(state.status()),
            action_cell(state),
            count_cell(conflicts, Color::Yellow),
            dim_cell(notes.join("; ")),
        ]);
    }
    println!("{table}");
    let summary = reconciliation.summary();
    println!(
        "Rows: {} | Valid: {} | Errors: {} | Duplicates: {} | Selected: {} | Merging: {}",
        summary.total,
        summary.valid,
        summary.errors,
        summary.duplicates,
        summary.selected,
        summary.merging
    );
}

pub fn print_report(report: &ImportReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Result"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Children created"),
        count_cell(report.children_created, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Children updated"),
        count_cell(report.children_updated, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Parents created"),
        count_cell(report.parents_created, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Parents linked"),
        count_cell(report.parents_linked, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Errors").add_attribute(Attribute::Bold),
        count_cell(report.errors.len(), Color::Red),
    ]);
    println!("{table}");
    for line in report.error_lines() {
        eprintln!("{line}");
    }
}

fn print_missing_required(state: &MappingState) {
    let missing = state.missing_required();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(FieldKey::label).collect();
        println!("Required before preview: {}", labels.join(", "));
    }
}

fn status_cell(status: RowStatus) -> Cell {
    let color = match status {
        RowStatus::Error => Color::Red,
        RowStatus::New => Color::Green,
        RowStatus::DuplicateUnresolved => Color::Yellow,
        RowStatus::DuplicateMerging => Color::Cyan,
    };
    Cell::new(status).fg(color)
}

fn action_cell(state: &RowState) -> Cell {
    if state.is_selected() {
        Cell::new("create").fg(Color::Green)
    } else if state.is_merging() {
        Cell::new("merge").fg(Color::Cyan)
    } else {
        dim_cell("skip")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
