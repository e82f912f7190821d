use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_import::{BatchSummary, ImportReport};
use roster_model::{CandidateRecord, ColumnMapping};

/// Rows shown before the preview table is truncated.
const PREVIEW_ROWS: usize = 20;

pub fn print_mapping(mapping: &ColumnMapping) {
    if mapping.is_empty() {
        println!("No columns mapped.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Field")]);
    apply_table_style(&mut table);
    for entry in mapping.entries() {
        table.add_row(vec![
            Cell::new(&entry.column),
            Cell::new(entry.field.label()),
        ]);
    }
    println!("Mapping:");
    println!("{table}");
}

pub fn print_preview(records: &[CandidateRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Email"),
        header_cell("Role"),
        header_cell("Phone"),
        header_cell("Active"),
        header_cell("Grade"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    for record in records.iter().take(PREVIEW_ROWS) {
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(&record.email),
            Cell::new(record.role.as_str()),
            optional_cell(record.phone.as_deref()),
            check_cell(record.is_active),
            optional_cell(record.grade.as_deref()),
        ]);
    }
    if records.len() > PREVIEW_ROWS {
        let hidden = records.len() - PREVIEW_ROWS;
        table.add_row(vec![
            dim_cell(format!("({hidden} more rows)")),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    println!("Preview ({} rows):", records.len());
    println!("{table}");
}

/// Print the validation messages that block an import.
pub fn print_blockers(mapping_errors: &[String], data_errors: &[String]) {
    if !mapping_errors.is_empty() {
        eprintln!("Mapping errors:");
        for error in mapping_errors {
            eprintln!("- {error}");
        }
    }
    if !data_errors.is_empty() {
        eprintln!("Data errors:");
        for error in data_errors {
            eprintln!("- {error}");
        }
    }
}

pub fn print_batch_summary(summary: &BatchSummary, report: Option<&ImportReport>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Created"),
        header_cell("Failed"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(summary.succeeded + summary.failed).add_attribute(Attribute::Bold),
        count_cell(summary.succeeded, Color::Green),
        count_cell(summary.failed, Color::Red),
    ]);
    println!("{table}");
    if let Some(report) = report {
        println!(
            "Imported {} in {} ms",
            report.file_name, report.duration_ms
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn check_cell(checked: bool) -> Cell {
    if checked {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}
