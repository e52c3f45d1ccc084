use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::BuildResult;

pub fn print_summary(result: &BuildResult) {
    println!("Admissions: {}", result.admissions.display());
    println!("Notes: {}", result.notes.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }

    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("In"),
        header_cell("Out"),
        header_cell("Details"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("Admissions"),
        Cell::new(stats.cleaning.admissions),
        Cell::new(stats.cleaning.admissions),
        Cell::new(format!(
            "{} patients, {} with a next admission, {} elective links cleared",
            stats.cleaning.subjects,
            stats.cleaning.with_next_admission,
            stats.cleaning.elective_links_cleared
        )),
    ]);
    table.add_row(vec![
        Cell::new("Notes"),
        Cell::new(stats.selection.notes),
        Cell::new(stats.selection.selected),
        Cell::new(format!(
            "{} discharge summaries, {} superseded, {} without admission",
            stats.selection.discharge_summaries,
            stats.selection.superseded,
            stats.selection.without_admission
        )),
    ]);
    table.add_row(vec![
        Cell::new("Merge"),
        Cell::new(stats.merge.admissions),
        Cell::new(stats.merge.output),
        Cell::new(format!(
            "{} with text, {} newborn stays dropped",
            stats.merge.with_text, stats.merge.newborn_dropped
        )),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.rows).add_attribute(Attribute::Bold),
        warning_cell(stats.cleaning.coerced_timestamps),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn warning_cell(coerced: usize) -> Cell {
    if coerced > 0 {
        Cell::new(format!("{coerced} unparseable timestamps set to empty"))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("no unparseable timestamps")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
