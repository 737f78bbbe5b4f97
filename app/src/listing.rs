//! FILENAME: app/src/listing.rs
// PURPOSE: Terminal rendering of the listing view and the category options.

use crate::api_types::{CategoryOption, ColumnHeader, OrderRow, ViewData};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use engine::SortIndicator;

const TABLE_WIDTH: u16 = 140;

/// Column header text with the arrow of the active sort column.
pub fn header_label(column: &ColumnHeader) -> String {
    match column.indicator {
        SortIndicator::Ascending => format!("{} ▲", column.label),
        SortIndicator::Descending => format!("{} ▼", column.label),
        SortIndicator::Inactive => column.label.clone(),
    }
}

pub fn listing_table(view: &ViewData) -> Table {
    let mut table = Table::new();
    table.set_header(
        view.columns
            .iter()
            .map(|column| header_cell(&header_label(column)))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for row in &view.rows {
        table.add_row(row_cells(row));
    }
    table
}

fn row_cells(row: &OrderRow) -> Vec<Cell> {
    vec![
        Cell::new(&row.id).add_attribute(Attribute::Bold),
        Cell::new(&row.title),
        Cell::new(&row.category).fg(Color::DarkGrey),
        Cell::new(&row.price_display),
        Cell::new(&row.rating_display),
    ]
}

pub fn print_listing(view: &ViewData) {
    println!("{}", view.summary_line());
    match view.empty_message() {
        Some(message) => println!("{}", message),
        None => println!("{}", listing_table(view)),
    }
}

pub fn categories_table(options: &[CategoryOption]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Label")]);
    apply_table_style(&mut table);
    for option in options {
        table.add_row(vec![Cell::new(&option.value), Cell::new(&option.label)]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}
