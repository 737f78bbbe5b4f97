//! FILENAME: core/export/src/table.rs
//! PURPOSE: Shared row projection used by every export adapter.
//! CONTEXT: Both adapters turn ExportRows into an ExportTable through
//! `ExportTable::build`, so the exported rows are always the input rows in
//! input order. Adapters only differ in their column schema and renderer.

use crate::number_format::{format_currency, format_general, format_rating};
use engine::{ExportRow, RecordId};

/// Maximum title length in the printable report.
pub const REPORT_TITLE_MAX_CHARS: usize = 40;

/// Marker appended to titles cut to `REPORT_TITLE_MAX_CHARS`.
pub const ELLIPSIS: &str = "...";

// ============================================================================
// CELLS AND COLUMNS
// ============================================================================

/// A single exported cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Number(f64),
    Text(String),
}

impl ExportCell {
    /// Text as printed in a report cell.
    pub fn display(&self) -> String {
        match self {
            ExportCell::Number(n) => format_general(*n),
            ExportCell::Text(s) => s.clone(),
        }
    }
}

/// One column of an export schema: header, fixed width and cell renderer.
/// Width units are the target format's own (characters for the workbook,
/// millimetres for the report).
#[derive(Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: f64,
    pub render: fn(&ExportRow) -> ExportCell,
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("width", &self.width)
            .finish()
    }
}

// ============================================================================
// CELL RENDERERS
// ============================================================================

pub fn id_cell(row: &ExportRow) -> ExportCell {
    match &row.id {
        RecordId::Int(n) => ExportCell::Number(*n as f64),
        RecordId::Text(s) => ExportCell::Text(s.clone()),
    }
}

pub fn title_cell(row: &ExportRow) -> ExportCell {
    ExportCell::Text(row.title.clone())
}

pub fn truncated_title_cell(row: &ExportRow) -> ExportCell {
    ExportCell::Text(truncate_title(&row.title, REPORT_TITLE_MAX_CHARS))
}

pub fn category_cell(row: &ExportRow) -> ExportCell {
    ExportCell::Text(row.category.clone())
}

pub fn price_cell(row: &ExportRow) -> ExportCell {
    ExportCell::Text(format_currency(row.price))
}

pub fn rating_cell(row: &ExportRow) -> ExportCell {
    ExportCell::Text(format_rating(row.rating))
}

pub fn rating_count_cell(row: &ExportRow) -> ExportCell {
    ExportCell::Number(f64::from(row.rating_count))
}

pub fn description_cell(row: &ExportRow) -> ExportCell {
    ExportCell::Text(row.description.clone())
}

/// Cut `title` to `max_chars` characters followed by `...`. Titles that fit
/// are returned unchanged.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    match title.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &title[..byte_idx], ELLIPSIS),
        None => title.to_string(),
    }
}

// ============================================================================
// EXPORT TABLE
// ============================================================================

/// Header plus one cell row per input row, in input order.
#[derive(Debug, Clone)]
pub struct ExportTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<ExportCell>>,
}

impl ExportTable {
    pub fn build(rows: &[ExportRow], columns: &[Column]) -> Self {
        let cells = rows
            .iter()
            .map(|row| columns.iter().map(|col| (col.render)(row)).collect())
            .collect();

        ExportTable {
            columns: columns.to_vec(),
            rows: cells,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Record;

    fn row(title: &str) -> ExportRow {
        ExportRow::from(&Record::new(1, title, 10.0, "men").with_rating(4.5, 3))
    }

    #[test]
    fn test_truncate_title_long() {
        let title = "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops";
        let cut = truncate_title(title, 40);
        assert_eq!(cut, "Fjallraven - Foldsack No. 1 Backpack, Fi...");
        assert_eq!(cut.chars().count(), 43);
    }

    #[test]
    fn test_truncate_title_boundary() {
        let exactly_40 = "a".repeat(40);
        assert_eq!(truncate_title(&exactly_40, 40), exactly_40);

        let forty_one = "a".repeat(41);
        assert_eq!(truncate_title(&forty_one, 40), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn test_truncate_title_counts_characters_not_bytes() {
        let title = "é".repeat(45);
        assert_eq!(truncate_title(&title, 40), format!("{}...", "é".repeat(40)));
    }

    #[test]
    fn test_build_keeps_row_order() {
        let rows = vec![row("Mug"), row("Shirt"), row("Cap")];
        let columns = [Column { header: "Title", width: 10.0, render: title_cell }];

        let table = ExportTable::build(&rows, &columns);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[0][0], ExportCell::Text("Mug".to_string()));
        assert_eq!(table.rows[2][0], ExportCell::Text("Cap".to_string()));
    }

    #[test]
    fn test_cell_renderers() {
        let r = row("Shirt");
        assert_eq!(id_cell(&r), ExportCell::Number(1.0));
        assert_eq!(price_cell(&r), ExportCell::Text("$10.00".to_string()));
        assert_eq!(rating_cell(&r), ExportCell::Text("4.5 ⭐".to_string()));
        assert_eq!(rating_count_cell(&r), ExportCell::Number(3.0));
    }

    #[test]
    fn test_string_ids_stay_text() {
        let r = ExportRow::from(&Record::new("sku-1", "Mug", 5.0, "home"));
        assert_eq!(id_cell(&r), ExportCell::Text("sku-1".to_string()));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(ExportCell::Number(20.0).display(), "20");
        assert_eq!(ExportCell::Text("$5.00".to_string()).display(), "$5.00");
    }
}
