//! FILENAME: core/engine/src/export_row.rs
//! PURPOSE: Flat projection of a record shared by every export format.

use crate::record::{Record, RecordId};
use serde::Serialize;

/// A record flattened for export. Built from the current view at export
/// time and dropped once the artifact is produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub id: RecordId,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub rating: f64,
    pub rating_count: u32,
    pub description: String,
}

impl From<&Record> for ExportRow {
    fn from(record: &Record) -> Self {
        ExportRow {
            id: record.id.clone(),
            title: record.title.clone(),
            price: record.price,
            category: record.category.clone(),
            rating: record.rating.rate,
            rating_count: record.rating.count,
            description: record.description.clone(),
        }
    }
}

/// Project a sequence of records, keeping their order.
pub fn export_rows<R: AsRef<Record>>(records: &[R]) -> Vec<ExportRow> {
    records.iter().map(|r| ExportRow::from(r.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_flattens_rating() {
        let record = Record::new(7, "Backpack", 109.95, "men's clothing")
            .with_description("Fits 15 inch laptops")
            .with_rating(3.9, 120)
            .with_image("https://example.invalid/bag.jpg");

        let row = ExportRow::from(&record);
        assert_eq!(row.id, RecordId::Int(7));
        assert_eq!(row.rating, 3.9);
        assert_eq!(row.rating_count, 120);
        assert_eq!(row.description, "Fits 15 inch laptops");
    }

    #[test]
    fn test_export_rows_keep_order() {
        let records = vec![
            Record::new(2, "Mug", 5.0, "home"),
            Record::new(1, "Shirt", 10.0, "men"),
        ];
        let rows = export_rows(&records);
        assert_eq!(rows[0].title, "Mug");
        assert_eq!(rows[1].title, "Shirt");
    }
}
