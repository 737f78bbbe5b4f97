//! FILENAME: app/src/api_types.rs
// PURPOSE: Shared type definitions returned by the presentation commands.
// CONTEXT: All structs use camelCase serialization so the same values can be
// handed to a web front end as JSON.

use engine::{LoadState, Record, SortIndicator, SortKey, SortSpec, ViewComposer};
use export::number_format::{format_currency, format_rating};
use serde::{Deserialize, Serialize};

/// Label of the category option that restricts nothing.
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

/// Listing columns in display order. Every column is sortable.
pub const LISTING_COLUMNS: [SortKey; 5] = [
    SortKey::Id,
    SortKey::Title,
    SortKey::Category,
    SortKey::Price,
    SortKey::Rating,
];

/// One row of the listing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: f64,
    /// Price as shown, e.g. "$109.95".
    pub price_display: String,
    pub rating: f64,
    pub rating_count: u32,
    /// Rating as shown, e.g. "3.9 ⭐ (120 reviews)".
    pub rating_display: String,
    pub description: String,
    pub image: String,
}

impl From<&Record> for OrderRow {
    fn from(record: &Record) -> Self {
        OrderRow {
            id: record.id.to_string(),
            title: record.title.clone(),
            category: record.category.clone(),
            price: record.price,
            price_display: format_currency(record.price),
            rating: record.rating.rate,
            rating_count: record.rating.count,
            rating_display: format!(
                "{} ({} reviews)",
                format_rating(record.rating.rate),
                record.rating.count
            ),
            description: record.description.clone(),
            image: record.image.clone(),
        }
    }
}

/// Load lifecycle as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LoadStatus {
    Loading,
    Ready,
    Error { message: String },
}

impl From<&LoadState> for LoadStatus {
    fn from(state: &LoadState) -> Self {
        match state {
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Ready => LoadStatus::Ready,
            LoadState::Error(message) => LoadStatus::Error {
                message: message.clone(),
            },
        }
    }
}

/// Header of one listing column with its sort icon state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub key: SortKey,
    pub label: String,
    pub indicator: SortIndicator,
}

/// The current listing view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewData {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<OrderRow>,
    pub shown: usize,
    pub total: usize,
    pub filtered: bool,
    pub sort: Option<SortSpec>,
    pub load: LoadStatus,
}

impl From<&ViewComposer> for ViewData {
    fn from(composer: &ViewComposer) -> Self {
        ViewData {
            columns: LISTING_COLUMNS
                .iter()
                .map(|&key| ColumnHeader {
                    key,
                    label: key.header().to_string(),
                    indicator: composer.sort_indicator(key),
                })
                .collect(),
            rows: composer.view().iter().map(|r| OrderRow::from(&**r)).collect(),
            shown: composer.shown_count(),
            total: composer.total_count(),
            filtered: composer.has_active_filters(),
            sort: composer.sort_spec().copied(),
            load: composer.store().state().into(),
        }
    }
}

impl ViewData {
    /// "Showing N of M orders", with " (filtered)" while any filter is active.
    pub fn summary_line(&self) -> String {
        let mut line = format!("Showing {} of {} orders", self.shown, self.total);
        if self.filtered {
            line.push_str(" (filtered)");
        }
        line
    }

    /// Placeholder for states with no rows to show.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.rows.is_empty() {
            return None;
        }
        match &self.load {
            LoadStatus::Loading => Some("Loading orders..."),
            LoadStatus::Error { .. } => Some("No data available"),
            LoadStatus::Ready => Some("No orders found"),
        }
    }
}

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    /// Value stored in the filter criteria.
    pub value: String,
    pub label: String,
}

/// Outcome of an export command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub file_name: String,
    pub rows: usize,
    pub bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(shown: usize, total: usize, filtered: bool) -> ViewData {
        ViewData {
            columns: Vec::new(),
            rows: Vec::new(),
            shown,
            total,
            filtered,
            sort: None,
            load: LoadStatus::Ready,
        }
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(view(20, 20, false).summary_line(), "Showing 20 of 20 orders");
        assert_eq!(view(3, 20, true).summary_line(), "Showing 3 of 20 orders (filtered)");
    }

    #[test]
    fn test_order_row_display_values() {
        let record = Record::new(1, "Backpack", 109.95, "men's clothing").with_rating(3.9, 120);
        let row = OrderRow::from(&record);
        assert_eq!(row.id, "1");
        assert_eq!(row.price_display, "$109.95");
        assert_eq!(row.rating_display, "3.9 ⭐ (120 reviews)");
    }

    #[test]
    fn test_empty_messages() {
        assert_eq!(view(0, 0, false).empty_message(), Some("No orders found"));

        let mut failed = view(0, 0, false);
        failed.load = LoadStatus::Error {
            message: "timeout".to_string(),
        };
        assert_eq!(failed.empty_message(), Some("No data available"));
    }

    #[test]
    fn test_columns_carry_the_sort_indicator() {
        let mut composer = ViewComposer::new();
        composer.set_records(vec![Record::new(1, "Mug", 5.0, "home")]);
        composer.set_sort(SortKey::Rating);
        composer.set_sort(SortKey::Rating);

        let view = ViewData::from(&composer);
        let keys: Vec<SortKey> = view.columns.iter().map(|c| c.key).collect();
        assert_eq!(keys, LISTING_COLUMNS.to_vec());
        assert_eq!(view.columns[4].indicator, SortIndicator::Descending);
        assert!(view.columns[..4]
            .iter()
            .all(|c| c.indicator == SortIndicator::Inactive));

        let json = serde_json::to_value(&view.columns[4]).unwrap();
        assert_eq!(json["label"], "RATING");
        assert_eq!(json["indicator"], "descending");
    }

    #[test]
    fn test_load_status_serialization() {
        let json = serde_json::to_value(LoadStatus::Error {
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "boom");
    }
}
