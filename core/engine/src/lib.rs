//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the listing data engine.
//! CONTEXT: Re-exports public types and modules for use by the export
//! adapters and the application shell.

pub mod categories;
pub mod export_row;
pub mod filter;
pub mod record;
pub mod sort;
pub mod store;
pub mod view;

// Re-export commonly used types at the crate root
pub use categories::{categories, category_label};
pub use export_row::{export_rows, ExportRow};
pub use filter::{
    filter_records, matches_category, matches_price, matches_rating, matches_search,
    parse_bound, CategoryFilter, FilterCriteria, ALL_CATEGORIES,
};
pub use record::{Rating, Record, RecordId};
pub use sort::{sort_records, SortDirection, SortKey, SortSpec, UnknownSortKey};
pub use store::{LoadState, RecordStore};
pub use view::{SortIndicator, ViewComposer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_filters_then_sorts() {
        let records = vec![
            Record::new(1, "Shirt", 10.0, "men").with_rating(4.5, 3),
            Record::new(2, "Mug", 5.0, "home").with_rating(3.0, 10),
            Record::new(3, "Cap", 8.0, "men").with_rating(4.1, 7),
        ];

        let filtered = filter_records(&records, &FilterCriteria::new().with_category("men"));
        let sorted = sort_records(filtered, Some(&SortSpec::ascending(SortKey::Price)));

        let titles: Vec<&str> = sorted.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Cap", "Shirt"]);
    }

    #[test]
    fn integration_test_listing_workflow() {
        let mut composer = ViewComposer::new();
        composer.resolve_load::<String>(Ok(vec![
            Record::new(1, "Shirt", 10.0, "men").with_rating(4.5, 3),
            Record::new(2, "Mug", 5.0, "home").with_rating(3.0, 10),
        ]));
        assert!(composer.store().is_ready());
        assert_eq!(composer.categories(), ["men".to_string(), "home".to_string()]);

        composer.set_sort(SortKey::Price);
        composer.set_criteria(FilterCriteria::new().with_price_range("abc", ""));
        assert_eq!(composer.shown_count(), 2);

        let rows = composer.export_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Mug");
        assert_eq!(rows[1].title, "Shirt");
    }
}
