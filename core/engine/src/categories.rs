//! FILENAME: core/engine/src/categories.rs
//! PURPOSE: Derives the distinct category facet used to populate the category selector.
//! CONTEXT: Always computed over the unfiltered record snapshot so that
//! filtering never removes options from the selector.

use crate::record::Record;
use std::collections::HashSet;

/// Distinct category labels in first-seen order.
pub fn categories<R: AsRef<Record>>(records: &[R]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut result = Vec::new();

    for record in records {
        let category = record.as_ref().category.as_str();
        if seen.insert(category) {
            result.push(category.to_string());
        }
    }

    result
}

/// Display label for a category option: first character upper-cased.
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_first_seen_order() {
        let records = vec![
            Record::new(1, "Shirt", 10.0, "men's clothing"),
            Record::new(2, "Ring", 99.0, "jewelery"),
            Record::new(3, "Jacket", 55.0, "men's clothing"),
            Record::new(4, "SSD", 109.0, "electronics"),
        ];

        assert_eq!(
            categories(&records),
            vec!["men's clothing", "jewelery", "electronics"]
        );
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let records = vec![
            Record::new(1, "A", 1.0, "home"),
            Record::new(2, "B", 1.0, "Home"),
        ];
        assert_eq!(categories(&records).len(), 2);
    }

    #[test]
    fn test_categories_of_empty_snapshot() {
        let records: Vec<Record> = Vec::new();
        assert!(categories(&records).is_empty());
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("electronics"), "Electronics");
        assert_eq!(category_label("men's clothing"), "Men's clothing");
        assert_eq!(category_label(""), "");
    }
}
