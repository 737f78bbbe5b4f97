//! FILENAME: core/engine/src/filter.rs
//! PURPOSE: Multi-criteria record filter behind the listing screen.
//! CONTEXT: FilterCriteria is a bag of independent predicates. Each predicate
//! is a pure function of (record, criteria) and a record passes only when
//! every predicate holds. Numeric bounds are kept as the raw user input and
//! parsed on use: a bound that does not parse is treated as absent.

use crate::record::Record;
use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY FILTER
// ============================================================================

/// Sentinel selection value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Category restriction: either everything, or one exact category label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(category: &str) -> Self {
        CategoryFilter::Only(category.to_string())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Only(category) => category,
        }
    }
}

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// The full set of listing filters. The default value restricts nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Free text matched against id, title, category and description.
    pub search_text: String,
    pub category: CategoryFilter,
    /// Inclusive lower price bound, as typed.
    pub price_min: String,
    /// Inclusive upper price bound, as typed.
    pub price_max: String,
    /// Inclusive lower bound on `rating.rate`, as selected.
    pub min_rating: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: &str) -> Self {
        self.search_text = text.to_string();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price_range(mut self, min: &str, max: &str) -> Self {
        self.price_min = min.to_string();
        self.price_max = max.to_string();
        self
    }

    pub fn with_min_rating(mut self, rating: &str) -> Self {
        self.min_rating = rating.to_string();
        self
    }

    /// True when this value equals the all-"no restriction" default.
    pub fn is_default(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Whether `record` satisfies every active predicate.
    pub fn matches(&self, record: &Record) -> bool {
        let search = matches_search(record, &self.search_text);
        let category = matches_category(record, &self.category);
        let price = matches_price(record, &self.price_min, &self.price_max);
        let rating = matches_rating(record, &self.min_rating);

        search && category && price && rating
    }
}

// ============================================================================
// BOUND PARSING
// ============================================================================

/// Parse a numeric bound typed by the user.
/// Empty, unparsable or non-finite input yields `None` (no bound).
pub fn parse_bound(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Case-insensitive substring search over id, title, category and description.
/// An empty needle matches everything.
pub fn matches_search(record: &Record, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();

    record.id.to_string().to_lowercase().contains(&needle)
        || record.title.to_lowercase().contains(&needle)
        || record.category.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
}

/// Exact category match unless the filter is `All`.
pub fn matches_category(record: &Record, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Only(wanted) => record.category == *wanted,
    }
}

/// Inclusive price range; each side is ignored when it does not parse.
pub fn matches_price(record: &Record, min: &str, max: &str) -> bool {
    let above_min = parse_bound(min).map_or(true, |min| record.price >= min);
    let below_max = parse_bound(max).map_or(true, |max| record.price <= max);
    above_min && below_max
}

/// Inclusive lower bound on the average rating.
pub fn matches_rating(record: &Record, min_rating: &str) -> bool {
    parse_bound(min_rating).map_or(true, |min| record.rating.rate >= min)
}

// ============================================================================
// FILTER ENGINE
// ============================================================================

/// Keep the records satisfying `criteria`, preserving input order.
///
/// Works over anything that can be viewed as a `Record` (owned records,
/// references, or `Arc<Record>` handles) so callers never copy records.
pub fn filter_records<R>(records: &[R], criteria: &FilterCriteria) -> Vec<R>
where
    R: AsRef<Record> + Clone,
{
    records
        .iter()
        .filter(|r| criteria.matches(r.as_ref()))
        .cloned()
        .collect()
}
