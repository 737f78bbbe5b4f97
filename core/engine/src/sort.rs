//! FILENAME: core/engine/src/sort.rs
//! PURPOSE: Single-key, stable, toggleable sort for the listing view.
//! CONTEXT: Descending order reverses the comparator result, never the
//! sorted sequence, so records with equal keys always keep their input order.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SORT KEY
// ============================================================================

/// Column the listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    Title,
    Category,
    Price,
    /// Sorts on `rating.rate`; the review count is ignored.
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Id,
        SortKey::Title,
        SortKey::Category,
        SortKey::Price,
        SortKey::Rating,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::Category => "category",
            SortKey::Price => "price",
            SortKey::Rating => "rating",
        }
    }

    /// Column header shown on the listing table.
    pub fn header(&self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Title => "TITLE",
            SortKey::Category => "CATEGORY",
            SortKey::Price => "PRICE",
            SortKey::Rating => "RATING",
        }
    }

    /// Ascending comparison of two records on this key.
    /// Numeric keys use the IEEE total order so a NaN cannot break the sort.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::Rating => a.rating.rate.total_cmp(&b.rating.rate),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a sort key name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort key '{}' (expected one of: id, title, category, price, rating)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

// ============================================================================
// SORT SPEC
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The active sort: one key and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        SortSpec {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        SortSpec {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Header-click state machine: clicking the active key flips its
    /// direction, clicking any other key starts ascending on that key.
    pub fn toggle(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.flipped(),
            },
            _ => SortSpec::ascending(key),
        }
    }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        self.direction.apply(self.key.compare(a, b))
    }
}

// ============================================================================
// SORT ENGINE
// ============================================================================

/// Stable sort of `records` by `spec`. Without a spec the input is returned
/// unchanged, preserving arrival order.
pub fn sort_records<R>(mut records: Vec<R>, spec: Option<&SortSpec>) -> Vec<R>
where
    R: AsRef<Record>,
{
    if let Some(spec) = spec {
        // slice::sort_by is stable
        records.sort_by(|a, b| spec.compare(a.as_ref(), b.as_ref()));
    }
    records
}
