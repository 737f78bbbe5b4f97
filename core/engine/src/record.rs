//! FILENAME: core/engine/src/record.rs
//! PURPOSE: Defines the catalog record, the unit of data flowing through the engine.
//! CONTEXT: Records are decoded once from the data source and never mutated.
//! The engine only filters and reorders shared references to them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// RECORD ID
// ============================================================================

/// Stable identifier of a record. The catalog uses integers, but string ids
/// are accepted so that other sources can be plugged in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordId::Int(n) => Some(*n),
            RecordId::Text(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// Integer ids compare numerically and sort before string ids.
/// String ids compare ordinally.
impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RecordId::Int(a), RecordId::Int(b)) => a.cmp(b),
            (RecordId::Int(_), RecordId::Text(_)) => Ordering::Less,
            (RecordId::Text(_), RecordId::Int(_)) => Ordering::Greater,
            (RecordId::Text(a), RecordId::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// RATING
// ============================================================================

/// Aggregate customer rating: average `rate` in [0, 5] over `count` reviews.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Rating {
    pub fn new(rate: f64, count: u32) -> Self {
        Rating { rate, count }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A single catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Opaque image reference, carried through untouched.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, title: &str, price: f64, category: &str) -> Self {
        Record {
            id: id.into(),
            title: title.to_string(),
            price,
            category: category.to_string(),
            description: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_rating(mut self, rate: f64, count: u32) -> Self {
        self.rating = Rating::new(rate, count);
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = image.to_string();
        self
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}
