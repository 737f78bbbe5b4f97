//! FILENAME: core/engine/src/view.rs
//! PURPOSE: Reactive glue between the record store, the filters and the sort.
//! CONTEXT: The composer owns the three inputs of the listing view and keeps
//! `view = sort(filter(records, criteria), spec)` up to date. Every setter
//! compares the new input with the current one and recomputes only on an
//! actual change; recomputation is a pure function of the inputs, so doing
//! it twice yields the same view.

use crate::categories::categories;
use crate::export_row::{export_rows, ExportRow};
use crate::filter::{filter_records, FilterCriteria};
use crate::record::Record;
use crate::sort::{sort_records, SortDirection, SortKey, SortSpec};
use serde::{Deserialize, Serialize};
use crate::store::RecordStore;
use std::fmt;
use std::sync::Arc;

/// Header state of one sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    Inactive,
    Ascending,
    Descending,
}

pub struct ViewComposer {
    store: RecordStore,
    criteria: FilterCriteria,
    sort: Option<SortSpec>,
    /// Cached filtered + sorted view.
    view: Vec<Arc<Record>>,
    /// Cached category facet over the unfiltered snapshot.
    categories: Vec<String>,
    /// Number of view recomputations so far.
    revision: u64,
}

impl ViewComposer {
    pub fn new() -> Self {
        Self::with_store(RecordStore::new())
    }

    pub fn with_store(store: RecordStore) -> Self {
        let mut composer = ViewComposer {
            store,
            criteria: FilterCriteria::default(),
            sort: None,
            view: Vec::new(),
            categories: Vec::new(),
            revision: 0,
        };
        composer.refresh_categories();
        composer.recompute();
        composer
    }

    // ------------------------------------------------------------------------
    // Record store input
    // ------------------------------------------------------------------------

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Mutate the store; derived values are refreshed if the snapshot changed.
    pub fn update_store<F>(&mut self, f: F)
    where
        F: FnOnce(&mut RecordStore),
    {
        let before = self.store.generation();
        f(&mut self.store);
        if self.store.generation() != before {
            self.refresh_categories();
            self.recompute();
        }
    }

    /// Replace the snapshot with freshly fetched records.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.update_store(|store| store.set_records(records));
    }

    /// Apply the outcome of a data-source fetch.
    pub fn resolve_load<E: fmt::Display>(&mut self, result: Result<Vec<Record>, E>) {
        self.update_store(|store| store.resolve(result));
    }

    // ------------------------------------------------------------------------
    // Filter input
    // ------------------------------------------------------------------------

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the criteria as a whole. Returns whether the view changed inputs.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        self.criteria = criteria;
        self.recompute();
        true
    }

    /// Reset every filter to "no restriction" in one step. The sort is kept.
    pub fn clear_filters(&mut self) -> bool {
        self.set_criteria(FilterCriteria::default())
    }

    pub fn has_active_filters(&self) -> bool {
        !self.criteria.is_default()
    }

    // ------------------------------------------------------------------------
    // Sort input
    // ------------------------------------------------------------------------

    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Header click on `key`: flips the direction of the active key or starts
    /// ascending on a new one.
    pub fn set_sort(&mut self, key: SortKey) -> SortSpec {
        let spec = SortSpec::toggle(self.sort, key);
        self.set_sort_spec(Some(spec));
        spec
    }

    /// Replace the sort spec as a whole (`None` restores arrival order).
    pub fn set_sort_spec(&mut self, spec: Option<SortSpec>) -> bool {
        if spec == self.sort {
            return false;
        }
        self.sort = spec;
        self.recompute();
        true
    }

    pub fn sort_indicator(&self, key: SortKey) -> SortIndicator {
        match self.sort {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Inactive,
        }
    }

    // ------------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------------

    /// The current filtered and sorted records.
    pub fn view(&self) -> &[Arc<Record>] {
        &self.view
    }

    /// Distinct categories of the whole snapshot, independent of filters.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of records in the snapshot.
    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    /// Number of records in the view.
    pub fn shown_count(&self) -> usize {
        self.view.len()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Flatten the current view for an export adapter.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        export_rows(&self.view)
    }

    /// Recompute the view from the current inputs, from scratch.
    pub fn compute_view(&self) -> Vec<Arc<Record>> {
        let filtered = filter_records(self.store.snapshot(), &self.criteria);
        sort_records(filtered, self.sort.as_ref())
    }

    fn recompute(&mut self) {
        self.view = self.compute_view();
        self.revision += 1;
        log::trace!(
            "view recomputed rev={} shown={} total={}",
            self.revision,
            self.view.len(),
            self.store.len()
        );
    }

    fn refresh_categories(&mut self) {
        self.categories = categories(self.store.snapshot());
    }
}

impl Default for ViewComposer {
    fn default() -> Self {
        Self::new()
    }
}
