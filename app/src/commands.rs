//! FILENAME: app/src/commands.rs
// PURPOSE: Presentation-boundary commands over the listing state.
// CONTEXT: Every command locks the composer, applies one input change or
// reads the current view, and returns plain data. Errors cross the boundary
// as strings.

use crate::api_types::{CategoryOption, ExportResult, ViewData, ALL_CATEGORIES_LABEL};
use crate::data_source::RecordSource;
use crate::{log_debug, log_enter_info, log_error, log_exit_info, log_info, AppState};
use engine::{category_label, FilterCriteria, SortKey, ViewComposer, ALL_CATEGORIES};
use export::{
    dated_base_name, ExportAdapter, ExportMeta, ReportAdapter, SpreadsheetAdapter,
};
use std::path::Path;

fn view_data(composer: &ViewComposer) -> ViewData {
    ViewData::from(composer)
}

// ============================================================================
// VIEW COMMANDS
// ============================================================================

/// Get the current filtered and sorted view.
pub fn get_view(state: &AppState) -> Result<ViewData, String> {
    let composer = state.composer.lock().map_err(|e| e.to_string())?;
    Ok(view_data(&composer))
}

/// Get the category selector options: "all" first, then every category of
/// the loaded records in first-seen order.
pub fn get_categories(state: &AppState) -> Result<Vec<CategoryOption>, String> {
    let composer = state.composer.lock().map_err(|e| e.to_string())?;

    let mut options = vec![CategoryOption {
        value: ALL_CATEGORIES.to_string(),
        label: ALL_CATEGORIES_LABEL.to_string(),
    }];
    options.extend(composer.categories().iter().map(|c| CategoryOption {
        value: c.clone(),
        label: category_label(c),
    }));

    Ok(options)
}

pub fn has_active_filters(state: &AppState) -> Result<bool, String> {
    let composer = state.composer.lock().map_err(|e| e.to_string())?;
    Ok(composer.has_active_filters())
}

pub fn get_criteria(state: &AppState) -> Result<FilterCriteria, String> {
    let composer = state.composer.lock().map_err(|e| e.to_string())?;
    Ok(composer.criteria().clone())
}

/// Replace the filter criteria as a whole.
pub fn set_criteria(state: &AppState, criteria: FilterCriteria) -> Result<ViewData, String> {
    log_debug!("CMD", "set_criteria {:?}", criteria);
    let mut composer = state.composer.lock().map_err(|e| e.to_string())?;
    if !composer.set_criteria(criteria) {
        log_debug!("CMD", "set_criteria: unchanged");
    }
    Ok(view_data(&composer))
}

/// Header click on the column named `key`.
pub fn set_sort(state: &AppState, key: &str) -> Result<ViewData, String> {
    let key: SortKey = key.parse().map_err(|e: engine::UnknownSortKey| e.to_string())?;
    let mut composer = state.composer.lock().map_err(|e| e.to_string())?;
    let spec = composer.set_sort(key);
    log_debug!("CMD", "set_sort {} {:?}", spec.key, spec.direction);
    Ok(view_data(&composer))
}

/// Reset every filter at once. The sort is kept.
pub fn clear_filters(state: &AppState) -> Result<ViewData, String> {
    let mut composer = state.composer.lock().map_err(|e| e.to_string())?;
    composer.clear_filters();
    log_debug!("CMD", "clear_filters");
    Ok(view_data(&composer))
}

// ============================================================================
// LOADING
// ============================================================================

/// Fetch the records from `source` and replace the snapshot. A failed fetch
/// is not a command error: the store enters its error state and the
/// returned view reports it.
pub async fn load_records<S: RecordSource>(state: &AppState, source: &S) -> Result<ViewData, String> {
    log_enter_info!("DATA", "load_records", "source={}", source.describe());

    {
        let mut composer = state.composer.lock().map_err(|e| e.to_string())?;
        composer.update_store(|store| store.begin_loading());
    }

    // The lock is not held across the fetch.
    let result = source.fetch_records().await;
    if let Err(ref e) = result {
        log_error!("DATA", "fetch failed: {}", e);
    }

    let mut composer = state.composer.lock().map_err(|e| e.to_string())?;
    composer.resolve_load(result);

    log_exit_info!("DATA", "load_records", "records={}", composer.total_count());
    Ok(view_data(&composer))
}

// ============================================================================
// EXPORT COMMANDS
// ============================================================================

/// Write the current view as `<prefix>_<date>.xlsx` into `dir` (the
/// configured output directory when `None`).
pub fn export_spreadsheet(state: &AppState, dir: Option<&Path>) -> Result<ExportResult, String> {
    export_with(state, &SpreadsheetAdapter, dir)
}

/// Write the current view as `<prefix>_<date>.pdf` into `dir` (the
/// configured output directory when `None`).
pub fn export_report(state: &AppState, dir: Option<&Path>) -> Result<ExportResult, String> {
    export_with(state, &ReportAdapter, dir)
}

fn export_with<A: ExportAdapter>(
    state: &AppState,
    adapter: &A,
    dir: Option<&Path>,
) -> Result<ExportResult, String> {
    let format = adapter.format();
    log_enter_info!("EXPORT", "export", "format={:?}", format);

    let (meta, out_dir) = {
        let settings = state.settings.lock().map_err(|e| e.to_string())?;
        let base = dated_base_name(
            &settings.export.file_prefix,
            chrono::Local::now().date_naive(),
        );
        let meta = ExportMeta::new(&base).with_title(&settings.export.report_title);
        let out_dir = dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| settings.export.output_dir());
        (meta, out_dir)
    };

    // Snapshot the rows so rendering happens outside the lock.
    let rows = {
        let composer = state.composer.lock().map_err(|e| e.to_string())?;
        composer.export_rows()
    };

    let artifact = adapter.produce(&rows, &meta).map_err(|e| {
        log_error!("EXPORT", "render failed: {}", e);
        e.to_string()
    })?;
    let path = artifact.write_to_dir(&out_dir).map_err(|e| {
        log_error!("EXPORT", "write failed: {}", e);
        e.to_string()
    })?;

    log_info!("EXPORT", "wrote {} rows to {}", artifact.row_count, path.display());
    log_exit_info!("EXPORT", "export", "file={}", artifact.file_name);

    Ok(ExportResult {
        path: path.display().to_string(),
        file_name: artifact.file_name,
        rows: artifact.row_count,
        bytes: artifact.bytes.len(),
    })
}
