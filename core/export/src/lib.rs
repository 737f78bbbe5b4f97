//! FILENAME: core/export/src/lib.rs
//! Shopdesk Export Module
//!
//! Produces downloadable artifacts from the current listing view: an XLSX
//! workbook and a paginated PDF report. Both adapters implement
//! [`ExportAdapter`] and share the row projection in [`table`], so they always
//! export the rows they are given, in the order they are given.

mod error;
pub mod number_format;
mod pdf_writer;
pub mod table;
mod xlsx_writer;

pub use error::ExportError;
pub use pdf_writer::{ReportAdapter, ReportLayout, REPORT_COLUMNS};
pub use table::{Column, ExportCell, ExportTable};
pub use xlsx_writer::{SpreadsheetAdapter, SPREADSHEET_COLUMNS, SPREADSHEET_SHEET_NAME};

use chrono::{DateTime, Local, NaiveDate};
use engine::ExportRow;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Report title used when the caller does not supply one.
pub const DEFAULT_REPORT_TITLE: &str = "Orders Report";

/// Prefix of generated export file names.
pub const DEFAULT_FILE_PREFIX: &str = "orders";

// ============================================================================
// FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Spreadsheet,
    Report,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xlsx",
            ExportFormat::Report => "pdf",
        }
    }
}

// ============================================================================
// EXPORT META
// ============================================================================

/// File name, title and generation time of one export.
#[derive(Debug, Clone)]
pub struct ExportMeta {
    /// File name without extension.
    pub base_name: String,
    pub title: String,
    pub generated_at: DateTime<Local>,
}

impl ExportMeta {
    pub fn new(base_name: &str) -> Self {
        ExportMeta {
            base_name: base_name.to_string(),
            title: DEFAULT_REPORT_TITLE.to_string(),
            generated_at: Local::now(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// `<base>.<extension>` for the given format.
    pub fn file_name(&self, format: ExportFormat) -> Result<String, ExportError> {
        let base = self.base_name.trim();
        if base.is_empty() || base.contains(['/', '\\']) || base == "." || base == ".." {
            return Err(ExportError::InvalidFileName(self.base_name.clone()));
        }
        Ok(format!("{}.{}", base, format.extension()))
    }
}

/// Default export base name for a given day: `orders_YYYY-MM-DD`.
pub fn default_base_name(date: NaiveDate) -> String {
    dated_base_name(DEFAULT_FILE_PREFIX, date)
}

/// `<prefix>_YYYY-MM-DD`
pub fn dated_base_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}", prefix, date.format("%Y-%m-%d"))
}

// ============================================================================
// ARTIFACT
// ============================================================================

/// A fully rendered export, held in memory until written.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
    /// Number of data rows (header excluded).
    pub row_count: usize,
}

impl Artifact {
    /// Write the artifact into `dir`. The bytes go to a temporary file in the
    /// same directory which is then renamed over the target, so a failure
    /// never leaves a partial file behind.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let target = dir.join(&self.file_name);

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&self.bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| ExportError::Io(e.error))?;

        log::debug!("wrote {} ({} bytes)", target.display(), self.bytes.len());
        Ok(target)
    }
}

// ============================================================================
// ADAPTER CAPABILITY
// ============================================================================

/// One export format. Implementors provide the column schema and the byte
/// renderer; `produce` projects the rows once and in order for all of them.
pub trait ExportAdapter {
    fn format(&self) -> ExportFormat;

    fn columns(&self) -> &'static [Column];

    fn render(&self, table: &ExportTable, meta: &ExportMeta) -> Result<Vec<u8>, ExportError>;

    fn produce(&self, rows: &[ExportRow], meta: &ExportMeta) -> Result<Artifact, ExportError> {
        let file_name = meta.file_name(self.format())?;
        let table = ExportTable::build(rows, self.columns());
        let bytes = self.render(&table, meta)?;

        log::debug!(
            "rendered {} with {} rows ({} bytes)",
            file_name,
            table.row_count(),
            bytes.len()
        );

        Ok(Artifact {
            file_name,
            format: self.format(),
            bytes,
            row_count: table.row_count(),
        })
    }
}

/// Render `rows` as an XLSX workbook named `<filename>.xlsx`.
pub fn to_spreadsheet(rows: &[ExportRow], filename: &str) -> Result<Artifact, ExportError> {
    SpreadsheetAdapter.produce(rows, &ExportMeta::new(filename))
}

/// Render `rows` as a PDF report named `<filename>.pdf` titled `title`.
pub fn to_report(rows: &[ExportRow], filename: &str, title: &str) -> Result<Artifact, ExportError> {
    ReportAdapter.produce(rows, &ExportMeta::new(filename).with_title(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Record;

    fn rows() -> Vec<ExportRow> {
        vec![
            ExportRow::from(&Record::new(2, "Mug", 5.0, "home").with_rating(3.0, 10)),
            ExportRow::from(&Record::new(1, "Shirt", 10.0, "men").with_rating(4.5, 3)),
        ]
    }

    #[test]
    fn test_file_names_carry_format_extension() {
        let meta = ExportMeta::new("orders_2026-10-16");
        assert_eq!(
            meta.file_name(ExportFormat::Spreadsheet).unwrap(),
            "orders_2026-10-16.xlsx"
        );
        assert_eq!(meta.file_name(ExportFormat::Report).unwrap(), "orders_2026-10-16.pdf");
    }

    #[test]
    fn test_invalid_base_names_are_rejected() {
        for bad in ["", "  ", "../x", "a/b", "..", "c:\\tmp"] {
            let err = ExportMeta::new(bad).file_name(ExportFormat::Report);
            assert!(matches!(err, Err(ExportError::InvalidFileName(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_default_base_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(default_base_name(date), "orders_2026-10-16");
        assert_eq!(dated_base_name("sales", date), "sales_2026-10-16");
    }

    #[test]
    fn test_both_adapters_export_every_row() {
        let rows = rows();
        let sheet = to_spreadsheet(&rows, "orders").unwrap();
        let report = to_report(&rows, "orders", "Orders Report").unwrap();

        assert_eq!(sheet.row_count, rows.len());
        assert_eq!(report.row_count, rows.len());
        assert_eq!(sheet.file_name, "orders.xlsx");
        assert_eq!(report.file_name, "orders.pdf");
    }

    #[test]
    fn test_write_to_dir_leaves_only_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = to_spreadsheet(&rows(), "orders").unwrap();

        let path = artifact.write_to_dir(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("orders.xlsx"));
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_to_dir_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("orders.pdf"), b"stale").unwrap();

        let artifact = to_report(&rows(), "orders", "Orders Report").unwrap();
        let path = artifact.write_to_dir(dir.path()).unwrap();
        assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
    }
}
