//! FILENAME: core/export/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF write error: {0}")]
    Pdf(String),

    #[error("Invalid export file name: {0:?}")]
    InvalidFileName(String),
}
