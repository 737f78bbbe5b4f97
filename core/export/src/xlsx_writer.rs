//! FILENAME: core/export/src/xlsx_writer.rs

use crate::table::{
    category_cell, description_cell, id_cell, price_cell, rating_cell, rating_count_cell,
    title_cell, Column, ExportCell, ExportTable,
};
use crate::{ExportAdapter, ExportError, ExportFormat, ExportMeta};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

/// The workbook holds a single sheet with this name.
pub const SPREADSHEET_SHEET_NAME: &str = "Sheet1";

/// Workbook schema. Widths are in Excel character units.
pub static SPREADSHEET_COLUMNS: [Column; 7] = [
    Column { header: "ID", width: 10.0, render: id_cell },
    Column { header: "Title", width: 40.0, render: title_cell },
    Column { header: "Category", width: 20.0, render: category_cell },
    Column { header: "Price", width: 12.0, render: price_cell },
    Column { header: "Rating", width: 12.0, render: rating_cell },
    Column { header: "Rating Count", width: 15.0, render: rating_count_cell },
    Column { header: "Description", width: 50.0, render: description_cell },
];

/// Writes the listing as an XLSX workbook, one row per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetAdapter;

impl ExportAdapter for SpreadsheetAdapter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Spreadsheet
    }

    fn columns(&self) -> &'static [Column] {
        &SPREADSHEET_COLUMNS
    }

    fn render(&self, table: &ExportTable, _meta: &ExportMeta) -> Result<Vec<u8>, ExportError> {
        let mut xlsx = XlsxWorkbook::new();
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(SPREADSHEET_SHEET_NAME)?;

        for (col, column) in table.columns.iter().enumerate() {
            worksheet.set_column_width(col as u16, column.width)?;
        }

        // Header row
        let header_format = Format::new().set_bold();
        for (col, header) in table.headers().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        // Data rows start right below the header
        for (i, cells) in table.rows.iter().enumerate() {
            let row = (i + 1) as u32;
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    ExportCell::Number(n) => {
                        worksheet.write_number(row, col as u16, *n)?;
                    }
                    ExportCell::Text(s) => {
                        worksheet.write_string(row, col as u16, s)?;
                    }
                }
            }
        }

        let bytes = xlsx.save_to_buffer()?;
        Ok(bytes)
    }
}
