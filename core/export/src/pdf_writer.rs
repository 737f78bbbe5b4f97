//! FILENAME: core/export/src/pdf_writer.rs
//! PURPOSE: Printable PDF report of the listing view.
//! CONTEXT: The report is laid out in two steps. `ReportLayout::build` paginates
//! the export table into plain strings; `render_layout` draws that model with
//! printpdf. The layout model carries every decision about what ends up on
//! which page, so it can be checked without parsing PDF output.

use crate::table::{
    category_cell, id_cell, price_cell, rating_cell, rating_count_cell, truncated_title_cell,
    Column, ExportTable,
};
use crate::{ExportAdapter, ExportError, ExportFormat, ExportMeta};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};

/// Report schema. Widths are in millimetres.
pub static REPORT_COLUMNS: [Column; 6] = [
    Column { header: "ID", width: 20.0, render: id_cell },
    Column { header: "Title", width: 60.0, render: truncated_title_cell },
    Column { header: "Category", width: 30.0, render: category_cell },
    Column { header: "Price", width: 25.0, render: price_cell },
    Column { header: "Rating", width: 25.0, render: rating_cell },
    Column { header: "Reviews", width: 25.0, render: rating_count_cell },
];

// ============================================================================
// PAGE GEOMETRY (A4 portrait, millimetres from the bottom-left corner)
// ============================================================================

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const ROW_HEIGHT: f32 = 7.0;
/// Distance from a row's text baseline down to its bottom edge.
const BASELINE_OFFSET: f32 = 2.0;
const CELL_PADDING: f32 = 1.5;

const TITLE_Y: f32 = PAGE_HEIGHT - 15.0;
const TIMESTAMP_Y: f32 = PAGE_HEIGHT - 22.0;
/// Header baseline on the first page, below the title block.
const FIRST_TABLE_TOP: f32 = PAGE_HEIGHT - 28.0;
/// Header baseline on continuation pages.
const CONTINUATION_TABLE_TOP: f32 = PAGE_HEIGHT - MARGIN;

const TITLE_FONT_SIZE: f32 = 18.0;
const TIMESTAMP_FONT_SIZE: f32 = 10.0;
const TABLE_FONT_SIZE: f32 = 8.0;

const HEADER_FILL_RGB: (u8, u8, u8) = (59, 130, 246);
const HEADER_TEXT_RGB: (u8, u8, u8) = (255, 255, 255);
const ALTERNATE_ROW_RGB: (u8, u8, u8) = (249, 250, 251);
const TIMESTAMP_RGB: (u8, u8, u8) = (100, 100, 100);
const BODY_RGB: (u8, u8, u8) = (0, 0, 0);

const LAYER_NAME: &str = "Layer 1";

/// Band colour behind the data row at `row_index` (counted over the whole
/// table): every second row is shaded.
pub fn row_band(row_index: usize) -> Option<(u8, u8, u8)> {
    (row_index % 2 == 1).then_some(ALTERNATE_ROW_RGB)
}

/// Data rows that fit below a header drawn at `table_top`.
fn rows_per_page(table_top: f32) -> usize {
    let lines = ((table_top - MARGIN) / ROW_HEIGHT) as usize;
    lines.saturating_sub(1).max(1)
}

// ============================================================================
// LAYOUT MODEL
// ============================================================================

/// The report as strings, split into pages. The header is repeated at the
/// top of every page when drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub title: String,
    pub timestamp_line: String,
    pub headers: Vec<&'static str>,
    pub widths: Vec<f32>,
    pub pages: Vec<Vec<Vec<String>>>,
}

impl ReportLayout {
    pub fn build(table: &ExportTable, meta: &ExportMeta) -> Self {
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|cells| cells.iter().map(|c| pdf_safe_text(&c.display())).collect())
            .collect();

        let first_capacity = rows_per_page(FIRST_TABLE_TOP);
        let continuation_capacity = rows_per_page(CONTINUATION_TABLE_TOP);

        let mut pages = Vec::new();
        let mut remaining = rows.as_slice();
        let mut capacity = first_capacity;
        loop {
            let take = remaining.len().min(capacity);
            pages.push(remaining[..take].to_vec());
            remaining = &remaining[take..];
            if remaining.is_empty() {
                break;
            }
            capacity = continuation_capacity;
        }

        ReportLayout {
            title: pdf_safe_text(&meta.title),
            timestamp_line: format!(
                "Exported on: {}",
                meta.generated_at.format("%Y-%m-%d %H:%M")
            ),
            headers: table.headers(),
            widths: table.columns.iter().map(|c| c.width as f32).collect(),
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// All rows in drawing order.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.pages.iter().flatten()
    }
}

/// Map text onto what the built-in Helvetica face can show. The star glyph
/// becomes `*`; anything else outside printable ASCII becomes `?`.
pub fn pdf_safe_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '⭐' => '*',
            ' '..='~' => c,
            _ => '?',
        })
        .collect()
}

// ============================================================================
// RENDERING
// ============================================================================

/// Writes the listing as a paginated PDF table with a title and timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAdapter;

impl ExportAdapter for ReportAdapter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Report
    }

    fn columns(&self) -> &'static [Column] {
        &REPORT_COLUMNS
    }

    fn render(&self, table: &ExportTable, meta: &ExportMeta) -> Result<Vec<u8>, ExportError> {
        let layout = ReportLayout::build(table, meta);
        log::debug!(
            "report layout: {} rows on {} pages",
            layout.row_count(),
            layout.page_count()
        );
        render_layout(&layout)
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn pdf_err<E: std::fmt::Debug>(e: E) -> ExportError {
    ExportError::Pdf(format!("{:?}", e))
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

pub fn render_layout(layout: &ReportLayout) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(layout.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);

    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
    };

    let table_width: f32 = layout.widths.iter().sum();
    let mut row_index = 0;

    for (index, rows) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
            doc.get_page(page).get_layer(layer)
        };

        let table_top = if index == 0 {
            draw_title_block(&layer, layout, &fonts);
            FIRST_TABLE_TOP
        } else {
            CONTINUATION_TABLE_TOP
        };

        draw_band(&layer, HEADER_FILL_RGB, table_top, table_width);
        layer.set_fill_color(rgb(HEADER_TEXT_RGB));
        draw_row(&layer, &layout.widths, layout.headers.iter().copied(), table_top, &fonts.bold);

        for (i, row) in rows.iter().enumerate() {
            let y = table_top - ROW_HEIGHT * (i as f32 + 1.0);
            if let Some(fill) = row_band(row_index) {
                draw_band(&layer, fill, y, table_width);
            }
            layer.set_fill_color(rgb(BODY_RGB));
            draw_row(&layer, &layout.widths, row.iter().map(String::as_str), y, &fonts.regular);
            row_index += 1;
        }
    }

    doc.save_to_bytes().map_err(pdf_err)
}

fn draw_title_block(layer: &PdfLayerReference, layout: &ReportLayout, fonts: &Fonts) {
    layer.set_fill_color(rgb(BODY_RGB));
    layer.use_text(
        layout.title.as_str(),
        TITLE_FONT_SIZE,
        Mm(MARGIN),
        Mm(TITLE_Y),
        &fonts.bold,
    );

    layer.set_fill_color(rgb(TIMESTAMP_RGB));
    layer.use_text(
        layout.timestamp_line.as_str(),
        TIMESTAMP_FONT_SIZE,
        Mm(MARGIN),
        Mm(TIMESTAMP_Y),
        &fonts.regular,
    );
}

/// Filled rectangle behind the row whose baseline is at `y`.
fn draw_band(layer: &PdfLayerReference, fill: (u8, u8, u8), y: f32, width: f32) {
    let bottom = y - BASELINE_OFFSET;
    layer.set_fill_color(rgb(fill));
    layer.add_rect(Rect::new(
        Mm(MARGIN),
        Mm(bottom),
        Mm(MARGIN + width),
        Mm(bottom + ROW_HEIGHT),
    ));
}

fn draw_row<'a>(
    layer: &PdfLayerReference,
    widths: &[f32],
    cells: impl Iterator<Item = &'a str>,
    y: f32,
    font: &IndirectFontRef,
) {
    let mut x = MARGIN;
    for (cell, width) in cells.zip(widths) {
        if !cell.is_empty() {
            layer.use_text(cell, TABLE_FONT_SIZE, Mm(x + CELL_PADDING), Mm(y), font);
        }
        x += width;
    }
}
