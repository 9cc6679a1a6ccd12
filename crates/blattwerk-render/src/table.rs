// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table renderer — lays a `SheetGrid` out as a centred table and draws it
// onto a single PDF page using `printpdf` 0.8 op lists.
//
// Column widths are proportional to content and shrink to the usable page
// width when they overflow. The first row is styled as a header (grey
// background, near-white text); everything is centred and framed with a
// 0.5pt grid, merged spans drawn as one box.

use blattwerk_core::config::{PageSetup, Watermark};
use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::font::FontManager;
use blattwerk_core::types::Rgb;
use printpdf::font::ParsedFont;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::{
    BuiltinFont, FontId, Mm, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage,
    RawImageData, RawImageFormat,
};
use printpdf::xobject::XObjectTransform;
use tracing::{debug, info, instrument};

use crate::grid::{GridCell, SheetGrid, Span};
use crate::watermark;

const BODY_FONT_SIZE: f32 = 8.0;
const LEADING: f32 = 10.0;
const PAD_V: f32 = 2.0;
const PAD_H: f32 = 4.0;
const GRID_LINE_PT: f32 = 0.5;
const MIN_COL_WIDTH: f32 = 18.0;

const HEADER_BG: Rgb = Rgb::new(128, 128, 128);
const HEADER_TEXT: Rgb = Rgb::new(245, 245, 245);

/// The font a page draws with: an embedded custom TTF, or the built-in
/// Helvetica when none was configured.
pub(crate) enum PageFont {
    Builtin(BuiltinFont),
    Embedded(FontId),
}

impl PageFont {
    pub(crate) fn set_size_op(&self, size: f32) -> Op {
        match self {
            Self::Builtin(font) => Op::SetFontSizeBuiltinFont {
                size: Pt(size),
                font: *font,
            },
            Self::Embedded(id) => Op::SetFontSize {
                size: Pt(size),
                font: id.clone(),
            },
        }
    }

    pub(crate) fn write_op(&self, text: String) -> Op {
        match self {
            Self::Builtin(font) => Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(text)],
                font: *font,
            },
            Self::Embedded(id) => Op::WriteText {
                items: vec![TextItem::Text(text)],
                font: id.clone(),
            },
        }
    }
}

pub(crate) fn pdf_color(c: Rgb) -> printpdf::color::Color {
    let (r, g, b) = c.to_unit();
    printpdf::color::Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Laid-out content for one drawable (non-covered) cell.
#[derive(Debug)]
struct LaidCell {
    row: usize,
    col: usize,
    span: Span,
    lines: Vec<String>,
    image: Option<(f32, f32)>,
}

/// Geometry of the whole table.
#[derive(Debug)]
struct TableLayout {
    col_widths: Vec<f32>,
    row_heights: Vec<f32>,
    cells: Vec<LaidCell>,
    width: f32,
}

/// Renders a `SheetGrid` to PDF bytes.
pub struct PdfRenderer<'a> {
    fonts: &'a FontManager,
    page: &'a PageSetup,
    watermark: Option<&'a Watermark>,
    title: String,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(fonts: &'a FontManager, page: &'a PageSetup) -> Self {
        Self {
            fonts,
            page,
            watermark: None,
            title: "Blattwerk Document".into(),
        }
    }

    pub fn with_watermark(mut self, watermark: Option<&'a Watermark>) -> Self {
        self.watermark = watermark;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Draw the grid as one PDF page and return the document bytes.
    #[instrument(skip_all, fields(rows = grid.n_rows(), cols = grid.n_cols))]
    pub fn render(&self, grid: &SheetGrid) -> Result<Vec<u8>> {
        let (page_w_mm, page_h_mm) = self.page.dimensions_mm();
        let page_w_pt = Mm(page_w_mm).into_pt().0;
        let page_h_pt = Mm(page_h_mm).into_pt().0;
        let margin_pt = Mm(self.page.margin_mm).into_pt().0;
        let usable_w = page_w_pt - 2.0 * margin_pt;

        let layout = compute_layout(grid, self.fonts, usable_w);
        info!(
            table_w = layout.width,
            table_h = layout.row_heights.iter().sum::<f32>(),
            "Table layout complete"
        );

        let mut doc = PdfDocument::new(&self.title);
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();

        let font = match self.fonts.font() {
            Some(loaded) => {
                let parsed =
                    ParsedFont::from_bytes(loaded.bytes(), 0, &mut warnings).ok_or_else(|| {
                        BlattwerkError::Font(format!(
                            "font {:?} could not be embedded",
                            loaded.name()
                        ))
                    })?;
                PageFont::Embedded(doc.add_font(&parsed))
            }
            None => PageFont::Builtin(BuiltinFont::Helvetica),
        };

        let mut ops: Vec<Op> = Vec::new();

        // Table origin: horizontally centred, flush to the top margin.
        let x0 = margin_pt + ((usable_w - layout.width) / 2.0).max(0.0);
        let y_top = page_h_pt - margin_pt;

        // Prefix sums for cell corner lookup.
        let col_x = prefix_positions(x0, &layout.col_widths);
        let row_y = prefix_positions(0.0, &layout.row_heights);

        // Header background behind row 0.
        if !layout.row_heights.is_empty() {
            ops.push(Op::SetFillColor {
                col: pdf_color(HEADER_BG),
            });
            ops.push(Op::DrawPolygon {
                polygon: rect_polygon(
                    x0,
                    y_top - layout.row_heights[0],
                    layout.width,
                    layout.row_heights[0],
                    PaintMode::Fill,
                ),
            });
        }

        // Grid lines: one stroked rectangle per drawable cell (spans frame
        // their full area, covered slots draw nothing).
        ops.push(Op::SetOutlineColor {
            col: pdf_color(Rgb::BLACK),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(GRID_LINE_PT),
        });
        for cell in &layout.cells {
            let (cx, cy_top, cw, ch) = cell_box(cell, &col_x, &row_y, y_top);
            ops.push(Op::DrawPolygon {
                polygon: rect_polygon(cx, cy_top - ch, cw, ch, PaintMode::Stroke),
            });
        }

        // Cell content.
        for cell in &layout.cells {
            let (cx, cy_top, cw, ch) = cell_box(cell, &col_x, &row_y, y_top);

            if let Some((img_w, img_h)) = cell.image {
                let GridCell::Image(cell_image) = &grid.rows[cell.row][cell.col] else {
                    continue;
                };
                let scale = (cw / img_w).min(ch / img_h).min(1.0);
                let (draw_w, draw_h) = (img_w * scale, img_h * scale);
                let x = cx + (cw - draw_w) / 2.0;
                let y = cy_top - ch + (ch - draw_h) / 2.0;
                let raw = decode_png(&cell_image.png)?;
                let native_w = raw.width as f32;
                let native_h = raw.height as f32;
                let xobject_id = doc.add_image(&raw);
                ops.push(Op::UseXobject {
                    id: xobject_id,
                    transform: XObjectTransform {
                        translate_x: Some(Pt(x)),
                        translate_y: Some(Pt(y)),
                        scale_x: Some(draw_w / native_w),
                        scale_y: Some(draw_h / native_h),
                        rotate: None,
                        dpi: Some(72.0),
                    },
                });
                continue;
            }

            if cell.lines.is_empty() {
                continue;
            }
            let color = if cell.row == 0 { HEADER_TEXT } else { Rgb::BLACK };
            ops.push(Op::StartTextSection);
            ops.push(Op::SetFillColor {
                col: pdf_color(color),
            });
            ops.push(font.set_size_op(BODY_FONT_SIZE));

            let block_h = cell.lines.len() as f32 * LEADING;
            let block_top = cy_top - (ch - block_h) / 2.0;
            for (i, line) in cell.lines.iter().enumerate() {
                let line_w = self.fonts.measure_text(line, BODY_FONT_SIZE);
                let x = cx + ((cw - line_w) / 2.0).max(PAD_H);
                let baseline = block_top - i as f32 * LEADING - BODY_FONT_SIZE * 0.8;
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Pt(x), Pt(baseline)),
                });
                ops.push(font.write_op(line.clone()));
            }
            ops.push(Op::EndTextSection);
        }

        if let Some(wm) = self.watermark {
            ops.extend(watermark::watermark_ops(
                wm, self.fonts, &font, page_w_pt, page_h_pt,
            ));
        }

        let page = PdfPage::new(Mm(page_w_mm), Mm(page_h_mm), ops);
        doc.with_pages(vec![page]);

        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        debug!(bytes = bytes.len(), warnings = warnings.len(), "PDF saved");
        Ok(bytes)
    }
}

/// Decode PNG bytes into a `printpdf` raw image.
fn decode_png(png: &[u8]) -> Result<RawImage> {
    let dynamic = image::load_from_memory(png)
        .map_err(|err| BlattwerkError::Image(format!("failed to decode cell image: {}", err)))?;
    let width = dynamic.width() as usize;
    let height = dynamic.height() as usize;
    let rgb = dynamic.to_rgb8();
    Ok(RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width,
        height,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    })
}

/// Corner x/y offsets accumulated from widths/heights.
fn prefix_positions(origin: f32, sizes: &[f32]) -> Vec<f32> {
    let mut out = Vec::with_capacity(sizes.len() + 1);
    let mut acc = origin;
    out.push(acc);
    for s in sizes {
        acc += s;
        out.push(acc);
    }
    out
}

/// Top-left corner and size of a laid cell's full span area.
/// `row_y` holds downward offsets from the table top.
fn cell_box(cell: &LaidCell, col_x: &[f32], row_y: &[f32], y_top: f32) -> (f32, f32, f32, f32) {
    let cx = col_x[cell.col];
    let cw = col_x[cell.col + cell.span.col_span] - cx;
    let cy_top = y_top - row_y[cell.row];
    let ch = row_y[cell.row + cell.span.row_span] - row_y[cell.row];
    (cx, cy_top, cw, ch)
}

fn rect_polygon(x: f32, y: f32, w: f32, h: f32, mode: PaintMode) -> Polygon {
    Polygon {
        rings: vec![PolygonRing {
            points: vec![
                LinePoint {
                    p: Point { x: Pt(x), y: Pt(y) },
                    bezier: false,
                },
                LinePoint {
                    p: Point {
                        x: Pt(x + w),
                        y: Pt(y),
                    },
                    bezier: false,
                },
                LinePoint {
                    p: Point {
                        x: Pt(x + w),
                        y: Pt(y + h),
                    },
                    bezier: false,
                },
                LinePoint {
                    p: Point {
                        x: Pt(x),
                        y: Pt(y + h),
                    },
                    bezier: false,
                },
            ],
        }],
        mode,
        winding_order: WindingOrder::EvenOdd,
    }
}

/// Wrap cell text against the active font's metrics.
fn wrap_to_width(text: &str, max_width: f32, fonts: &FontManager, size: f32) -> Vec<String> {
    blattwerk_core::font::wrap_to_width(text, max_width, |s| fonts.measure_text(s, size))
}

/// Compute column widths, row heights, and wrapped cell text.
fn compute_layout(grid: &SheetGrid, fonts: &FontManager, usable_w: f32) -> TableLayout {
    let n_cols = grid.n_cols;
    let mut natural = vec![MIN_COL_WIDTH; n_cols];

    // Natural column widths from unwrapped content; spans spread their
    // demand evenly across the columns they cover.
    for (r, row) in grid.rows.iter().enumerate() {
        for (c, slot) in row.iter().enumerate() {
            let span = grid.span_at(r, c).unwrap_or(Span {
                row: r,
                col: c,
                row_span: 1,
                col_span: 1,
            });
            let want = match slot {
                GridCell::Text(text) => {
                    let widest = text
                        .lines()
                        .map(|l| fonts.measure_text(l, BODY_FONT_SIZE))
                        .fold(0.0f32, f32::max);
                    widest + 2.0 * PAD_H
                }
                GridCell::Image(img) => img.width_pt + 2.0 * PAD_H,
                GridCell::Empty | GridCell::Covered => continue,
            };
            let per_col = want / span.col_span as f32;
            for w in natural.iter_mut().skip(c).take(span.col_span) {
                *w = w.max(per_col);
            }
        }
    }

    let total: f32 = natural.iter().sum();
    let col_widths: Vec<f32> = if total > usable_w && total > 0.0 {
        let f = usable_w / total;
        natural.iter().map(|w| w * f).collect()
    } else {
        natural
    };

    // Wrap text to the final widths and derive row heights.
    let mut row_heights = vec![LEADING + 2.0 * PAD_V; grid.n_rows()];
    let mut cells = Vec::new();
    for (r, row) in grid.rows.iter().enumerate() {
        for (c, slot) in row.iter().enumerate() {
            if matches!(slot, GridCell::Covered) {
                continue;
            }
            let span = grid.span_at(r, c).unwrap_or(Span {
                row: r,
                col: c,
                row_span: 1,
                col_span: 1,
            });
            let avail: f32 =
                col_widths[c..c + span.col_span].iter().sum::<f32>() - 2.0 * PAD_H;

            let (lines, image, want_h) = match slot {
                GridCell::Text(text) => {
                    let lines = wrap_to_width(text, avail, fonts, BODY_FONT_SIZE);
                    let h = lines.len() as f32 * LEADING + 2.0 * PAD_V;
                    (lines, None, h)
                }
                GridCell::Image(img) => {
                    (Vec::new(), Some((img.width_pt, img.height_pt)), img.height_pt + 2.0 * PAD_V)
                }
                GridCell::Empty => (Vec::new(), None, 0.0),
                GridCell::Covered => unreachable!(),
            };

            // A span's height demand lands on its anchor row.
            row_heights[r] = row_heights[r].max(want_h);
            cells.push(LaidCell {
                row: r,
                col: c,
                span,
                lines,
                image,
            });
        }
    }

    let width = col_widths.iter().sum();
    TableLayout {
        col_widths,
        row_heights,
        cells,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SheetGrid;
    use blattwerk_core::config::PageSetup;
    use blattwerk_core::types::{CellCoord, CellImage};
    use std::collections::BTreeMap;

    fn fonts() -> FontManager {
        FontManager::new()
    }

    fn grid_from(cells: &[(&str, &str)]) -> SheetGrid {
        let mut book = umya_spreadsheet::new_file();
        let ws = book.get_sheet_mut(&0).unwrap();
        for (coord, value) in cells {
            ws.get_cell_mut(*coord).set_value(*value);
        }
        SheetGrid::from_worksheet(ws, &BTreeMap::new())
    }

    #[test]
    fn wrap_respects_existing_newlines() {
        let lines = wrap_to_width("a\nb", 1000.0, &fonts(), 8.0);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn wrap_breaks_long_words_per_char() {
        // 4pt per ASCII char at size 8; width 10 fits two chars.
        let lines = wrap_to_width("abcdef", 10.0, &fonts(), 8.0);
        assert_eq!(lines, vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn wrap_greedy_word_fill() {
        let lines = wrap_to_width("aa bb cc", 22.0, &fonts(), 8.0);
        // "aa bb" measures 20pt and fits; adding " cc" would overflow.
        assert_eq!(lines, vec!["aa bb", "cc"]);
    }

    #[test]
    fn columns_shrink_to_usable_width() {
        let long = "x".repeat(400);
        let grid = grid_from(&[("A1", long.as_str()), ("B1", "y")]);
        let layout = compute_layout(&grid, &fonts(), 500.0);
        assert!(layout.width <= 500.0 + 0.01);
        assert_eq!(layout.col_widths.len(), 2);
    }

    #[test]
    fn natural_widths_stay_when_they_fit() {
        let grid = grid_from(&[("A1", "ab"), ("B1", "cd")]);
        let layout = compute_layout(&grid, &fonts(), 700.0);
        assert!(layout.width < 700.0);
        // Both columns bottom out at the minimum width for tiny content.
        assert_eq!(layout.col_widths, vec![MIN_COL_WIDTH, MIN_COL_WIDTH]);
    }

    #[test]
    fn image_row_grows_to_fit() {
        let mut book = umya_spreadsheet::new_file();
        let ws = book.get_sheet_mut(&0).unwrap();
        ws.get_cell_mut("A1").set_value("t");
        let mut images = BTreeMap::new();
        images.insert(
            CellCoord::new(1, 2),
            CellImage {
                png: Vec::new(),
                width_pt: 100.0,
                height_pt: 75.0,
            },
        );
        let grid = SheetGrid::from_worksheet(ws, &images);
        let layout = compute_layout(&grid, &fonts(), 700.0);
        assert!(layout.row_heights[0] >= 75.0 + 2.0 * PAD_V);
        assert!(layout.col_widths[1] >= 100.0 + 2.0 * PAD_H);
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let grid = grid_from(&[("A1", "name"), ("B1", "id"), ("A2", "alice"), ("B2", "7")]);
        let page = PageSetup::default();
        let fm = fonts();
        let bytes = PdfRenderer::new(&fm, &page).render(&grid).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
