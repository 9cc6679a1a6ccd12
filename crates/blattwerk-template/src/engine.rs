// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fill engine — walks the first worksheet of a template, resolves each
// placeholder through the handler table or plain substitution, applies the
// outcomes in place, and hands the filled sheet to the PDF renderer.

use std::collections::BTreeMap;

use blattwerk_core::config::FillConfig;
use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::font::FontManager;
use blattwerk_core::types::{CellCoord, CellImage, column_letters};
use blattwerk_render::{PdfRenderer, SheetGrid};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};
use umya_spreadsheet::{CellRawValue, Worksheet};

use crate::handlers::{
    self, HandlerContext, HandlerOutcome, HandlerRegistry, PlaceholderHandler,
};
use crate::placeholder::{self, Placeholder};
use crate::source;

// Anchoring an image resizes its cell: spreadsheet column width is in
// character units (roughly 7px each), row height in points (0.75pt per px).
const COL_WIDTH_PER_PX: f64 = 1.0 / 7.0;
const ROW_HEIGHT_PER_PX: f64 = 0.75;

/// Fills spreadsheet templates and renders them to PDF.
pub struct TemplateProcessor {
    fonts: FontManager,
    config: FillConfig,
    handlers: HandlerRegistry,
}

impl TemplateProcessor {
    /// A processor with the built-in QR handler registered under the
    /// configured `qrcode_suffix`.
    pub fn new(fonts: FontManager, config: FillConfig) -> Self {
        let mut handlers = HandlerRegistry::new();
        handlers.register(config.qrcode_suffix.clone(), handlers::qr_handler);
        Self {
            fonts,
            config,
            handlers,
        }
    }

    /// A processor with an empty handler table; every suffix must be
    /// registered explicitly.
    pub fn without_default_handlers(fonts: FontManager, config: FillConfig) -> Self {
        Self {
            fonts,
            config,
            handlers: HandlerRegistry::new(),
        }
    }

    /// Register a handler for a placeholder suffix such as ".image".
    pub fn register_handler(
        &mut self,
        suffix: impl Into<String>,
        handler: impl PlaceholderHandler + 'static,
    ) {
        self.handlers.register(suffix, handler);
    }

    pub fn fonts(&self) -> &FontManager {
        &self.fonts
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Fill the template at `location` (path or URL) with `data` and render
    /// the first worksheet as a single-page PDF.
    #[instrument(skip(self, data), fields(fields = data.len()))]
    pub fn process(&self, location: &str, data: &Map<String, Value>) -> Result<Vec<u8>> {
        let mut book = source::load_template(location)?;
        let ws = book
            .get_sheet_mut(&0)
            .ok_or_else(|| BlattwerkError::Workbook("template has no worksheets".into()))?;

        let images = self.fill_sheet(ws, data)?;
        let grid = SheetGrid::from_worksheet(ws, &images);

        let bytes = PdfRenderer::new(&self.fonts, &self.config.page)
            .with_watermark(self.config.watermark.as_ref())
            .render(&grid)?;
        info!(bytes = bytes.len(), "Template processed");
        Ok(bytes)
    }

    /// Resolve every placeholder in the sheet. Returns the images anchored
    /// by handlers, keyed by cell.
    pub(crate) fn fill_sheet(
        &self,
        ws: &mut Worksheet,
        data: &Map<String, Value>,
    ) -> Result<BTreeMap<CellCoord, CellImage>> {
        // Snapshot the string cells first; outcomes mutate the sheet.
        let mut targets: Vec<(CellCoord, String)> = ws
            .get_cell_collection()
            .iter()
            .filter_map(|cell| {
                if !is_string_value(cell.get_cell_value().get_raw_value()) {
                    return None;
                }
                let text = cell.get_value();
                if text.is_empty() {
                    return None;
                }
                let coord = cell.get_coordinate();
                Some((
                    CellCoord::new(*coord.get_row_num(), *coord.get_col_num()),
                    text.to_string(),
                ))
            })
            .collect();
        targets.sort_by_key(|(coord, _)| *coord);

        let mut images = BTreeMap::new();
        for (coord, text) in targets {
            if let Some((placeholder, handler)) = self.match_handler(&text) {
                let ctx = HandlerContext {
                    coord,
                    field: &placeholder.field,
                    body: &placeholder.body,
                    data,
                };
                let outcome = handler.handle(&ctx).map_err(|err| match err {
                    err @ BlattwerkError::Handler { .. } => err,
                    err => BlattwerkError::Handler {
                        placeholder: text.clone(),
                        detail: err.to_string(),
                    },
                })?;
                debug!(cell = %coord, body = placeholder.body, "Handler outcome applied");
                self.apply_outcome(ws, coord, outcome, &mut images);
                continue;
            }

            // Plain substitution: only a cell that is exactly one
            // placeholder for a present key changes.
            for (key, value) in data {
                if placeholder::matches_plain(&text, &self.config.prefix, &self.config.suffix, key)
                {
                    let replacement = handlers::display_value(value).unwrap_or_default();
                    ws.get_cell_mut((coord.col, coord.row)).set_value(replacement);
                    break;
                }
            }
        }
        Ok(images)
    }

    fn match_handler(&self, text: &str) -> Option<(Placeholder, &dyn PlaceholderHandler)> {
        self.handlers.iter().find_map(|(suffix, handler)| {
            placeholder::match_suffixed(text, &self.config.prefix, &self.config.suffix, suffix)
                .map(|p| (p, handler))
        })
    }

    fn apply_outcome(
        &self,
        ws: &mut Worksheet,
        coord: CellCoord,
        outcome: HandlerOutcome,
        images: &mut BTreeMap<CellCoord, CellImage>,
    ) {
        match outcome {
            HandlerOutcome::Text(text) => {
                ws.get_cell_mut((coord.col, coord.row)).set_value(text);
            }
            HandlerOutcome::Clear => {
                ws.get_cell_mut((coord.col, coord.row)).set_blank();
            }
            HandlerOutcome::Image(img) => {
                ws.get_cell_mut((coord.col, coord.row)).set_blank();
                ws.get_column_dimension_mut(&column_letters(coord.col))
                    .set_width(img.width_pt as f64 * COL_WIDTH_PER_PX);
                ws.get_row_dimension_mut(&coord.row)
                    .set_height(img.height_pt as f64 * ROW_HEIGHT_PER_PX);
                images.insert(coord, img);
            }
        }
    }
}

/// Numbers and booleans are rendered via their display string and never
/// treated as placeholders; only genuinely textual cells are scanned.
fn is_string_value(raw: &CellRawValue) -> bool {
    match raw {
        CellRawValue::String(_) | CellRawValue::RichText(_) => true,
        CellRawValue::Lazy(s) => s.as_ref().parse::<f64>().is_err(),
        _ => false,
    }
}
