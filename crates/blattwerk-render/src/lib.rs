// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// blattwerk-render — Renders a filled worksheet as a single PDF page.
//
// A worksheet is reduced to a `SheetGrid` (text cells, merged spans, anchored
// images), laid out as a centred table, drawn with `printpdf` 0.8's
// data-oriented op lists, and optionally stamped with a tiled text watermark.

pub mod grid;
pub mod table;
pub mod watermark;

pub use grid::{GridCell, SheetGrid, Span};
pub use table::PdfRenderer;
