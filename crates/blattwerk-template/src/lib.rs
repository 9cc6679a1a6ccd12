// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// blattwerk-template — Template acquisition, placeholder dispatch, and QR
// generation.
//
// The fill engine walks a template's first worksheet, classifies each
// placeholder by suffix against the handler registry, applies the outcomes
// in place, and renders the result through `blattwerk-render`.

pub mod engine;
pub mod handlers;
pub mod placeholder;
pub mod qr;
pub mod source;

pub use engine::TemplateProcessor;
pub use handlers::{HandlerContext, HandlerOutcome, HandlerRegistry, PlaceholderHandler};
pub use qr::{
    Border, Dim, FreeText, LabelConfig, LabelElement, LabelRenderer, ListBlock, ListItem, Margin,
    TextAlign,
};
pub use source::load_template;
