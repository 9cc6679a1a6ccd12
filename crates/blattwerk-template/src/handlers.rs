// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Handler registry — placeholder suffixes map to handlers that produce the
// cell's replacement content. Registration order decides match precedence.

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::types::{CellCoord, CellImage};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{qr, source};

/// Display size of handler-produced images, in px (72dpi points).
pub const IMAGE_DISPLAY_PX: f32 = 100.0;

/// What a handler decided to put in the cell.
#[derive(Debug)]
pub enum HandlerOutcome {
    /// Replace the cell text.
    Text(String),
    /// Clear the cell and anchor an image there.
    Image(CellImage),
    /// Clear the cell.
    Clear,
}

/// Everything a handler sees about the placeholder it is resolving.
#[derive(Debug)]
pub struct HandlerContext<'a> {
    pub coord: CellCoord,
    /// The field looked up in the data mapping.
    pub field: &'a str,
    /// The full placeholder body with the handler suffix stripped.
    pub body: &'a str,
    pub data: &'a Map<String, Value>,
}

/// Resolves one placeholder class to cell content.
pub trait PlaceholderHandler {
    fn handle(&self, ctx: &HandlerContext<'_>) -> Result<HandlerOutcome>;
}

impl<F> PlaceholderHandler for F
where
    F: Fn(&HandlerContext<'_>) -> Result<HandlerOutcome>,
{
    fn handle(&self, ctx: &HandlerContext<'_>) -> Result<HandlerOutcome> {
        self(ctx)
    }
}

/// Suffix-keyed handler table. First registered suffix that matches a cell
/// wins; re-registering a suffix replaces its handler in place.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: Vec<(String, Box<dyn PlaceholderHandler>)>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        suffix: impl Into<String>,
        handler: impl PlaceholderHandler + 'static,
    ) {
        let suffix = suffix.into();
        debug!(suffix, "Handler registered");
        match self.entries.iter_mut().find(|(s, _)| *s == suffix) {
            Some(entry) => entry.1 = Box::new(handler),
            None => self.entries.push((suffix, Box::new(handler))),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn PlaceholderHandler)> {
        self.entries
            .iter()
            .map(|(s, h)| (s.as_str(), h.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(s, _)| s))
            .finish()
    }
}

/// The display string of a data value; `None` for null.
pub(crate) fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Built-in QR handler: encodes the field's value and anchors the code at
/// the cell, displayed at 100x100.
pub fn qr_handler(ctx: &HandlerContext<'_>) -> Result<HandlerOutcome> {
    let value = ctx
        .data
        .get(ctx.field)
        .and_then(display_value)
        .ok_or_else(|| BlattwerkError::MissingField(ctx.field.to_string()))?;
    let png = qr::encode(&value)?;
    Ok(HandlerOutcome::Image(CellImage {
        png,
        width_pt: IMAGE_DISPLAY_PX,
        height_pt: IMAGE_DISPLAY_PX,
    }))
}

/// Opt-in image handler: the field's value is a local path or HTTP URL to a
/// raster image, displayed at up to 100px wide with aspect preserved.
pub fn image_handler(ctx: &HandlerContext<'_>) -> Result<HandlerOutcome> {
    let location = ctx
        .data
        .get(ctx.field)
        .and_then(display_value)
        .ok_or_else(|| BlattwerkError::MissingField(ctx.field.to_string()))?;

    let bytes = if source::is_remote(&location) {
        source::fetch_url(&location)?
    } else {
        std::fs::read(&location).map_err(|err| {
            BlattwerkError::Image(format!("cannot read {}: {}", location, err))
        })?
    };
    let decoded = image::load_from_memory(&bytes)
        .map_err(|err| BlattwerkError::Image(format!("cannot decode {}: {}", location, err)))?;

    let (w, h) = (decoded.width() as f32, decoded.height() as f32);
    let display_w = w.min(IMAGE_DISPLAY_PX);
    let display_h = display_w * (h / w);
    let png = qr::png_bytes(&decoded)?;
    Ok(HandlerOutcome::Image(CellImage {
        png,
        width_pt: display_w,
        height_pt: display_h,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn ctx<'a>(field: &'a str, data: &'a Map<String, Value>) -> HandlerContext<'a> {
        HandlerContext {
            coord: CellCoord::new(1, 1),
            field,
            body: field,
            data,
        }
    }

    #[test]
    fn qr_handler_produces_a_square_image() {
        let data = data(&[("serial", json!("SN-1234"))]);
        let outcome = qr_handler(&ctx("serial", &data)).unwrap();
        let HandlerOutcome::Image(img) = outcome else {
            panic!("expected an image outcome");
        };
        assert_eq!(img.width_pt, 100.0);
        assert_eq!(img.height_pt, 100.0);
        assert!(image::load_from_memory(&img.png).is_ok());
    }

    #[test]
    fn qr_handler_stringifies_numbers() {
        let data = data(&[("id", json!(15573))]);
        assert!(qr_handler(&ctx("id", &data)).is_ok());
    }

    #[test]
    fn qr_handler_errors_on_missing_or_null_field() {
        let data = data(&[("other", json!("x")), ("gone", Value::Null)]);
        for field in ["missing", "gone"] {
            let err = qr_handler(&ctx(field, &data)).unwrap_err();
            assert!(matches!(err, BlattwerkError::MissingField(_)));
        }
    }

    #[test]
    fn image_handler_scales_down_to_max_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let img = image::RgbImage::from_pixel(400, 200, image::Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let data = data(&[("photo", json!(path.to_str().unwrap()))]);
        let outcome = image_handler(&ctx("photo", &data)).unwrap();
        let HandlerOutcome::Image(cell_img) = outcome else {
            panic!("expected an image outcome");
        };
        assert_eq!(cell_img.width_pt, 100.0);
        assert_eq!(cell_img.height_pt, 50.0);
    }

    #[test]
    fn image_handler_keeps_small_images_at_native_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        image::RgbImage::from_pixel(40, 60, image::Rgb([0, 0, 0]))
            .save(&path)
            .unwrap();

        let data = data(&[("icon", json!(path.to_str().unwrap()))]);
        let HandlerOutcome::Image(cell_img) = image_handler(&ctx("icon", &data)).unwrap() else {
            panic!("expected an image outcome");
        };
        assert_eq!(cell_img.width_pt, 40.0);
        assert_eq!(cell_img.height_pt, 60.0);
    }

    #[test]
    fn registry_replaces_in_place_and_keeps_order() {
        let mut registry = HandlerRegistry::new();
        registry.register(".qrcode", qr_handler);
        registry.register(".image", image_handler);
        registry.register(".qrcode", image_handler);

        let suffixes: Vec<&str> = registry.iter().map(|(s, _)| s).collect();
        assert_eq!(suffixes, vec![".qrcode", ".image"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn display_value_forms() {
        assert_eq!(display_value(&json!("a")), Some("a".into()));
        assert_eq!(display_value(&json!(3)), Some("3".into()));
        assert_eq!(display_value(&json!(true)), Some("true".into()));
        assert_eq!(display_value(&Value::Null), None);
    }
}
