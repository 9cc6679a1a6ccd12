// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR generation: plain black-on-white codes and annotated label images.

pub mod encode;
pub mod label;

pub use encode::encode;
pub use label::{
    Border, Dim, FreeText, LabelConfig, LabelElement, LabelRenderer, ListBlock, ListItem, Margin,
    TextAlign,
};

use std::io::Cursor;

use blattwerk_core::error::{BlattwerkError, Result};
use image::{DynamicImage, ImageFormat};

/// Encode any raster image as PNG bytes.
pub(crate) fn png_bytes(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|err| BlattwerkError::Image(format!("PNG encoding failed: {}", err)))?;
    Ok(out.into_inner())
}
