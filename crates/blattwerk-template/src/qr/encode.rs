// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain QR encoding — data string to a black-on-white PNG. Error correction
// level L, 10px modules, 4-module quiet zone.

use blattwerk_core::error::{BlattwerkError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

const MODULE_PX: u32 = 10;

/// Encode `data` as a QR code and return PNG bytes.
pub fn encode(data: &str) -> Result<Vec<u8>> {
    let img = render(data, MODULE_PX)?;
    super::png_bytes(&DynamicImage::ImageLuma8(img))
}

/// Encode `data` and resize the result to exactly `width` x `height` pixels,
/// for pasting onto a label canvas.
pub(crate) fn encode_sized(data: &str, width: u32, height: u32) -> Result<GrayImage> {
    let img = render(data, 3)?;
    let width = width.max(1);
    let height = height.max(1);
    Ok(image::imageops::resize(&img, width, height, FilterType::Nearest))
}

fn render(data: &str, module_px: u32) -> Result<GrayImage> {
    if data.is_empty() {
        return Err(BlattwerkError::QrEncode("cannot encode empty data".into()));
    }
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
        .map_err(|err| BlattwerkError::QrEncode(err.to_string()))?;
    Ok(code
        .render::<Luma<u8>>()
        .module_dimensions(module_px, module_px)
        .quiet_zone(true)
        .build())
}
