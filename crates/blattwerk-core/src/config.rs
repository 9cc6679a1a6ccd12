// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fill and render configuration.

use serde::{Deserialize, Serialize};

use crate::types::{Orientation, PaperSize, Rgb};

/// Settings for one template-fill pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillConfig {
    /// Placeholder opening delimiter.
    pub prefix: String,
    /// Placeholder closing delimiter.
    pub suffix: String,
    /// Suffix that routes a placeholder to the built-in QR handler.
    pub qrcode_suffix: String,
    /// Watermark stamped over the output page, if any.
    pub watermark: Option<Watermark>,
    /// Output page geometry.
    pub page: PageSetup,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            prefix: "{{".into(),
            suffix: "}}".into(),
            qrcode_suffix: ".qrcode".into(),
            watermark: None,
            page: PageSetup::default(),
        }
    }
}

/// Tiled rotated text stamped across the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Watermark {
    pub text: String,
    /// Opacity in 0.0-1.0. Values at or below zero suppress the watermark.
    pub alpha: f32,
    pub angle_degrees: f32,
    pub color: Rgb,
    pub font_size: f32,
}

impl Watermark {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alpha: 0.1,
            angle_degrees: -45.0,
            color: Rgb::BLACK,
            font_size: 60.0,
        }
    }
}

/// Output page geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSetup {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Uniform page margin in millimetres.
    pub margin_mm: f32,
}

impl PageSetup {
    /// Oriented page dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        self.orientation.apply(self.paper_size.dimensions_mm())
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            orientation: Orientation::Landscape,
            // 0.3 inch, the margin the table renderer was tuned for.
            margin_mm: 7.62,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delimiters() {
        let cfg = FillConfig::default();
        assert_eq!(cfg.prefix, "{{");
        assert_eq!(cfg.suffix, "}}");
        assert_eq!(cfg.qrcode_suffix, ".qrcode");
        assert!(cfg.watermark.is_none());
    }

    #[test]
    fn default_page_is_landscape_letter() {
        let page = PageSetup::default();
        let (w, h) = page.dimensions_mm();
        assert!(w > h);
        assert_eq!(page.paper_size, PaperSize::Letter);
    }

    #[test]
    fn watermark_defaults() {
        let wm = Watermark::new("CONFIDENTIAL");
        assert_eq!(wm.alpha, 0.1);
        assert_eq!(wm.angle_degrees, -45.0);
        assert_eq!(wm.color, Rgb::BLACK);
    }
}
