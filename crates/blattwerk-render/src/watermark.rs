// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Watermark stamping — tiles rotated text across the page, over the table.
//
// printpdf's op stream exposes no fill-alpha control, so opacity is
// approximated by blending the watermark colour toward the white page
// background before drawing.

use blattwerk_core::config::Watermark;
use blattwerk_core::font::FontManager;
use blattwerk_core::types::Rgb;
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::Pt;
use tracing::debug;

use crate::table::{PageFont, pdf_color};

/// Ops that stamp the watermark grid over a page of the given size.
/// Returns nothing to draw when the text is empty or fully transparent.
pub(crate) fn watermark_ops(
    wm: &Watermark,
    fonts: &FontManager,
    font: &PageFont,
    page_w_pt: f32,
    page_h_pt: f32,
) -> Vec<Op> {
    if wm.text.is_empty() || wm.alpha <= 0.0 {
        return Vec::new();
    }

    let color = wm.color.blend_toward(Rgb::WHITE, 1.0 - wm.alpha.min(1.0));
    let text_w = fonts.measure_text(&wm.text, wm.font_size).max(1.0);
    let x_spacing = text_w * 2.0;
    let y_spacing = wm.font_size * 2.0;

    let mut ops = vec![Op::SaveGraphicsState, Op::StartTextSection];
    ops.push(Op::SetFillColor {
        col: pdf_color(color),
    });
    ops.push(font.set_size_op(wm.font_size));

    // Cover 1.5x the page so rotated instances reach the corners.
    let mut count = 0u32;
    let mut y = 0.0f32;
    while y < page_h_pt * 1.5 {
        let mut x = 0.0f32;
        while x < page_w_pt * 1.5 {
            ops.push(Op::SetTextMatrix {
                matrix: TextMatrix::TranslateRotate(Pt(x), Pt(y), wm.angle_degrees),
            });
            ops.push(font.write_op(wm.text.clone()));
            count += 1;
            x += x_spacing;
        }
        y += y_spacing;
    }

    ops.push(Op::EndTextSection);
    ops.push(Op::RestoreGraphicsState);
    debug!(instances = count, "Watermark stamped");
    ops
}
