// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Annotated QR labels — a white canvas with a QR code pasted at a configured
// position and text drawn around it: free-positioned items and multi-column
// list blocks with margins and borders.
//
// Dimensions are CSS-flavoured: plain pixels, `vw`/`vh` (percent of the
// canvas), and `rem` (multiples of the default font size). The canvas size
// itself may only use px/rem, since viewport units would be circular there.

use std::str::FromStr;

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::font::{FontManager, LoadedFont, wrap_to_width};
use blattwerk_core::types::Rgb;
use image::{DynamicImage, GrayImage, Rgb as ImgRgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use rusttype::{Font, Scale, point};
use tracing::{debug, warn};

use super::encode;

/// A length in label space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dim {
    Px(f32),
    /// Percent of the canvas width.
    Vw(f32),
    /// Percent of the canvas height.
    Vh(f32),
    /// Multiple of the default font size.
    Rem(f32),
}

/// Canvas context that viewport and rem units resolve against.
#[derive(Debug, Clone, Copy)]
pub struct UnitEnv {
    pub canvas_w: f32,
    pub canvas_h: f32,
    pub rem: f32,
}

impl Dim {
    pub const ZERO: Dim = Dim::Px(0.0);

    /// Resolve to pixels. Negative results clamp to zero.
    pub fn resolve(&self, env: &UnitEnv) -> f32 {
        let px = match self {
            Dim::Px(v) => *v,
            Dim::Vw(v) => v / 100.0 * env.canvas_w,
            Dim::Vh(v) => v / 100.0 * env.canvas_h,
            Dim::Rem(v) => v * env.rem,
        };
        px.max(0.0)
    }

    /// Resolve before the canvas exists. Viewport units are rejected.
    fn resolve_pre_canvas(&self, rem: f32) -> Result<f32> {
        match self {
            Dim::Px(v) => Ok(v.max(0.0)),
            Dim::Rem(v) => Ok((v * rem).max(0.0)),
            Dim::Vw(_) | Dim::Vh(_) => Err(BlattwerkError::Layout(
                "canvas size cannot use viewport units".into(),
            )),
        }
    }
}

impl From<f32> for Dim {
    fn from(v: f32) -> Self {
        Dim::Px(v)
    }
}

impl FromStr for Dim {
    type Err = BlattwerkError;

    /// Accepts `"12"`, `"10vw"`, `"5vh"`, `"1.5rem"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let number = |raw: &str| {
            raw.trim().parse::<f32>().map_err(|_| {
                BlattwerkError::Layout(format!("invalid dimension {:?}", s))
            })
        };
        if let Some(raw) = s.strip_suffix("rem") {
            Ok(Dim::Rem(number(raw)?))
        } else if let Some(raw) = s.strip_suffix("vw") {
            Ok(Dim::Vw(number(raw)?))
        } else if let Some(raw) = s.strip_suffix("vh") {
            Ok(Dim::Vh(number(raw)?))
        } else {
            Ok(Dim::Px(number(s)?))
        }
    }
}

/// Per-side spacing around a list item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: Dim,
    pub right: Dim,
    pub bottom: Dim,
    pub left: Dim,
}

impl Margin {
    pub fn uniform(d: Dim) -> Self {
        Self {
            top: d,
            right: d,
            bottom: d,
            left: d,
        }
    }

    /// CSS two-value form: vertical then horizontal.
    pub fn symmetric(vertical: Dim, horizontal: Dim) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    fn resolve(&self, env: &UnitEnv) -> ResolvedMargin {
        ResolvedMargin {
            top: self.top.resolve(env),
            right: self.right.resolve(env),
            bottom: self.bottom.resolve(env),
            left: self.left.resolve(env),
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(Dim::Rem(0.5))
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedMargin {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

/// Horizontal alignment of text within its available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

impl TextAlign {
    fn offset(&self, avail: f32, line_w: f32) -> f32 {
        match self {
            TextAlign::Start => 0.0,
            TextAlign::Center => ((avail - line_w) / 2.0).max(0.0),
            TextAlign::End => (avail - line_w).max(0.0),
        }
    }
}

/// A list-block border: colour plus stroke thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub color: Rgb,
    pub thickness: Dim,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            thickness: Dim::Px(2.0),
        }
    }
}

/// A text item drawn at an absolute canvas position.
#[derive(Debug, Clone)]
pub struct FreeText {
    pub text: String,
    pub position: (Dim, Dim),
    pub font_size: Option<Dim>,
    pub color: Option<Rgb>,
    /// Wrap width; `None` disables wrapping.
    pub wrap_width: Option<Dim>,
    pub align: TextAlign,
}

impl FreeText {
    pub fn new(text: impl Into<String>, x: Dim, y: Dim) -> Self {
        Self {
            text: text.into(),
            position: (x, y),
            font_size: None,
            color: None,
            wrap_width: None,
            align: TextAlign::Start,
        }
    }
}

/// One entry in a list block. Position is computed from the column grid.
#[derive(Debug, Clone)]
pub struct ListItem {
    pub text: String,
    pub font_size: Option<Dim>,
    pub color: Option<Rgb>,
    pub wrap: bool,
    pub align: TextAlign,
    /// Overrides the block margin for this item.
    pub margin: Option<Margin>,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: None,
            color: None,
            wrap: false,
            align: TextAlign::Start,
            margin: None,
        }
    }
}

/// A block of items flowing left-to-right then top-to-bottom across a
/// column grid.
#[derive(Debug, Clone)]
pub struct ListBlock {
    pub items: Vec<ListItem>,
    pub start_position: (Dim, Dim),
    pub width: Dim,
    /// Fixed height; `None` sizes the block to its rows.
    pub height: Option<Dim>,
    pub columns: u32,
    pub margin: Margin,
    pub outer_border: Option<Border>,
    pub inner_border: Option<Border>,
}

impl ListBlock {
    pub fn new(items: Vec<ListItem>, x: Dim, y: Dim) -> Self {
        Self {
            items,
            start_position: (x, y),
            width: Dim::Vw(100.0),
            height: None,
            columns: 1,
            margin: Margin::default(),
            outer_border: None,
            inner_border: None,
        }
    }
}

/// One drawable element of a label.
#[derive(Debug, Clone)]
pub enum LabelElement {
    Text(FreeText),
    List(ListBlock),
}

/// Canvas, QR placement, and text defaults for a label.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Canvas size; px/rem only.
    pub background_size: (Dim, Dim),
    pub background_color: Rgb,
    pub qr_size: (Dim, Dim),
    pub qr_position: (Dim, Dim),
    /// The rem base; also the font size items fall back to.
    pub default_font_size: f32,
    pub default_color: Rgb,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            background_size: (Dim::Px(350.0), Dim::Px(180.0)),
            background_color: Rgb::WHITE,
            qr_size: (Dim::Px(100.0), Dim::Px(100.0)),
            qr_position: (Dim::Px(20.0), Dim::Px(40.0)),
            default_font_size: 12.0,
            default_color: Rgb::BLACK,
        }
    }
}

/// Draws annotated QR labels. Requires a custom font: glyphs are rasterised
/// straight onto the canvas.
pub struct LabelRenderer<'a> {
    fonts: &'a FontManager,
    config: LabelConfig,
}

impl<'a> LabelRenderer<'a> {
    pub fn new(fonts: &'a FontManager) -> Self {
        Self {
            fonts,
            config: LabelConfig::default(),
        }
    }

    pub fn with_config(fonts: &'a FontManager, config: LabelConfig) -> Self {
        Self { fonts, config }
    }

    /// Render the label and return PNG bytes.
    ///
    /// A failed text element is skipped with a warning; a QR encoding
    /// failure is an error.
    pub fn render(&self, qr_data: &str, elements: &[LabelElement]) -> Result<Vec<u8>> {
        let loaded = self.fonts.font().ok_or_else(|| {
            BlattwerkError::Font("QR label rendering requires a custom font".into())
        })?;

        let rem = self.config.default_font_size;
        let canvas_w = self.config.background_size.0.resolve_pre_canvas(rem)?;
        let canvas_h = self.config.background_size.1.resolve_pre_canvas(rem)?;
        let (w, h) = (
            canvas_w.round().max(1.0) as u32,
            canvas_h.round().max(1.0) as u32,
        );
        let env = UnitEnv {
            canvas_w: w as f32,
            canvas_h: h as f32,
            rem,
        };

        let mut canvas = RgbImage::from_pixel(w, h, to_px(self.config.background_color));

        let qr_w = self.config.qr_size.0.resolve(&env).round() as u32;
        let qr_h = self.config.qr_size.1.resolve(&env).round() as u32;
        let qr = encode::encode_sized(qr_data, qr_w, qr_h)?;
        paste_gray(
            &mut canvas,
            &qr,
            self.config.qr_position.0.resolve(&env).round() as i64,
            self.config.qr_position.1.resolve(&env).round() as i64,
        );

        for (idx, element) in elements.iter().enumerate() {
            let drawn = match element {
                LabelElement::Text(item) => self.draw_free_text(&mut canvas, loaded, &env, item),
                LabelElement::List(block) => self.draw_list(&mut canvas, loaded, &env, block),
            };
            if let Err(err) = drawn {
                warn!(index = idx, error = %err, "Label element skipped");
            }
        }

        debug!(width = w, height = h, elements = elements.len(), "Label rendered");
        super::png_bytes(&DynamicImage::ImageRgb8(canvas))
    }

    fn draw_free_text(
        &self,
        canvas: &mut RgbImage,
        loaded: &LoadedFont,
        env: &UnitEnv,
        item: &FreeText,
    ) -> Result<()> {
        let size = item
            .font_size
            .map(|d| d.resolve(env))
            .unwrap_or(env.rem);
        if size <= 0.0 {
            return Ok(());
        }
        let color = item.color.unwrap_or(self.config.default_color);
        let x = item.position.0.resolve(env);
        let y = item.position.1.resolve(env);

        let (lines, avail) = match item.wrap_width {
            Some(wrap) => {
                let avail = wrap.resolve(env);
                (
                    wrap_to_width(&item.text, avail, |s| loaded.measure(s, size)),
                    avail,
                )
            }
            None => (
                item.text.split('\n').map(str::to_string).collect(),
                0.0,
            ),
        };

        let line_h = line_height(loaded.glyphs(), size);
        for (i, line) in lines.iter().enumerate() {
            let offset = if avail > 0.0 {
                item.align.offset(avail, loaded.measure(line, size))
            } else {
                0.0
            };
            draw_text(
                canvas,
                loaded.glyphs(),
                size,
                x + offset,
                y + i as f32 * line_h,
                color,
                line,
            );
        }
        Ok(())
    }

    fn draw_list(
        &self,
        canvas: &mut RgbImage,
        loaded: &LoadedFont,
        env: &UnitEnv,
        block: &ListBlock,
    ) -> Result<()> {
        let layout = layout_list(
            block,
            env,
            |size| line_height(loaded.glyphs(), size),
            |s, size| loaded.measure(s, size),
        );

        let x0 = block.start_position.0.resolve(env);
        let y0 = block.start_position.1.resolve(env);
        let columns = block.columns.max(1) as usize;

        let mut y = y0;
        for (r, chunk) in layout.items.chunks(columns).enumerate() {
            for (c, laid) in chunk.iter().enumerate() {
                let cell_x = x0 + c as f32 * layout.col_w;
                let content_w =
                    (layout.col_w - laid.margin.left - laid.margin.right).max(0.0);
                let color = laid.color;
                let line_h = line_height(loaded.glyphs(), laid.size);
                for (i, line) in laid.lines.iter().enumerate() {
                    let offset = laid
                        .align
                        .offset(content_w, loaded.measure(line, laid.size));
                    draw_text(
                        canvas,
                        loaded.glyphs(),
                        laid.size,
                        cell_x + laid.margin.left + offset,
                        y + laid.margin.top + i as f32 * line_h,
                        color,
                        line,
                    );
                }
            }
            y += layout.row_heights[r];
        }

        if let Some(border) = &block.inner_border {
            let t = border.thickness.resolve(env).max(1.0);
            let color = to_px(border.color);
            // Column separators.
            for c in 1..columns {
                let x = x0 + c as f32 * layout.col_w - t / 2.0;
                fill_rect(canvas, x, y0, t, layout.height, color);
            }
            // Row separators.
            let mut boundary = y0;
            for row_h in &layout.row_heights[..layout.row_heights.len().saturating_sub(1)] {
                boundary += row_h;
                fill_rect(canvas, x0, boundary - t / 2.0, layout.width, t, color);
            }
        }

        if let Some(border) = &block.outer_border {
            let t = border.thickness.resolve(env).max(1.0);
            let color = to_px(border.color);
            fill_rect(canvas, x0 - t, y0 - t, layout.width + 2.0 * t, t, color);
            fill_rect(canvas, x0 - t, y0 + layout.height, layout.width + 2.0 * t, t, color);
            fill_rect(canvas, x0 - t, y0, t, layout.height, color);
            fill_rect(canvas, x0 + layout.width, y0, t, layout.height, color);
        }

        Ok(())
    }
}

/// Measured geometry of a list block.
struct ListLayout {
    col_w: f32,
    row_heights: Vec<f32>,
    items: Vec<LaidListItem>,
    width: f32,
    height: f32,
}

/// A list item with its wrapping and spacing resolved.
struct LaidListItem {
    lines: Vec<String>,
    size: f32,
    color: Rgb,
    align: TextAlign,
    margin: ResolvedMargin,
    height: f32,
}

/// Lay a list block out against closures for line height and text width, so
/// the geometry is testable without a font file.
fn layout_list(
    block: &ListBlock,
    env: &UnitEnv,
    line_height: impl Fn(f32) -> f32,
    measure: impl Fn(&str, f32) -> f32,
) -> ListLayout {
    let width = block.width.resolve(env);
    let columns = block.columns.max(1) as usize;
    let col_w = width / columns as f32;

    let items: Vec<LaidListItem> = block
        .items
        .iter()
        .map(|item| {
            let margin = item.margin.unwrap_or(block.margin).resolve(env);
            let size = item
                .font_size
                .map(|d| d.resolve(env))
                .unwrap_or(env.rem);
            let content_w = (col_w - margin.left - margin.right).max(0.0);
            let lines = if item.wrap {
                wrap_to_width(&item.text, content_w, |s| measure(s, size))
            } else {
                item.text.split('\n').map(str::to_string).collect()
            };
            let height = lines.len() as f32 * line_height(size) + margin.top + margin.bottom;
            LaidListItem {
                lines,
                size,
                color: item.color.unwrap_or(Rgb::BLACK),
                align: item.align,
                margin,
                height,
            }
        })
        .collect();

    let row_heights: Vec<f32> = items
        .chunks(columns)
        .map(|chunk| chunk.iter().map(|i| i.height).fold(0.0f32, f32::max))
        .collect();
    let natural_h: f32 = row_heights.iter().sum();
    let height = block
        .height
        .map(|d| d.resolve(env))
        .unwrap_or(natural_h);

    ListLayout {
        col_w,
        row_heights,
        items,
        width,
        height,
    }
}

fn to_px(c: Rgb) -> ImgRgb<u8> {
    ImgRgb([c.r, c.g, c.b])
}

/// Full line advance for the font at `size`.
fn line_height(font: &Font<'static>, size: f32) -> f32 {
    let vm = font.v_metrics(Scale::uniform(size));
    vm.ascent - vm.descent + vm.line_gap
}

/// Rasterise `text` with its top-left corner at (x, y), alpha-blending
/// glyph coverage over the existing pixels.
fn draw_text(
    canvas: &mut RgbImage,
    font: &Font<'static>,
    size: f32,
    x: f32,
    y: f32,
    color: Rgb,
    text: &str,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    for glyph in font.layout(text, scale, point(x, y + v_metrics.ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, v| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 {
                return;
            }
            let (px, py) = (px as u32, py as u32);
            if px >= canvas.width() || py >= canvas.height() || v <= 0.0 {
                return;
            }
            let dst = canvas.get_pixel_mut(px, py);
            let inv = 1.0 - v;
            dst.0[0] = (color.r as f32 * v + dst.0[0] as f32 * inv) as u8;
            dst.0[1] = (color.g as f32 * v + dst.0[1] as f32 * inv) as u8;
            dst.0[2] = (color.b as f32 * v + dst.0[2] as f32 * inv) as u8;
        });
    }
}

/// Paste a grayscale QR image onto the canvas, clipping at the edges.
fn paste_gray(canvas: &mut RgbImage, qr: &GrayImage, x: i64, y: i64) {
    for (qx, qy, px) in qr.enumerate_pixels() {
        let cx = x + qx as i64;
        let cy = y + qy as i64;
        if cx < 0 || cy < 0 || cx >= canvas.width() as i64 || cy >= canvas.height() as i64 {
            continue;
        }
        let v = px.0[0];
        canvas.put_pixel(cx as u32, cy as u32, ImgRgb([v, v, v]));
    }
}

/// Fill an axis-aligned rectangle, clipping to the canvas.
fn fill_rect(canvas: &mut RgbImage, x: f32, y: f32, w: f32, h: f32, color: ImgRgb<u8>) {
    let w = w.round();
    let h = h.round();
    if w < 1.0 || h < 1.0 {
        return;
    }
    let rect = Rect::at(x.round() as i32, y.round() as i32).of_size(w as u32, h as u32);
    draw_filled_rect_mut(canvas, rect, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV: UnitEnv = UnitEnv {
        canvas_w: 400.0,
        canvas_h: 200.0,
        rem: 10.0,
    };

    // Fixed-advance fake metrics so layout is predictable without a font.
    fn fake_line_height(size: f32) -> f32 {
        size * 1.2
    }

    fn fake_measure(s: &str, size: f32) -> f32 {
        s.chars().count() as f32 * size * 0.5
    }

    #[test]
    fn dim_parsing() {
        assert_eq!("12".parse::<Dim>().unwrap(), Dim::Px(12.0));
        assert_eq!("10vw".parse::<Dim>().unwrap(), Dim::Vw(10.0));
        assert_eq!("5vh".parse::<Dim>().unwrap(), Dim::Vh(5.0));
        assert_eq!("1.5rem".parse::<Dim>().unwrap(), Dim::Rem(1.5));
        assert!(" 2rem ".parse::<Dim>().is_ok());
        assert!("wide".parse::<Dim>().is_err());
        assert!("12px".parse::<Dim>().is_err());
    }

    #[test]
    fn dim_resolution() {
        assert_eq!(Dim::Px(40.0).resolve(&ENV), 40.0);
        assert_eq!(Dim::Vw(50.0).resolve(&ENV), 200.0);
        assert_eq!(Dim::Vh(50.0).resolve(&ENV), 100.0);
        assert_eq!(Dim::Rem(2.0).resolve(&ENV), 20.0);
        // Negative lengths clamp.
        assert_eq!(Dim::Px(-3.0).resolve(&ENV), 0.0);
    }

    #[test]
    fn canvas_size_rejects_viewport_units() {
        assert!(Dim::Vw(100.0).resolve_pre_canvas(10.0).is_err());
        assert_eq!(Dim::Rem(2.0).resolve_pre_canvas(10.0).unwrap(), 20.0);
    }

    #[test]
    fn align_offsets() {
        assert_eq!(TextAlign::Start.offset(100.0, 40.0), 0.0);
        assert_eq!(TextAlign::Center.offset(100.0, 40.0), 30.0);
        assert_eq!(TextAlign::End.offset(100.0, 40.0), 60.0);
        // Overlong lines stay pinned to the start edge.
        assert_eq!(TextAlign::End.offset(100.0, 140.0), 0.0);
    }

    #[test]
    fn list_rows_take_the_tallest_item() {
        let mut big = ListItem::new("big");
        big.font_size = Some(Dim::Px(20.0));
        let block = ListBlock {
            columns: 2,
            margin: Margin::uniform(Dim::ZERO),
            width: Dim::Px(200.0),
            ..ListBlock::new(vec![ListItem::new("a"), big, ListItem::new("b")], Dim::ZERO, Dim::ZERO)
        };

        let layout = layout_list(&block, &ENV, fake_line_height, fake_measure);
        assert_eq!(layout.col_w, 100.0);
        // Row 0: default 10px item vs 20px item -> 24; row 1: 12.
        assert_eq!(layout.row_heights, vec![24.0, 12.0]);
        assert_eq!(layout.height, 36.0);
    }

    #[test]
    fn more_columns_than_items_is_one_row() {
        let block = ListBlock {
            columns: 4,
            margin: Margin::uniform(Dim::ZERO),
            width: Dim::Px(400.0),
            ..ListBlock::new(vec![ListItem::new("only")], Dim::ZERO, Dim::ZERO)
        };
        let layout = layout_list(&block, &ENV, fake_line_height, fake_measure);
        assert_eq!(layout.row_heights.len(), 1);
        assert_eq!(layout.col_w, 100.0);
    }

    #[test]
    fn wrapped_items_wrap_to_the_column_content_width() {
        let mut item = ListItem::new("aaaa bbbb");
        item.wrap = true;
        let block = ListBlock {
            columns: 1,
            margin: Margin::symmetric(Dim::ZERO, Dim::Px(5.0)),
            width: Dim::Px(40.0),
            ..ListBlock::new(vec![item], Dim::ZERO, Dim::ZERO)
        };
        // Content width 30; "aaaa bbbb" measures 45 at size 10 and splits.
        let layout = layout_list(&block, &ENV, fake_line_height, fake_measure);
        assert_eq!(layout.items[0].lines, vec!["aaaa", "bbbb"]);
        assert_eq!(layout.items[0].height, 24.0);
    }

    #[test]
    fn fixed_height_overrides_natural() {
        let block = ListBlock {
            height: Some(Dim::Px(99.0)),
            margin: Margin::uniform(Dim::ZERO),
            width: Dim::Px(100.0),
            ..ListBlock::new(vec![ListItem::new("x")], Dim::ZERO, Dim::ZERO)
        };
        let layout = layout_list(&block, &ENV, fake_line_height, fake_measure);
        assert_eq!(layout.height, 99.0);
    }

    #[test]
    fn item_margin_overrides_block_margin() {
        let mut item = ListItem::new("x");
        item.margin = Some(Margin::uniform(Dim::Px(1.0)));
        let block = ListBlock {
            margin: Margin::uniform(Dim::Px(10.0)),
            width: Dim::Px(100.0),
            ..ListBlock::new(vec![item, ListItem::new("y")], Dim::ZERO, Dim::ZERO)
        };
        let layout = layout_list(&block, &ENV, fake_line_height, fake_measure);
        assert_eq!(layout.items[0].height, 14.0);
        assert_eq!(layout.items[1].height, 32.0);
    }

    #[test]
    fn rendering_without_a_custom_font_is_an_error() {
        let fonts = FontManager::new();
        let renderer = LabelRenderer::new(&fonts);
        let err = renderer.render("data", &[]).unwrap_err();
        assert!(matches!(err, BlattwerkError::Font(_)));
    }

    #[test]
    fn paste_clips_at_the_canvas_edge() {
        let mut canvas = RgbImage::from_pixel(10, 10, ImgRgb([255, 255, 255]));
        let qr = GrayImage::from_pixel(6, 6, image::Luma([0]));
        paste_gray(&mut canvas, &qr, 7, -2);
        assert_eq!(canvas.get_pixel(8, 0).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(5, 5).0, [255, 255, 255]);
    }

    #[test]
    fn fill_rect_ignores_degenerate_sizes() {
        let mut canvas = RgbImage::from_pixel(4, 4, ImgRgb([255, 255, 255]));
        fill_rect(&mut canvas, 0.0, 0.0, 0.4, 10.0, ImgRgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255]);
    }
}
