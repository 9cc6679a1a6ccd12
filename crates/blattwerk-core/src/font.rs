// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font management — loads a custom TTF once and serves it to both the QR
// label renderer (glyph rasterisation) and the PDF renderer (embedding and
// text measurement).

use std::path::Path;

use rusttype::{Font, Scale, point};
use tracing::info;

use crate::error::{BlattwerkError, Result};

const DEFAULT_FONT_NAME: &str = "CustomFont";

/// A parsed TTF kept in memory for the lifetime of the manager.
pub struct LoadedFont {
    name: String,
    bytes: Vec<u8>,
    glyphs: Font<'static>,
}

impl LoadedFont {
    /// Registration name used for the font inside the PDF.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw TTF bytes, for embedding.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The parsed glyph outlines.
    pub fn glyphs(&self) -> &Font<'static> {
        &self.glyphs
    }

    /// Advance width of `text` rendered at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scale = Scale::uniform(size);
        let v_metrics = self.glyphs.v_metrics(scale);
        self.glyphs
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .map(|g| g.unpositioned().h_metrics().advance_width)
            .sum()
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("name", &self.name)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Holds the optional custom font used for PDF text and QR labels.
///
/// Without a custom font the PDF renderer falls back to the built-in
/// Helvetica and measurement uses an average-glyph-width estimate; QR label
/// rendering requires a custom font.
#[derive(Debug, Default)]
pub struct FontManager {
    custom: Option<LoadedFont>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TTF from `path` and register it under `name`
    /// (default "CustomFont"). Replaces any previously set font.
    pub fn set_font(&mut self, path: impl AsRef<Path>, name: Option<&str>) -> Result<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| {
            BlattwerkError::Font(format!("cannot read {}: {}", path.display(), err))
        })?;
        let glyphs = Font::try_from_vec(bytes.clone()).ok_or_else(|| {
            BlattwerkError::Font(format!("cannot parse {} as a TTF", path.display()))
        })?;
        let name = name.unwrap_or(DEFAULT_FONT_NAME).to_string();
        info!(path = %path.display(), name, "Custom font loaded");
        self.custom = Some(LoadedFont {
            name,
            bytes,
            glyphs,
        });
        Ok(())
    }

    /// The custom font, if one has been set.
    pub fn font(&self) -> Option<&LoadedFont> {
        self.custom.as_ref()
    }

    /// Registration name of the active font.
    pub fn font_name(&self) -> &str {
        self.custom
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or(DEFAULT_FONT_NAME)
    }

    /// Width of `text` at `size`, from glyph metrics when a font is loaded,
    /// otherwise estimated (half an em per ASCII glyph, a full em for
    /// everything else, which covers CJK).
    pub fn measure_text(&self, text: &str, size: f32) -> f32 {
        match &self.custom {
            Some(font) => font.measure(text, size),
            None => text
                .chars()
                .map(|ch| if ch.is_ascii() { 0.5 * size } else { size })
                .sum(),
        }
    }
}

/// Wrap text so that no line measures wider than `max_width`.
///
/// Splits on existing newlines first, then word-wraps greedily; a word wider
/// than the limit (typical for CJK runs, which have no spaces) breaks per
/// character. A non-positive limit disables wrapping.
pub fn wrap_to_width(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    if max_width <= 0.0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        if measure(paragraph) <= max_width {
            out.push(paragraph.to_string());
            continue;
        }

        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if measure(&candidate) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            if measure(word) <= max_width {
                line = word.to_string();
            } else {
                for ch in word.chars() {
                    let mut candidate = line.clone();
                    candidate.push(ch);
                    if !line.is_empty() && measure(&candidate) > max_width {
                        out.push(std::mem::take(&mut line));
                        line.push(ch);
                    } else {
                        line = candidate;
                    }
                }
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_file_is_an_error() {
        let mut fm = FontManager::new();
        let err = fm.set_font("/nonexistent/font.ttf", None).unwrap_err();
        assert!(matches!(err, BlattwerkError::Font(_)));
        assert!(fm.font().is_none());
    }

    #[test]
    fn garbage_bytes_are_not_a_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.ttf");
        std::fs::write(&path, b"not a font at all").unwrap();

        let mut fm = FontManager::new();
        let err = fm.set_font(&path, Some("Bogus")).unwrap_err();
        assert!(matches!(err, BlattwerkError::Font(_)));
    }

    #[test]
    fn estimate_scales_with_glyph_width() {
        let fm = FontManager::new();
        let ascii = fm.measure_text("abcd", 10.0);
        let cjk = fm.measure_text("你好你好", 10.0);
        assert_eq!(ascii, 20.0);
        assert_eq!(cjk, 40.0);
    }

    #[test]
    fn default_font_name() {
        let fm = FontManager::new();
        assert_eq!(fm.font_name(), "CustomFont");
    }

    // Estimated measurement: 4pt per ASCII char at size 8.
    fn measure(s: &str) -> f32 {
        FontManager::new().measure_text(s, 8.0)
    }

    #[test]
    fn wrap_respects_existing_newlines() {
        assert_eq!(wrap_to_width("a\nb", 1000.0, measure), vec!["a", "b"]);
    }

    #[test]
    fn wrap_greedy_word_fill() {
        // "aa bb" measures 20pt and fits in 22; adding " cc" would overflow.
        assert_eq!(
            wrap_to_width("aa bb cc", 22.0, measure),
            vec!["aa bb", "cc"]
        );
    }

    #[test]
    fn wrap_breaks_long_words_per_char() {
        assert_eq!(
            wrap_to_width("abcdef", 10.0, measure),
            vec!["ab", "cd", "ef"]
        );
    }

    #[test]
    fn wrap_disabled_for_non_positive_width() {
        assert_eq!(wrap_to_width("abc def", 0.0, measure), vec!["abc def"]);
    }
}
