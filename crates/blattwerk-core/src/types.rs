// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Blattwerk template filler.

use serde::{Deserialize, Serialize};

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Portrait dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm as f32, *height_mm as f32),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Apply the orientation to portrait paper dimensions.
    pub fn apply(&self, portrait_mm: (f32, f32)) -> (f32, f32) {
        match self {
            Self::Portrait => portrait_mm,
            Self::Landscape => (portrait_mm.1, portrait_mm.0),
        }
    }
}

/// An RGB colour with 0-255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to the 0.0-1.0 range used by PDF colour operators.
    pub fn to_unit(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Blend this colour toward `other` by `t` (0.0 keeps self, 1.0 yields `other`).
    pub fn blend_toward(&self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 { (a as f32 + (b as f32 - a as f32) * t).round() as u8 };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// A 1-based spreadsheet cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// The coordinate in A1 notation, e.g. `CellCoord::new(3, 2)` is "B3".
    pub fn a1(&self) -> String {
        format!("{}{}", column_letters(self.col), self.row)
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.a1())
    }
}

/// Convert a 1-based column index to its spreadsheet letter form (1 = "A",
/// 27 = "AA").
pub fn column_letters(mut col: u32) -> String {
    debug_assert!(col >= 1);
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII letters")
}

/// Parse a spreadsheet column letter form back to its 1-based index.
/// Returns `None` for empty or non-alphabetic input.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    Some(col)
}

/// An encoded raster image anchored at a cell, with its display size in
/// PDF points.
#[derive(Debug, Clone)]
pub struct CellImage {
    /// PNG-encoded pixels.
    pub png: Vec<u8>,
    pub width_pt: f32,
    pub height_pt: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_round_trip() {
        for (idx, s) in [
            (1, "A"),
            (2, "B"),
            (26, "Z"),
            (27, "AA"),
            (28, "AB"),
            (52, "AZ"),
            (53, "BA"),
            (702, "ZZ"),
            (703, "AAA"),
        ] {
            assert_eq!(column_letters(idx), s);
            assert_eq!(column_index(s), Some(idx));
        }
    }

    #[test]
    fn column_index_rejects_garbage() {
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
    }

    #[test]
    fn cell_coord_a1() {
        assert_eq!(CellCoord::new(3, 2).a1(), "B3");
        assert_eq!(CellCoord::new(1, 27).to_string(), "AA1");
    }

    #[test]
    fn landscape_swaps_axes() {
        let portrait = PaperSize::Letter.dimensions_mm();
        let (w, h) = Orientation::Landscape.apply(portrait);
        assert!(w > h);
        assert_eq!((h, w), portrait);
    }

    #[test]
    fn blend_toward_white() {
        let c = Rgb::new(216, 0, 54);
        assert_eq!(c.blend_toward(Rgb::WHITE, 0.0), c);
        assert_eq!(c.blend_toward(Rgb::WHITE, 1.0), Rgb::WHITE);
        let mid = c.blend_toward(Rgb::WHITE, 0.5);
        assert!(mid.r > c.r && mid.g > c.g && mid.b > c.b);
    }
}
