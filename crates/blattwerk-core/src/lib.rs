// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blattwerk — Core types, error definitions, configuration, and font
// handling shared across all crates.

pub mod config;
pub mod error;
pub mod font;
pub mod types;

pub use config::{FillConfig, PageSetup, Watermark};
pub use error::{BlattwerkError, Result};
pub use font::FontManager;
pub use types::*;
