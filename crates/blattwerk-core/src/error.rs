// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Blattwerk.

use thiserror::Error;

/// Top-level error type for all Blattwerk operations.
#[derive(Debug, Error)]
pub enum BlattwerkError {
    // -- Template errors --
    #[error("workbook load failed: {0}")]
    Workbook(String),

    #[error("template fetch failed for {url}: {detail}")]
    Fetch { url: String, detail: String },

    #[error("font error: {0}")]
    Font(String),

    #[error("handler for {placeholder:?} failed: {detail}")]
    Handler {
        placeholder: String,
        detail: String,
    },

    #[error("field {0:?} missing from data mapping")]
    MissingField(String),

    // -- Graphics errors --
    #[error("QR encoding failed: {0}")]
    QrEncode(String),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("label layout failed: {0}")]
    Layout(String),

    // -- Output errors --
    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BlattwerkError>;
