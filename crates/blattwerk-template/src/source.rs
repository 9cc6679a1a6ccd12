// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Template acquisition — resolves a template location (local path or HTTP
// URL) to a parsed workbook. Remote images referenced from placeholder data
// go through the same fetch path.

use std::io::Cursor;
use std::path::Path;

use blattwerk_core::error::{BlattwerkError, Result};
use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, reader};

/// True when the location should be fetched over HTTP rather than read from
/// the filesystem.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetch `url` and return the response body. Non-2xx statuses are errors.
pub fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url).map_err(|err| BlattwerkError::Fetch {
        url: url.to_string(),
        detail: err.to_string(),
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(BlattwerkError::Fetch {
            url: url.to_string(),
            detail: format!("HTTP status {}", status),
        });
    }
    let bytes = response.bytes().map_err(|err| BlattwerkError::Fetch {
        url: url.to_string(),
        detail: err.to_string(),
    })?;
    debug!(url, len = bytes.len(), "Fetched remote resource");
    Ok(bytes.to_vec())
}

/// Load an `.xlsx` template from a local path or an HTTP(S) URL.
pub fn load_template(location: &str) -> Result<Spreadsheet> {
    let book = if is_remote(location) {
        let bytes = fetch_url(location)?;
        reader::xlsx::read_reader(Cursor::new(bytes), true)
            .map_err(|err| BlattwerkError::Workbook(format!("{}: {}", location, err)))?
    } else {
        reader::xlsx::read(Path::new(location))
            .map_err(|err| BlattwerkError::Workbook(format!("{}: {}", location, err)))?
    };
    info!(location, sheets = book.get_sheet_count(), "Template loaded");
    Ok(book)
}
