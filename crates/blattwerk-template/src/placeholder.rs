// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placeholder model — a placeholder is `prefix + body + suffix` occupying a
// whole cell. The body is a field name, optionally followed by a handler
// suffix (`{{serial.qrcode}}`); the field name is the part before the first
// dot.

/// A placeholder matched against a registered handler suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The delimited body with the handler suffix stripped
    /// (`{{a.b.qrcode}}` yields "a.b").
    pub body: String,
    /// The field looked up in the data mapping ("a" for body "a.b").
    pub field: String,
}

/// Match a cell against `prefix + body + handler_suffix + suffix`.
///
/// Returns `None` when the delimiters or handler suffix are absent, or when
/// the body is empty.
pub fn match_suffixed(
    cell: &str,
    prefix: &str,
    suffix: &str,
    handler_suffix: &str,
) -> Option<Placeholder> {
    let tail = format!("{}{}", handler_suffix, suffix);
    let inner = cell.strip_prefix(prefix)?.strip_suffix(&tail)?;
    if inner.is_empty() {
        return None;
    }
    Some(Placeholder {
        body: inner.to_string(),
        field: field_name(inner).to_string(),
    })
}

/// Whether the cell is exactly the plain placeholder for `key`.
pub fn matches_plain(cell: &str, prefix: &str, suffix: &str, key: &str) -> bool {
    !key.is_empty()
        && cell.len() == prefix.len() + key.len() + suffix.len()
        && cell.strip_prefix(prefix).and_then(|s| s.strip_suffix(suffix)) == Some(key)
}

/// The part of a placeholder body before the first dot.
pub fn field_name(body: &str) -> &str {
    body.split('.').next().unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixed_match_strips_handler_suffix() {
        let p = match_suffixed("{{serial.qrcode}}", "{{", "}}", ".qrcode").unwrap();
        assert_eq!(p.body, "serial");
        assert_eq!(p.field, "serial");
    }

    #[test]
    fn body_may_carry_extra_segments() {
        let p = match_suffixed("{{device.label.qrcode}}", "{{", "}}", ".qrcode").unwrap();
        assert_eq!(p.body, "device.label");
        assert_eq!(p.field, "device");
    }

    #[test]
    fn wrong_suffix_does_not_match() {
        assert!(match_suffixed("{{serial}}", "{{", "}}", ".qrcode").is_none());
        assert!(match_suffixed("{{serial.image}}", "{{", "}}", ".qrcode").is_none());
        assert!(match_suffixed("serial.qrcode", "{{", "}}", ".qrcode").is_none());
    }

    #[test]
    fn empty_body_is_not_a_placeholder() {
        assert!(match_suffixed("{{.qrcode}}", "{{", "}}", ".qrcode").is_none());
        assert!(!matches_plain("{{}}", "{{", "}}", ""));
    }

    #[test]
    fn plain_match_is_exact() {
        assert!(matches_plain("{{name}}", "{{", "}}", "name"));
        assert!(!matches_plain("x {{name}}", "{{", "}}", "name"));
        assert!(!matches_plain("{{name}} y", "{{", "}}", "name"));
        assert!(!matches_plain("{{name}}", "{{", "}}", "other"));
    }

    #[test]
    fn custom_delimiters() {
        let p = match_suffixed("<<id.qr>>", "<<", ">>", ".qr").unwrap();
        assert_eq!(p.field, "id");
        assert!(matches_plain("<<id>>", "<<", ">>", "id"));
    }
}
