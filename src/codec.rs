//! Record format codec.
//!
//! EZID request and response bodies are plain text, one `name: value` pair
//! per line. In requests, `%`, `:`, carriage return and line feed inside
//! names and values are written as `%XX` (uppercase hex). Nothing else is
//! escaped, so this is not URL percent-encoding.
//!
//! Responses start with a status line, `success: <identifier>`, optionally
//! followed by metadata lines. [`decode`] does not un-escape values; callers
//! that need the original text can apply [`unescape`] themselves.

use std::borrow::Cow;
use std::fmt::Write;

use crate::error::{ApiError, ApiResult};
use crate::shared::{Metadata, Record, Response};

const SEPARATOR: &str = ": ";
const SUCCESS_LABEL: &str = "success";

fn needs_escape(c: char) -> bool {
    matches!(c, '%' | ':' | '\r' | '\n')
}

/// Escape `%`, `:`, `\r` and `\n` as `%XX`.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if needs_escape(c) {
            let _ = write!(out, "%{:02X}", c as u32);
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

/// Reverse any `%XX` sequence. Malformed sequences are left as they are.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('%') {
        return Cow::Borrowed(s);
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

/// Encode metadata as a request body.
///
/// An empty map encodes to an empty body.
pub fn encode(metadata: &Metadata) -> Vec<u8> {
    metadata
        .iter()
        .map(|(name, value)| format!("{}{}{}", escape(name), SEPARATOR, escape(value)))
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

/// Split a line into exactly two parts on `": "`.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(value), None) => Some((name, value)),
        _ => None,
    }
}

/// Decode a success response body.
///
/// A body with only the status line decodes to [`Response::Identifier`];
/// otherwise every following line that splits into exactly one name and one
/// value becomes a metadata entry, and other lines (blank ones included) are
/// skipped.
pub fn decode(body: &str) -> ApiResult<Response> {
    let mut lines = body.split('\n');
    let status_line = lines.next().unwrap_or_default();

    let identifier = match split_pair(status_line) {
        Some((SUCCESS_LABEL, identifier)) => identifier.to_string(),
        _ => {
            return Err(ApiError::MalformedResponse(format!(
                "expected 'success: <identifier>', got '{}'",
                status_line
            )))
        }
    };

    let rest: Vec<&str> = lines.collect();
    if rest.is_empty() {
        return Ok(Response::Identifier(identifier));
    }

    let metadata: Metadata = rest
        .into_iter()
        .filter_map(split_pair)
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Ok(Response::Record(Record {
        identifier,
        metadata,
    }))
}
