//! Unicode normalization and invisible-codepoint removal.
//!
//! Two passes live here. The escape-sequence decoder turns literal
//! `uXXXX` / `\uXXXX` text and numeric character references back into
//! readable characters, dropping anything that decodes to an invisible
//! code point. The remover then deletes every cataloged invisible code
//! point from the text itself, counting removals per label.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::catalog::{is_invisible_codepoint, UnicodeEntry};
use crate::stats::{ChangeLocation, ChangeRecorder};

#[allow(clippy::expect_used)]
static BARE_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"u([0-9a-fA-F]{4})").expect("BARE_ESCAPE regex"));

#[allow(clippy::expect_used)]
static BACKSLASH_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u([0-9a-fA-F]{4})").expect("BACKSLASH_ESCAPE regex"));

#[allow(clippy::expect_used)]
static NUMERIC_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&#x([0-9a-fA-F]{1,6});").expect("NUMERIC_REFERENCE regex"));

/// Decodes literal Unicode escape sequences embedded as text.
///
/// Three shapes are recognized: bare `uXXXX`, backslash-escaped `\uXXXX`,
/// and hexadecimal numeric character references. Invisible code points in
/// the first two shapes decode to the empty string; invisible numeric
/// references are left untouched for the dedicated removal pass, so their
/// removal is counted there.
#[must_use]
pub fn decode_escape_sequences(html: &str) -> String {
    let html = BARE_ESCAPE.replace_all(html, |caps: &Captures| decode_hex(&caps[1]));
    let html = BACKSLASH_ESCAPE.replace_all(&html, |caps: &Captures| decode_hex(&caps[1]));
    let html = NUMERIC_REFERENCE.replace_all(&html, |caps: &Captures| {
        match u32::from_str_radix(&caps[1], 16) {
            Ok(code) if !is_invisible_codepoint(code) => decode_codepoint(code),
            _ => caps[0].to_string(),
        }
    });
    html.into_owned()
}

fn decode_hex(hex: &str) -> String {
    u32::from_str_radix(hex, 16)
        .map(decode_codepoint)
        .unwrap_or_default()
}

/// Renders a code point as replacement text: invisible and control code
/// points vanish, printable ASCII and valid scalar values become literal
/// characters, and anything unconvertible falls back to a canonical
/// numeric reference.
fn decode_codepoint(code: u32) -> String {
    if is_invisible_codepoint(code) {
        return String::new();
    }
    match code {
        32..=126 => char::from_u32(code).map(String::from).unwrap_or_default(),
        127..=0x0010_FFFF => char::from_u32(code)
            .map(String::from)
            .unwrap_or_else(|| format!("&#x{code:04x};")),
        _ => String::new(),
    }
}

/// Deletes every cataloged invisible code point, counting removals per
/// label. HTML entities are decoded back to literal characters afterwards,
/// unconditionally, so re-encoding introduced by earlier passes never
/// leaves double-escaped text behind.
#[must_use]
pub fn remove_invisible(
    html: &str,
    catalog: &[UnicodeEntry],
    recorder: &mut ChangeRecorder,
) -> String {
    let mut html = html.to_string();
    let location = ChangeLocation::generic("Text Content");

    for entry in catalog {
        let count = entry.pattern.find_iter(&html).count();
        if count > 0 {
            html = entry.pattern.replace_all(&html, "").into_owned();
            recorder.increment(&format!("unicode: {}", entry.label), count);
            recorder.record_location("unicode", &entry.label, &location, count);
        }
    }

    html_escape::decode_html_entities(&html).into_owned()
}
