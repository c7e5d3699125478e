//! Tracking-attribute stripping.
//!
//! Two interchangeable strategies with identical statistics semantics. The
//! tree strategy wraps the fragment in a minimal document shell, parses it
//! with `dom_query`, and removes catalog attributes element by element,
//! which also yields real location context (tag, class, enclosing block
//! type). The text strategy is the fallback when the parse does not
//! produce the expected wrapper element: per-attribute regexes with
//! generic "HTML Element" locations. The orchestrator degrades from tree
//! to text silently; stripping never fails the whole clean.

use std::sync::LazyLock;

use dom_query::{Document, Selection};
use regex::Regex;

use crate::catalog::{TRACKING_ID, TRACKING_ID_STAT_KEY};
use crate::error::{Error, Result};
use crate::stats::{classify_element, ChangeLocation, ChangeRecorder};

const WRAPPER_ID: &str = "trace-cleaner-wrapper";

/// Matches a whole `id="model-response-message-contentr_..."` attribute in
/// raw text, for the regex strategy and for analysis.
#[allow(clippy::expect_used)]
static TRACKING_ID_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+id\s*=\s*["']model-response-message-contentr_[^"']*["']"#)
        .expect("TRACKING_ID_ATTR regex")
});

/// Whitespace-prefixed matcher for one attribute, with or without a quoted
/// value. Shared by the regex strategy and the analysis preview.
pub(crate) fn attribute_pattern(attr: &str) -> Option<Regex> {
    Regex::new(&format!(
        r#"(?i)\s+{}(?:\s*=\s*["'][^"']*["'])?"#,
        regex::escape(attr)
    ))
    .ok()
}

pub(crate) fn tracking_id_attr_pattern() -> &'static Regex {
    &TRACKING_ID_ATTR
}

/// Tree strategy: parse, walk every element, remove catalog attributes and
/// pattern-matched tracking ids, recording tag/class-derived locations.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the wrapper element cannot be found in
/// the parsed document; the caller falls back to [`strip_with_regex`].
pub fn strip_with_tree(
    html: &str,
    attrs: &[String],
    recorder: &mut ChangeRecorder,
) -> Result<String> {
    let wrapped = format!(
        r#"<html><head><meta charset="utf-8"></head><body><div id="{WRAPPER_ID}">{html}</div></body></html>"#
    );
    let doc = Document::from(wrapped.as_str());
    let wrapper = doc.select(&format!("#{WRAPPER_ID}"));
    if wrapper.length() == 0 {
        return Err(Error::Parse("fragment wrapper element not found".to_string()));
    }

    for node in wrapper.select("*").nodes() {
        let sel = Selection::from(*node);
        if node.attrs().is_empty() {
            continue;
        }

        let location = recorder.track_locations().then(|| {
            let tag = node.node_name().map(|t| t.to_string()).unwrap_or_default();
            let class = sel.attr("class").map(|c| c.to_string());
            classify_element(&tag, class.as_deref())
        });

        for attr in attrs {
            if sel.has_attr(attr) {
                sel.remove_attr(attr);
                recorder.increment(attr, 1);
                if let Some(location) = &location {
                    recorder.record_location("attribute", attr, location, 1);
                }
            }
        }

        if let Some(id) = sel.attr("id") {
            if TRACKING_ID.is_match(&id) {
                sel.remove_attr("id");
                recorder.increment(TRACKING_ID_STAT_KEY, 1);
                if let Some(location) = &location {
                    recorder.record_location("attribute", TRACKING_ID_STAT_KEY, location, 1);
                }
            }
        }
    }

    // Serialization re-encodes text entities; decode so the output matches
    // the fragment form the caller handed in.
    let cleaned = wrapper.inner_html().to_string();
    Ok(html_escape::decode_html_entities(&cleaned).into_owned())
}

/// Text strategy: whitespace-prefixed regex removal per catalog attribute.
/// Locations are recorded generically since no tree context exists.
#[must_use]
pub fn strip_with_regex(html: &str, attrs: &[String], recorder: &mut ChangeRecorder) -> String {
    let mut cleaned = html.to_string();
    let generic = ChangeLocation::generic("HTML Element");

    for attr in attrs {
        let Some(pattern) = attribute_pattern(attr) else {
            continue;
        };
        let count = pattern.find_iter(&cleaned).count();
        if count > 0 {
            cleaned = pattern.replace_all(&cleaned, "").into_owned();
            recorder.increment(attr, count);
            recorder.record_location("attribute", attr, &generic, count);
        }
    }

    let count = TRACKING_ID_ATTR.find_iter(&cleaned).count();
    if count > 0 {
        cleaned = TRACKING_ID_ATTR.replace_all(&cleaned, "").into_owned();
        recorder.increment(TRACKING_ID_STAT_KEY, count);
        recorder.record_location("attribute", TRACKING_ID_STAT_KEY, &generic, count);
    }

    cleaned
}
