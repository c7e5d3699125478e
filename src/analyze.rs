//! Non-mutating content analysis.
//!
//! Runs the same matchers as the cleaning passes but only counts, so a
//! caller can preview what a clean would do and let a user toggle pass
//! categories before committing. Never rewrites its input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::attributes;
use crate::catalog::CITATION_REFERENCES;
use crate::catalog::TRACKING_ID_STAT_KEY;
use crate::options::Options;
use crate::utm;

/// Summary of which catalog entries would match, and how often, without
/// mutating the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Tracking attribute → occurrence count.
    pub attributes_found: BTreeMap<String, usize>,

    /// Invisible-Unicode label → occurrence count.
    pub unicode_found: BTreeMap<String, usize>,

    /// Citation-marker item → occurrence count (all pattern variants sum
    /// under `ContentReference`).
    pub content_references_found: BTreeMap<String, usize>,

    /// `UTM Parameters` → number of affected link URLs.
    pub utm_parameters_found: BTreeMap<String, usize>,

    /// The literal `href` URLs carrying UTM parameters, in document order.
    pub utm_urls_found: Vec<String>,

    pub total_attributes: usize,
    pub total_unicode: usize,
    pub total_content_references: usize,
    pub total_utm_parameters: usize,
}

/// Analyzes `html` against the catalogs configured in `options`.
#[must_use]
pub fn analyze_content(html: &str, options: &Options) -> Analysis {
    let mut analysis = Analysis::default();

    for attr in options.attribute_catalog() {
        let Some(pattern) = attributes::attribute_pattern(&attr) else {
            continue;
        };
        let count = pattern.find_iter(html).count();
        if count > 0 {
            analysis.attributes_found.insert(attr, count);
            analysis.total_attributes += count;
        }
    }
    let id_count = attributes::tracking_id_attr_pattern().find_iter(html).count();
    if id_count > 0 {
        analysis
            .attributes_found
            .insert(TRACKING_ID_STAT_KEY.to_string(), id_count);
        analysis.total_attributes += id_count;
    }

    for entry in options.unicode_catalog() {
        let count = entry.pattern.find_iter(html).count();
        if count > 0 {
            analysis.unicode_found.insert(entry.label.clone(), count);
            analysis.total_unicode += count;
        }
    }

    // Counted against a scratch copy with sequential removal, because the
    // bare bracketed pattern also matches inside the qualified forms and a
    // flat per-pattern count would tally those twice.
    let mut scratch = html.to_string();
    let mut reference_count = 0usize;
    for pattern in CITATION_REFERENCES.iter() {
        let count = pattern.find_iter(&scratch).count();
        if count > 0 {
            scratch = pattern.replace_all(&scratch, "").into_owned();
            reference_count += count;
        }
    }
    if reference_count > 0 {
        analysis
            .content_references_found
            .insert("ContentReference".to_string(), reference_count);
        analysis.total_content_references = reference_count;
    }

    let utm_urls = utm::collect_utm_urls(html);
    if !utm_urls.is_empty() {
        analysis
            .utm_parameters_found
            .insert("UTM Parameters".to_string(), utm_urls.len());
        analysis.total_utm_parameters = utm_urls.len();
        analysis.utm_urls_found = utm_urls;
    }

    analysis
}
