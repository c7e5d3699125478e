//! Cleaning pipeline orchestration.
//!
//! Linear pipeline: decode Unicode escapes, extract protected blocks, run
//! the enabled passes over the unprotected remainder, apply the
//! text-level passes (Unicode, UTM) to each stored block in isolation,
//! then re-splice blocks in reverse order. Statistics live in a per-call
//! recorder; nothing is shared between invocations.

use crate::attributes;
use crate::blocks;
use crate::options::Options;
use crate::references;
use crate::result::CleanResult;
use crate::stats::ChangeRecorder;
use crate::unicode;
use crate::utm;

/// Runs the configured cleaning passes over one HTML fragment.
#[must_use]
pub fn clean_html(html: &str, options: &Options) -> CleanResult {
    if html.is_empty() {
        return CleanResult::new(String::new(), Default::default(), Default::default());
    }

    let mut recorder = ChangeRecorder::new(options.track_locations);
    let unicode_catalog = options.unicode_catalog();

    let decoded = unicode::decode_escape_sequences(html);
    let extracted = blocks::extract(&decoded);
    let mut cleaned = extracted.html;
    let mut protected = extracted.blocks;

    if options.clean_attributes {
        let catalog = options.attribute_catalog();
        cleaned = match attributes::strip_with_tree(&cleaned, &catalog, &mut recorder) {
            Ok(stripped) => stripped,
            // Parse degradation is non-fatal: fall back to the text strategy.
            Err(_) => attributes::strip_with_regex(&cleaned, &catalog, &mut recorder),
        };
    }

    if options.clean_unicode {
        cleaned = unicode::remove_invisible(&cleaned, &unicode_catalog, &mut recorder);
    }

    if options.clean_content_references {
        cleaned = references::remove(&cleaned, &mut recorder);
    }

    if options.clean_utm_parameters {
        cleaned = utm::remove(&cleaned, &mut recorder);
    }

    // Text-level passes also apply to block contents, each cleaned in
    // isolation so the blocks' structural markers are never exposed.
    if options.clean_unicode {
        for block in &mut protected {
            block.markup = unicode::remove_invisible(&block.markup, &unicode_catalog, &mut recorder);
        }
    }
    if options.clean_utm_parameters {
        for block in &mut protected {
            block.markup = utm::remove(&block.markup, &mut recorder);
        }
    }

    let restored = blocks::restore(&cleaned, &protected);
    let (stats, locations) = recorder.into_parts();
    CleanResult::new(restored, stats, locations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_empty_output() {
        let result = clean_html("", &Options::default());
        assert_eq!(result.html, "");
        assert!(result.stats().is_empty());
    }

    #[test]
    fn disabled_passes_are_skipped_entirely() {
        let options = Options {
            clean_attributes: false,
            clean_unicode: false,
            clean_content_references: false,
            clean_utm_parameters: false,
            ..Options::default()
        };
        let html = "<p data-llm=\"1\">a\u{200B}b [oaicite:0]</p>";
        let result = clean_html(html, &options);
        assert_eq!(result.html, html);
        assert!(result.stats().is_empty());
    }

    #[test]
    fn block_contents_get_unicode_pass_before_restore() {
        let html = "<!-- wp:paragraph --><p>a\u{200B}b</p><!-- /wp:paragraph -->";
        let options = Options {
            clean_attributes: false,
            ..Options::default()
        };
        let result = clean_html(html, &options);
        assert_eq!(result.html, "<!-- wp:paragraph --><p>ab</p><!-- /wp:paragraph -->");
        assert_eq!(
            result.stats().get("unicode: Zero Width Space (U+200B)"),
            Some(&1)
        );
    }

    #[test]
    fn block_contents_get_utm_pass_before_restore() {
        let html = concat!(
            "<!-- wp:html -->",
            r#"<a href="https://x.com/a?utm_source=s&k=1">l</a>"#,
            "<!-- /wp:html -->",
        );
        let options = Options {
            clean_attributes: false,
            clean_unicode: false,
            ..Options::default()
        };
        let result = clean_html(html, &options);
        assert!(result.html.contains(r#"href="https://x.com/a?k=1""#));
        assert!(result.html.starts_with("<!-- wp:html -->"));
        assert_eq!(result.stats().get(crate::catalog::UTM_STAT_KEY), Some(&1));
    }
}
