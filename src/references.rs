//! Citation-reference removal.
//!
//! LLM exports leave inline footnote markers behind
//! (`ContentReference[oaicite:0](index=0)` and friends). The patterns run
//! most specific first — each against the cumulative result of the
//! previous one — and all removals sum into a single counter.

use crate::catalog::{CITATION_REFERENCES, CITATION_STAT_KEY};
use crate::stats::{ChangeLocation, ChangeRecorder};

/// Strips every citation marker from `html`.
#[must_use]
pub fn remove(html: &str, recorder: &mut ChangeRecorder) -> String {
    let mut html = html.to_string();
    let mut total = 0;

    for pattern in CITATION_REFERENCES.iter() {
        let count = pattern.find_iter(&html).count();
        if count > 0 {
            html = pattern.replace_all(&html, "").into_owned();
            total += count;
        }
    }

    if total > 0 {
        recorder.increment(CITATION_STAT_KEY, total);
        recorder.record_location(
            CITATION_STAT_KEY,
            "ContentReference",
            &ChangeLocation::generic("Text Content"),
            total,
        );
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_fully_qualified_marker() {
        let mut recorder = ChangeRecorder::new(true);
        let cleaned = remove("Fact X.ContentReference[oaicite:0](index=0)", &mut recorder);
        assert_eq!(cleaned, "Fact X.");
        assert_eq!(recorder.stats().get(CITATION_STAT_KEY), Some(&1));
    }

    #[test]
    fn removes_empty_argument_marker() {
        let mut recorder = ChangeRecorder::new(false);
        let cleaned = remove("A ContentReference[oaicite=2]() B", &mut recorder);
        assert_eq!(cleaned, "A  B");
    }

    #[test]
    fn removes_bare_bracketed_marker_keeping_surrounding_text() {
        let mut recorder = ChangeRecorder::new(false);
        let cleaned = remove("Y [oaicite:3]", &mut recorder);
        assert_eq!(cleaned, "Y ");
    }

    #[test]
    fn mixed_markers_sum_into_one_counter() {
        let mut recorder = ChangeRecorder::new(true);
        let html = "a ContentReference[oaicite:0](index=0) b [oaicite:1] c ContentReference[oaicite:2]()";
        let cleaned = remove(html, &mut recorder);
        assert_eq!(cleaned, "a  b  c ");
        assert_eq!(recorder.stats().get(CITATION_STAT_KEY), Some(&3));
        let locations: usize = recorder
            .locations()
            .values()
            .flat_map(std::collections::BTreeMap::values)
            .sum();
        assert_eq!(locations, 3);
    }

    #[test]
    fn whitespace_tolerant_matching() {
        let mut recorder = ChangeRecorder::new(false);
        let cleaned = remove("x ContentReference [ oaicite : 4 ] ( index = 2 )", &mut recorder);
        assert_eq!(cleaned, "x ");
    }
}
