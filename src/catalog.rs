//! Catalogs of removable constructs.
//!
//! Everything the cleaning passes match against lives here: the
//! tracking-attribute list, the reserved tracking-id naming convention, the
//! invisible-Unicode catalog, and the citation-reference patterns. All
//! regexes are compiled once at first use via `LazyLock`. Hosts that need a
//! different attribute list or Unicode catalog inject overrides through
//! [`crate::Options`] instead of editing these defaults.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Attributes inserted by LLM authoring tools to record generation metadata.
///
/// Order is preserved in statistics output; duplicates and empty entries in
/// host overrides are filtered out by [`crate::Options::attribute_catalog`].
pub const TRACKING_ATTRIBUTES: &[&str] = &[
    "data-start",
    "data-end",
    "data-is-last-node",
    "data-is-only-node",
    "data-llm",
    "data-pm-slice",
    "data-llm-id",
    "data-llm-trace",
    "data-original-text",
    "data-source-text",
    "data-highlight",
    "data-entity",
    "data-mention",
    "data-offset-key",
    "data-message-id",
    "data-sender",
    "data-role",
    "data-token-index",
    "data-model",
    "data-render-timestamp",
    "data-update-timestamp",
    "data-confidence",
    "data-temperature",
    "data-seed",
    "data-step",
    "data-lang",
    "data-format",
    "data-annotation",
    "data-reference",
    "data-version",
    "data-error",
    "data-stream-id",
    "data-chunk",
    "data-context-id",
    "data-user-id",
    "data-ui-state",
];

/// Naming convention for element ids emitted by model-response exports.
/// Matching ids are stripped even though `id` is not in the attribute list.
pub static TRACKING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^model-response-message-contentr_").expect("TRACKING_ID regex"));

/// Statistics key used for removals matched by [`TRACKING_ID`].
pub const TRACKING_ID_STAT_KEY: &str = "id(model-response-message-contentr_*)";

/// One entry of the invisible-Unicode catalog: a human-readable label and
/// the matcher for a single code point, a contiguous range, or a point set.
#[derive(Debug, Clone)]
pub struct UnicodeEntry {
    /// Label used in statistics keys (`unicode: <label>`) and reports.
    pub label: String,
    /// Compiled matcher for the code point(s).
    pub pattern: Regex,
}

impl UnicodeEntry {
    fn new(label: &str, pattern: &str) -> Self {
        Self {
            label: label.to_string(),
            pattern: Regex::new(pattern).expect("invisible unicode pattern"),
        }
    }
}

/// Code points that are never visibly rendered but affect text processing,
/// search and copy-paste fidelity. Used by the removal pass; the escape
/// decoder consults [`is_invisible_codepoint`] for the same set.
static INVISIBLE_UNICODE: LazyLock<Vec<UnicodeEntry>> = LazyLock::new(|| {
    vec![
        UnicodeEntry::new("Zero Width Space (U+200B)", "\u{200B}"),
        UnicodeEntry::new("Zero Width Non-Joiner (U+200C)", "\u{200C}"),
        UnicodeEntry::new("Zero Width Joiner (U+200D)", "\u{200D}"),
        UnicodeEntry::new("Zero Width No-Break Space / BOM (U+FEFF)", "\u{FEFF}"),
        UnicodeEntry::new("Word Joiner (U+2060)", "\u{2060}"),
        UnicodeEntry::new("Soft Hyphen (U+00AD)", "\u{00AD}"),
        UnicodeEntry::new("Invisible Separator (U+2063)", "\u{2063}"),
        UnicodeEntry::new("Invisible Plus (U+2064)", "\u{2064}"),
        UnicodeEntry::new("Invisible Times (U+2062)", "\u{2062}"),
        UnicodeEntry::new("Left-to-Right Mark (U+200E)", "\u{200E}"),
        UnicodeEntry::new("Right-to-Left Mark (U+200F)", "\u{200F}"),
        UnicodeEntry::new("Left-to-Right Embedding (U+202A)", "\u{202A}"),
        UnicodeEntry::new("Right-to-Left Embedding (U+202B)", "\u{202B}"),
        UnicodeEntry::new("Pop Directional Formatting (U+202C)", "\u{202C}"),
        UnicodeEntry::new("Left-to-Right Override (U+202D)", "\u{202D}"),
        UnicodeEntry::new("Right-to-Left Override (U+202E)", "\u{202E}"),
        UnicodeEntry::new("Bidirectional Isolates (U+2066\u{2013}U+2069)", "[\u{2066}-\u{2069}]"),
        UnicodeEntry::new("Mongolian Vowel Separator (U+180E)", "\u{180E}"),
        UnicodeEntry::new("Tag Characters (U+E0000\u{2013}U+E007F)", "[\u{E0000}-\u{E007F}]"),
        UnicodeEntry::new("Invisible Ideographic Space (U+3000)", "\u{3000}"),
        UnicodeEntry::new("Object Replacement Character (U+FFFC)", "\u{FFFC}"),
        UnicodeEntry::new("Variation Selectors (U+FE00\u{2013}U+FE0F)", "[\u{FE00}-\u{FE0F}]"),
    ]
});

/// The default invisible-Unicode catalog.
#[must_use]
pub fn default_unicode_catalog() -> &'static [UnicodeEntry] {
    &INVISIBLE_UNICODE
}

/// Whether a code point belongs to the invisible-Unicode catalog.
///
/// Kept in sync with [`default_unicode_catalog`]; the escape-sequence
/// decoder uses this to drop invisible code points outright and to leave
/// invisible numeric character references for the dedicated removal pass.
#[must_use]
pub fn is_invisible_codepoint(code: u32) -> bool {
    matches!(
        code,
        0x200B..=0x200F
            | 0xFEFF
            | 0x2060
            | 0x00AD
            | 0x2062..=0x2064
            | 0x202A..=0x202E
            | 0x2066..=0x2069
            | 0x180E
            | 0xE0000..=0xE007F
            | 0x3000
            | 0xFFFC
            | 0xFE00..=0xFE0F
    )
}

/// Inline citation markers left behind by LLM exports, most specific first.
///
/// Order matters: the bare bracketed form is a substring of the qualified
/// forms and would otherwise swallow part of them, leaving orphaned
/// `ContentReference(...)` fragments behind.
pub static CITATION_REFERENCES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)ContentReference\s*\[\s*oaicite\s*[:=]\s*\d+\s*\]\s*\(\s*index\s*=\s*\d+\s*\)")
            .expect("qualified citation pattern"),
        Regex::new(r"(?i)ContentReference\s*\[\s*oaicite\s*[:=]\s*\d+\s*\]\s*\(\s*\)")
            .expect("empty-argument citation pattern"),
        Regex::new(r"(?i)\[\s*oaicite\s*[:=]\s*\d+\s*\]").expect("bare citation pattern"),
    ]
});

/// Statistics key for citation-reference removals (all three patterns sum
/// into this one counter).
pub const CITATION_STAT_KEY: &str = "content_reference";

/// Statistics key for UTM parameter removals.
pub const UTM_STAT_KEY: &str = "utm_parameters";
