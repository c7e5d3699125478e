//! Change statistics and location records.
//!
//! Every removal performed by a cleaning pass increments exactly one
//! counter and, when location tracking is enabled, one location record in
//! the same pass. The recorder is created per `clean`/`analyze` invocation
//! and threaded through the passes — there is no shared accumulator, so
//! independent invocations may run concurrently on separate threads.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Extracts the block slug from a `wp-block-<name>` class token.
#[allow(clippy::expect_used)]
static BLOCK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"wp-block-(\S+)").expect("BLOCK_NAME regex"));

/// Counter per change key (attribute name, `unicode: <label>`,
/// `content_reference`, `utm_parameters`).
pub type ChangeStats = BTreeMap<String, usize>;

/// `<change-kind>:<item>` → formatted location descriptor → occurrence count.
pub type ChangeLocations = BTreeMap<String, BTreeMap<String, usize>>;

/// Maximum class-attribute length shown in a location label.
const MAX_CLASS_DISPLAY: usize = 50;

/// Maximum number of location descriptors rendered per detail entry.
const MAX_DETAIL_LOCATIONS: usize = 3;

/// Human-readable description of where a removal happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLocation {
    /// Block-type label ("Gutenberg Block", "Paragraph", "Link", ...).
    pub block_type: String,
    /// Block name when one could be derived (e.g. the Gutenberg block slug).
    pub block_name: Option<String>,
    /// The element's class attribute, if any.
    pub class: Option<String>,
}

impl ChangeLocation {
    /// A location carrying only a block-type label, used by passes that
    /// have no element context (text sweeps, the regex strategy).
    #[must_use]
    pub fn generic(block_type: &str) -> Self {
        Self {
            block_type: block_type.to_string(),
            block_name: None,
            class: None,
        }
    }

    /// Formats the location as it appears in reports:
    /// `<block type> (<block name>) class: <class>`.
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts = vec![self.block_type.clone()];

        if let Some(name) = &self.block_name {
            if !name.is_empty() {
                parts.push(format!("({name})"));
            }
        }

        if let Some(class) = &self.class {
            if !class.is_empty() && !self.block_type.contains(class.as_str()) {
                let display: String = if class.chars().count() > MAX_CLASS_DISPLAY {
                    let truncated: String = class.chars().take(MAX_CLASS_DISPLAY).collect();
                    format!("{truncated}...")
                } else {
                    class.clone()
                };
                parts.push(format!("class: {display}"));
            }
        }

        parts.join(" ")
    }
}

/// Classifies an element into a block-type location from its tag and class.
///
/// Block-editor class conventions map to named block labels; common content
/// tags map to generic ones.
#[must_use]
pub fn classify_element(tag: &str, class: Option<&str>) -> ChangeLocation {
    let class = class.unwrap_or_default();

    let (block_type, block_name) = if class.contains("wp-block-") {
        let name = BLOCK_NAME
            .captures(class)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
        ("Gutenberg Block".to_string(), name)
    } else if class.contains("rank-math") {
        let name = class.contains("faq").then(|| "FAQ".to_string());
        ("RankMath Block".to_string(), name)
    } else if tag == "p" {
        ("Paragraph".to_string(), None)
    } else if matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
        (format!("Heading ({})", tag.to_uppercase()), None)
    } else if tag == "div" {
        let name = (!class.is_empty()).then(|| class.to_string());
        ("Div".to_string(), name)
    } else if tag == "span" {
        ("Span".to_string(), None)
    } else {
        let mut chars = tag.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        (format!("{capitalized} Element"), None)
    };

    ChangeLocation {
        block_type,
        block_name,
        class: (!class.is_empty()).then(|| class.to_string()),
    }
}

/// Per-invocation accumulator for counters and location records.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecorder {
    track_locations: bool,
    stats: ChangeStats,
    locations: ChangeLocations,
}

impl ChangeRecorder {
    #[must_use]
    pub fn new(track_locations: bool) -> Self {
        Self {
            track_locations,
            ..Self::default()
        }
    }

    /// Whether location tracking is enabled for this invocation.
    #[must_use]
    pub fn track_locations(&self) -> bool {
        self.track_locations
    }

    /// Adds `count` removals under `key`.
    pub fn increment(&mut self, key: &str, count: usize) {
        if count == 0 {
            return;
        }
        *self.stats.entry(key.to_string()).or_insert(0) += count;
    }

    /// Records `count` removals at `location` under `<kind>:<item>`.
    /// No-op when location tracking is disabled.
    pub fn record_location(&mut self, kind: &str, item: &str, location: &ChangeLocation, count: usize) {
        if !self.track_locations || count == 0 {
            return;
        }
        let entry = self
            .locations
            .entry(format!("{kind}:{item}"))
            .or_default()
            .entry(location.label())
            .or_insert(0);
        *entry += count;
    }

    #[must_use]
    pub fn stats(&self) -> &ChangeStats {
        &self.stats
    }

    #[must_use]
    pub fn locations(&self) -> &ChangeLocations {
        &self.locations
    }

    /// Consumes the recorder, yielding the accumulated maps.
    #[must_use]
    pub fn into_parts(self) -> (ChangeStats, ChangeLocations) {
        (self.stats, self.locations)
    }
}

/// Renders statistics as a single summary line: `<key>: <n> removed; ...`.
#[must_use]
pub fn format_stats(stats: &ChangeStats) -> String {
    if stats.is_empty() {
        return "No changes".to_string();
    }
    stats
        .iter()
        .map(|(key, count)| format!("{key}: {count} removed"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Renders statistics with their locations for log records.
///
/// Attribute and pass counters come first, Unicode entries after, each as
/// `<item>: <count> removed [at: <location> (<count>), ...]` with at most
/// three locations shown.
#[must_use]
pub fn format_details(stats: &ChangeStats, locations: &ChangeLocations) -> String {
    let mut parts = Vec::new();

    for (key, count) in stats.iter().filter(|(k, _)| !k.starts_with("unicode:")) {
        let mut part = format!("{key}: {count} removed");
        append_locations(&mut part, locations.get(&format!("attribute:{key}")));
        parts.push(part);
    }

    for (key, count) in stats.iter().filter(|(k, _)| k.starts_with("unicode:")) {
        let label = key.trim_start_matches("unicode:").trim_start();
        let mut part = format!("Unicode {label}: {count} removed");
        append_locations(&mut part, locations.get(&format!("unicode:{label}")));
        parts.push(part);
    }

    if parts.is_empty() {
        return "No changes".to_string();
    }
    parts.join("; ")
}

fn append_locations(part: &mut String, locs: Option<&BTreeMap<String, usize>>) {
    let Some(locs) = locs else { return };
    if locs.is_empty() {
        return;
    }
    let rendered: Vec<String> = locs
        .iter()
        .take(MAX_DETAIL_LOCATIONS)
        .map(|(label, n)| format!("{label} ({n})"))
        .collect();
    let suffix = if locs.len() > MAX_DETAIL_LOCATIONS { "..." } else { "" };
    part.push_str(&format!(" [at: {}{suffix}]", rendered.join(", ")));
}
