//! Configuration options for a cleaning invocation.
//!
//! `Options` controls which passes run and carries the host-injected
//! catalog overrides. It is immutable per invocation; the cleaner holds no
//! state between calls.

use crate::catalog::{self, UnicodeEntry};

/// Configuration for [`crate::clean_with_options`] and
/// [`crate::analyze_with_options`].
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings (every pass enabled, default catalogs).
///
/// # Example
///
/// ```rust
/// use llm_trace_cleaner::Options;
///
/// // Only strip attributes, without location tracking
/// let options = Options {
///     clean_unicode: false,
///     clean_content_references: false,
///     clean_utm_parameters: false,
///     track_locations: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Remove tracking attributes and pattern-matched tracking ids.
    ///
    /// Default: `true`
    pub clean_attributes: bool,

    /// Remove invisible/formatting Unicode code points.
    ///
    /// Also applied to the stored content of protected blocks before they
    /// are re-spliced.
    ///
    /// Default: `true`
    pub clean_unicode: bool,

    /// Remove inline LLM citation markers (`ContentReference[oaicite:N]...`).
    ///
    /// Default: `true`
    pub clean_content_references: bool,

    /// Strip `utm_`-prefixed query parameters from link and bare URLs.
    ///
    /// Also applied to the stored content of protected blocks before they
    /// are re-spliced.
    ///
    /// Default: `true`
    pub clean_utm_parameters: bool,

    /// Record a human-readable location descriptor for every removal.
    ///
    /// When disabled only the per-key counters are kept.
    ///
    /// Default: `true`
    pub track_locations: bool,

    /// Full override of the tracking-attribute catalog.
    ///
    /// `None` uses [`crate::catalog::TRACKING_ATTRIBUTES`]. Entries are
    /// deduplicated and empty names dropped, preserving first-seen order.
    ///
    /// Default: `None`
    pub attribute_overrides: Option<Vec<String>>,

    /// Full override of the invisible-Unicode catalog.
    ///
    /// `None` uses [`crate::catalog::default_unicode_catalog`].
    ///
    /// Default: `None`
    pub unicode_overrides: Option<Vec<UnicodeEntry>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            clean_attributes: true,
            clean_unicode: true,
            clean_content_references: true,
            clean_utm_parameters: true,
            track_locations: true,
            attribute_overrides: None,
            unicode_overrides: None,
        }
    }
}

impl Options {
    /// The effective tracking-attribute catalog: the override when present,
    /// otherwise the default list — deduplicated, empty entries removed.
    #[must_use]
    pub fn attribute_catalog(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut attrs = Vec::new();
        match &self.attribute_overrides {
            Some(overrides) => {
                for attr in overrides {
                    let attr = attr.trim();
                    if !attr.is_empty() && seen.insert(attr.to_ascii_lowercase()) {
                        attrs.push(attr.to_string());
                    }
                }
            }
            None => {
                for attr in catalog::TRACKING_ATTRIBUTES {
                    if seen.insert((*attr).to_string()) {
                        attrs.push((*attr).to_string());
                    }
                }
            }
        }
        attrs
    }

    /// The effective invisible-Unicode catalog.
    #[must_use]
    pub fn unicode_catalog(&self) -> Vec<UnicodeEntry> {
        match &self.unicode_overrides {
            Some(overrides) => overrides.clone(),
            None => catalog::default_unicode_catalog().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_enable_every_pass() {
        let opts = Options::default();
        assert!(opts.clean_attributes);
        assert!(opts.clean_unicode);
        assert!(opts.clean_content_references);
        assert!(opts.clean_utm_parameters);
        assert!(opts.track_locations);
        assert!(opts.attribute_overrides.is_none());
        assert!(opts.unicode_overrides.is_none());
    }

    #[test]
    fn attribute_catalog_defaults_to_full_list() {
        let opts = Options::default();
        let attrs = opts.attribute_catalog();
        assert_eq!(attrs.len(), catalog::TRACKING_ATTRIBUTES.len());
        assert_eq!(attrs[0], "data-start");
    }

    #[test]
    fn attribute_overrides_are_deduplicated_and_filtered() {
        let opts = Options {
            attribute_overrides: Some(vec![
                "data-llm".to_string(),
                String::new(),
                "data-llm".to_string(),
                "  data-custom ".to_string(),
            ]),
            ..Options::default()
        };
        assert_eq!(opts.attribute_catalog(), vec!["data-llm", "data-custom"]);
    }

    #[test]
    fn unicode_overrides_replace_catalog() {
        let opts = Options {
            unicode_overrides: Some(Vec::new()),
            ..Options::default()
        };
        assert!(opts.unicode_catalog().is_empty());
        assert_eq!(
            Options::default().unicode_catalog().len(),
            catalog::default_unicode_catalog().len()
        );
    }
}
