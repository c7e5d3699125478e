//! # llm-trace-cleaner
//!
//! Removes the traces LLM-assisted writing leaves behind in HTML content:
//! tracking attributes, invisible Unicode code points, inline citation
//! markers, and `utm_` query parameters.
//!
//! Page-builder and block-editor markup (Gutenberg comment blocks,
//! Elementor, Divi, and similar builder sections) is shielded from the
//! structural passes: protected regions are lifted out before cleaning,
//! text-level passes run over their contents in isolation, and the
//! regions are spliced back byte-identically in structure.
//!
//! ## Quick Start
//!
//! ```rust
//! use llm_trace_cleaner::clean;
//!
//! let html = "<p data-start=\"1\" data-end=\"9\">Hello\u{200B}World</p>";
//!
//! let result = clean(html);
//! assert_eq!(result.html, "<p>HelloWorld</p>");
//! println!("{}", result.format_stats());
//! ```
//!
//! ## Features
//!
//! - **Attribute Stripping**: Removes catalog attributes and
//!   pattern-matched tracking ids, via a DOM pass with a regex fallback
//! - **Unicode Cleaning**: Removes zero-width and other invisible code
//!   points, after decoding escaped forms (`​`, `&#x200b;`)
//! - **Citation Removal**: Strips `ContentReference[oaicite:N]` markers
//! - **UTM Stripping**: Drops `utm_` query parameters from link and bare
//!   URLs, preserving all other parameters
//! - **Analysis**: Non-mutating preview of what a clean would remove

mod blocks;
mod clean;
mod error;
mod options;
mod references;
mod result;
mod unicode;
mod utm;

/// Tracking-attribute, invisible-Unicode, and citation-marker catalogs.
pub mod catalog;

/// Non-mutating content analysis.
pub mod analyze;

/// Attribute-stripping strategies (tree and regex text).
pub mod attributes;

/// Change statistics, location records, and their log formatting.
pub mod stats;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use analyze::Analysis;
pub use catalog::UnicodeEntry;
pub use error::{Error, Result};
pub use options::Options;
pub use result::CleanResult;
pub use stats::{ChangeLocation, ChangeLocations, ChangeStats};

/// Cleans an HTML fragment using default options.
///
/// Every pass is enabled and location tracking is on. Cleaning never
/// fails: parse degradation falls back to the text strategy internally.
///
/// # Example
///
/// ```rust
/// use llm_trace_cleaner::clean;
///
/// let result = clean("<p data-llm=\"1\">Text [oaicite:0]</p>");
/// assert_eq!(result.html, "<p>Text </p>");
/// ```
#[must_use]
pub fn clean(html: &str) -> CleanResult {
    clean_with_options(html, &Options::default())
}

/// Cleans an HTML fragment with custom options.
///
/// # Example
///
/// ```rust
/// use llm_trace_cleaner::{clean_with_options, Options};
///
/// let options = Options {
///     clean_utm_parameters: false,
///     ..Options::default()
/// };
/// let html = "<a href=\"https://example.com/?utm_source=x\">link</a>";
/// let result = clean_with_options(html, &options);
/// assert_eq!(result.html, html);
/// ```
#[must_use]
pub fn clean_with_options(html: &str, options: &Options) -> CleanResult {
    clean::clean_html(html, options)
}

/// Cleans HTML bytes with automatic encoding detection.
///
/// Detects the charset declared in `<meta charset="...">` or the
/// `http-equiv` content-type form, transcodes to UTF-8 (replacing invalid
/// sequences), then cleans. Defaults to UTF-8 when nothing is declared.
///
/// # Example
///
/// ```rust
/// use llm_trace_cleaner::clean_bytes;
///
/// let html = b"<p data-start=\"1\">Caf\xC3\xA9</p>";
/// let result = clean_bytes(html);
/// assert_eq!(result.html, "<p>Caf\u{e9}</p>");
/// ```
#[must_use]
pub fn clean_bytes(html: &[u8]) -> CleanResult {
    clean_bytes_with_options(html, &Options::default())
}

/// Cleans HTML bytes with custom options and automatic encoding detection.
#[must_use]
pub fn clean_bytes_with_options(html: &[u8], options: &Options) -> CleanResult {
    let html_str = encoding::transcode_to_utf8(html);
    clean_with_options(&html_str, options)
}

/// Analyzes an HTML fragment using default options, without mutating it.
///
/// Reports which catalog entries would match and how often, so a caller
/// can preview a clean before committing to it.
///
/// # Example
///
/// ```rust
/// use llm_trace_cleaner::analyze;
///
/// let report = analyze("<p data-llm=\"1\">x</p>");
/// assert_eq!(report.total_attributes, 1);
/// ```
#[must_use]
pub fn analyze(html: &str) -> Analysis {
    analyze_with_options(html, &Options::default())
}

/// Analyzes an HTML fragment with custom options, without mutating it.
#[must_use]
pub fn analyze_with_options(html: &str, options: &Options) -> Analysis {
    analyze::analyze_content(html, options)
}
