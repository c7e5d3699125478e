//! Error types for llm-trace-cleaner.
//!
//! Every failure the cleaning passes can hit is recoverable: the tree-based
//! attribute strategy degrades to the text strategy, unparseable URLs are
//! left alone, and malformed block markup is skipped. As a result `Error`
//! never crosses the public `clean`/`analyze` boundary; it only travels
//! between the strategy functions and the orchestrator.

/// Error type for cleaning operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The DOM-based strategy could not produce a usable document.
    #[error("HTML parsing failed: {0}")]
    Parse(String),
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, Error>;
