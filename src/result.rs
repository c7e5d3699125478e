//! Result type for cleaning output.

use crate::stats::{self, ChangeLocations, ChangeStats};

/// Result of one cleaning invocation: the cleaned fragment plus the
/// per-call change statistics and location records.
///
/// Detecting "nothing changed" is the caller's job (compare `html` with
/// the input); the statistics distinguish catalog removals from
/// incidental normalization the parser may have performed.
#[derive(Debug, Clone, Default)]
pub struct CleanResult {
    /// The cleaned HTML fragment.
    pub html: String,

    stats: ChangeStats,
    locations: ChangeLocations,
}

impl CleanResult {
    pub(crate) fn new(html: String, stats: ChangeStats, locations: ChangeLocations) -> Self {
        Self {
            html,
            stats,
            locations,
        }
    }

    /// Counter per change key for this call.
    #[must_use]
    pub fn stats(&self) -> &ChangeStats {
        &self.stats
    }

    /// Location records per `<change-kind>:<item>` for this call. Empty
    /// when location tracking was disabled.
    #[must_use]
    pub fn locations(&self) -> &ChangeLocations {
        &self.locations
    }

    /// One-line summary of the statistics: `<key>: <n> removed; ...`.
    #[must_use]
    pub fn format_stats(&self) -> String {
        stats::format_stats(&self.stats)
    }

    /// Statistics with location detail, as rendered into log records:
    /// `<item>: <count> removed [at: <location> (<count>), ...]`.
    #[must_use]
    pub fn format_details(&self) -> String {
        stats::format_details(&self.stats, &self.locations)
    }
}
