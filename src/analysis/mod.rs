//! Pattern analysis: descriptive statistics over a profile's symptom entries.
//!
//! `analyze` is a pure function: it reads the entries and symptom catalogue
//! it is given (already scoped to one profile) and builds an
//! [`AnalysisReport`] of independent sections. A section without enough data
//! is reported as `hasData: false`; nothing here can fail or mutate input.

mod context;
mod environment;
mod frequency;
mod stats;
mod trend;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{common_triggers, context_patterns};
pub use environment::{time_patterns, weather_patterns};
pub use frequency::{symptom_frequency, UNKNOWN_SYMPTOM_EMOJI, UNKNOWN_SYMPTOM_NAME};
pub use trend::{severity_trend, MIN_TREND_ENTRIES};
pub use types::*;

use crate::models::{Entry, Symptom};

/// Entries required before any pattern is reported.
pub const MIN_ENTRIES: usize = 5;

/// Builds the full pattern report.
pub fn analyze(entries: &[Entry], symptoms: &[Symptom]) -> AnalysisReport {
    if entries.len() < MIN_ENTRIES {
        return AnalysisReport {
            has_enough_data: false,
            message: Some(format!(
                "At least {MIN_ENTRIES} entries required for pattern analysis (currently {}).",
                entries.len()
            )),
            total_entries: entries.len(),
            weather_patterns: None,
            time_patterns: None,
            context_patterns: None,
            symptom_frequency: None,
            severity_trends: None,
            common_triggers: None,
        };
    }

    AnalysisReport {
        has_enough_data: true,
        message: None,
        total_entries: entries.len(),
        weather_patterns: Some(weather_patterns(entries)),
        time_patterns: Some(time_patterns(entries)),
        context_patterns: Some(context_patterns(entries)),
        symptom_frequency: Some(symptom_frequency(entries, symptoms)),
        severity_trends: Some(severity_trend(entries)),
        common_triggers: Some(common_triggers(entries)),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
