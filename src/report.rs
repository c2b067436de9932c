//! Non-fatal anomalies collected while parsing one file
//!
//! Every warning is emitted through `tracing` as soon as it is recorded and is
//! also kept in the [`ParseReport`] so the caller can inspect or persist it.

use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A non-fatal anomaly found while parsing a file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseWarning {
    /// A requested optional section is absent
    MissingSection { section: String },

    /// A header line that is neither key/value, comment nor blank
    UnrecognizedLine { line_number: usize, line: String },

    /// No vocabulary entry matched a channel
    VocabularyMiss { code: String, units: String },

    /// A repeated channel name was renamed
    DuplicateRename { original: String, renamed: String },

    /// No free canonical code within the suffix limit; the last attempt was kept
    SuffixExhaustion { code: String, attempts: u32 },

    /// A channel starting with Date/Time that does not follow a known pattern
    UnknownDateTimeChannel { name: String },

    /// A data decode strategy failed and the next one was tried
    StrategyFallback { strategy: String, reason: String },

    /// A vocabulary row's derived variable could not be computed and was skipped
    DerivationFailed {
        code: String,
        target: String,
        reason: String,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MissingSection { section } => {
                write!(f, "Section *{} not found", section)
            }
            ParseWarning::UnrecognizedLine { line_number, line } => {
                write!(f, "Unrecognized header line {}: '{}'", line_number, line)
            }
            ParseWarning::VocabularyMiss { code, units } => {
                write!(f, "No vocabulary match for '{}' [{}]", code, units)
            }
            ParseWarning::DuplicateRename { original, renamed } => {
                write!(f, "Duplicated channel '{}' renamed to '{}'", original, renamed)
            }
            ParseWarning::SuffixExhaustion { code, attempts } => write!(
                f,
                "No free code after {} attempts, keeping colliding code '{}'",
                attempts, code
            ),
            ParseWarning::UnknownDateTimeChannel { name } => {
                write!(f, "Unknown date/time channel '{}'", name)
            }
            ParseWarning::StrategyFallback { strategy, reason } => {
                write!(f, "Data strategy {} failed: {}", strategy, reason)
            }
            ParseWarning::DerivationFailed {
                code,
                target,
                reason,
            } => write!(f, "Cannot derive {} from {}: {}", target, code, reason),
        }
    }
}

/// Warnings collected for one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseReport {
    /// File identity used to tag every warning
    pub file: String,

    pub warnings: Vec<ParseWarning>,
}

impl ParseReport {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            warnings: Vec::new(),
        }
    }

    /// Record a warning and emit it to the log stream
    pub fn record(&mut self, warning: ParseWarning) {
        warn!(file = %self.file, "{}", warning);
        self.warnings.push(warning);
    }

    /// Append warnings produced by a pure step
    pub fn extend(&mut self, warnings: impl IntoIterator<Item = ParseWarning>) {
        for warning in warnings {
            self.record(warning);
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of warnings matching a predicate
    pub fn count(&self, predicate: impl Fn(&ParseWarning) -> bool) -> usize {
        self.warnings.iter().filter(|w| predicate(w)).count()
    }

    /// One-line summary of the report
    pub fn summary(&self) -> String {
        format!("{}: {} warning(s)", self.file, self.warnings.len())
    }
}
