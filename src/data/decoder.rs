//! Data block decoding
//!
//! Decoding is a small state machine. Each strategy is attempted at most once,
//! in order, and the first result with the expected shape is accepted:
//!
//! ```text
//! TryDeclaredFormat -> TrySynthesizedWidth -> TryWhitespace -> Failed
//!        \__________________\_____________________\__________-> Done
//! ```

use super::format::FortranFormat;
use super::layout::{slice_record, synthesize_widths};
use super::matrix::DataMatrix;
use crate::error::{IosError, Result};
use crate::models::ChannelDetail;
use crate::report::{ParseReport, ParseWarning};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Strategy that produced a [`DataMatrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeStrategy {
    DeclaredFormat,
    SynthesizedWidth,
    Whitespace,
}

impl fmt::Display for DecodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeStrategy::DeclaredFormat => "declared-format",
            DecodeStrategy::SynthesizedWidth => "synthesized-width",
            DecodeStrategy::Whitespace => "whitespace",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    TryDeclaredFormat,
    TrySynthesizedWidth,
    TryWhitespace,
    Done(DecodeStrategy),
    Failed,
}

/// Everything the strategies need about one data block
#[derive(Debug, Clone, Copy)]
pub struct DecodeInput<'a> {
    pub lines: &'a [String],
    pub channel_count: usize,
    /// `NUMBER OF RECORDS`, when declared
    pub declared_records: Option<usize>,
    /// `FORMAT`, when declared
    pub format: Option<&'a str>,
    pub details: Option<&'a [ChannelDetail]>,
}

/// Drives the strategies one transition at a time
#[derive(Debug)]
pub struct DataDecoder<'a> {
    input: DecodeInput<'a>,
    state: DecodeState,
    failures: Vec<(DecodeStrategy, String)>,
}

impl<'a> DataDecoder<'a> {
    pub fn new(input: DecodeInput<'a>) -> Self {
        Self {
            input,
            state: DecodeState::TryDeclaredFormat,
            failures: Vec::new(),
        }
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Strategies that were attempted and rejected, with the reason
    pub fn failures(&self) -> &[(DecodeStrategy, String)] {
        &self.failures
    }

    /// Perform one transition. Returns the matrix when the current strategy
    /// succeeds; terminal states return `None` without doing anything.
    pub fn step(&mut self) -> Option<DataMatrix> {
        let (strategy, next) = match self.state {
            DecodeState::TryDeclaredFormat => {
                (DecodeStrategy::DeclaredFormat, DecodeState::TrySynthesizedWidth)
            }
            DecodeState::TrySynthesizedWidth => {
                (DecodeStrategy::SynthesizedWidth, DecodeState::TryWhitespace)
            }
            DecodeState::TryWhitespace => (DecodeStrategy::Whitespace, DecodeState::Failed),
            DecodeState::Done(_) | DecodeState::Failed => return None,
        };

        let attempt = match strategy {
            DecodeStrategy::DeclaredFormat => self
                .input
                .format
                .filter(|f| !f.trim().is_empty())
                .map(|format| self.try_declared_format(format)),
            DecodeStrategy::SynthesizedWidth => self
                .input
                .details
                .map(|details| self.try_synthesized_width(details)),
            DecodeStrategy::Whitespace => Some(self.try_whitespace()),
        };

        match attempt.map(|result| result.and_then(|matrix| self.check_shape(matrix))) {
            Some(Ok(matrix)) => {
                debug!("Data block decoded with {} strategy", strategy);
                self.state = DecodeState::Done(strategy);
                Some(matrix)
            }
            Some(Err(reason)) => {
                debug!("{} strategy rejected: {}", strategy, reason);
                self.failures.push((strategy, reason));
                self.state = next;
                None
            }
            None => {
                self.state = next;
                None
            }
        }
    }

    /// Run to a terminal state
    pub fn run(&mut self) -> Option<DataMatrix> {
        loop {
            if let Some(matrix) = self.step() {
                return Some(matrix);
            }
            if self.state == DecodeState::Failed {
                return None;
            }
        }
    }

    fn try_declared_format(&self, format: &str) -> std::result::Result<DataMatrix, String> {
        let format = FortranFormat::parse(format)?;
        if format.field_count() != self.input.channel_count {
            return Err(format!(
                "format has {} fields for {} channels",
                format.field_count(),
                self.input.channel_count
            ));
        }

        let rows = records(self.input.lines)
            .map(|line| format.read_record(line))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        DataMatrix::from_numeric_rows(rows, self.input.channel_count, DecodeStrategy::DeclaredFormat)
    }

    fn try_synthesized_width(&self, details: &[ChannelDetail]) -> std::result::Result<DataMatrix, String> {
        let widths = synthesize_widths(details)?;
        let rows = records(self.input.lines)
            .map(|line| slice_record(line, &widths))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        DataMatrix::from_text_rows(rows, widths.len(), DecodeStrategy::SynthesizedWidth)
    }

    fn try_whitespace(&self) -> std::result::Result<DataMatrix, String> {
        let rows: Vec<Vec<String>> = records(self.input.lines)
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .collect();
        let cols = rows.first().map(Vec::len).unwrap_or(self.input.channel_count);
        DataMatrix::from_text_rows(rows, cols, DecodeStrategy::Whitespace)
    }

    fn check_shape(&self, matrix: DataMatrix) -> std::result::Result<DataMatrix, String> {
        if matrix.cols() != self.input.channel_count {
            return Err(format!(
                "{} columns for {} channels",
                matrix.cols(),
                self.input.channel_count
            ));
        }
        if let Some(expected) = self.input.declared_records {
            if matrix.rows() != expected {
                return Err(format!("{} rows for {} declared records", matrix.rows(), expected));
            }
        }
        Ok(matrix)
    }
}

/// Lines carrying a record; blank or single-character lines are skipped
fn records(lines: &[String]) -> impl Iterator<Item = &String> {
    lines.iter().filter(|line| line.trim().len() > 1)
}

/// Decode a data block, recording a warning for every rejected strategy
pub fn decode_data(input: DecodeInput<'_>, report: &mut ParseReport) -> Result<DataMatrix> {
    let mut decoder = DataDecoder::new(input);
    let matrix = decoder.run();

    for (strategy, reason) in decoder.failures() {
        report.record(ParseWarning::StrategyFallback {
            strategy: strategy.to_string(),
            reason: reason.clone(),
        });
    }

    matrix.ok_or_else(|| IosError::DataDecode {
        file: report.file.clone(),
        reason: decoder
            .failures()
            .iter()
            .map(|(strategy, reason)| format!("{}: {}", strategy, reason))
            .collect::<Vec<_>>()
            .join("; "),
    })
}
