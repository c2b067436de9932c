//! Result of parsing one IOS file

use crate::data::DataMatrix;
use crate::header::SectionTree;
use crate::models::{CanonicalVariable, ChannelDescriptor, DatasetKind, Location};
use crate::report::{ParseReport, ParseWarning};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything extracted from one file, handed to the array writer
#[derive(Debug, Clone, Serialize)]
pub struct ParsedDataset {
    pub(super) file: String,
    pub(super) kind: DatasetKind,
    pub(super) tree: SectionTree,
    pub(super) channels: Vec<ChannelDescriptor>,
    pub(super) matrix: DataMatrix,
    pub(super) start_time: Option<DateTime<Utc>>,
    pub(super) record_times: Option<Vec<DateTime<Utc>>>,
    pub(super) variables: Vec<CanonicalVariable>,
    pub(super) derived: Vec<CanonicalVariable>,
    pub(super) global_attributes: BTreeMap<String, String>,
    pub(super) location: Location,
    pub(super) report: ParseReport,
}

impl ParsedDataset {
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn tree(&self) -> &SectionTree {
        &self.tree
    }

    pub fn channels(&self) -> &[ChannelDescriptor] {
        &self.channels
    }

    pub fn matrix(&self) -> &DataMatrix {
        &self.matrix
    }

    /// `START TIME` of the `*FILE` section, in UTC
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Per-record timestamps, for kinds that derive a time axis
    pub fn record_times(&self) -> Option<&[DateTime<Utc>]> {
        self.record_times.as_deref()
    }

    /// One variable per channel, in channel order
    pub fn variables(&self) -> &[CanonicalVariable] {
        &self.variables
    }

    /// Variables derived from vocabulary rules
    pub fn derived(&self) -> &[CanonicalVariable] {
        &self.derived
    }

    /// Channel or derived variable by code
    pub fn variable(&self, code: &str) -> Option<&CanonicalVariable> {
        self.variables
            .iter()
            .chain(&self.derived)
            .find(|v| v.code == code)
    }

    pub fn global_attributes(&self) -> &BTreeMap<String, String> {
        &self.global_attributes
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.report.warnings
    }
}
