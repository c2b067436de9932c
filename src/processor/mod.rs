//! Single-file parsing pipeline.
//!
//! Orchestrates the complete parse of one IOS file: text decoding, section
//! tree, channel tables, data block, time axis, identity resolution,
//! vocabulary matching and global attributes. The steps that run depend on
//! the [`DatasetProfile`](crate::config::DatasetProfile) of the file's kind.

pub mod attributes;
pub mod dataset;
pub mod variables;

#[cfg(test)]
pub mod tests;

pub use attributes::{GlobalContext, attribute_key, global_attributes, instrument_string};
pub use dataset::ParsedDataset;
pub use variables::{BuiltVariables, ChannelData, build_variables};

use crate::config::{PostStep, ProcessorConfig};
use crate::constants::{keys, sections};
use crate::data::{DecodeInput, decode_data};
use crate::error::{IosError, Result};
use crate::geo::AreaLookup;
use crate::header::{ChannelTables, SectionTree, file_count, read_channels, read_location};
use crate::identity::{normalize_date_time_name, rename_duplicates};
use crate::models::{ChannelDescriptor, DatasetKind};
use crate::report::ParseReport;
use crate::time::{TimeAxisInput, derive_record_times, parse_header_time, verify_first_record};
use crate::vocabulary::{VocabularyOptions, VocabularyTable, apply_vocabulary};
use std::path::Path;
use tracing::{debug, info};

/// Parser for IOS files
pub struct IosProcessor {
    config: ProcessorConfig,
    vocabulary: Option<VocabularyTable>,
    areas: Option<Box<dyn AreaLookup + Send + Sync>>,
}

impl std::fmt::Debug for IosProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IosProcessor")
            .field("config", &self.config)
            .field("vocabulary_entries", &self.vocabulary.as_ref().map(VocabularyTable::len))
            .field("area_lookup", &self.areas.is_some())
            .finish()
    }
}

impl Default for IosProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl IosProcessor {
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
            vocabulary: None,
            areas: None,
        }
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// Match variables against a vocabulary table
    pub fn with_vocabulary(mut self, vocabulary: VocabularyTable) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Label locations with the areas containing them
    pub fn with_area_lookup(mut self, areas: impl AreaLookup + Send + Sync + 'static) -> Self {
        self.areas = Some(Box::new(areas));
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Read and parse a file; the dataset kind comes from its extension
    pub fn parse_file(&self, path: &Path) -> Result<ParsedDataset> {
        let kind = DatasetKind::from_path(path).ok_or_else(|| IosError::Configuration {
            message: format!("Unknown dataset kind for file: {}", path.display()),
        })?;
        let bytes = std::fs::read(path).map_err(|e| IosError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.parse_bytes(&file, kind, &bytes)
    }

    /// Parse file content already in memory
    pub fn parse_bytes(&self, file: &str, kind: DatasetKind, bytes: &[u8]) -> Result<ParsedDataset> {
        let text = decode_text(bytes, self.config.lossy_decoding, file)?;
        self.parse_text(file, kind, &text)
    }

    /// Parse the text of one file
    pub fn parse_text(&self, file: &str, kind: DatasetKind, text: &str) -> Result<ParsedDataset> {
        let profile = self.config.profile(kind)?;
        let mut report = ParseReport::new(file);

        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let tree = SectionTree::parse(&lines, &mut report)?;

        for section in &profile.required_sections {
            if !tree.contains(section) {
                return Err(IosError::MissingSection {
                    file: file.to_string(),
                    section: section.clone(),
                });
            }
        }

        // Absent metadata sections are reported; LOCATION is reported by read_location
        for section in [sections::ADMINISTRATION, sections::INSTRUMENT] {
            if profile.optional_sections.iter().any(|s| s == section) {
                tree.section_or_empty(section, &mut report);
            }
        }

        // Channel tables and data block
        let ChannelTables { channels, details } = read_channels(&tree, file)?;
        let matrix = decode_data(
            DecodeInput {
                lines: tree.data_lines(file)?,
                channel_count: channels.len(),
                declared_records: file_count(&tree, keys::NUMBER_OF_RECORDS, file)?,
                format: tree.value(sections::FILE, keys::FORMAT),
                details: details.as_deref(),
            },
            &mut report,
        )?;
        debug!(
            "{}: decoded {}x{} with {} strategy",
            file,
            matrix.rows(),
            matrix.cols(),
            matrix.strategy()
        );

        let names = channel_names(&channels, &mut report);

        // Time axis
        let start_time = tree
            .value(sections::FILE, keys::START_TIME)
            .map(|value| parse_header_time(value, file))
            .transpose()?;
        let record_times = if profile.runs(PostStep::RecordTimes) {
            let column = |wanted: &str| {
                names
                    .iter()
                    .position(|name| name == wanted)
                    .map(|col| matrix.column_text(col))
            };
            let dates = column("Date");
            let times = column("Time");
            let derived = derive_record_times(&TimeAxisInput {
                dates: dates.as_deref(),
                times: times.as_deref(),
                start: start_time,
                increment: tree.value(sections::FILE, keys::TIME_INCREMENT),
                records: matrix.rows(),
                file,
            })?;
            if let (true, Some(start)) = (self.config.check_start_time, start_time) {
                verify_first_record(&derived, start, file)?;
            }
            Some(derived)
        } else {
            None
        };

        // Variables
        let mut built = build_variables(
            &ChannelData {
                channels: &channels,
                names: &names,
                details: details.as_deref(),
                matrix: &matrix,
                kind,
            },
            profile.runs(PostStep::ResolveIdentities),
            &mut report,
        )?;

        let areas = self.areas.as_deref().map(|a| a as &dyn AreaLookup);
        let location = read_location(&tree, &mut report, areas);

        let global_attributes = global_attributes(&GlobalContext {
            tree: &tree,
            profile,
            kind,
            start_time,
            location: &location,
        });

        let mut derived = Vec::new();
        if let (true, Some(vocabulary)) = (
            profile.runs(PostStep::ApplyVocabulary),
            self.vocabulary.as_ref(),
        ) {
            let instrument = instrument_string(&tree);
            let outcome = apply_vocabulary(
                vocabulary,
                &mut built.variables,
                &built.keys,
                &VocabularyOptions {
                    organizations: &self.config.organizations,
                    instrument: &instrument,
                    global_attributes: &global_attributes,
                    file,
                },
            );
            report.extend(outcome.warnings);
            derived = outcome.derived;
        }

        info!(
            file,
            kind = kind.label(),
            records = matrix.rows(),
            variables = built.variables.len(),
            derived = derived.len(),
            warnings = report.warnings.len(),
            "Parsed IOS file"
        );

        Ok(ParsedDataset {
            file: file.to_string(),
            kind,
            tree,
            channels,
            matrix,
            start_time,
            record_times,
            variables: built.variables,
            derived,
            global_attributes,
            location,
            report,
        })
    }
}

/// Decode raw bytes; with `lossy`, bytes outside ASCII are dropped from
/// files that are not valid UTF-8
pub fn decode_text(bytes: &[u8], lossy: bool, file: &str) -> Result<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) if lossy => {
            debug!("{}: dropping non-ASCII bytes", file);
            Ok(bytes
                .iter()
                .filter(|b| b.is_ascii())
                .map(|b| *b as char)
                .collect())
        }
        Err(e) => Err(IosError::Decode {
            file: file.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Channel names with `Date`/`Time` normalized and duplicates renamed
fn channel_names(
    channels: &[ChannelDescriptor],
    report: &mut ParseReport,
) -> Vec<String> {
    let normalized: Vec<String> = channels
        .iter()
        .map(|channel| {
            let (name, warning) = normalize_date_time_name(channel.clean_name());
            if let Some(warning) = warning {
                report.record(warning);
            }
            name
        })
        .collect();

    let (renamed, warnings) = rename_duplicates(&normalized);
    report.extend(warnings);
    renamed
}

/// Parse a file with the default processor
pub fn parse_file(path: &Path) -> Result<ParsedDataset> {
    IosProcessor::new().parse_file(path)
}
