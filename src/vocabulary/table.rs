//! Vocabulary table loaded from CSV
//!
//! ```text
//! organization,name,accepted_units,accepted_instruments,accepted_scale,standard_name,long_name,units,sdn_parameter_urn,variable_name,apply_function
//! ios,temperature,deg c|degc,,ITS-90,sea_water_temperature,Sea Water Temperature,degC,SDN:P01::TEMPS901,TEMPS9XX,
//! ```
//!
//! Empty cells deserialize to `None`.

use crate::error::{IosError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One row of the vocabulary table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyEntry {
    pub organization: String,
    /// Raw channel name or code the row applies to
    pub name: String,
    /// `|`-separated accepted unit labels
    pub accepted_units: Option<String>,
    /// Regex searched in the channel long name or the instrument string
    pub accepted_instruments: Option<String>,
    /// `|`-separated accepted reference scales
    pub accepted_scale: Option<String>,
    pub standard_name: Option<String>,
    pub long_name: Option<String>,
    pub units: Option<String>,
    pub sdn_parameter_urn: Option<String>,
    /// Target of a derived variable; the matched channel is decorated when absent
    pub variable_name: Option<String>,
    /// Transform used to compute the derived variable
    pub apply_function: Option<String>,
}

impl VocabularyEntry {
    /// Whether the row applies to a channel name or code
    pub fn applies_to(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Attributes copied onto the decorated or derived variable
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        [
            ("standard_name", &self.standard_name),
            ("long_name", &self.long_name),
            ("units", &self.units),
            ("sdn_parameter_urn", &self.sdn_parameter_urn),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

/// All vocabulary rows, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyTable {
    entries: Vec<VocabularyEntry>,
}

impl VocabularyTable {
    pub fn from_entries(entries: Vec<VocabularyEntry>) -> Self {
        Self { entries }
    }

    /// Load a table from CSV text with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut entries = Vec::new();
        for (row, record) in reader.deserialize::<VocabularyEntry>().enumerate() {
            let entry = record.map_err(|e| IosError::Vocabulary {
                message: format!("Failed to read vocabulary row {}", row + 1),
                source: Some(e),
            })?;
            if entry.name.is_empty() {
                return Err(IosError::vocabulary(format!(
                    "Vocabulary row {} has no name",
                    row + 1
                )));
            }
            entries.push(entry);
        }

        debug!("Loaded {} vocabulary entries", entries.len());
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| IosError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_reader(file)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows for a channel, restricted to the first organization of
    /// `organizations` that has any
    pub fn candidates<'a>(
        &'a self,
        names: &[&str],
        organizations: &[String],
    ) -> Vec<&'a VocabularyEntry> {
        let matching: Vec<&VocabularyEntry> = self
            .entries
            .iter()
            .filter(|entry| names.iter().any(|name| entry.applies_to(name)))
            .collect();

        organizations
            .iter()
            .map(|organization| {
                matching
                    .iter()
                    .copied()
                    .filter(|entry| entry.organization.eq_ignore_ascii_case(organization))
                    .collect::<Vec<_>>()
            })
            .find(|entries| !entries.is_empty())
            .unwrap_or_default()
    }
}
