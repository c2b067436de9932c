//! Core data structures shared across the processor.
//!
//! Defines dataset kinds, channel metadata read from the header tables,
//! typed column values and the canonical variables handed to the writer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Kinds of IOS files handled by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatasetKind {
    Ctd,
    CurrentMeter,
    MooredCtd,
    Bottle,
}

impl DatasetKind {
    /// Detect dataset kind from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_string_lossy().to_lowercase();

        match extension.as_str() {
            "ctd" => Some(DatasetKind::Ctd),
            "cur" => Some(DatasetKind::CurrentMeter),
            "mctd" => Some(DatasetKind::MooredCtd),
            "bot" | "che" => Some(DatasetKind::Bottle),
            _ => None,
        }
    }

    /// Short label used in logs and global attributes
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Ctd => "ctd",
            DatasetKind::CurrentMeter => "cur",
            DatasetKind::MooredCtd => "mctd",
            DatasetKind::Bottle => "bot",
        }
    }
}

/// Storage type declared for a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageType {
    Real32,
    Int32,
    Text,
}

impl StorageType {
    /// Map an IOS type letter (`R4`, `I`, `D`, `DT`, ...) to a storage type.
    ///
    /// Returns `None` when neither the full token nor its first letter is known.
    pub fn from_type_letter(letter: &str) -> Option<Self> {
        let letter = letter.trim().to_uppercase();
        if letter.is_empty() {
            return Some(StorageType::Text);
        }

        let lookup = |code: &str| match code {
            "R" | "F" | "E" => Some(StorageType::Real32),
            "I" => Some(StorageType::Int32),
            "D" | "DT" | "T" => Some(StorageType::Text),
            _ => None,
        };

        lookup(&letter).or_else(|| {
            letter
                .chars()
                .next()
                .and_then(|first| lookup(&first.to_string()))
        })
    }

    /// Resolve the storage type from the detail table's type and format columns
    pub fn resolve(type_letter: &str, format: &str) -> Self {
        if !type_letter.trim().is_empty() {
            if let Some(storage) = Self::from_type_letter(type_letter) {
                return storage;
            }
        }
        if format.trim().is_empty() {
            return StorageType::Text;
        }
        Self::from_type_letter(format).unwrap_or(StorageType::Text)
    }
}

/// One row of the `$TABLE: CHANNELS` subsection, joined with its detail row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelDescriptor {
    /// 0-based position; joins descriptor, detail and matrix column
    pub ordinal: usize,
    pub name: String,
    pub units: String,
    pub minimum: String,
    pub maximum: String,
    pub width: Option<usize>,
    pub format: Option<String>,
    pub storage: StorageType,
}

impl ChannelDescriptor {
    /// Channel name with surrounding quotes and whitespace removed
    pub fn clean_name(&self) -> &str {
        strip_quotes(&self.name)
    }

    /// Units with surrounding quotes and whitespace removed
    pub fn clean_units(&self) -> &str {
        strip_quotes(&self.units)
    }
}

/// One row of the optional `$TABLE: CHANNEL DETAIL` subsection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelDetail {
    pub ordinal: usize,
    pub pad: String,
    pub start: String,
    pub width: String,
    pub format: String,
    pub type_letter: String,
    pub decimal_places: String,
}

impl ChannelDetail {
    /// Declared width, when it is a positive integer
    pub fn declared_width(&self) -> Option<usize> {
        self.width.trim().parse::<usize>().ok().filter(|w| *w > 0)
    }

    /// Pad literal interpreted as a numeric fill value
    pub fn fill_value(&self) -> Option<f64> {
        strip_quotes(&self.pad).parse::<f64>().ok()
    }

    pub fn storage(&self) -> StorageType {
        StorageType::resolve(&self.type_letter, &self.format)
    }
}

/// Typed values of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ColumnValues {
    Real32(Vec<f32>),
    Int32(Vec<i32>),
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Real32(values) => values.len(),
            ColumnValues::Int32(values) => values.len(),
            ColumnValues::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values as f64, or `None` for text columns
    pub fn as_f64(&self) -> Option<Vec<f64>> {
        match self {
            ColumnValues::Real32(values) => Some(values.iter().map(|v| *v as f64).collect()),
            ColumnValues::Int32(values) => Some(values.iter().map(|v| *v as f64).collect()),
            ColumnValues::Text(_) => None,
        }
    }

    pub fn storage(&self) -> StorageType {
        match self {
            ColumnValues::Real32(_) => StorageType::Real32,
            ColumnValues::Int32(_) => StorageType::Int32,
            ColumnValues::Text(_) => StorageType::Text,
        }
    }
}

/// A channel with its resolved identity, ready for the array writer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalVariable {
    pub code: String,
    pub units: String,
    pub standard_name: Option<String>,
    pub long_name: Option<String>,
    pub fill_value: Option<f64>,
    /// Ordinal of the source channel, `None` for derived variables
    pub source_ordinal: Option<usize>,
    pub values: ColumnValues,
    /// Additional attributes (raw header values, vocabulary terms)
    pub attributes: BTreeMap<String, String>,
}

/// Decoded `*LOCATION` coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub geographic_area: Option<String>,
}

/// Remove one level of single quotes and surrounding whitespace
pub fn strip_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('\'').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('\'').unwrap_or(trimmed);
    trimmed.trim()
}
