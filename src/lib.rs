//! IOS Processor Library
//!
//! A Rust library for reading IOS shell-format oceanographic instrument files
//! (CTD casts, bottle samples, current meters and moored CTDs) into typed,
//! self-describing datasets.
//!
//! This library provides tools for:
//! - Parsing the `*SECTION` header, including `$TABLE` subsections decoded
//!   through their column masks
//! - Decoding the data block from a declared Fortran format, a fixed-width
//!   layout synthesized from the channel detail table, or a whitespace split
//! - Normalizing header times and deriving per-record timestamps
//! - Resolving channels to canonical variable codes and units
//! - Decorating variables from a caller-supplied vocabulary table
//! - Collecting non-fatal anomalies in a per-file [`ParseReport`]

pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod geo;
pub mod header;
pub mod identity;
pub mod models;
pub mod processor;
pub mod report;
pub mod time;
pub mod vocabulary;

// Re-export commonly used types
pub use config::{DatasetProfile, PostStep, ProcessorConfig};
pub use data::{DataMatrix, DecodeStrategy};
pub use error::{FailureCategory, IosError, Result};
pub use geo::AreaLookup;
pub use header::SectionTree;
pub use models::{CanonicalVariable, ChannelDescriptor, ColumnValues, DatasetKind, Location, StorageType};
pub use processor::{IosProcessor, ParsedDataset, parse_file};
pub use report::{ParseReport, ParseWarning};
pub use vocabulary::{VocabularyEntry, VocabularyTable};
