//! IOS shell header parsing
//!
//! The header is the block of `*SECTION` groups in front of `*END OF HEADER`.
//! Parsing happens in two passes:
//!
//! 1. [`tokenizer`] classifies each raw line
//! 2. [`section_tree`] groups the classified lines into sections and subsections
//!
//! The table subsections (`$TABLE: CHANNELS`, `$TABLE: CHANNEL DETAIL`) are
//! decoded afterwards with the column mask found on their second line
//! ([`column_mask`]), and [`channels`] / [`location`] expose the typed views the
//! rest of the processor needs.

pub mod channels;
pub mod column_mask;
pub mod location;
pub mod section_tree;
pub mod tokenizer;

pub use channels::{ChannelTables, file_count, read_channel_details, read_channels};
pub use column_mask::{apply_column_mask, decode_table};
pub use location::{parse_coordinate, read_location};
pub use section_tree::{SectionBody, SectionMap, SectionTree};
pub use tokenizer::{LineKind, classify_line};

#[cfg(test)]
pub mod tests;
