//! Data block decoding
//!
//! The block after `*END OF HEADER` is decoded into a [`DataMatrix`] by the
//! first strategy that yields the expected shape: the declared Fortran
//! `FORMAT`, a fixed-width layout built from the channel detail table, or a
//! plain whitespace split.

pub mod decoder;
pub mod format;
pub mod layout;
pub mod matrix;

pub use decoder::{DataDecoder, DecodeInput, DecodeState, DecodeStrategy, decode_data};
pub use format::{EditDescriptor, FortranFormat};
pub use layout::{field_width, slice_record, synthesize_widths};
pub use matrix::{Cells, DataMatrix};

#[cfg(test)]
pub mod tests;
