//! Vocabulary matching
//!
//! A caller-supplied [`VocabularyTable`] maps raw channel names to standard
//! terms. Rows are filtered by organization priority, then by units,
//! reference scale and instrument; matching rows decorate the variable or
//! derive new variables from it.

pub mod derive;
pub mod matcher;
pub mod table;

pub use derive::{DeriveContext, Operand, Transform, code_index, update_variable_index};
pub use matcher::{
    ReferenceScale, VocabularyKey, VocabularyOptions, VocabularyOutcome, apply_vocabulary,
    detect_reference_scale, entry_matches, is_skipped_channel, review_term, standardize_units,
};
pub use table::{VocabularyEntry, VocabularyTable};

#[cfg(test)]
pub mod tests;
