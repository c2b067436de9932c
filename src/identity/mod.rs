//! Variable identity resolution
//!
//! Channels are first classified into a [`VariableKind`] from their names,
//! then the ordered rule table maps (kind, name, units) to a canonical code,
//! unit label and CF names. Codes are unique within a dataset.

pub mod kinds;
pub mod resolver;
pub mod rules;

pub use kinds::{VariableKind, classify_channel, classify_channels};
pub use resolver::{
    AssignedCodes, ResolveRequest, Resolution, apply_fill, convert_units,
    normalize_date_time_name, rename_duplicates, resolve, sanitize_name, unit_conversion,
};
pub use rules::{IDENTITY_RULES, IdentityRule, SuffixStyle, Term, find_rule};

#[cfg(test)]
pub mod tests;
