//! Matching resolved variables against the vocabulary table
//!
//! A row matches a variable when its accepted units, accepted scale and
//! accepted instruments all agree with the variable. Each matching row either
//! decorates the variable with its terms or, when it names a target variable,
//! derives a new variable from it.

use super::derive::{DeriveContext, Transform, update_variable_index};
use super::table::{VocabularyEntry, VocabularyTable};
use crate::models::{CanonicalVariable, ColumnValues};
use crate::report::ParseWarning;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Temperature and salinity reference scales
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceScale {
    Ipts48,
    Ipts68,
    Its90,
    Pss78,
}

impl ReferenceScale {
    pub fn label(&self) -> &'static str {
        match self {
            ReferenceScale::Ipts48 => "IPTS-48",
            ReferenceScale::Ipts68 => "IPTS-68",
            ReferenceScale::Its90 => "ITS-90",
            ReferenceScale::Pss78 => "PSS-78",
        }
    }
}

impl fmt::Display for ReferenceScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static SCALE_PATTERNS: LazyLock<Vec<(ReferenceScale, Regex)>> = LazyLock::new(|| {
    [
        (ReferenceScale::Ipts48, r"IPTS\-48"),
        (ReferenceScale::Ipts68, r"IPTS\-68|ITS\-68"),
        (ReferenceScale::Its90, r"ITS\-90|TE90"),
        (ReferenceScale::Pss78, r"PSS\-78|practical.*salinity|psal"),
    ]
    .into_iter()
    .filter_map(|(scale, pattern)| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .ok()
            .map(|regex| (scale, regex))
    })
    .collect()
});

static SKIPPED_CHANNEL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    RegexBuilder::new(r"^'*(flag|quality_flag)|^(date|time)")
        .case_insensitive(true)
        .build()
        .ok()
});

/// Normalize hand-written unit labels before comparing them
pub fn standardize_units(units: &str) -> String {
    let mut units = units.trim().replace("**", "^").replace('µ', "u");
    for (from, to) in [(" /", "/"), ("/ ", "/"), (" ^", "^"), ("^ ", "^")] {
        while units.contains(from) {
            units = units.replace(from, to);
        }
    }

    if ["(none)", "none", "dimensionless"]
        .iter()
        .any(|prefix| units.starts_with(prefix))
    {
        return "none".to_string();
    }
    units
}

/// First reference scale found in any of the texts.
///
/// Scales are tried in order, each against every text.
pub fn detect_reference_scale(texts: &[&str]) -> Option<ReferenceScale> {
    SCALE_PATTERNS
        .iter()
        .find(|(_, regex)| texts.iter().any(|text| regex.is_match(text)))
        .map(|(scale, _)| *scale)
}

/// Check a term against a `|`-separated accepted list.
///
/// No list accepts everything, as does a list containing `none` or
/// `dimensionless`. Otherwise the term must be a member of the list, or with
/// `as_regex` the whole list is searched as a case-insensitive pattern.
pub fn review_term(term: Option<&str>, accepted: Option<&str>, as_regex: bool) -> bool {
    let Some(accepted) = accepted else {
        return true;
    };

    let items: Vec<&str> = accepted.split('|').collect();
    if items.iter().any(|item| matches!(*item, "none" | "dimensionless")) {
        return true;
    }
    let Some(term) = term else {
        return false;
    };
    if items.contains(&term) {
        return true;
    }
    as_regex
        && RegexBuilder::new(accepted)
            .case_insensitive(true)
            .build()
            .map(|regex| regex.is_match(term))
            .unwrap_or(false)
}

/// Date, time and flag channels never receive vocabulary terms
pub fn is_skipped_channel(name: &str) -> bool {
    SKIPPED_CHANNEL
        .as_ref()
        .map(|regex| regex.is_match(name.trim()))
        .unwrap_or(false)
}

/// Whether a row agrees with a variable's units, scale and instrument
pub fn entry_matches(
    entry: &VocabularyEntry,
    units: &str,
    scale: Option<ReferenceScale>,
    variable_instrument: &str,
    global_instrument: &str,
) -> bool {
    review_term(Some(units), entry.accepted_units.as_deref(), true)
        && review_term(
            scale.map(|s| s.label()),
            entry.accepted_scale.as_deref(),
            false,
        )
        && (review_term(
            Some(variable_instrument),
            entry.accepted_instruments.as_deref(),
            true,
        ) || review_term(
            Some(global_instrument),
            entry.accepted_instruments.as_deref(),
            true,
        ))
}

/// Identity of a variable as seen by the vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyKey {
    /// Channel name as written in the header
    pub raw_name: String,
    /// Raw unit label as written in the header
    pub raw_units: String,
    /// Suffix index of the canonical code
    pub index: u32,
}

/// Inputs shared by every variable of a file
#[derive(Debug, Clone, Copy)]
pub struct VocabularyOptions<'a> {
    pub organizations: &'a [String],
    /// `"<type> <model>"` from the `*INSTRUMENT` section
    pub instrument: &'a str,
    pub global_attributes: &'a BTreeMap<String, String>,
    pub file: &'a str,
}

/// Outcome of matching all variables of a file
#[derive(Debug, Default)]
pub struct VocabularyOutcome {
    pub derived: Vec<CanonicalVariable>,
    pub warnings: Vec<ParseWarning>,
}

enum Action<'e> {
    Decorate(usize, &'e VocabularyEntry),
    Derive(CanonicalVariable),
}

/// Match every variable, decorating them in place and returning the derived
/// variables.
///
/// A row whose derivation cannot be evaluated is reported as a warning and
/// skipped; the other rows still apply.
pub fn apply_vocabulary(
    table: &VocabularyTable,
    variables: &mut [CanonicalVariable],
    keys: &[VocabularyKey],
    options: &VocabularyOptions<'_>,
) -> VocabularyOutcome {
    let mut outcome = VocabularyOutcome::default();
    let mut actions = Vec::new();

    {
        let numeric: BTreeMap<&str, Vec<f64>> = variables
            .iter()
            .filter_map(|v| v.values.as_f64().map(|values| (v.code.as_str(), values)))
            .collect();
        let context = DeriveContext {
            variables: numeric,
            attributes: Some(options.global_attributes),
        };
        let mut taken: Vec<String> = variables.iter().map(|v| v.code.clone()).collect();

        for (position, (variable, key)) in variables.iter().zip(keys).enumerate() {
            if is_skipped_channel(&key.raw_name) {
                continue;
            }

            let candidates = table.candidates(
                &[key.raw_name.as_str(), variable.code.as_str()],
                options.organizations,
            );
            let units = standardize_units(&key.raw_units);
            let long_name = variable.long_name.as_deref().unwrap_or_default();
            let scale = detect_reference_scale(&[
                key.raw_name.as_str(),
                key.raw_units.as_str(),
                long_name,
            ]);

            let matched: Vec<&VocabularyEntry> = candidates
                .into_iter()
                .filter(|entry| entry_matches(entry, &units, scale, long_name, options.instrument))
                .collect();

            if matched.is_empty() {
                outcome.warnings.push(ParseWarning::VocabularyMiss {
                    code: variable.code.clone(),
                    units: key.raw_units.clone(),
                });
                continue;
            }

            for entry in matched {
                let Some(target) = entry.variable_name.as_deref() else {
                    actions.push(Action::Decorate(position, entry));
                    continue;
                };

                let target = update_variable_index(target, key.index);
                if taken.contains(&target) {
                    debug!(file = options.file, "Derived variable {} already present", target);
                    continue;
                }

                let derived =
                    derive_variable(variable, entry, &target, key.index, &context, options.file);
                match derived {
                    Ok(derived) => {
                        taken.push(target);
                        actions.push(Action::Derive(derived));
                    }
                    Err(reason) => outcome.warnings.push(ParseWarning::DerivationFailed {
                        code: variable.code.clone(),
                        target,
                        reason,
                    }),
                }
            }
        }
    }

    for action in actions {
        match action {
            Action::Decorate(position, entry) => decorate(&mut variables[position], entry, keys[position].index),
            Action::Derive(variable) => outcome.derived.push(variable),
        }
    }

    outcome
}

/// Evaluate a row's transform on its source; the error is the reason it failed
fn derive_variable(
    source: &CanonicalVariable,
    entry: &VocabularyEntry,
    target: &str,
    index: u32,
    context: &DeriveContext<'_>,
    file: &str,
) -> Result<CanonicalVariable, String> {
    let transform = Transform::parse(entry.apply_function.as_deref())?;
    let values = source
        .values
        .as_f64()
        .ok_or_else(|| "source is not numeric".to_string())?;
    let derived = transform.apply(&values, context)?;

    let mut variable = CanonicalVariable {
        code: target.to_string(),
        units: source.units.clone(),
        standard_name: source.standard_name.clone(),
        long_name: source.long_name.clone(),
        fill_value: source.fill_value,
        source_ordinal: None,
        values: ColumnValues::Real32(derived.into_iter().map(|v| v as f32).collect()),
        attributes: BTreeMap::new(),
    };
    decorate(&mut variable, entry, index);
    variable
        .attributes
        .insert("derived_from".to_string(), format!("{} = {}", source.code, transform));

    debug!(file, "Add Parameter: {} = {}({})", target, transform, source.code);
    Ok(variable)
}

/// Copy the row's terms onto a variable
fn decorate(variable: &mut CanonicalVariable, entry: &VocabularyEntry, index: u32) {
    for (key, value) in entry.attributes() {
        match key {
            "standard_name" => variable.standard_name = Some(value.to_string()),
            "long_name" => variable.long_name = Some(value.to_string()),
            "units" => variable.units = value.to_string(),
            "sdn_parameter_urn" => {
                variable
                    .attributes
                    .insert(key.to_string(), update_variable_index(value, index));
            }
            _ => {
                variable.attributes.insert(key.to_string(), value.to_string());
            }
        }
    }
}
