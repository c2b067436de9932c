//! Canonical code assignment
//!
//! [`resolve`] is a pure function: it takes the set of codes already used in
//! the dataset and returns the extended set together with the resolution, so
//! that two channels can never end up with the same code unless the suffix
//! attempts run out.

use super::kinds::VariableKind;
use super::rules::{SuffixStyle, find_rule};
use crate::constants::MAX_SUFFIX_ATTEMPTS;
use crate::error::{IosError, Result};
use crate::models::ColumnValues;
use crate::report::ParseWarning;
use serde::Serialize;
use std::collections::BTreeSet;

/// Codes already taken within one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignedCodes(BTreeSet<String>);

impl AssignedCodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    /// Return the set extended with `code`
    pub fn with(mut self, code: impl Into<String>) -> Self {
        self.0.insert(code.into());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Channel to resolve; `units` must already be converted
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub kind: VariableKind,
    pub name: &'a str,
    pub units: &'a str,
    pub file: &'a str,
}

/// Identity assigned to a channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub code: String,
    pub units: String,
    pub standard_name: Option<String>,
    pub long_name: String,
    /// 1-based suffix attempt that produced the code
    pub index: u32,
    /// Set when every suffix attempt collided
    pub warning: Option<ParseWarning>,
}

/// Assign a canonical code to a classified channel
pub fn resolve(
    assigned: AssignedCodes,
    request: &ResolveRequest<'_>,
) -> Result<(AssignedCodes, Resolution)> {
    let rule = find_rule(request.kind, request.name, request.units).ok_or_else(|| {
        IosError::UnresolvedIdentity {
            file: request.file.to_string(),
            kind: request.kind.to_string(),
            name: request.name.to_string(),
            units: request.units.to_string(),
        }
    })?;

    let free = (1..=MAX_SUFFIX_ATTEMPTS)
        .map(|attempt| (attempt, rule.suffix.code(rule.code, attempt)))
        .find(|(_, code)| !assigned.contains(code));

    let (index, code, warning) = match free {
        Some((index, code)) => (index, code, None),
        None => {
            let code = rule.suffix.code(rule.code, MAX_SUFFIX_ATTEMPTS);
            let warning = ParseWarning::SuffixExhaustion {
                code: code.clone(),
                attempts: attempts_for(rule.suffix),
            };
            (MAX_SUFFIX_ATTEMPTS, code, Some(warning))
        }
    };

    let resolution = Resolution {
        code: code.clone(),
        units: rule.canonical_units.to_string(),
        standard_name: rule
            .standard_name
            .or_else(|| request.kind.standard_name())
            .map(str::to_string),
        long_name: rule
            .long_name
            .or_else(|| request.kind.long_name())
            .unwrap_or(request.name)
            .to_string(),
        index,
        warning,
    };

    Ok((assigned.with(code), resolution))
}

/// A fixed code has a single candidate however many attempts are made
fn attempts_for(suffix: SuffixStyle) -> u32 {
    match suffix {
        SuffixStyle::Fixed => 1,
        SuffixStyle::TwoDigit | SuffixStyle::OneDigit => MAX_SUFFIX_ATTEMPTS,
    }
}

/// Scale factor and replacement label for a unit that is converted before lookup
pub fn unit_conversion(kind: VariableKind, units: &str) -> Option<(f64, &'static str)> {
    let units = units.trim().to_lowercase();
    match kind {
        VariableKind::Pressure if matches!(units.as_str(), "kpa" | "kpascal" | "kilopascal") => {
            Some((0.1, "decibar"))
        }
        kind if kind.is_speed() && units == "cm/s" => Some((0.01, "m/s")),
        _ => None,
    }
}

/// Convert a channel's values and unit label together.
///
/// Returns the input untouched when no conversion applies. The arithmetic is
/// done in f64 and stored back as f32.
pub fn convert_units(
    kind: VariableKind,
    name: &str,
    units: &str,
    values: ColumnValues,
    file: &str,
) -> Result<(ColumnValues, String)> {
    let Some((factor, label)) = unit_conversion(kind, units) else {
        return Ok((values, units.to_string()));
    };

    let scaled = match values {
        ColumnValues::Real32(values) => values
            .into_iter()
            .map(|v| (v as f64 * factor) as f32)
            .collect(),
        ColumnValues::Int32(values) => values
            .into_iter()
            .map(|v| (v as f64 * factor) as f32)
            .collect(),
        ColumnValues::Text(_) => {
            return Err(IosError::UnitConversion {
                file: file.to_string(),
                kind: kind.to_string(),
                name: name.to_string(),
                units: units.to_string(),
            });
        }
    };

    Ok((ColumnValues::Real32(scaled), label.to_string()))
}

/// Replace cells equal to the fill value with NaN
pub fn apply_fill(values: ColumnValues, fill: Option<f64>) -> ColumnValues {
    match (values, fill) {
        (ColumnValues::Real32(values), Some(fill)) => {
            let fill = fill as f32;
            ColumnValues::Real32(
                values
                    .into_iter()
                    .map(|v| if v == fill { f32::NAN } else { v })
                    .collect(),
            )
        }
        (values, _) => values,
    }
}

/// Variable name for a channel without a canonical code
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for c in name.trim().chars() {
        match c {
            '-' | '.' | '[' | ']' | ':' | '/' | '\\' | '\'' | '"' => sanitized.push('_'),
            c if c.is_whitespace() => sanitized.push('_'),
            '%' => sanitized.push_str("perc"),
            c => sanitized.push(c),
        }
    }

    let mut collapsed = String::with_capacity(sanitized.len());
    for c in sanitized.chars() {
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed.trim_matches('_').to_string()
}

/// Rename repeated channel names to `Name`, `Name02`, `Name03`, ...
pub fn rename_duplicates(names: &[String]) -> (Vec<String>, Vec<ParseWarning>) {
    let mut renamed = Vec::with_capacity(names.len());
    let mut warnings = Vec::new();

    for (index, name) in names.iter().enumerate() {
        let name = name.trim();
        let seen = names[..index].iter().filter(|n| n.trim() == name).count();
        if seen == 0 {
            renamed.push(name.to_string());
        } else {
            let new_name = format!("{}{:02}", name, seen + 1);
            warnings.push(ParseWarning::DuplicateRename {
                original: name.to_string(),
                renamed: new_name.clone(),
            });
            renamed.push(new_name);
        }
    }

    (renamed, warnings)
}

/// Normalize `Date`/`Time` channel names.
///
/// `Date`, `Date YYYY/MM/DD`, `Time` and `Time HH:MM:SS` become `Date` or
/// `Time`; other names starting with date or time are kept and reported.
pub fn normalize_date_time_name(name: &str) -> (String, Option<ParseWarning>) {
    let trimmed = name.trim();
    let lower = trimmed.to_lowercase();
    if !lower.starts_with("date") && !lower.starts_with("time") {
        return (trimmed.to_string(), None);
    }

    let matches = |prefix: &str, layout: &str| {
        trimmed
            .strip_prefix(prefix)
            .map(|rest| {
                let rest = rest.trim_start();
                rest.is_empty() || rest.starts_with(layout)
            })
            .unwrap_or(false)
    };

    if matches("Date", "YYYY/MM/DD") {
        ("Date".to_string(), None)
    } else if matches("Time", "HH:MM:SS") {
        ("Time".to_string(), None)
    } else {
        (
            trimmed.to_string(),
            Some(ParseWarning::UnknownDateTimeChannel {
                name: trimmed.to_string(),
            }),
        )
    }
}
