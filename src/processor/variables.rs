//! Channels to canonical variables

use crate::data::DataMatrix;
use crate::error::Result;
use crate::identity::{
    AssignedCodes, ResolveRequest, apply_fill, classify_channels, convert_units, resolve,
    sanitize_name,
};
use crate::models::{CanonicalVariable, ChannelDescriptor, ChannelDetail, DatasetKind};
use crate::report::ParseReport;
use crate::vocabulary::{VocabularyKey, code_index};
use std::collections::BTreeMap;
use tracing::debug;

/// Channel table and data block of one file
#[derive(Debug, Clone, Copy)]
pub struct ChannelData<'a> {
    pub channels: &'a [ChannelDescriptor],
    /// Names after duplicate renaming and date/time normalization
    pub names: &'a [String],
    pub details: Option<&'a [ChannelDetail]>,
    pub matrix: &'a DataMatrix,
    pub kind: DatasetKind,
}

/// Variables in channel order, with the keys the vocabulary matches on
#[derive(Debug, Default)]
pub struct BuiltVariables {
    pub variables: Vec<CanonicalVariable>,
    pub keys: Vec<VocabularyKey>,
}

/// Build one variable per channel.
///
/// With `resolve_identities`, classified channels get a canonical code and
/// unit; other channels keep a sanitized raw name.
pub fn build_variables(
    data: &ChannelData<'_>,
    resolve_identities: bool,
    report: &mut ParseReport,
) -> Result<BuiltVariables> {
    let file = report.file.clone();
    let kinds = if resolve_identities {
        classify_channels(data.names.iter().map(String::as_str), data.kind)
    } else {
        vec![None; data.channels.len()]
    };

    let mut assigned = AssignedCodes::new();
    let mut built = BuiltVariables::default();

    for ((channel, name), kind) in data.channels.iter().zip(data.names).zip(kinds) {
        let raw_units = channel.clean_units().to_string();
        let values = data.matrix.typed_column(channel.ordinal, channel.storage, &file)?;
        let fill_value = data
            .details
            .and_then(|details| details.get(channel.ordinal))
            .and_then(ChannelDetail::fill_value);

        let mut attributes = BTreeMap::new();
        attributes.insert("original_name".to_string(), channel.clean_name().to_string());
        attributes.insert("original_units".to_string(), raw_units.clone());

        let variable = match kind {
            Some(kind) => {
                let (values, units) = convert_units(kind, name, &raw_units, values, &file)?;
                let request = ResolveRequest {
                    kind,
                    name,
                    units: &units,
                    file: &file,
                };
                let (next, resolution) = resolve(assigned, &request)?;
                assigned = next;
                if let Some(warning) = resolution.warning {
                    report.record(warning);
                }
                debug!("{}: {} -> {} [{}]", file, name, resolution.code, resolution.units);

                CanonicalVariable {
                    code: resolution.code,
                    units: resolution.units,
                    standard_name: resolution.standard_name,
                    long_name: Some(resolution.long_name),
                    fill_value,
                    source_ordinal: Some(channel.ordinal),
                    values: apply_fill(values, fill_value),
                    attributes,
                }
            }
            None => CanonicalVariable {
                code: sanitize_name(name),
                units: raw_units.clone(),
                standard_name: None,
                long_name: Some(name.clone()),
                fill_value,
                source_ordinal: Some(channel.ordinal),
                values: apply_fill(values, fill_value),
                attributes,
            },
        };

        built.keys.push(VocabularyKey {
            raw_name: name.clone(),
            raw_units,
            index: code_index(&variable.code),
        });
        built.variables.push(variable);
    }

    Ok(built)
}
