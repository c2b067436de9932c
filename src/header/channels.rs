//! Channel tables of the `*FILE` section

use super::column_mask::decode_table;
use super::section_tree::SectionTree;
use crate::constants::{keys, sections, tables};
use crate::error::{IosError, Result};
use crate::models::{ChannelDescriptor, ChannelDetail, StorageType};
use tracing::debug;

/// No, Name, Units are required; Minimum and Maximum may be absent
const CHANNEL_MIN_FIELDS: usize = 3;

/// No, Pad, Start, Width, Format are required; Type and Decimal_Places may be absent
const DETAIL_MIN_FIELDS: usize = 5;

/// Integer value of a `*FILE` key, `None` when the key is absent
pub fn file_count(tree: &SectionTree, key: &str, file: &str) -> Result<Option<usize>> {
    match tree.value(sections::FILE, key) {
        None => Ok(None),
        Some(raw) => {
            let value = raw.split('!').next().unwrap_or("").trim();
            value
                .parse::<usize>()
                .map(Some)
                .map_err(|_| IosError::InvalidHeaderValue {
                    file: file.to_string(),
                    key: key.to_string(),
                    value: raw.to_string(),
                })
        }
    }
}

/// Both channel tables of one file, each decoded once
#[derive(Debug, Clone)]
pub struct ChannelTables {
    pub channels: Vec<ChannelDescriptor>,
    pub details: Option<Vec<ChannelDetail>>,
}

/// Read `$TABLE: CHANNELS`, joined with `$TABLE: CHANNEL DETAIL` when present
pub fn read_channels(tree: &SectionTree, file: &str) -> Result<ChannelTables> {
    let table = tree
        .section(sections::FILE)
        .and_then(|map| map.subsection(tables::CHANNELS))
        .ok_or_else(|| IosError::MissingSection {
            file: file.to_string(),
            section: format!("{} {}", sections::FILE, tables::CHANNELS),
        })?;

    let expected = file_count(tree, keys::NUMBER_OF_CHANNELS, file)?;
    let rows = decode_table(table, tables::CHANNELS, expected, CHANNEL_MIN_FIELDS, file)?;
    let details = read_channel_details(tree, rows.len(), file)?;

    let channels = rows
        .into_iter()
        .enumerate()
        .map(|(ordinal, mut fields)| {
            fields.resize(5, String::new());
            let detail = details.as_ref().and_then(|d| d.get(ordinal));
            let name = fields[1].clone();
            let storage = match detail {
                Some(detail) => detail.storage(),
                None if is_date_or_time(&name) => StorageType::Text,
                None => StorageType::Real32,
            };

            ChannelDescriptor {
                ordinal,
                name,
                units: fields[2].clone(),
                minimum: fields[3].clone(),
                maximum: fields[4].clone(),
                width: detail.and_then(ChannelDetail::declared_width),
                format: detail
                    .map(|d| d.format.clone())
                    .filter(|f| !f.trim().is_empty()),
                storage,
            }
        })
        .collect::<Vec<_>>();

    debug!("{}: {} channels", file, channels.len());
    Ok(ChannelTables { channels, details })
}

/// Read the optional `$TABLE: CHANNEL DETAIL`; its row count must match the channel table
pub fn read_channel_details(
    tree: &SectionTree,
    channel_count: usize,
    file: &str,
) -> Result<Option<Vec<ChannelDetail>>> {
    let Some(table) = tree
        .section(sections::FILE)
        .and_then(|map| map.subsection(tables::CHANNEL_DETAIL))
    else {
        return Ok(None);
    };

    let rows = decode_table(
        table,
        tables::CHANNEL_DETAIL,
        Some(channel_count),
        DETAIL_MIN_FIELDS,
        file,
    )?;

    let details = rows
        .into_iter()
        .enumerate()
        .map(|(ordinal, mut fields)| {
            fields.resize(7, String::new());
            ChannelDetail {
                ordinal,
                pad: fields[1].clone(),
                start: fields[2].clone(),
                width: fields[3].clone(),
                format: fields[4].clone(),
                type_letter: fields[5].clone(),
                decimal_places: fields[6].clone(),
            }
        })
        .collect();

    Ok(Some(details))
}

fn is_date_or_time(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    lower.starts_with("date") || lower.starts_with("time")
}
