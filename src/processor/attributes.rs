//! Global attributes built from the header sections

use crate::config::DatasetProfile;
use crate::constants::sections;
use crate::header::{SectionBody, SectionTree};
use crate::models::{DatasetKind, Location, strip_quotes};
use crate::time::format_ios_time;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Attribute name for a header key: prefix added, spaces replaced, lowercased
pub fn attribute_key(prefix: &str, key: &str) -> String {
    format!("{}{}", prefix, key.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Key prefix for the fields of a section
fn section_prefix(section: &str) -> &'static str {
    match section {
        sections::INSTRUMENT => "instrument_",
        sections::DEPLOYMENT => "deployment_",
        sections::RECOVERY => "recovery_",
        _ => "",
    }
}

/// `"<type> <model>"` from `*INSTRUMENT`, used to match vocabulary instruments
pub fn instrument_string(tree: &SectionTree) -> String {
    let Some(instrument) = tree.section(sections::INSTRUMENT) else {
        return String::new();
    };
    [instrument.get("TYPE"), instrument.get("MODEL")]
        .into_iter()
        .flatten()
        .map(strip_quotes)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sections in merge order: administration first, later sections win on
/// conflicting keys
fn merge_order(profile: &DatasetProfile) -> Vec<&str> {
    let optional = profile.optional_sections.iter().map(String::as_str);
    let mut order: Vec<&str> = optional
        .clone()
        .filter(|s| *s == sections::ADMINISTRATION)
        .collect();
    order.extend(profile.required_sections.iter().map(String::as_str));
    order.extend(optional.filter(|s| *s != sections::ADMINISTRATION));
    order
}

/// Everything describing the file as a whole
#[derive(Debug, Clone, Copy)]
pub struct GlobalContext<'a> {
    pub tree: &'a SectionTree,
    pub profile: &'a DatasetProfile,
    pub kind: DatasetKind,
    pub start_time: Option<DateTime<Utc>>,
    pub location: &'a Location,
}

/// Flatten the profile's sections into one attribute map
pub fn global_attributes(context: &GlobalContext<'_>) -> BTreeMap<String, String> {
    let tree = context.tree;
    let mut attributes = BTreeMap::new();

    for section in merge_order(context.profile) {
        match tree.body(section) {
            Some(SectionBody::FreeText(lines)) => {
                let text = lines.values().map(|l| l.trim()).collect::<Vec<_>>().join("\n");
                attributes.insert(section.to_lowercase(), text);
            }
            Some(body) => {
                let Some(fields) = body.first() else { continue };
                let prefix = section_prefix(section);
                for (key, value) in fields.entries() {
                    attributes.insert(attribute_key(prefix, key), strip_quotes(value).to_string());
                }
            }
            None => {}
        }
    }

    attributes.insert("ios_header_version".to_string(), tree.header_version().to_string());
    attributes.insert("date_created".to_string(), tree.created().to_string());
    attributes.insert("dataset_kind".to_string(), context.kind.label().to_string());

    if let Some(start) = context.start_time {
        attributes.insert("time_coverage_start".to_string(), format_ios_time(&start));
    }
    if let Some(latitude) = context.location.latitude {
        attributes.insert("latitude".to_string(), format!("{:.5}", latitude));
    }
    if let Some(longitude) = context.location.longitude {
        attributes.insert("longitude".to_string(), format!("{:.5}", longitude));
    }
    if let Some(area) = &context.location.geographic_area {
        attributes.insert("geographic_area".to_string(), area.clone());
    }
    let instrument = instrument_string(tree);
    if !instrument.is_empty() {
        attributes.insert("instrument".to_string(), instrument);
    }

    attributes
}
