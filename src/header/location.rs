//! `*LOCATION` coordinates

use super::section_tree::SectionTree;
use crate::constants::{COMMENT_SIGIL, keys, sections};
use crate::geo::{AreaLookup, geographic_area};
use crate::models::Location;
use crate::report::ParseReport;

/// Convert an IOS coordinate (`48 39.00000 N ! (deg min)`) to decimal degrees.
///
/// A bare decimal value is accepted as is. South and west hemispheres are negative.
pub fn parse_coordinate(value: &str) -> Option<f64> {
    let value = value.split(COMMENT_SIGIL).next()?.trim();
    let parts: Vec<&str> = value.split_whitespace().collect();

    match parts.as_slice() {
        [decimal] => decimal.parse().ok(),
        [degrees, minutes] => Some(degrees.parse::<f64>().ok()? + minutes.parse::<f64>().ok()? / 60.0),
        [degrees, minutes, hemisphere, ..] => {
            let degrees = degrees.parse::<f64>().ok()?;
            let minutes = minutes.parse::<f64>().ok()?;
            let sign = match hemisphere.to_uppercase().as_str() {
                "S" | "W" => -1.0,
                "N" | "E" => 1.0,
                _ => return None,
            };
            Some(sign * (degrees.abs() + minutes / 60.0))
        }
        [] => None,
    }
}

/// Read latitude and longitude from `*LOCATION`, then label the position
/// with the geographic areas containing it
pub fn read_location(
    tree: &SectionTree,
    report: &mut ParseReport,
    areas: Option<&dyn AreaLookup>,
) -> Location {
    let section = tree.section_or_empty(sections::LOCATION, report);
    let latitude = section.get(keys::LATITUDE).and_then(parse_coordinate);
    let longitude = section.get(keys::LONGITUDE).and_then(parse_coordinate);

    let geographic_area = match (areas, latitude, longitude) {
        (Some(lookup), Some(lat), Some(lon)) => Some(geographic_area(lookup, lon, lat)),
        _ => None,
    };

    Location {
        latitude,
        longitude,
        geographic_area,
    }
}
