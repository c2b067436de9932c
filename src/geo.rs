//! Geographic area lookup
//!
//! Polygon containment lives outside this crate. Callers plug in any type
//! implementing [`AreaLookup`]; a closure works as well.

use crate::constants::NO_GEOGRAPHIC_AREA;

/// Names of the areas containing a point
pub trait AreaLookup {
    fn areas(&self, longitude: f64, latitude: f64) -> Vec<String>;
}

impl<F> AreaLookup for F
where
    F: Fn(f64, f64) -> Vec<String>,
{
    fn areas(&self, longitude: f64, latitude: f64) -> Vec<String> {
        self(longitude, latitude)
    }
}

/// Area label for a point: area names with inner spaces replaced by `-`,
/// joined by spaces, or `"None"` when no area contains the point
pub fn geographic_area(lookup: &dyn AreaLookup, longitude: f64, latitude: f64) -> String {
    let names: Vec<String> = lookup
        .areas(longitude, latitude)
        .iter()
        .map(|name| name.trim().replace(' ', "-"))
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        NO_GEOGRAPHIC_AREA.to_string()
    } else {
        names.join(" ")
    }
}
