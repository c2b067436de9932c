//! Tests for vocabulary loading, matching and derived variables

mod table_tests;

use crate::models::{CanonicalVariable, ColumnValues};
use std::collections::BTreeMap;

pub const SAMPLE_VOCABULARY: &str = "\
organization,name,accepted_units,accepted_instruments,accepted_scale,standard_name,long_name,units,sdn_parameter_urn,variable_name,apply_function
# comment lines are ignored
ios,temperature:primary,deg C (ITS90),,,sea_water_temperature,Sea Water Temperature,degC,SDN:P01::TEMPS901,,
ios,temperature:primary,deg C (IPTS68),,,sea_water_temperature,Sea Water Temperature,degC,,TEMPS9XX,ipts68_to_its90
ios,pressure,decibar,,,sea_water_pressure,Sea Water Pressure,dbar,SDN:P01::PRESPR01,,
ios,pressure,decibar,,,depth,Depth,m,,DEPTH_X,scale(0.993)
cf,pressure,decibar,,,sea_water_pressure,Pressure,dbar,,,
cf,salinity:t0:c0,PSS-78,,PSS-78,sea_water_practical_salinity,Practical Salinity,PSS-78,,,
";

pub fn variable(code: &str, units: &str, values: &[f32]) -> CanonicalVariable {
    CanonicalVariable {
        code: code.to_string(),
        units: units.to_string(),
        standard_name: None,
        long_name: None,
        fill_value: None,
        source_ordinal: Some(0),
        values: ColumnValues::Real32(values.to_vec()),
        attributes: BTreeMap::new(),
    }
}
