//! Physical kinds of channels and their classification from channel names

use crate::models::DatasetKind;
use serde::Serialize;
use std::fmt;

/// Physical quantity measured by a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariableKind {
    Depth,
    Pressure,
    Temperature,
    TemperatureCurrent,
    TemperatureCurrentLowRes,
    TemperatureCurrentHighRes,
    Salinity,
    SalinityCurrent,
    Oxygen,
    Conductivity,
    ConductivityRatio,
    Nutrient,
    Chlorophyll,
    SpeedEast,
    SpeedNorth,
    SpeedUp,
    Speed,
    DirectionToward,
    AmplitudeBeam1,
    AmplitudeBeam2,
    AmplitudeBeam3,
    SoundSpeed,
    SoundSpeed1,
    SoundSpeed2,
    Heading,
    Pitch,
    Roll,
    SigmaT,
}

impl VariableKind {
    pub fn label(&self) -> &'static str {
        match self {
            VariableKind::Depth => "depth",
            VariableKind::Pressure => "pressure",
            VariableKind::Temperature => "temperature",
            VariableKind::TemperatureCurrent => "temperature:cur",
            VariableKind::TemperatureCurrentLowRes => "temperature:cur:low_res",
            VariableKind::TemperatureCurrentHighRes => "temperature:cur:high_res",
            VariableKind::Salinity => "salinity",
            VariableKind::SalinityCurrent => "salinity:cur",
            VariableKind::Oxygen => "oxygen",
            VariableKind::Conductivity => "conductivity",
            VariableKind::ConductivityRatio => "conductivity_ratio",
            VariableKind::Nutrient => "nutrient",
            VariableKind::Chlorophyll => "chlorophyll",
            VariableKind::SpeedEast => "speed:east",
            VariableKind::SpeedNorth => "speed:north",
            VariableKind::SpeedUp => "speed:up",
            VariableKind::Speed => "speed",
            VariableKind::DirectionToward => "direction:geog(to)",
            VariableKind::AmplitudeBeam1 => "amplitude:beam1",
            VariableKind::AmplitudeBeam2 => "amplitude:beam2",
            VariableKind::AmplitudeBeam3 => "amplitude:beam3",
            VariableKind::SoundSpeed => "speed:sound",
            VariableKind::SoundSpeed1 => "speed:sound:1",
            VariableKind::SoundSpeed2 => "speed:sound:2",
            VariableKind::Heading => "heading",
            VariableKind::Pitch => "pitch",
            VariableKind::Roll => "roll",
            VariableKind::SigmaT => "sigma-t",
        }
    }

    /// Default CF standard name
    pub fn standard_name(&self) -> Option<&'static str> {
        match self {
            VariableKind::Depth => Some("depth"),
            VariableKind::Pressure => Some("sea_water_pressure"),
            VariableKind::Temperature
            | VariableKind::TemperatureCurrent
            | VariableKind::TemperatureCurrentLowRes
            | VariableKind::TemperatureCurrentHighRes => Some("sea_water_temperature"),
            VariableKind::Salinity | VariableKind::SalinityCurrent => {
                Some("sea_water_practical_salinity")
            }
            VariableKind::Oxygen => Some("dissolved_oxygen_concentration"),
            VariableKind::Conductivity => Some("sea_water_electrical_conductivity"),
            VariableKind::SpeedEast => Some("eastward_sea_water_velocity"),
            VariableKind::SpeedNorth => Some("northward_sea_water_velocity"),
            VariableKind::SpeedUp => Some("upward_sea_water_velocity"),
            VariableKind::Speed => Some("sea_water_speed"),
            VariableKind::DirectionToward => Some("sea_water_velocity_to_direction"),
            VariableKind::AmplitudeBeam1
            | VariableKind::AmplitudeBeam2
            | VariableKind::AmplitudeBeam3 => Some(
                "signal_intensity_from_multibeam_acoustic_doppler_velocity_sensor_in_sea_water",
            ),
            VariableKind::SoundSpeed | VariableKind::SoundSpeed1 | VariableKind::SoundSpeed2 => {
                Some("speed_of_sound_in_sea_water")
            }
            VariableKind::Heading => Some("platform_orientation"),
            VariableKind::Pitch => Some("platform_pitch"),
            VariableKind::Roll => Some("platform_roll"),
            VariableKind::ConductivityRatio
            | VariableKind::Nutrient
            | VariableKind::Chlorophyll
            | VariableKind::SigmaT => None,
        }
    }

    /// Default long name; `None` keeps the raw channel name
    pub fn long_name(&self) -> Option<&'static str> {
        match self {
            VariableKind::Depth => Some("Depth below surface"),
            VariableKind::Pressure => Some("Pressure"),
            VariableKind::Temperature | VariableKind::TemperatureCurrent => {
                Some("Sea Water Temperature")
            }
            VariableKind::TemperatureCurrentLowRes => {
                Some("Sea Water Temperature (Low Resolution)")
            }
            VariableKind::TemperatureCurrentHighRes => {
                Some("Sea Water Temperature (High Resolution)")
            }
            VariableKind::Salinity | VariableKind::SalinityCurrent => {
                Some("Sea Water Practical Salinity")
            }
            VariableKind::Oxygen => Some("Oxygen concentration"),
            VariableKind::Conductivity => Some("Sea Water Electrical Conductivity"),
            VariableKind::ConductivityRatio => Some("Sea Water Electrical Conductivity gsw"),
            VariableKind::SigmaT => Some("Sigma-theta"),
            _ => None,
        }
    }

    /// Kinds whose values may arrive in cm/s and are scaled to m/s
    pub fn is_speed(&self) -> bool {
        matches!(
            self,
            VariableKind::SpeedEast
                | VariableKind::SpeedNorth
                | VariableKind::SpeedUp
                | VariableKind::Speed
        )
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One classification row: any `include` term present and no `exclude` term
struct NameRule {
    include: &'static [&'static str],
    exclude: &'static [&'static str],
    kind: VariableKind,
}

const fn rule(
    include: &'static [&'static str],
    exclude: &'static [&'static str],
    kind: VariableKind,
) -> NameRule {
    NameRule {
        include,
        exclude,
        kind,
    }
}

const PROFILE_RULES: &[NameRule] = &[
    rule(&["depth"], &["nominal"], VariableKind::Depth),
    rule(&["pressure"], &[], VariableKind::Pressure),
    rule(&["temperature"], &["flag", "rinko", "bottle"], VariableKind::Temperature),
    rule(&["salinity"], &["flag"], VariableKind::Salinity),
    rule(
        &["oxygen"],
        &[
            "flag", "bottle", "rinko", "temperature", "current", "isotope", "saturation",
            "voltage",
        ],
        VariableKind::Oxygen,
    ),
    rule(
        &["conductivity_ratio", "conductivity ratio"],
        &[],
        VariableKind::ConductivityRatio,
    ),
    rule(&["conductivity"], &[], VariableKind::Conductivity),
    rule(
        &["nitrate_plus_nitrite", "silicate", "phosphate"],
        &["flag"],
        VariableKind::Nutrient,
    ),
    rule(&["chlorophyll:extracted"], &["flag"], VariableKind::Chlorophyll),
    rule(&["sigma-t"], &[], VariableKind::SigmaT),
];

const CURRENT_METER_RULES: &[NameRule] = &[
    rule(&["depth"], &[], VariableKind::Depth),
    rule(&["pressure"], &[], VariableKind::Pressure),
    rule(&["temperature:low_res"], &[], VariableKind::TemperatureCurrentLowRes),
    rule(&["temperature:high_res"], &[], VariableKind::TemperatureCurrentHighRes),
    rule(&["temperature"], &[], VariableKind::TemperatureCurrent),
    rule(&["salinity"], &[], VariableKind::SalinityCurrent),
    rule(
        &["oxygen"],
        &["flag", "bottle", "rinko", "temperature", "current"],
        VariableKind::Oxygen,
    ),
    rule(
        &["conductivity_ratio", "conductivity ratio"],
        &[],
        VariableKind::ConductivityRatio,
    ),
    rule(&["conductivity"], &[], VariableKind::Conductivity),
    rule(&["speed:east", "ew_comp"], &[], VariableKind::SpeedEast),
    rule(&["speed:north", "ns_comp"], &[], VariableKind::SpeedNorth),
    rule(&["speed:up"], &[], VariableKind::SpeedUp),
    rule(&["amplitude:beam1"], &[], VariableKind::AmplitudeBeam1),
    rule(&["amplitude:beam2"], &[], VariableKind::AmplitudeBeam2),
    rule(&["amplitude:beam3"], &[], VariableKind::AmplitudeBeam3),
    rule(&["speed:sound:1"], &[], VariableKind::SoundSpeed1),
    rule(&["speed:sound:2"], &[], VariableKind::SoundSpeed2),
    rule(&["speed:sound"], &[], VariableKind::SoundSpeed),
    rule(&["heading"], &[], VariableKind::Heading),
    rule(&["pitch"], &[], VariableKind::Pitch),
    rule(&["roll"], &[], VariableKind::Roll),
    rule(&["speed"], &[], VariableKind::Speed),
    rule(
        &["direction:geog(to)", "direction:current"],
        &[],
        VariableKind::DirectionToward,
    ),
    rule(&["sigma-t"], &[], VariableKind::SigmaT),
];

/// Case-insensitive substring test for any of `terms`
pub fn contains_any(value: &str, terms: &[&str]) -> bool {
    let value = value.to_uppercase();
    terms.iter().any(|term| value.contains(&term.to_uppercase()))
}

/// Kind of a single channel, from its name and the dataset kind
pub fn classify_channel(name: &str, dataset: DatasetKind) -> Option<VariableKind> {
    let rules = match dataset {
        DatasetKind::CurrentMeter => CURRENT_METER_RULES,
        DatasetKind::Ctd | DatasetKind::MooredCtd | DatasetKind::Bottle => PROFILE_RULES,
    };

    rules
        .iter()
        .find(|rule| contains_any(name, rule.include) && !contains_any(name, rule.exclude))
        .map(|rule| rule.kind)
}

/// Kinds of every channel of a file.
///
/// In current meter files a second plain temperature channel is the high
/// resolution sensor.
pub fn classify_channels<'a>(
    names: impl IntoIterator<Item = &'a str>,
    dataset: DatasetKind,
) -> Vec<Option<VariableKind>> {
    let mut plain_temperatures = 0;
    names
        .into_iter()
        .map(|name| match classify_channel(name, dataset) {
            Some(VariableKind::TemperatureCurrent) => {
                plain_temperatures += 1;
                if plain_temperatures == 1 {
                    Some(VariableKind::TemperatureCurrent)
                } else {
                    Some(VariableKind::TemperatureCurrentHighRes)
                }
            }
            other => other,
        })
        .collect()
}
