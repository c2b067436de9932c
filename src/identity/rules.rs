//! Ordered decision table from (kind, name, units) to a canonical code
//!
//! Rows are tried top to bottom and the first row whose kind, name term and
//! units term all match wins. Terms are case-insensitive substring tests.

use self::SuffixStyle::{Fixed, OneDigit, TwoDigit};
use self::Term::{Any, AnyOf, NoneOf};
use super::kinds::{VariableKind, VariableKind as K, contains_any};

/// Predicate over a channel name or unit label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Any,
    AnyOf(&'static [&'static str]),
    NoneOf(&'static [&'static str]),
}

impl Term {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Term::Any => true,
            Term::AnyOf(terms) => contains_any(value, terms),
            Term::NoneOf(terms) => !contains_any(value, terms),
        }
    }
}

/// How the attempt number is appended to the code base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixStyle {
    /// `TEMPS901`, `TEMPS902`, ...
    TwoDigit,
    /// `PSALBST1`, `PSALBST2`, ...
    OneDigit,
    /// The base is the complete code
    Fixed,
}

impl SuffixStyle {
    /// Code for a 1-based attempt
    pub fn code(&self, base: &str, attempt: u32) -> String {
        match self {
            SuffixStyle::TwoDigit => format!("{}{:02}", base, attempt),
            SuffixStyle::OneDigit => format!("{}{}", base, attempt),
            SuffixStyle::Fixed => base.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRule {
    pub kind: VariableKind,
    pub name: Term,
    pub units: Term,
    pub code: &'static str,
    pub suffix: SuffixStyle,
    /// Canonical unit label written with the code
    pub canonical_units: &'static str,
    pub standard_name: Option<&'static str>,
    pub long_name: Option<&'static str>,
}

const fn row(
    kind: VariableKind,
    name: Term,
    units: Term,
    code: &'static str,
    suffix: SuffixStyle,
    canonical_units: &'static str,
) -> IdentityRule {
    IdentityRule {
        kind,
        name,
        units,
        code,
        suffix,
        canonical_units,
        standard_name: None,
        long_name: None,
    }
}

const fn named(
    base: IdentityRule,
    standard_name: &'static str,
    long_name: &'static str,
) -> IdentityRule {
    IdentityRule {
        standard_name: Some(standard_name),
        long_name: Some(long_name),
        ..base
    }
}

const DEG_C: Term = AnyOf(&["deg c", "degc"]);
const IPTS68_DEG_C: Term = AnyOf(&["deg C (IPTS68)"]);
const METRES_PER_SECOND: Term = AnyOf(&["m/s", "metres/sec"]);
const BOTTLE: Term = AnyOf(&["bottle"]);
const NOT_BOTTLE: Term = NoneOf(&["bottle"]);

pub const IDENTITY_RULES: &[IdentityRule] = &[
    row(K::Depth, Any, Any, "depth", Fixed, "m"),
    row(K::Pressure, Any, AnyOf(&["dbar", "decibar"]), "PRESPR01", Fixed, "decibar"),
    row(K::Pressure, Any, AnyOf(&["count"]), "PRESPR01", Fixed, "counts"),
    // Profile temperature
    row(K::Temperature, AnyOf(&["reversing"]), AnyOf(&["deg c"]), "TEMPRTN", OneDigit, "deg_C"),
    row(K::Temperature, Any, AnyOf(&["ITS90", "ITS-90"]), "TEMPS9", TwoDigit, "deg_C"),
    row(K::Temperature, Any, AnyOf(&["IPTS-68", "IPTS68"]), "TEMPS6", TwoDigit, "deg_C"),
    row(K::Temperature, Any, DEG_C, "TEMPST", TwoDigit, "deg_C"),
    // Current meter temperature
    row(K::TemperatureCurrentLowRes, Any, IPTS68_DEG_C, "TEMPP683", Fixed, "deg_C"),
    row(K::TemperatureCurrentLowRes, Any, DEG_C, "TEMPPR03", Fixed, "deg_C"),
    row(K::TemperatureCurrent, Any, IPTS68_DEG_C, "TEMPP681", Fixed, "deg_C"),
    row(K::TemperatureCurrent, Any, DEG_C, "TEMPPR01", Fixed, "deg_C"),
    row(K::TemperatureCurrentHighRes, Any, IPTS68_DEG_C, "TEMPP682", Fixed, "deg_C"),
    row(K::TemperatureCurrentHighRes, Any, DEG_C, "TEMPPR02", Fixed, "deg_C"),
    // Salinity
    row(K::Salinity, NOT_BOTTLE, AnyOf(&["PSS-78"]), "PSALST", TwoDigit, "PSS-78"),
    row(K::Salinity, NOT_BOTTLE, AnyOf(&["ppt"]), "SSALST", TwoDigit, "PPT"),
    row(K::Salinity, BOTTLE, AnyOf(&["PSS-78"]), "PSALBST", OneDigit, "PSS-78"),
    row(K::Salinity, BOTTLE, AnyOf(&["ppt"]), "ODSDM021", Fixed, "PPT"),
    row(K::SalinityCurrent, Any, AnyOf(&["PSS-78"]), "PSLTZZ01", Fixed, "PSS-78"),
    row(K::SalinityCurrent, Any, AnyOf(&["ppt"]), "ODSDM021", Fixed, "PPT"),
    // Oxygen and conductivity
    row(K::Oxygen, Any, AnyOf(&["ml/l"]), "DOXYZZ", TwoDigit, "mL/L"),
    row(K::Oxygen, Any, AnyOf(&["umol/kg"]), "DOXMZZ", TwoDigit, "umol/kg"),
    row(K::Oxygen, Any, AnyOf(&["umol/L"]), "DOXY", TwoDigit, "umol/L"),
    row(K::Conductivity, Any, AnyOf(&["s/m"]), "CNDCST", TwoDigit, "S/m"),
    row(K::Conductivity, Any, AnyOf(&["ms/cm"]), "CNDCSTX", TwoDigit, "mS/cm"),
    row(K::Conductivity, Any, AnyOf(&["counts", "count"]), "CNDCZZ", TwoDigit, "counts"),
    row(K::ConductivityRatio, Any, Any, "CNDC_RATIO", Fixed, "n/a"),
    // Bottle chemistry
    named(
        row(K::Nutrient, AnyOf(&["nitrate_plus_nitrite"]), AnyOf(&["umol/l"]), "NTRZAAZ", OneDigit, "umol/L"),
        "mole_concentration_of_nitrate_and_nitrite_in_sea_water",
        "Mole Concentration of Nitrate and Nitrite in Sea Water",
    ),
    named(
        row(K::Nutrient, AnyOf(&["phosphate"]), AnyOf(&["umol/l"]), "PHOSAAZ", OneDigit, "umol/L"),
        "mole_concentration_of_phosphate_in_sea_water",
        "Mole Concentration of Phosphate in Sea Water",
    ),
    named(
        row(K::Nutrient, AnyOf(&["silicate"]), AnyOf(&["umol/l"]), "SLCAAAZ", OneDigit, "umol/L"),
        "mole_concentration_of_silicate_in_sea_water",
        "Mole Concentration of Silicate in Sea Water",
    ),
    named(
        row(K::Chlorophyll, AnyOf(&["chlorophyll"]), AnyOf(&["mg/m^3"]), "CPHLFLP", OneDigit, "mg/m^3"),
        "concentration_of_chlorophyll-a_in_water_body",
        "Concentration of chlorophyll-a {chl-a CAS 479-61-8} per unit volume of the water body \
         [particulate >GF/F phase] by filtration, acetone extraction and fluorometry",
    ),
    // Current meter motion
    row(K::SpeedEast, Any, METRES_PER_SECOND, "LCEWEL01", Fixed, "m/s"),
    row(K::SpeedNorth, Any, METRES_PER_SECOND, "LCNSEL01", Fixed, "m/s"),
    row(K::SpeedUp, Any, METRES_PER_SECOND, "LRZASP01", Fixed, "m/s"),
    row(K::Speed, Any, METRES_PER_SECOND, "LCSAEL01", Fixed, "m/s"),
    row(K::DirectionToward, Any, Any, "LCDAEL01", Fixed, "deg"),
    row(K::AmplitudeBeam1, Any, Any, "ISCMBMA1", Fixed, "counts"),
    row(K::AmplitudeBeam2, Any, Any, "ISCMBMA2", Fixed, "counts"),
    row(K::AmplitudeBeam3, Any, Any, "ISCMBMA3", Fixed, "counts"),
    row(K::SoundSpeed, Any, Any, "SVELCV01", Fixed, "m/s"),
    row(K::SoundSpeed1, Any, Any, "SVELCV01", Fixed, "m/s"),
    row(K::SoundSpeed2, Any, Any, "SVELCV02", Fixed, "m/s"),
    row(K::Heading, Any, Any, "HEADCM01", Fixed, "deg"),
    row(K::Pitch, Any, Any, "PTCHEI01", Fixed, "deg"),
    row(K::Roll, Any, Any, "ROLLEI01", Fixed, "deg"),
    row(K::SigmaT, Any, Any, "SIGTEQST", Fixed, "n/a"),
];

/// First rule matching the channel
pub fn find_rule(kind: VariableKind, name: &str, units: &str) -> Option<&'static IdentityRule> {
    IDENTITY_RULES
        .iter()
        .find(|rule| rule.kind == kind && rule.name.matches(name) && rule.units.matches(units))
}
