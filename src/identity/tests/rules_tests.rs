//! Tests for the identity rule table

use super::super::kinds::VariableKind;
use super::super::rules::{IDENTITY_RULES, SuffixStyle, Term, find_rule};

#[test]
fn test_suffix_styles() {
    assert_eq!(SuffixStyle::TwoDigit.code("TEMPS9", 1), "TEMPS901");
    assert_eq!(SuffixStyle::OneDigit.code("PSALBST", 3), "PSALBST3");
    assert_eq!(SuffixStyle::Fixed.code("PRESPR01", 2), "PRESPR01");
}

#[test]
fn test_terms() {
    assert!(Term::Any.matches(""));
    assert!(Term::AnyOf(&["ITS90", "ITS-90"]).matches("deg C (its-90)"));
    assert!(!Term::AnyOf(&["ppt"]).matches("PSS-78"));
    assert!(Term::NoneOf(&["bottle"]).matches("Salinity:T0:C0"));
    assert!(!Term::NoneOf(&["bottle"]).matches("Salinity:Bottle"));
}

#[test]
fn test_temperature_rows_in_order() {
    let t = VariableKind::Temperature;
    assert_eq!(find_rule(t, "Temperature:Reversing", "deg C").unwrap().code, "TEMPRTN");
    assert_eq!(find_rule(t, "Temperature", "deg C (ITS90)").unwrap().code, "TEMPS9");
    assert_eq!(find_rule(t, "Temperature", "'deg C (IPTS68)'").unwrap().code, "TEMPS6");
    assert_eq!(find_rule(t, "Temperature", "degC").unwrap().code, "TEMPST");
    assert!(find_rule(t, "Temperature", "K").is_none());
}

#[test]
fn test_salinity_bottle_split() {
    let s = VariableKind::Salinity;
    assert_eq!(find_rule(s, "Salinity:T0:C0", "PSS-78").unwrap().code, "PSALST");
    assert_eq!(find_rule(s, "Salinity:Bottle", "PSS-78").unwrap().code, "PSALBST");
    assert_eq!(find_rule(s, "Salinity:Bottle", "ppt").unwrap().code, "ODSDM021");
    assert_eq!(find_rule(s, "Salinity", "PPT").unwrap().canonical_units, "PPT");
}

#[test]
fn test_current_meter_ipts68_row_precedes_generic() {
    let rule = find_rule(VariableKind::TemperatureCurrent, "Temperature", "deg C (IPTS68)").unwrap();
    assert_eq!(rule.code, "TEMPP681");
    let rule = find_rule(VariableKind::TemperatureCurrent, "Temperature", "deg C").unwrap();
    assert_eq!(rule.code, "TEMPPR01");
}

#[test]
fn test_nutrient_names_override() {
    let rule = find_rule(VariableKind::Nutrient, "Phosphate", "umol/L").unwrap();
    assert_eq!(rule.code, "PHOSAAZ");
    assert_eq!(rule.suffix, SuffixStyle::OneDigit);
    assert_eq!(
        rule.standard_name,
        Some("mole_concentration_of_phosphate_in_sea_water")
    );
}

#[test]
fn test_every_kind_has_a_row() {
    use VariableKind::*;
    let kinds = [
        Depth, Pressure, Temperature, TemperatureCurrent, TemperatureCurrentLowRes,
        TemperatureCurrentHighRes, Salinity, SalinityCurrent, Oxygen, Conductivity,
        ConductivityRatio, Nutrient, Chlorophyll, SpeedEast, SpeedNorth, SpeedUp, Speed,
        DirectionToward, AmplitudeBeam1, AmplitudeBeam2, AmplitudeBeam3, SoundSpeed,
        SoundSpeed1, SoundSpeed2, Heading, Pitch, Roll, SigmaT,
    ];
    for kind in kinds {
        assert!(
            IDENTITY_RULES.iter().any(|rule| rule.kind == kind),
            "no rule for {}",
            kind
        );
    }
}
