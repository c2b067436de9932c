//! Tests for CSV loading and organization priority

use super::SAMPLE_VOCABULARY;
use super::super::table::{VocabularyEntry, VocabularyTable};
use crate::error::IosError;
use std::io::Write;

fn organizations(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_load_from_reader() {
    let table = VocabularyTable::from_reader(SAMPLE_VOCABULARY.as_bytes()).unwrap();
    assert_eq!(table.len(), 6);

    let first = &table.entries()[0];
    assert_eq!(first.organization, "ios");
    assert_eq!(first.name, "temperature:primary");
    assert_eq!(first.accepted_units.as_deref(), Some("deg C (ITS90)"));
    assert_eq!(first.accepted_instruments, None);
    assert_eq!(first.variable_name, None);
    assert_eq!(first.sdn_parameter_urn.as_deref(), Some("SDN:P01::TEMPS901"));

    let derived = &table.entries()[1];
    assert_eq!(derived.variable_name.as_deref(), Some("TEMPS9XX"));
    assert_eq!(derived.apply_function.as_deref(), Some("ipts68_to_its90"));
}

#[test]
fn test_missing_columns_default_to_none() {
    let csv = "organization,name,accepted_units\nios,oxygen:dissolved,mL/L\n";
    let table = VocabularyTable::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(
        table.entries()[0],
        VocabularyEntry {
            organization: "ios".to_string(),
            name: "oxygen:dissolved".to_string(),
            accepted_units: Some("mL/L".to_string()),
            ..Default::default()
        }
    );
}

#[test]
fn test_row_without_name_is_rejected() {
    let csv = "organization,name\nios,\n";
    let err = VocabularyTable::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, IosError::Vocabulary { source: None, .. }));
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_VOCABULARY.as_bytes()).unwrap();

    let table = VocabularyTable::from_path(file.path()).unwrap();
    assert_eq!(table.len(), 6);

    let missing = VocabularyTable::from_path(std::path::Path::new("/nonexistent/vocab.csv"));
    assert!(matches!(missing, Err(IosError::Open { .. })));
}

#[test]
fn test_candidates_use_first_organization_with_rows() {
    let table = VocabularyTable::from_reader(SAMPLE_VOCABULARY.as_bytes()).unwrap();

    let ios_first = table.candidates(&["Pressure"], &organizations(&["ios", "cf"]));
    assert_eq!(ios_first.len(), 2);
    assert!(ios_first.iter().all(|e| e.organization == "ios"));

    let cf_first = table.candidates(&["Pressure"], &organizations(&["cf", "ios"]));
    assert_eq!(cf_first.len(), 1);
    assert_eq!(cf_first[0].long_name.as_deref(), Some("Pressure"));

    // Salinity only exists for cf, so ios is passed over
    let salinity = table.candidates(&["Salinity:T0:C0"], &organizations(&["ios", "cf"]));
    assert_eq!(salinity.len(), 1);
    assert_eq!(salinity[0].organization, "cf");

    assert!(table.candidates(&["Pressure"], &organizations(&["nerc"])).is_empty());
    assert!(table.candidates(&["Fluorescence"], &organizations(&["ios"])).is_empty());
}

#[test]
fn test_candidates_match_code_as_well_as_name() {
    let table = VocabularyTable::from_entries(vec![VocabularyEntry {
        organization: "ios".to_string(),
        name: "PRESPR01".to_string(),
        ..Default::default()
    }]);
    let found = table.candidates(&["Pressure", "PRESPR01"], &organizations(&["ios"]));
    assert_eq!(found.len(), 1);
}
