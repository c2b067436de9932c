//! Integration tests for the IOS parser with on-disk files
//!
//! These tests write small but complete IOS files to a temporary directory
//! and run them through the public API end to end.

use chrono::{TimeZone, Utc};
use ios_processor::{
    ColumnValues, DatasetKind, FailureCategory, IosError, IosProcessor, ParseWarning,
    VocabularyTable, parse_file,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

const CURRENT_METER: &str = r#"*2021/03/05 10:15:00.00
*IOS HEADER VERSION 2.0      2016/04/28 2016/06/13 IVF16

*FILE
    START TIME          : UTC 2021/03/01 12:00:00.000
    TIME INCREMENT      : 0 0 30 0 0  ! (day hr min sec ms)
    NUMBER OF RECORDS   : 3
    NUMBER OF CHANNELS  : 4

    $TABLE: CHANNELS
    ! No Name            Units
    !--- --------------  -------
       1 Date            n/a
       2 Time            n/a
       3 Speed:East      cm/s
       4 Temperature     'deg C'
    $END
    $TABLE: CHANNEL DETAIL
    ! No  Pad   Start  Width  Format      Type  Decimal_Places
    !---  ----  -----  -----  ----------  ----  --------------
       1  ' '   ' '       11  YYYY/MM/DD  D     ' '
       2  ' '   ' '        9  HH:MM:SS    T     ' '
       3  -99   ' '        8  F           R4      1
       4  -99   ' '        8  F           R4      3
    $END

*ADMINISTRATION
    AGENCY              : IOS, Ocean Sciences Division, Sidney, B.C.

*LOCATION
    STATION             : A1
    LATITUDE            :  50  30.00000 N  ! (deg min)
    LONGITUDE           : 128  15.00000 W  ! (deg min)

*INSTRUMENT
    TYPE                : RCM
    MODEL               : 7
    SERIAL NUMBER       : 1234

*DEPLOYMENT
    MISSION             : 2021-12
    TIME ANCHOR DROPPED : UTC 2021/03/01 10:00:00.000

*END OF HEADER
 2021/03/01 12:00:00    12.5   8.123
 2021/03/01 12:30:00    -7.0   8.200
 2021/03/01 13:00:00     3.0   8.310
"#;

const CTD: &str = r#"*2019/07/02 09:40:28.93
*IOS HEADER VERSION 2.0      2016/04/28 2016/06/13 IVF16

*FILE
    START TIME          : PDT 2019/06/20 11:26:13.000
    NUMBER OF RECORDS   : 2
    NUMBER OF CHANNELS  : 2

    $TABLE: CHANNELS
    ! No Name                   Units
    !--- ---------------------- ---------------
       1 Pressure               decibar
       2 Temperature:Primary    'deg C (ITS90)'
    $END

*END OF HEADER
     1.0     9.1234
     2.0     9.2000
"#;

const VOCABULARY: &str = "\
organization,name,accepted_units,accepted_instruments,accepted_scale,standard_name,long_name,units,sdn_parameter_urn,variable_name,apply_function
ios,temperature,deg C,rcm,,sea_water_temperature,Sea Water Temperature,degC,SDN:P01::TEMPPR01,,
ios,speed:east,cm/s,,,eastward_sea_water_velocity,Eastward Current,m s-1,,,
";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Test a current meter file through the default processor
///
/// Purpose: Validate record times, unit conversion and mooring attributes together
/// Benefit: Ensures the time-series profile wires every step in order
#[test]
fn test_parse_current_meter_file() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "a1_20210301.cur", CURRENT_METER);

    let dataset = parse_file(&path).expect("Failed to parse current meter file");

    assert_eq!(dataset.file(), "a1_20210301.cur");
    assert_eq!(dataset.kind(), DatasetKind::CurrentMeter);
    assert!(dataset.warnings().is_empty(), "{:?}", dataset.warnings());

    let codes: Vec<&str> = dataset.variables().iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, vec!["Date", "Time", "LCEWEL01", "TEMPPR01"]);

    // cm/s converted to m/s before the identity lookup
    let east = dataset.variable("LCEWEL01").unwrap();
    assert_eq!(east.units, "m/s");
    match &east.values {
        ColumnValues::Real32(values) => {
            assert!((values[0] - 0.125).abs() < 1e-6);
            assert!((values[1] + 0.07).abs() < 1e-6);
        }
        other => panic!("unexpected values: {:?}", other),
    }

    let times = dataset.record_times().expect("Current meters carry a time axis");
    assert_eq!(times.len(), 3);
    assert_eq!(times[0], Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap());
    assert_eq!(times[2], Utc.with_ymd_and_hms(2021, 3, 1, 13, 0, 0).unwrap());

    let attributes = dataset.global_attributes();
    assert_eq!(
        attributes.get("deployment_mission").map(String::as_str),
        Some("2021-12")
    );
    assert_eq!(attributes.get("instrument").map(String::as_str), Some("RCM 7"));
    assert_eq!(attributes.get("latitude").map(String::as_str), Some("50.50000"));
    assert_eq!(attributes.get("longitude").map(String::as_str), Some("-128.25000"));
}

/// Test a profile without a channel detail table
///
/// Purpose: Validate the whitespace fallback and time zone normalization
/// Benefit: Ensures older files without detail tables still parse
#[test]
fn test_parse_ctd_without_detail_table() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "cast_001.ctd", CTD);

    let dataset = parse_file(&path).unwrap();

    assert_eq!(dataset.matrix().rows(), 2);
    assert_eq!(dataset.variable("TEMPS901").map(|v| v.units.as_str()), Some("deg_C"));
    assert_eq!(
        dataset.start_time(),
        Some(Utc.with_ymd_and_hms(2019, 6, 20, 18, 26, 13).unwrap())
    );
    assert!(dataset.record_times().is_none());

    // The bare cast has none of the metadata sections
    let missing: Vec<String> = dataset
        .warnings()
        .iter()
        .filter_map(|w| match w {
            ParseWarning::MissingSection { section } => Some(section.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(missing, vec!["ADMINISTRATION", "INSTRUMENT", "LOCATION"]);
    assert!(dataset.location().latitude.is_none());

    // The summary is serializable for downstream writers
    let json = serde_json::to_value(&dataset).unwrap();
    assert_eq!(json["kind"], "Ctd");
}

/// Test vocabulary loading from disk and instrument matching
///
/// Purpose: Validate that instrument filters use the header's TYPE and MODEL
/// Benefit: Ensures decoration only happens for rows accepting the instrument
#[test]
fn test_vocabulary_from_disk() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let data = write_file(&dir, "a1.cur", CURRENT_METER);
    let vocabulary_path = write_file(&dir, "vocabulary.csv", VOCABULARY);

    let vocabulary = VocabularyTable::from_path(&vocabulary_path).unwrap();
    assert_eq!(vocabulary.len(), 2);

    let dataset = IosProcessor::new()
        .with_vocabulary(vocabulary)
        .parse_file(&data)
        .unwrap();

    let temperature = dataset.variable("TEMPPR01").unwrap();
    assert_eq!(
        temperature.standard_name.as_deref(),
        Some("sea_water_temperature")
    );
    assert_eq!(temperature.units, "degC");

    let east = dataset.variable("LCEWEL01").unwrap();
    assert_eq!(
        east.standard_name.as_deref(),
        Some("eastward_sea_water_velocity")
    );
    assert!(dataset.derived().is_empty());
}

/// Test the failure surface of `parse_file`
///
/// Purpose: Validate that unreadable and unknown files fail with the right category
/// Benefit: Ensures batch callers can route failures without parsing messages
#[test]
fn test_parse_file_failures() {
    init_tracing();
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.ctd");
    let err = parse_file(&missing).unwrap_err();
    assert!(matches!(err, IosError::Open { .. }));
    assert_eq!(err.category(), FailureCategory::HardOpen);

    let unknown = write_file(&dir, "cast.txt", CTD);
    let err = parse_file(&unknown).unwrap_err();
    assert!(matches!(err, IosError::Configuration { .. }));

    let truncated = write_file(&dir, "cut.ctd", &CTD.replace("*END OF HEADER", ""));
    let err = parse_file(&truncated).unwrap_err();
    assert!(matches!(err, IosError::NoEndOfHeader { .. }));
    assert_eq!(err.category(), FailureCategory::Structural);
}
