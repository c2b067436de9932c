//! Tests for section tree building

use super::super::section_tree::{SectionBody, SectionTree};
use super::{lines_of, sample_lines};
use crate::error::{FailureCategory, IosError};
use crate::report::{ParseReport, ParseWarning};

fn parse(lines: &[String]) -> (SectionTree, ParseReport) {
    let mut report = ParseReport::new("test.ctd");
    let tree = SectionTree::parse(lines, &mut report).unwrap();
    (tree, report)
}

#[test]
fn test_sample_sections_in_order() {
    let (tree, report) = parse(&sample_lines());

    let names: Vec<&str> = tree.section_names().collect();
    assert_eq!(
        names,
        vec!["FILE", "ADMINISTRATION", "LOCATION", "INSTRUMENT", "COMMENTS"]
    );
    assert!(!report.has_warnings());

    assert_eq!(tree.created(), "2019/07/02 09:40:28.93");
    assert_eq!(tree.header_version(), "2.0");
    assert_eq!(tree.value("FILE", "NUMBER OF RECORDS"), Some("3"));
    assert_eq!(
        tree.value("ADMINISTRATION", "AGENCY"),
        Some("IOS, Ocean Sciences Division, Sidney, B.C.")
    );
}

#[test]
fn test_parsing_is_repeatable() {
    let lines = sample_lines();
    let (first, first_report) = parse(&lines);
    let (second, second_report) = parse(&lines);

    assert_eq!(first, second);
    assert_eq!(first_report.warnings, second_report.warnings);
}

#[test]
fn test_subsections_kept_verbatim() {
    let (tree, _) = parse(&sample_lines());
    let file = tree.section("FILE").unwrap();

    let names: Vec<&str> = file.subsection_names().collect();
    assert_eq!(names, vec!["$TABLE: CHANNELS", "$TABLE: CHANNEL DETAIL"]);

    let channels = file.subsection("$TABLE: CHANNELS").unwrap();
    assert_eq!(channels.len(), 5);
    assert!(channels[1].trim_start().starts_with("!---"));
    assert_eq!(
        channels[2],
        "       1 Pressure               decibar        1              3"
    );
}

#[test]
fn test_free_text_keyed_by_line_number() {
    let (tree, _) = parse(&sample_lines());
    let comments = tree.free_text("COMMENTS").unwrap();

    let entries: Vec<(usize, &str)> = comments.iter().map(|(k, v)| (*k, v.as_str())).collect();
    assert_eq!(
        entries,
        vec![
            (42, "    Cast taken in calm seas."),
            (43, "    $ values checked against bottle samples"),
            (44, "    Downcast only."),
        ]
    );
}

#[test]
fn test_data_lines_follow_end_of_header() {
    let (tree, _) = parse(&sample_lines());
    let data = tree.data_lines("test.ctd").unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0], "    1.0    9.1234   28.1000");
}

#[test]
fn test_repeated_sections_accumulate() {
    let lines = lines_of(
        "*2020/01/01\n*IOS HEADER VERSION 2.0\n\
         *RAW\n    SENSOR : A\n\
         *RAW\n    SENSOR : B\n\
         *RAW\n    SENSOR : C\n\
         *END OF HEADER\n",
    );
    let (tree, _) = parse(&lines);

    match tree.body("RAW").unwrap() {
        SectionBody::Repeated(maps) => assert_eq!(maps.len(), 3),
        other => panic!("expected repeated section, got {:?}", other),
    }
    let sensors: Vec<&str> = tree
        .repeated("RAW")
        .iter()
        .filter_map(|m| m.get("SENSOR"))
        .collect();
    assert_eq!(sensors, vec!["A", "B", "C"]);
    assert_eq!(tree.value("RAW", "SENSOR"), Some("A"));
}

#[test]
fn test_missing_section_returns_empty_map_with_warning() {
    let (tree, mut report) = parse(&sample_lines());

    let deployment = tree.section_or_empty("DEPLOYMENT", &mut report);
    assert!(deployment.is_empty());
    assert_eq!(
        report.warnings,
        vec![ParseWarning::MissingSection {
            section: "DEPLOYMENT".to_string()
        }]
    );
}

#[test]
fn test_unrecognized_line_is_warned_and_skipped() {
    let lines = lines_of(
        "*2020/01/01\n*IOS HEADER VERSION 2.0\n\
         *FILE\n    START TIME : UTC 2020/01/01 00:00:00\n    stray text\n    PAD : -99\n\
         *END OF HEADER\n",
    );
    let (tree, report) = parse(&lines);

    assert_eq!(tree.value("FILE", "PAD"), Some("-99"));
    assert_eq!(
        report.warnings,
        vec![ParseWarning::UnrecognizedLine {
            line_number: 5,
            line: "stray text".to_string()
        }]
    );
}

#[test]
fn test_unterminated_subsection_fails() {
    let lines = lines_of(
        "*2020/01/01\n*IOS HEADER VERSION 2.0\n\
         *FILE\n    $TABLE: CHANNELS\n    !-- ----\n      1 Pressure\n",
    );
    let mut report = ParseReport::new("broken.ctd");
    let err = SectionTree::parse(&lines, &mut report).unwrap_err();

    assert!(matches!(err, IosError::UnterminatedSubsection { .. }));
    assert_eq!(err.category(), FailureCategory::Structural);
}

#[test]
fn test_missing_end_of_header() {
    let lines = lines_of("*2020/01/01\n*IOS HEADER VERSION 2.0\n*FILE\n    PAD : -99\n");
    let (tree, _) = parse(&lines);

    assert_eq!(tree.value("FILE", "PAD"), Some("-99"));
    assert!(matches!(
        tree.data_lines("x.ctd"),
        Err(IosError::NoEndOfHeader { .. })
    ));
}

#[test]
fn test_empty_input() {
    let (tree, _) = parse(&[]);
    assert_eq!(tree.created(), "");
    assert_eq!(tree.header_version(), "");
    assert_eq!(tree.section_names().count(), 0);
}
