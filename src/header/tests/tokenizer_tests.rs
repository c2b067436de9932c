//! Tests for header line classification

use super::super::tokenizer::{LineKind, classify_line, is_subsection_end};

#[test]
fn test_section_headers() {
    assert_eq!(classify_line("*FILE"), LineKind::SectionHeader("FILE"));
    assert_eq!(
        classify_line("*LOCATION   \r"),
        LineKind::SectionHeader("LOCATION")
    );
    assert_eq!(classify_line("*END OF HEADER"), LineKind::EndOfHeader);
    assert_eq!(classify_line("** separator"), LineKind::Boundary);
    assert_eq!(classify_line("* note"), LineKind::Boundary);
}

#[test]
fn test_subsection_markers() {
    assert_eq!(
        classify_line("    $TABLE: CHANNELS"),
        LineKind::SubsectionHeader("$TABLE: CHANNELS")
    );
    assert_eq!(classify_line("    $END"), LineKind::SubsectionEnd);
    assert_eq!(classify_line("$REMARKS"), LineKind::Boundary);

    // Outside the narrow window it is an ordinary key/value line
    assert_eq!(
        classify_line("        TOTAL $ : 12"),
        LineKind::KeyValue("TOTAL $", "12")
    );

    assert!(is_subsection_end("    $END"));
    assert!(!is_subsection_end("    $TABLE: CHANNELS"));
}

#[test]
fn test_key_value_splits_at_first_separator() {
    assert_eq!(
        classify_line("    START TIME          : UTC 2019/06/20 18:26:13.000"),
        LineKind::KeyValue("START TIME", "UTC 2019/06/20 18:26:13.000")
    );
    assert_eq!(
        classify_line("    DATA DESCRIPTION    :"),
        LineKind::KeyValue("DATA DESCRIPTION", "")
    );
}

#[test]
fn test_comments_blank_and_unrecognized() {
    assert_eq!(classify_line("    ! a comment"), LineKind::Comment);
    assert_eq!(classify_line("   "), LineKind::Blank);
    assert_eq!(classify_line(""), LineKind::Blank);
    assert_eq!(classify_line("    no separator here"), LineKind::Unrecognized);
}

#[test]
fn test_closes_section() {
    assert!(LineKind::SectionHeader("FILE").closes_section());
    assert!(LineKind::EndOfHeader.closes_section());
    assert!(LineKind::Boundary.closes_section());
    assert!(!LineKind::KeyValue("A", "B").closes_section());
    assert!(!LineKind::SubsectionHeader("$TABLE: CHANNELS").closes_section());
}
