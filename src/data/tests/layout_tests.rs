//! Tests for synthesized fixed-width layouts

use super::super::layout::{field_width, slice_record, synthesize_widths};
use super::detail;

#[test]
fn test_field_width_rules() {
    assert_eq!(field_width(&detail(0, "", "YYYY/MM/DD", "D")), Some(11));
    assert_eq!(field_width(&detail(0, "", "", "DT")), Some(17));
    assert_eq!(field_width(&detail(0, "", "HH:MM:SS.SS", "T")), Some(12));
    assert_eq!(field_width(&detail(0, "", "HH:MM:SS", "T")), Some(9));
    assert_eq!(field_width(&detail(0, "", "HH:MM", "T")), Some(6));
    assert_eq!(field_width(&detail(0, "8", "F10.4", "R4")), Some(8));
    assert_eq!(field_width(&detail(0, "", "F10.4", "R4")), Some(10));
    assert_eq!(field_width(&detail(0, " ", "I5", "I")), Some(5));
    assert_eq!(field_width(&detail(0, "", "F", "R4")), None);
}

#[test]
fn test_synthesize_widths_fails_on_missing_width() {
    let details = vec![detail(0, "7", "F", "R4"), detail(1, "", "F", "R4")];
    let err = synthesize_widths(&details).unwrap_err();
    assert!(err.contains("channel 2"));
}

#[test]
fn test_slice_record_keeps_raw_tokens() {
    let fields = slice_record(" 2019/06/20 18:26    9.1", &[11, 6, 7]).unwrap();
    assert_eq!(fields, vec![" 2019/06/20", " 18:26", "    9.1"]);

    // Trailing whitespace is trimmed before the width check, then padded back
    let fields = slice_record("   1.0  \t", &[5, 3]).unwrap();
    assert_eq!(fields, vec!["   1.", "0  "]);
}

#[test]
fn test_slice_record_rejects_long_lines() {
    assert!(slice_record("123456789", &[4, 4]).is_err());
}
