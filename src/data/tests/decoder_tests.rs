//! Tests for the data decoding state machine

use super::super::decoder::{DataDecoder, DecodeInput, DecodeState, DecodeStrategy, decode_data};
use super::{detail, lines};
use crate::error::IosError;
use crate::models::{ColumnValues, StorageType};
use crate::report::{ParseReport, ParseWarning};

fn input<'a>(
    data: &'a [String],
    format: Option<&'a str>,
    details: Option<&'a [crate::models::ChannelDetail]>,
) -> DecodeInput<'a> {
    DecodeInput {
        lines: data,
        channel_count: 2,
        declared_records: Some(3),
        format,
        details,
    }
}

#[test]
fn test_declared_format_wins() {
    let data = lines(&["    1.0    9.1234", "    2.0    9.2000", "", "    3.0    9.3000"]);
    let mut report = ParseReport::new("t.ctd");
    let matrix = decode_data(input(&data, Some("(F7.1,F10.4)"), None), &mut report).unwrap();

    assert_eq!(matrix.strategy(), DecodeStrategy::DeclaredFormat);
    assert_eq!((matrix.rows(), matrix.cols()), (3, 2));
    assert!(matrix.is_numeric());
    assert_eq!(matrix.cell_f64(2, 1), Some(9.3));
    assert!(!report.has_warnings());
}

#[test]
fn test_synthesized_width_when_no_format() {
    let data = lines(&["    1.0    9.1234", "    2.0    9.2000", "    3.0    9.3000"]);
    let details = vec![detail(0, "7", "F", "R4"), detail(1, "10", "F", "R4")];
    let mut report = ParseReport::new("t.ctd");
    let matrix = decode_data(input(&data, None, Some(&details)), &mut report).unwrap();

    assert_eq!(matrix.strategy(), DecodeStrategy::SynthesizedWidth);
    assert_eq!(matrix.cell_text(0, 1).as_deref(), Some("    9.1234"));
    assert_eq!(
        matrix.layout_line(0, &[7, 10]).as_deref(),
        Some("    1.0    9.1234")
    );
    assert!(!report.has_warnings());
}

#[test]
fn test_bad_format_falls_back_with_warning() {
    let data = lines(&["1.0 9.1", "2.0 9.2", "3.0 9.3"]);
    let mut report = ParseReport::new("t.ctd");
    let matrix = decode_data(input(&data, Some("(F7.1,F10.4,F5.1)"), None), &mut report).unwrap();

    assert_eq!(matrix.strategy(), DecodeStrategy::Whitespace);
    assert_eq!(matrix.column_text(0), vec!["1.0", "2.0", "3.0"]);
    assert_eq!(
        report.count(|w| matches!(w, ParseWarning::StrategyFallback { .. })),
        1
    );
}

#[test]
fn test_record_count_mismatch_rejects_strategy() {
    let data = lines(&["1.0 9.1", "2.0 9.2"]);
    let mut report = ParseReport::new("t.ctd");
    let err = decode_data(input(&data, None, None), &mut report).unwrap_err();

    assert!(matches!(err, IosError::DataDecode { .. }));
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_state_transitions() {
    let data = lines(&["a b c", "d e f", "g h i"]);
    let mut decoder = DataDecoder::new(input(&data, Some("(F7.1,F10.4)"), None));

    assert_eq!(decoder.state(), DecodeState::TryDeclaredFormat);
    assert!(decoder.step().is_none());
    assert_eq!(decoder.state(), DecodeState::TrySynthesizedWidth);
    // No detail table: skipped without a failure
    assert!(decoder.step().is_none());
    assert_eq!(decoder.state(), DecodeState::TryWhitespace);
    assert!(decoder.step().is_none());
    assert_eq!(decoder.state(), DecodeState::Failed);
    assert!(decoder.step().is_none());
    assert_eq!(decoder.failures().len(), 2);
}

#[test]
fn test_no_retry_after_success() {
    let data = lines(&["1 2", "3 4", "5 6"]);
    let mut decoder = DataDecoder::new(input(&data, None, None));
    assert!(decoder.run().is_some());
    assert_eq!(decoder.state(), DecodeState::Done(DecodeStrategy::Whitespace));
    assert!(decoder.step().is_none());
}

#[test]
fn test_single_record() {
    let data = lines(&["  1.5  2.5"]);
    let mut report = ParseReport::new("t.ctd");
    let matrix = decode_data(
        DecodeInput {
            lines: &data,
            channel_count: 2,
            declared_records: Some(1),
            format: None,
            details: None,
        },
        &mut report,
    )
    .unwrap();
    assert_eq!((matrix.rows(), matrix.cols()), (1, 2));
}

#[test]
fn test_typed_columns() {
    let data = lines(&["1 2019/06/20 x", "2 2019/06/21 4.5", "3 2019/06/22 -99"]);
    let mut report = ParseReport::new("t.ctd");
    let matrix = decode_data(
        DecodeInput {
            lines: &data,
            channel_count: 3,
            declared_records: None,
            format: None,
            details: None,
        },
        &mut report,
    )
    .unwrap();

    assert_eq!(
        matrix.typed_column(0, StorageType::Int32, "t").unwrap(),
        ColumnValues::Int32(vec![1, 2, 3])
    );
    assert_eq!(
        matrix.typed_column(1, StorageType::Text, "t").unwrap(),
        ColumnValues::Text(vec![
            "2019/06/20".to_string(),
            "2019/06/21".to_string(),
            "2019/06/22".to_string()
        ])
    );
    match matrix.typed_column(2, StorageType::Real32, "t").unwrap() {
        ColumnValues::Real32(values) => {
            assert!(values[0].is_nan());
            assert_eq!(values[1], 4.5);
            assert_eq!(values[2], -99.0);
        }
        other => panic!("expected real column, got {:?}", other),
    }
    assert!(matrix.typed_column(1, StorageType::Int32, "t").is_err());
    assert!(matrix.typed_column(3, StorageType::Text, "t").is_err());
}
