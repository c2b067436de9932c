//! Time handling for IOS headers and records
//!
//! Header times carry a zone token in front of the timestamp
//! (`PST 2020/01/15 10:00:00.00`). Zones map to fixed offsets without any
//! daylight-saving logic; every derived timestamp is UTC.

use crate::constants::{START_TIME_TOLERANCE_SECONDS, TIME_ZONE_OFFSETS};
use crate::error::{IosError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Day, hour, minute, second and millisecond weights of a `TIME INCREMENT`
const INCREMENT_WEIGHTS: [f64; 5] = [86_400.0, 3_600.0, 60.0, 1.0, 0.001];

/// Hours to add to a local time for a zone token
pub fn zone_offset_hours(zone: &str) -> Option<i64> {
    TIME_ZONE_OFFSETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(zone))
        .map(|(_, hours)| *hours)
}

/// Parse a zone-tagged header time into UTC
pub fn parse_header_time(value: &str, file: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    let (zone, payload) = trimmed
        .split_once(char::is_whitespace)
        .ok_or_else(|| IosError::invalid_time(file, value, "expected '<ZONE> <date> [time]'"))?;

    let unknown_zone = || IosError::UnknownTimeZone {
        file: file.to_string(),
        zone: zone.to_string(),
        value: value.to_string(),
    };
    if !(3..=4).contains(&zone.len()) {
        return Err(unknown_zone());
    }
    let offset = zone_offset_hours(zone).ok_or_else(unknown_zone)?;

    let local = parse_naive(payload.trim())
        .ok_or_else(|| IosError::invalid_time(file, value, "unrecognized date/time layout"))?;

    local
        .checked_add_signed(TimeDelta::hours(offset))
        .map(|utc| utc.and_utc())
        .ok_or_else(|| IosError::invalid_time(file, value, "out of range after zone offset"))
}

/// `YYYY/MM/DD[ HH:MM[:SS[.fff]]]`, date-only values at midnight
fn parse_naive(payload: &str) -> Option<NaiveDateTime> {
    let mut parts = payload.split_whitespace();
    let date = parse_date(parts.next()?)?;
    match parts.next() {
        None => Some(date.and_time(NaiveTime::MIN)),
        Some(time) if parts.next().is_none() => Some(date.and_time(parse_time(time)?)),
        Some(_) => None,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value.trim(), format).ok())
}

/// Render a timestamp the way IOS headers write it: `YYYY/MM/DD HH:MM:SS.ss`
pub fn format_ios_time(time: &DateTime<Utc>) -> String {
    let centiseconds = time.timestamp_subsec_millis() / 10;
    format!("{}.{:02}", time.format("%Y/%m/%d %H:%M:%S"), centiseconds)
}

/// Seconds in a `TIME INCREMENT` value (`0 0 1 30 0 ! (day hr min sec ms)`)
pub fn parse_time_increment(value: &str) -> Option<f64> {
    let value = value.split('!').next()?.trim();
    let parts = value
        .split_whitespace()
        .map(|part| part.parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    if parts.len() != INCREMENT_WEIGHTS.len() {
        return None;
    }
    Some(parts.iter().zip(INCREMENT_WEIGHTS).map(|(part, weight)| part * weight).sum())
}

/// Per-record timestamps from `Date` and optional `Time` columns.
///
/// Rows without a time are taken at midnight.
pub fn record_times_from_columns(
    dates: &[String],
    times: Option<&[String]>,
    file: &str,
) -> Result<Vec<DateTime<Utc>>> {
    dates
        .iter()
        .enumerate()
        .map(|(row, date)| {
            let day = parse_date(date)
                .ok_or_else(|| IosError::invalid_time(file, date.trim(), "unrecognized record date"))?;
            let time = match times.and_then(|t| t.get(row)) {
                Some(time) => parse_time(time)
                    .ok_or_else(|| {
                        IosError::invalid_time(file, time.trim(), "unrecognized record time")
                    })?,
                None => NaiveTime::MIN,
            };
            Ok(day.and_time(time).and_utc())
        })
        .collect()
}

/// Per-record timestamps from the start time and a constant increment.
///
/// Fails when an offset is not finite or leaves the representable range.
pub fn record_times_from_increment(
    start: DateTime<Utc>,
    increment_seconds: f64,
    records: usize,
    file: &str,
) -> Result<Vec<DateTime<Utc>>> {
    (0..records)
        .map(|index| {
            let offset_ms = (increment_seconds * 1_000.0 * index as f64).round();
            let out_of_range = || {
                IosError::invalid_time(
                    file,
                    format!("{} s x {}", increment_seconds, index),
                    "record offset out of range",
                )
            };
            if !offset_ms.is_finite() || offset_ms.abs() >= i64::MAX as f64 {
                return Err(out_of_range());
            }
            TimeDelta::try_milliseconds(offset_ms as i64)
                .and_then(|offset| start.checked_add_signed(offset))
                .ok_or_else(out_of_range)
        })
        .collect()
}

/// Inputs for [`derive_record_times`]
#[derive(Debug, Clone, Copy)]
pub struct TimeAxisInput<'a> {
    /// Values of the `Date` channel
    pub dates: Option<&'a [String]>,
    /// Values of the `Time` channel
    pub times: Option<&'a [String]>,
    pub start: Option<DateTime<Utc>>,
    /// Raw `TIME INCREMENT` value
    pub increment: Option<&'a str>,
    pub records: usize,
    pub file: &'a str,
}

/// Per-record timestamps: from the date/time channels when present,
/// otherwise from the start time and the time increment
pub fn derive_record_times(input: &TimeAxisInput<'_>) -> Result<Vec<DateTime<Utc>>> {
    if let Some(dates) = input.dates {
        return record_times_from_columns(dates, input.times, input.file);
    }

    let increment = input.increment.and_then(parse_time_increment);
    match (input.start, increment) {
        (Some(start), Some(increment)) => {
            record_times_from_increment(start, increment, input.records, input.file)
        }
        _ => Err(IosError::MissingTimeAxis {
            file: input.file.to_string(),
        }),
    }
}

/// The first record must lie within the start-time tolerance
pub fn verify_first_record(
    times: &[DateTime<Utc>],
    start: DateTime<Utc>,
    file: &str,
) -> Result<()> {
    let Some(first) = times.first() else {
        return Ok(());
    };

    let difference = (*first - start).num_milliseconds().abs();
    if difference > START_TIME_TOLERANCE_SECONDS * 1_000 {
        return Err(IosError::TimeMismatch {
            file: file.to_string(),
            first: format_ios_time(first),
            start: format_ios_time(&start),
            seconds: difference / 1_000,
        });
    }
    Ok(())
}
