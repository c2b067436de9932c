//! Column-mask decoding of header tables
//!
//! IOS tables carry a dash line (`!--- ------ ----`) under their column titles.
//! Each contiguous run of dashes marks one column. Values normally sit inside
//! their column, but a single-quoted value may overrun into the next one:
//!
//! ```text
//! !No Name                  Units          Minimum
//! !-- --------------------- -------------- ----------
//!   1 Pressure              decibar        2.1
//!   2 Temperature:Primary   'deg C (ITS90)'  3.0871
//! ```

use crate::constants::COMMENT_SIGIL;
use crate::error::{IosError, Result};

/// Split one table row into fields using the dash runs of `mask`.
///
/// Single quotes toggle quoting and are dropped. While quoted, characters under
/// a mask gap are kept; if a gap was crossed, or the closing quote itself
/// sits on a gap, the closing quote ends the field.
/// Positions past the end of the mask belong to the last mask column type.
pub fn apply_column_mask(line: &str, mask: &str) -> Vec<String> {
    let mask: Vec<bool> = mask.trim_end().chars().map(|c| c == '-').collect();
    let data: Vec<char> = line.trim_end().chars().collect();
    let tail_in_column = mask.last().copied().unwrap_or(false);
    let width = mask.len().max(data.len());

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut crossed_gap = false;

    for position in 0..width {
        let ch = data.get(position).copied().unwrap_or(' ');
        let in_column = mask.get(position).copied().unwrap_or(tail_in_column);

        if ch == '\'' {
            if quoted && (crossed_gap || !in_column) {
                crossed_gap = false;
                push_field(&mut fields, &mut current);
            }
            quoted = !quoted;
        } else if in_column {
            current.push(ch);
        } else if quoted {
            crossed_gap = true;
            current.push(ch);
        } else {
            push_field(&mut fields, &mut current);
        }
    }
    push_field(&mut fields, &mut current);

    fields
}

fn push_field(fields: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        fields.push(current.trim().to_string());
        current.clear();
    }
}

/// Whether a line is the dash mask of a table
pub fn is_mask_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("!-") || trimmed.starts_with('-')
}

/// Decode the rows of a table subsection.
///
/// Rows are the non-blank, non-comment lines after the mask line. A row with
/// fewer than `min_fields` fields, or a row count different from
/// `expected_rows`, is a structural failure.
pub fn decode_table(
    lines: &[String],
    table: &str,
    expected_rows: Option<usize>,
    min_fields: usize,
    file: &str,
) -> Result<Vec<Vec<String>>> {
    let mask_index = lines
        .iter()
        .position(|l| is_mask_line(l))
        .ok_or_else(|| IosError::InvalidHeaderValue {
            file: file.to_string(),
            key: table.to_string(),
            value: "no column mask line".to_string(),
        })?;
    let mask = &lines[mask_index];

    let mut rows = Vec::new();
    for line in &lines[mask_index + 1..] {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_SIGIL) {
            continue;
        }

        let fields = apply_column_mask(line, mask);
        if fields.len() < min_fields {
            return Err(IosError::TableFieldMismatch {
                file: file.to_string(),
                table: table.to_string(),
                row: rows.len() + 1,
                expected: min_fields,
                found: fields.len(),
            });
        }
        rows.push(fields);
    }

    if let Some(expected) = expected_rows {
        if rows.len() != expected {
            return Err(IosError::TableRowMismatch {
                file: file.to_string(),
                table: table.to_string(),
                expected,
                found: rows.len(),
            });
        }
    }

    Ok(rows)
}
