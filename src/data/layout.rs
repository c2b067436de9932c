//! Fixed-width layout synthesized from `$TABLE: CHANNEL DETAIL`

use crate::constants::{DATE_FIELD_WIDTH, DATE_TIME_FIELD_WIDTH, TIME_FORMAT_WIDTHS};
use crate::models::ChannelDetail;

/// Width of one channel's field.
///
/// Date and time types have fixed widths; otherwise the declared width wins,
/// then a width taken from an `F<w>.<p>` or `I<w>` format.
pub fn field_width(detail: &ChannelDetail) -> Option<usize> {
    let type_letter = detail.type_letter.trim().to_uppercase();
    let format = detail.format.trim().to_uppercase();

    match type_letter.as_str() {
        "D" => return Some(DATE_FIELD_WIDTH),
        "DT" => return Some(DATE_TIME_FIELD_WIDTH),
        _ => {}
    }

    if let Some((_, width)) = TIME_FORMAT_WIDTHS.iter().find(|(pattern, _)| *pattern == format) {
        return Some(*width);
    }

    detail.declared_width().or_else(|| width_from_format(&format))
}

/// Width encoded in a numeric format such as `F10.4` or `I5`
fn width_from_format(format: &str) -> Option<usize> {
    let rest = format.strip_prefix('F').or_else(|| format.strip_prefix('I'))?;
    let width = rest.split('.').next()?;
    width.parse::<usize>().ok().filter(|w| *w > 0)
}

/// Widths for every channel; fails on the first channel without one
pub fn synthesize_widths(details: &[ChannelDetail]) -> Result<Vec<usize>, String> {
    details
        .iter()
        .map(|detail| {
            field_width(detail)
                .ok_or_else(|| format!("no width for channel {}", detail.ordinal + 1))
        })
        .collect()
}

/// Slice a record into raw, untrimmed fields.
///
/// The line is right-trimmed, must fit in the total width, and is padded to it.
pub fn slice_record(line: &str, widths: &[usize]) -> Result<Vec<String>, String> {
    let total: usize = widths.iter().sum();
    let chars: Vec<char> = line.trim_end().chars().collect();
    if chars.len() > total {
        return Err(format!(
            "record of {} characters exceeds layout width {}",
            chars.len(),
            total
        ));
    }

    let mut fields = Vec::with_capacity(widths.len());
    let mut cursor = 0;
    for width in widths {
        let field: String = (cursor..cursor + width)
            .map(|i| chars.get(i).copied().unwrap_or(' '))
            .collect();
        fields.push(field);
        cursor += width;
    }
    Ok(fields)
}
