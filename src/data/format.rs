//! Fortran-style edit lists from the `FORMAT` key of `*FILE`
//!
//! Supported: `Fw.d`, `Ew.d[Ee]`, `Dw.d`, `Gw.d`, `Iw[.m]`, `Aw`, `nX`, repeat
//! counts and one level of parenthesized groups, e.g. `(F7.1,2(1X,F9.4),I5)`.

/// One expanded edit descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDescriptor {
    Real { width: usize, decimals: usize },
    Integer { width: usize },
    Text { width: usize },
    Skip { width: usize },
}

impl EditDescriptor {
    pub fn width(&self) -> usize {
        match self {
            EditDescriptor::Real { width, .. }
            | EditDescriptor::Integer { width }
            | EditDescriptor::Text { width }
            | EditDescriptor::Skip { width } => *width,
        }
    }

    /// Whether the descriptor consumes a data field
    pub fn is_field(&self) -> bool {
        !matches!(self, EditDescriptor::Skip { .. })
    }
}

/// A parsed and fully expanded edit list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortranFormat {
    descriptors: Vec<EditDescriptor>,
}

impl FortranFormat {
    pub fn parse(format: &str) -> Result<Self, String> {
        let compact: String = format.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = match (compact.strip_prefix('('), compact.ends_with(')')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => compact.as_str(),
            _ => return Err(format!("unbalanced parentheses in '{}'", format)),
        };
        if inner.is_empty() {
            return Err("empty format".to_string());
        }

        let mut descriptors = Vec::new();
        for item in split_top_level(inner)? {
            parse_item(item, true, &mut descriptors)?;
        }
        Ok(Self { descriptors })
    }

    pub fn descriptors(&self) -> &[EditDescriptor] {
        &self.descriptors
    }

    /// Number of descriptors that produce a value
    pub fn field_count(&self) -> usize {
        self.descriptors.iter().filter(|d| d.is_field()).count()
    }

    /// Read one record as numbers.
    ///
    /// Short lines are padded with blanks and a blank field reads as zero.
    /// Text (`A`) fields are not numeric and fail the record.
    pub fn read_record(&self, line: &str) -> Result<Vec<f64>, String> {
        let chars: Vec<char> = line.chars().collect();
        let mut cursor = 0;
        let mut values = Vec::with_capacity(self.field_count());

        for descriptor in &self.descriptors {
            let width = descriptor.width();
            let end = (cursor + width).min(chars.len());
            let field: String = chars.get(cursor..end).map(|s| s.iter().collect()).unwrap_or_default();
            cursor += width;

            match descriptor {
                EditDescriptor::Skip { .. } => {}
                EditDescriptor::Text { .. } => {
                    return Err(format!("text field '{}' in numeric record", field.trim()));
                }
                EditDescriptor::Integer { .. } => values.push(read_number(&field, 0)?),
                EditDescriptor::Real { decimals, .. } => values.push(read_number(&field, *decimals)?),
            }
        }

        Ok(values)
    }
}

/// Split on commas outside parentheses
fn split_top_level(list: &str) -> Result<Vec<&str>, String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unbalanced parentheses in '{}'", list))?
            }
            ',' if depth == 0 => {
                items.push(&list[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("unbalanced parentheses in '{}'", list));
    }
    items.push(&list[start..]);

    Ok(items.into_iter().filter(|item| !item.is_empty()).collect())
}

fn parse_item(item: &str, allow_group: bool, out: &mut Vec<EditDescriptor>) -> Result<(), String> {
    let digits = item.chars().take_while(|c| c.is_ascii_digit()).count();
    let repeat = if digits > 0 {
        Some(item[..digits].parse::<usize>().map_err(|e| e.to_string())?)
    } else {
        None
    };
    let rest = &item[digits..];

    if let Some(group) = rest.strip_prefix('(') {
        if !allow_group {
            return Err(format!("nested group '{}' not supported", item));
        }
        let group = group
            .strip_suffix(')')
            .ok_or_else(|| format!("unterminated group '{}'", item))?;

        let mut expanded = Vec::new();
        for inner in split_top_level(group)? {
            parse_item(inner, false, &mut expanded)?;
        }
        for _ in 0..repeat.unwrap_or(1) {
            out.extend_from_slice(&expanded);
        }
        return Ok(());
    }

    let mut chars = rest.chars();
    let letter = chars
        .next()
        .ok_or_else(|| format!("missing descriptor in '{}'", item))?
        .to_ascii_uppercase();
    let spec = chars.as_str();

    if letter == 'X' {
        if !spec.is_empty() {
            return Err(format!("invalid skip descriptor '{}'", item));
        }
        out.push(EditDescriptor::Skip {
            width: repeat.unwrap_or(1),
        });
        return Ok(());
    }

    let (width, decimals) = parse_width(spec, item)?;
    let descriptor = match letter {
        'F' | 'E' | 'D' | 'G' => EditDescriptor::Real { width, decimals },
        'I' => EditDescriptor::Integer { width },
        'A' => EditDescriptor::Text { width },
        other => return Err(format!("unsupported descriptor '{}' in '{}'", other, item)),
    };

    for _ in 0..repeat.unwrap_or(1) {
        out.push(descriptor);
    }
    Ok(())
}

/// `w`, `w.d` or `w.dEe`
fn parse_width(spec: &str, item: &str) -> Result<(usize, usize), String> {
    let spec = spec.split(['E', 'e']).next().unwrap_or("");
    let (width, decimals) = match spec.split_once('.') {
        Some((w, d)) => (w, d),
        None => (spec, ""),
    };

    let width = width
        .parse::<usize>()
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(|| format!("missing width in '{}'", item))?;
    let decimals = if decimals.is_empty() {
        0
    } else {
        decimals
            .parse::<usize>()
            .map_err(|_| format!("invalid decimals in '{}'", item))?
    };

    Ok((width, decimals))
}

/// Fortran numeric input: blank reads as zero, `D` exponents are accepted and
/// a field without a decimal point carries `decimals` implied digits
fn read_number(field: &str, decimals: usize) -> Result<f64, String> {
    let token = field.trim();
    if token.is_empty() {
        return Ok(0.0);
    }

    let normalized = token.replace(['D', 'd'], "E");
    let value = normalized
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", token))?;

    let has_exponent = normalized.contains(['E', 'e']);
    if decimals > 0 && !normalized.contains('.') && !has_exponent {
        Ok(value / 10f64.powi(decimals as i32))
    } else {
        Ok(value)
    }
}
