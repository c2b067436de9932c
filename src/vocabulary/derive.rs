//! Derived variables computed from a matched channel
//!
//! A transform is written in the `apply_function` column, for example
//! `scale(0.1)`, `subtract(PRESPR01)` or `add(@station_depth)`. Operands are
//! numbers, codes of other variables, or `@name` references to global
//! attributes holding a number.

use std::collections::BTreeMap;
use std::fmt;

/// Ratio between the IPTS-68 and ITS-90 temperature scales
const IPTS68_TO_ITS90: f64 = 1.00024;

/// Fill `XX`/`01` and `X`/`1` placeholders at the end of a name with the
/// source channel index
pub fn update_variable_index(name: &str, index: u32) -> String {
    if let Some(base) = name.strip_suffix("XX").or_else(|| name.strip_suffix("01")) {
        format!("{}{:02}", base, index)
    } else if let Some(base) = name.strip_suffix('X').or_else(|| name.strip_suffix('1')) {
        format!("{}{}", base, index)
    } else {
        name.to_string()
    }
}

/// Sensor index carried by a code's trailing digits, at most two of them.
///
/// Codes without digits, or ending in `00`, count as the first sensor.
pub fn code_index(code: &str) -> u32 {
    let digits = code.len() - code.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    match code[code.len() - digits.min(2)..].parse::<u32>() {
        Ok(index) if index > 0 => index,
        _ => 1,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Variable(String),
    Attribute(String),
}

impl Operand {
    fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("missing operand".to_string());
        }
        if let Some(name) = text.strip_prefix('@') {
            return Ok(Operand::Attribute(name.trim().to_string()));
        }
        Ok(text
            .parse::<f64>()
            .map(Operand::Number)
            .unwrap_or_else(|_| Operand::Variable(text.to_string())))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(value) => write!(f, "{}", value),
            Operand::Variable(code) => write!(f, "{}", code),
            Operand::Attribute(name) => write!(f, "@{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Copy,
    Scale(Operand),
    Add(Operand),
    Subtract(Operand),
    Ipts68ToIts90,
}

impl Transform {
    /// Parse an `apply_function` cell; an empty cell is a copy
    pub fn parse(text: Option<&str>) -> Result<Self, String> {
        let text = text.map(str::trim).unwrap_or_default();
        match text {
            "" | "copy" => return Ok(Transform::Copy),
            "ipts68_to_its90" => return Ok(Transform::Ipts68ToIts90),
            _ => {}
        }

        let (name, rest) = text
            .split_once('(')
            .ok_or_else(|| format!("unknown transform '{}'", text))?;
        let argument = rest
            .strip_suffix(')')
            .ok_or_else(|| format!("unclosed argument list in '{}'", text))?;
        let operand = Operand::parse(argument)?;

        match name.trim() {
            "scale" => Ok(Transform::Scale(operand)),
            "add" => Ok(Transform::Add(operand)),
            "subtract" => Ok(Transform::Subtract(operand)),
            other => Err(format!("unknown transform '{}'", other)),
        }
    }

    fn operand(&self) -> Option<&Operand> {
        match self {
            Transform::Scale(operand) | Transform::Add(operand) | Transform::Subtract(operand) => {
                Some(operand)
            }
            Transform::Copy | Transform::Ipts68ToIts90 => None,
        }
    }

    /// Apply the transform to the source values
    pub fn apply(&self, values: &[f64], context: &DeriveContext<'_>) -> Result<Vec<f64>, String> {
        let operand = match self.operand() {
            Some(operand) => Some(context.operand_values(operand, values.len())?),
            None => None,
        };

        let combine = |op: fn(f64, f64) -> f64| -> Vec<f64> {
            let operand = operand.as_deref().unwrap_or_default();
            values.iter().zip(operand).map(|(v, o)| op(*v, *o)).collect()
        };

        Ok(match self {
            Transform::Copy => values.to_vec(),
            Transform::Ipts68ToIts90 => values.iter().map(|v| v / IPTS68_TO_ITS90).collect(),
            Transform::Scale(_) => combine(|v, o| v * o),
            Transform::Add(_) => combine(|v, o| v + o),
            Transform::Subtract(_) => combine(|v, o| v - o),
        })
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Copy => write!(f, "copy"),
            Transform::Ipts68ToIts90 => write!(f, "ipts68_to_its90"),
            Transform::Scale(operand) => write!(f, "scale({})", operand),
            Transform::Add(operand) => write!(f, "add({})", operand),
            Transform::Subtract(operand) => write!(f, "subtract({})", operand),
        }
    }
}

/// Values reachable by operands: numeric variables by code and global attributes
#[derive(Debug, Default)]
pub struct DeriveContext<'a> {
    pub variables: BTreeMap<&'a str, Vec<f64>>,
    pub attributes: Option<&'a BTreeMap<String, String>>,
}

impl DeriveContext<'_> {
    /// Operand expanded to one value per record
    fn operand_values(&self, operand: &Operand, records: usize) -> Result<Vec<f64>, String> {
        match operand {
            Operand::Number(value) => Ok(vec![*value; records]),
            Operand::Attribute(name) => {
                let raw = self
                    .attributes
                    .and_then(|attributes| attributes.get(name))
                    .ok_or_else(|| format!("no global attribute '{}'", name))?;
                let value = raw
                    .split_whitespace()
                    .next()
                    .and_then(|v| v.parse::<f64>().ok())
                    .ok_or_else(|| format!("attribute '{}' is not numeric: '{}'", name, raw))?;
                Ok(vec![value; records])
            }
            Operand::Variable(code) => {
                let values = self
                    .variables
                    .get(code.as_str())
                    .ok_or_else(|| format!("no numeric variable '{}'", code))?;
                if values.len() != records {
                    return Err(format!(
                        "variable '{}' has {} records, expected {}",
                        code,
                        values.len(),
                        records
                    ));
                }
                Ok(values.clone())
            }
        }
    }
}
