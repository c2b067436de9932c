//! Decoded data block

use super::decoder::DecodeStrategy;
use crate::error::{IosError, Result};
use crate::models::{ColumnValues, StorageType};
use serde::Serialize;

/// Cells of a matrix, row-major
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cells {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

/// Rectangular rows × cols block of decoded values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataMatrix {
    rows: usize,
    cols: usize,
    cells: Cells,
    strategy: DecodeStrategy,
}

impl DataMatrix {
    pub fn from_numeric_rows(
        rows: Vec<Vec<f64>>,
        cols: usize,
        strategy: DecodeStrategy,
    ) -> std::result::Result<Self, String> {
        check_rectangular(&rows, cols)?;
        Ok(Self {
            rows: rows.len(),
            cols,
            cells: Cells::Numeric(rows.into_iter().flatten().collect()),
            strategy,
        })
    }

    pub fn from_text_rows(
        rows: Vec<Vec<String>>,
        cols: usize,
        strategy: DecodeStrategy,
    ) -> std::result::Result<Self, String> {
        check_rectangular(&rows, cols)?;
        Ok(Self {
            rows: rows.len(),
            cols,
            cells: Cells::Text(rows.into_iter().flatten().collect()),
            strategy,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Strategy that produced this matrix
    pub fn strategy(&self) -> DecodeStrategy {
        self.strategy
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.cells, Cells::Numeric(_))
    }

    /// Cell rendered as text; numeric cells use their shortest representation
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let index = row * self.cols + col;
        match &self.cells {
            Cells::Numeric(values) => values.get(index).map(|v| v.to_string()),
            Cells::Text(values) => values.get(index).cloned(),
        }
    }

    /// Cell as a number; text cells are trimmed and parsed
    pub fn cell_f64(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let index = row * self.cols + col;
        match &self.cells {
            Cells::Numeric(values) => values.get(index).copied(),
            Cells::Text(values) => values.get(index).and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Trimmed text of every cell in a column
    pub fn column_text(&self, col: usize) -> Vec<String> {
        (0..self.rows)
            .filter_map(|row| self.cell_text(row, col))
            .map(|cell| cell.trim().to_string())
            .collect()
    }

    /// Re-encode a row as fixed-width text, right-aligning each cell in its width
    pub fn layout_line(&self, row: usize, widths: &[usize]) -> Option<String> {
        if row >= self.rows || widths.len() != self.cols {
            return None;
        }
        let mut line = String::new();
        for (col, width) in widths.iter().enumerate() {
            let cell = self.cell_text(row, col)?;
            match &self.cells {
                Cells::Text(_) => line.push_str(&format!("{:<width$}", cell, width = *width)),
                Cells::Numeric(_) => line.push_str(&format!("{:>width$}", cell, width = *width)),
            }
        }
        Some(line)
    }

    /// Convert one column to typed values.
    ///
    /// Real32 cells that do not parse become NaN. An Int32 cell that does not
    /// hold an integer is a structural failure.
    pub fn typed_column(
        &self,
        col: usize,
        storage: StorageType,
        file: &str,
    ) -> Result<ColumnValues> {
        if col >= self.cols {
            return Err(IosError::DataDecode {
                file: file.to_string(),
                reason: format!("column {} out of range ({} columns)", col + 1, self.cols),
            });
        }

        match storage {
            StorageType::Real32 => Ok(ColumnValues::Real32(
                (0..self.rows)
                    .map(|row| self.cell_f64(row, col).map(|v| v as f32).unwrap_or(f32::NAN))
                    .collect(),
            )),
            StorageType::Int32 => {
                let mut values = Vec::with_capacity(self.rows);
                for row in 0..self.rows {
                    let value = self
                        .cell_f64(row, col)
                        .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
                        .ok_or_else(|| IosError::DataDecode {
                            file: file.to_string(),
                            reason: format!(
                                "row {} column {}: '{}' is not an integer",
                                row + 1,
                                col + 1,
                                self.cell_text(row, col).unwrap_or_default().trim()
                            ),
                        })?;
                    values.push(value as i32);
                }
                Ok(ColumnValues::Int32(values))
            }
            StorageType::Text => Ok(ColumnValues::Text(self.column_text(col))),
        }
    }
}

fn check_rectangular<T>(rows: &[Vec<T>], cols: usize) -> std::result::Result<(), String> {
    match rows.iter().position(|row| row.len() != cols) {
        Some(index) => Err(format!(
            "row {} has {} columns, expected {}",
            index + 1,
            rows[index].len(),
            cols
        )),
        None => Ok(()),
    }
}
