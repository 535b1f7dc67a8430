use super::{Position, Range};
use crate::errors::MatrixCalcError;

/// Immutable, non-empty, rectangular grid of numbers (rows outer).
///
/// A `Matrix` only exists once its shape has been validated, so every
/// accessor may rely on `rows.len() > 0` and on all rows having
/// `columns` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
    columns: usize,
}

impl Matrix {
    /// Validate and wrap decoded rows.
    ///
    /// # Errors
    /// - [`MatrixCalcError::EmptyMatrix`] if there are no rows, or rows of no values
    /// - [`MatrixCalcError::NotRectangular`] if any row length differs from the
    ///   first row's; the message carries a rendering of all rows
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, MatrixCalcError> {
        let Some(first) = rows.first() else {
            return Err(MatrixCalcError::EmptyMatrix);
        };

        let columns = first.len();
        if rows.iter().any(|row| row.len() != columns) {
            return Err(MatrixCalcError::NotRectangular {
                rendering: render_rows(&rows),
            });
        }

        if columns == 0 {
            return Err(MatrixCalcError::EmptyMatrix);
        }

        Ok(Self { rows, columns })
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Value at a 1-indexed position.
    ///
    /// # Errors
    /// Returns [`MatrixCalcError::PositionOutOfRange`] when either index is
    /// below 1 or beyond the matrix.
    pub fn value_at(&self, position: Position) -> Result<f64, MatrixCalcError> {
        let out_of_range = || MatrixCalcError::PositionOutOfRange {
            row: position.row(),
            column: position.column(),
        };

        let row = to_offset(position.row(), self.row_count()).ok_or_else(out_of_range)?;
        let column = to_offset(position.column(), self.columns).ok_or_else(out_of_range)?;

        Ok(self.rows[row][column])
    }

    /// Values selected by `range`.
    ///
    /// Whole matrix: row-major, `row_count * column_count` values.
    /// Row: left to right. Column: top to bottom.
    ///
    /// # Errors
    /// Returns [`MatrixCalcError::RangeOutOfRange`] when the row or column
    /// index is below 1 or beyond the matrix.
    pub fn values_in_range(&self, range: Range) -> Result<Vec<f64>, MatrixCalcError> {
        let out_of_range = || MatrixCalcError::RangeOutOfRange { range };

        match range {
            Range::Whole => {
                let mut values = vec![0.0; self.row_count() * self.columns];
                for (row_index, row) in self.rows.iter().enumerate() {
                    let start = row_index * self.columns;
                    values[start..start + self.columns].copy_from_slice(row);
                }
                Ok(values)
            }
            Range::Row(index) => {
                let row = to_offset(index, self.row_count()).ok_or_else(out_of_range)?;
                Ok(self.rows[row].clone())
            }
            Range::Column(index) => {
                let column = to_offset(index, self.columns).ok_or_else(out_of_range)?;
                Ok(self.rows.iter().map(|row| row[column]).collect())
            }
        }
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixCalcError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

/// Map a 1-based index onto a 0-based offset below `len`.
fn to_offset(index: i64, len: usize) -> Option<usize> {
    let index = usize::try_from(index).ok()?;
    (1..=len).contains(&index).then(|| index - 1)
}

/// Render rows as `[[1.0, 2.5], [3.0]]`; every number keeps a fractional digit.
#[allow(clippy::use_debug)] // `Debug` for f64 is the rendering that keeps `1.0` intact
fn render_rows(rows: &[Vec<f64>]) -> String {
    let rendered: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(|value| format!("{value:?}")).collect();
            format!("[{}]", values.join(", "))
        })
        .collect();
    format!("[{}]", rendered.join(", "))
}
