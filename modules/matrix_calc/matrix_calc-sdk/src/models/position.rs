use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DELIMITER, parse_index, split_pair};
use crate::errors::MatrixCalcError;

/// A 1-indexed `(row, column)` coordinate, written `"<row>-<column>"`.
///
/// Parsing only checks the shape of the text. Zero, negative and oversized
/// indices are accepted here and rejected by [`crate::Matrix::value_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    row: i64,
    column: i64,
}

impl Position {
    #[must_use]
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }

    /// Parse `"<row>-<column>"`.
    ///
    /// # Errors
    /// Returns [`MatrixCalcError::InvalidPosition`] (echoing `text`) unless the
    /// input is exactly two base-10 integers joined by a single `-`.
    pub fn parse(text: &str) -> Result<Self, MatrixCalcError> {
        let (row, column) = split_pair(text)
            .and_then(|(row, column)| Some((parse_index(row)?, parse_index(column)?)))
            .ok_or_else(|| MatrixCalcError::invalid_position(text))?;
        Ok(Self { row, column })
    }

    #[must_use]
    pub const fn row(&self) -> i64 {
        self.row
    }

    #[must_use]
    pub const fn column(&self) -> i64 {
        self.column
    }
}

impl FromStr for Position {
    type Err = MatrixCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.row, self.column)
    }
}
