use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DELIMITER, WILDCARD, parse_index, split_pair};
use crate::errors::MatrixCalcError;

/// Selects the values a reduction runs over.
///
/// Written as `"<n>-x"` for a row, `"x-<n>"` for a column; an absent
/// argument selects the whole matrix. Indices are 1-based and only checked
/// against a concrete matrix by [`crate::Matrix::values_in_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum Range {
    #[default]
    Whole,
    Row(i64),
    Column(i64),
}

impl Range {
    /// Parse an optional range argument.
    ///
    /// # Errors
    /// Returns [`MatrixCalcError::InvalidRange`] (echoing `text`) unless the
    /// input is a single `-` joining the `x` wildcard and a base-10 integer.
    pub fn parse(text: Option<&str>) -> Result<Self, MatrixCalcError> {
        let Some(text) = text else {
            return Ok(Self::Whole);
        };

        let invalid = || MatrixCalcError::invalid_range(text);
        let (first, second) = split_pair(text).ok_or_else(invalid)?;

        match (first == WILDCARD, second == WILDCARD) {
            (false, true) => parse_index(first).map(Self::Row).ok_or_else(invalid),
            (true, false) => parse_index(second).map(Self::Column).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    /// Row or column index; `None` for [`Range::Whole`].
    #[must_use]
    pub const fn value(&self) -> Option<i64> {
        match self {
            Self::Whole => None,
            Self::Row(index) | Self::Column(index) => Some(*index),
        }
    }

    #[must_use]
    pub const fn is_whole(&self) -> bool {
        matches!(self, Self::Whole)
    }
}

impl FromStr for Range {
    type Err = MatrixCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole => f.write_str("unbounded range"),
            Self::Row(row) => write!(f, "{row}{DELIMITER}{WILDCARD}"),
            Self::Column(column) => write!(f, "{WILDCARD}{DELIMITER}{column}"),
        }
    }
}
