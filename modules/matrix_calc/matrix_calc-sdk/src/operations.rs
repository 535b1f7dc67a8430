//! Fixed operation tables.
//!
//! Names are matched exactly and case-sensitively. Both tables are closed
//! enums so dispatch is checked for exhaustiveness at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MatrixCalcError;

/// Two-operand operation applied to `(first, second)` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperation {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Resolve an operation by its canonical name.
    ///
    /// # Errors
    /// Returns [`MatrixCalcError::UnsupportedOperation`] for unknown or absent names.
    pub fn lookup(name: Option<&str>) -> Result<Self, MatrixCalcError> {
        name.and_then(|name| Self::ALL.into_iter().find(|op| op.name() == name))
            .ok_or_else(|| MatrixCalcError::unsupported_operation(name))
    }

    /// Apply the operation. The result may be infinite or NaN; callers decide
    /// whether that is acceptable.
    #[must_use]
    pub fn apply(self, first: f64, second: f64) -> f64 {
        match self {
            Self::Add => first + second,
            Self::Subtract => first - second,
            Self::Multiply => first * second,
            Self::Divide => first / second,
        }
    }
}

/// Operation folding a sequence of values into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionOperation {
    Sum,
    Product,
    Min,
    Max,
    Average,
}

impl ReductionOperation {
    pub const ALL: [Self; 5] = [
        Self::Sum,
        Self::Product,
        Self::Min,
        Self::Max,
        Self::Average,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Min => "min",
            Self::Max => "max",
            Self::Average => "average",
        }
    }

    /// Resolve an operation by its canonical name.
    ///
    /// # Errors
    /// Returns [`MatrixCalcError::UnsupportedOperation`] for unknown or absent names.
    pub fn lookup(name: Option<&str>) -> Result<Self, MatrixCalcError> {
        name.and_then(|name| Self::ALL.into_iter().find(|op| op.name() == name))
            .ok_or_else(|| MatrixCalcError::unsupported_operation(name))
    }

    /// Fold `values` into a single number.
    ///
    /// `Product` is a plain left fold with no identity element, so a single
    /// value is returned unchanged.
    ///
    /// # Errors
    /// Returns [`MatrixCalcError::EmptyMatrix`] when `values` is empty; a valid
    /// [`crate::Matrix`] never yields an empty selection.
    pub fn apply(self, values: &[f64]) -> Result<f64, MatrixCalcError> {
        let (&first, rest) = values.split_first().ok_or(MatrixCalcError::EmptyMatrix)?;
        let values = values.iter().copied();

        let result = match self {
            Self::Sum => values.sum::<f64>(),
            Self::Product => rest.iter().fold(first, |acc, value| acc * value),
            Self::Min => values.fold(first, f64::min),
            Self::Max => values.fold(first, f64::max),
            Self::Average => {
                #[allow(clippy::cast_precision_loss)] // element counts stay far below 2^52
                let count = rest.len() as f64 + 1.0;
                values.sum::<f64>() / count
            }
        };
        Ok(result)
    }
}

impl FromStr for BinaryOperation {
    type Err = MatrixCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(Some(s))
    }
}

impl FromStr for ReductionOperation {
    type Err = MatrixCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(Some(s))
    }
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ReductionOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
