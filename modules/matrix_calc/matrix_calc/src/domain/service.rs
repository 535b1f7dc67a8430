//! Domain service for `matrix_calc`
//!
//! Turns one request (raw body plus textual arguments) into a single number.

use matrix_calc_sdk::{
    BinaryOperation, Matrix, MatrixCalcError, Position, Range, ReductionOperation,
};
use tracing::{Span, debug, field::Empty, instrument};

use super::payload::decode_matrix;
use crate::config::MatrixCalcConfig;

/// Apply a binary operation to the values at two positions of `rows`.
///
/// Checks run in order: matrix shape, first position, second position,
/// operation name, finiteness of the result.
///
/// # Errors
/// Returns the first [`MatrixCalcError`] raised by the checks above.
pub fn compute_binary(
    rows: Vec<Vec<f64>>,
    first: &str,
    second: &str,
    operation: &str,
) -> Result<f64, MatrixCalcError> {
    let matrix = Matrix::new(rows)?;
    let first = matrix.value_at(Position::parse(first)?)?;
    let second = matrix.value_at(Position::parse(second)?)?;
    let operation = BinaryOperation::lookup(Some(operation))?;
    ensure_finite(operation.apply(first, second))
}

/// Reduce the values of `rows` selected by `range` to one number.
///
/// The operation name is resolved before the range is parsed, so an unknown
/// operation wins over a malformed range.
///
/// # Errors
/// Returns the first [`MatrixCalcError`] raised while validating the matrix,
/// the operation, or the range, or when the result is not finite.
pub fn compute_reduction(
    rows: Vec<Vec<f64>>,
    range: Option<&str>,
    operation: &str,
) -> Result<f64, MatrixCalcError> {
    let matrix = Matrix::new(rows)?;
    let operation = ReductionOperation::lookup(Some(operation))?;
    let range = Range::parse(range)?;
    let values = matrix.values_in_range(range)?;
    ensure_finite(operation.apply(&values)?)
}

fn ensure_finite(value: f64) -> Result<f64, MatrixCalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MatrixCalcError::NonFiniteResult)
    }
}

/// Request-level entry point used by the REST layer.
///
/// Each call decodes the body, computes, and records the outcome on the
/// current span. Holds no per-request state.
#[derive(Debug, Clone, Default)]
pub struct Service {
    config: MatrixCalcConfig,
}

impl Service {
    #[must_use]
    pub fn new(config: MatrixCalcConfig) -> Self {
        Self { config }
    }

    /// Decode `body` and apply a binary operation between two cells.
    ///
    /// # Errors
    /// See [`decode_matrix`] and [`compute_binary`].
    #[instrument(
        name = "matrix_calc.binary",
        skip(self, body),
        fields(body = Empty, result = Empty)
    )]
    pub fn binary(
        &self,
        body: &[u8],
        operation: &str,
        first: &str,
        second: &str,
    ) -> Result<f64, MatrixCalcError> {
        self.record_body(body);
        let rows = decode_matrix(body)?;
        debug!(rows = rows.len(), "Decoded matrix payload");

        let result = compute_binary(rows, first, second, operation)?;
        Span::current().record("result", result);
        Ok(result)
    }

    /// Decode `body` and reduce the selected range.
    ///
    /// # Errors
    /// See [`decode_matrix`] and [`compute_reduction`].
    #[instrument(
        name = "matrix_calc.reduction",
        skip(self, body),
        fields(body = Empty, result = Empty)
    )]
    pub fn reduction(
        &self,
        body: &[u8],
        operation: &str,
        range: Option<&str>,
    ) -> Result<f64, MatrixCalcError> {
        self.record_body(body);
        let rows = decode_matrix(body)?;
        debug!(rows = rows.len(), "Decoded matrix payload");

        let result = compute_reduction(rows, range, operation)?;
        Span::current().record("result", result);
        Ok(result)
    }

    fn record_body(&self, body: &[u8]) {
        if self.config.log_request_bodies {
            Span::current().record("body", String::from_utf8_lossy(body).as_ref());
        }
    }
}
