use thiserror::Error;

use crate::models::Range;

/// Errors reported by the matrix calculator.
///
/// The `Display` output of every variant is the exact message returned to
/// clients, so changing a template is a breaking change.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixCalcError {
    /// Payload decoded fine but has no `matrix` field (or the body was empty).
    #[error("{}", missing_matrix_message(.body))]
    MissingMatrixField { body: String },

    /// Payload is not valid JSON or a field has the wrong shape.
    #[error("Request body is not a valid json: {reason}")]
    MalformedPayload { reason: String },

    #[error("matrix is empty")]
    EmptyMatrix,

    /// `rendering` is the deep rendering of the offending rows.
    #[error("Matrix {rendering} is not rectangular.")]
    NotRectangular { rendering: String },

    #[error("'{text}' is not a valid position")]
    InvalidPosition { text: String },

    #[error("'{text}' is not a valid range")]
    InvalidRange { text: String },

    #[error("The '{row}-{column}' position is out-of-range for the matrix.")]
    PositionOutOfRange { row: i64, column: i64 },

    #[error("The '{range}' range is not valid for the matrix.")]
    RangeOutOfRange { range: Range },

    /// `name` is `None` when no operation name was supplied at all.
    #[error("{}", unsupported_operation_message(.name))]
    UnsupportedOperation { name: Option<String> },

    #[error("result is not a finite number")]
    NonFiniteResult,
}

impl MatrixCalcError {
    pub fn missing_matrix_field(body: impl Into<String>) -> Self {
        Self::MissingMatrixField { body: body.into() }
    }

    pub fn malformed_payload(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    pub fn invalid_position(text: impl Into<String>) -> Self {
        Self::InvalidPosition { text: text.into() }
    }

    pub fn invalid_range(text: impl Into<String>) -> Self {
        Self::InvalidRange { text: text.into() }
    }

    pub fn unsupported_operation(name: Option<&str>) -> Self {
        Self::UnsupportedOperation {
            name: name.map(str::to_owned),
        }
    }

    /// Stable machine-readable identifier of the error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingMatrixField { .. } => "missing_matrix_field",
            Self::MalformedPayload { .. } => "malformed_payload",
            Self::EmptyMatrix => "empty_matrix",
            Self::NotRectangular { .. } => "not_rectangular",
            Self::InvalidPosition { .. } => "invalid_position",
            Self::InvalidRange { .. } => "invalid_range",
            Self::PositionOutOfRange { .. } => "position_out_of_range",
            Self::RangeOutOfRange { .. } => "range_out_of_range",
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::NonFiniteResult => "non_finite_result",
        }
    }
}

fn missing_matrix_message(body: &str) -> String {
    if body.trim().is_empty() {
        "Matrix is not present in request body.".to_owned()
    } else {
        format!("Matrix is not present in request body [{body}].")
    }
}

#[allow(clippy::ref_option)] // signature dictated by the derive's field binding
fn unsupported_operation_message(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("Unsupported operation '{name}'"),
        None => "name of the operation is null".to_owned(),
    }
}
