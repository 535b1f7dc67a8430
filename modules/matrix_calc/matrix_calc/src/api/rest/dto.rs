//! REST DTOs for the `matrix_calc` module
//!
//! These types are transport-specific (serde + utoipa for REST/`OpenAPI`).
//! Request bodies are decoded by [`crate::domain::decode_matrix`];
//! [`MatrixPayloadDto`] only documents their shape.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request body carrying the matrix to operate on.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "matrix": [[1, 2.1], [3.3, 4]] }))]
pub struct MatrixPayloadDto {
    /// Rectangular, non-empty list of rows of numbers
    pub matrix: Vec<Vec<f64>>,
}

/// Successful calculation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculationResultDto {
    pub result: f64,
}

/// Error body returned for every rejected request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// Human-readable description of the first failed check
    pub error: String,
}

/// Query parameters accepted by reduction routes.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// `N-x` selects row N, `x-N` selects column N; omit for the whole matrix
    pub range: Option<String>,
}

impl RangeQuery {
    /// Collect the `range` values of a decoded query string. Repeated values
    /// are joined with `,`, which no range grammar accepts.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let values: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "range")
            .map(|(_, value)| value)
            .collect();

        Self {
            range: (!values.is_empty()).then(|| values.join(",")),
        }
    }
}
