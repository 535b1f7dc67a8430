//! Decoding of `{"matrix": [[...], ...]}` request bodies.

use matrix_calc_sdk::MatrixCalcError;
use serde_json::Value;

/// Name of the body field carrying the matrix rows.
pub const MATRIX_FIELD: &str = "matrix";

/// Decode a raw request body into numeric rows.
///
/// Shape validation (emptiness, rectangularity) is left to
/// [`matrix_calc_sdk::Matrix::new`]; this only checks that the payload is a
/// JSON object whose `matrix` field is an array of arrays of numbers.
///
/// # Errors
/// - [`MatrixCalcError::MissingMatrixField`] for an empty body or an object
///   without a `matrix` field; the raw body is echoed in the message
/// - [`MatrixCalcError::MalformedPayload`] for anything that is not UTF-8
///   JSON, not an object, or whose `matrix` field has the wrong type
pub fn decode_matrix(body: &[u8]) -> Result<Vec<Vec<f64>>, MatrixCalcError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| MatrixCalcError::malformed_payload(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(MatrixCalcError::missing_matrix_field(text));
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| MatrixCalcError::malformed_payload(e.to_string()))?;

    let Value::Object(mut fields) = value else {
        return Err(MatrixCalcError::malformed_payload(
            "request body must be a JSON object",
        ));
    };

    let matrix = fields
        .remove(MATRIX_FIELD)
        .ok_or_else(|| MatrixCalcError::missing_matrix_field(text))?;

    serde_json::from_value(matrix).map_err(|e| {
        MatrixCalcError::malformed_payload(format!("field '{MATRIX_FIELD}': {e}"))
    })
}
