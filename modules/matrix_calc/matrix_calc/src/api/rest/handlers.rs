//! REST handlers for the `matrix_calc` module

use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query};
use axum::{Extension, Json};
use bytes::Bytes;
use http::Method;
use matrix_calc_sdk::{BinaryOperation, ReductionOperation};
use tracing::{info, warn};

use crate::domain::Service;

use super::dto::{CalculationResultDto, ErrorDto, MatrixPayloadDto, RangeQuery};
use super::error::ApiError;

/// Handler for GET|POST /rest/{operation}/{first}/{second}
///
/// Applies `operation` to the values at positions `first` and `second`.
///
/// # Errors
/// `400` for a path that cannot be decoded, `404` for an operation name
/// outside the binary vocabulary, `422` for any calculation failure.
#[utoipa::path(
    method(get, post),
    path = "/rest/{operation}/{first}/{second}",
    tag = "Matrix Calculator",
    operation_id = "matrix_calc.binary",
    summary = "Combine two cells of a matrix",
    params(
        ("operation" = String, Path, description = "One of add, subtract, multiply, divide"),
        ("first" = String, Path, description = "1-based position `row-column`", example = "1-2"),
        ("second" = String, Path, description = "1-based position `row-column`", example = "2-1"),
    ),
    request_body(content = MatrixPayloadDto, content_type = "application/json"),
    responses(
        (status = 200, description = "Calculation result", body = CalculationResultDto),
        (status = 400, description = "Undecodable path or query", body = ErrorDto),
        (status = 404, description = "Unknown operation", body = ErrorDto),
        (status = 422, description = "Invalid payload or arguments", body = ErrorDto),
    )
)]
pub async fn binary_operation(
    Extension(service): Extension<Arc<Service>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<(String, String, String)>, PathRejection>,
    body: Bytes,
) -> Result<Json<CalculationResultDto>, ApiError> {
    let Path((operation, first, second)) = path?;
    if !BinaryOperation::ALL.iter().any(|op| op.name() == operation) {
        return Err(ApiError::RouteNotFound {
            method,
            path: uri.path().to_owned(),
        });
    }

    let result = service
        .binary(&body, &operation, &first, &second)
        .inspect_err(|e| {
            warn!(%operation, %first, %second, code = e.code(), error = %e, "Binary operation rejected");
        })?;

    info!(%operation, %first, %second, result, "Binary operation computed");
    Ok(Json(CalculationResultDto { result }))
}

/// Handler for GET|POST /rest/{operation}
///
/// Reduces the whole matrix, or the row or column named by `range`.
///
/// # Errors
/// `400` for a path or query that cannot be decoded, `404` for an
/// operation name outside the reduction vocabulary, `422` for any
/// calculation failure.
#[utoipa::path(
    method(get, post),
    path = "/rest/{operation}",
    tag = "Matrix Calculator",
    operation_id = "matrix_calc.reduction",
    summary = "Reduce a matrix, a row or a column",
    params(
        ("operation" = String, Path, description = "One of sum, product, max, min, average"),
        RangeQuery,
    ),
    request_body(content = MatrixPayloadDto, content_type = "application/json"),
    responses(
        (status = 200, description = "Calculation result", body = CalculationResultDto),
        (status = 400, description = "Undecodable path or query", body = ErrorDto),
        (status = 404, description = "Unknown operation", body = ErrorDto),
        (status = 422, description = "Invalid payload or arguments", body = ErrorDto),
    )
)]
pub async fn reduction_operation(
    Extension(service): Extension<Arc<Service>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Bytes,
) -> Result<Json<CalculationResultDto>, ApiError> {
    let Path(operation) = path?;
    let Query(pairs) = query?;
    let query = RangeQuery::from_pairs(pairs);

    if !ReductionOperation::ALL.iter().any(|op| op.name() == operation) {
        return Err(ApiError::RouteNotFound {
            method,
            path: uri.path().to_owned(),
        });
    }

    let range = query.range.as_deref();
    let result = service
        .reduction(&body, &operation, range)
        .inspect_err(|e| {
            warn!(%operation, ?range, code = e.code(), error = %e, "Reduction rejected");
        })?;

    info!(%operation, ?range, result, "Reduction computed");
    Ok(Json(CalculationResultDto { result }))
}
