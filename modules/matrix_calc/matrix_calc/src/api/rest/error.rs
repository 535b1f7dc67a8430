//! Mapping of domain errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use http::{Method, StatusCode};
use matrix_calc_sdk::MatrixCalcError;

use super::dto::ErrorDto;

/// Errors a `matrix_calc` handler can return.
#[derive(Debug)]
pub enum ApiError {
    /// Any calculation failure. Always `422 Unprocessable Entity`.
    Domain(MatrixCalcError),
    /// The operation segment of the path names no known operation of the
    /// route's kind.
    RouteNotFound { method: Method, path: String },
    /// The path or query string could not be decoded.
    BadRequest(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Domain(e) => e.to_string(),
            Self::RouteNotFound { method, path } => format!("No route for {method} {path}"),
            Self::BadRequest(message) => message.clone(),
        }
    }
}

impl From<MatrixCalcError> for ApiError {
    fn from(e: MatrixCalcError) -> Self {
        Self::Domain(e)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorDto {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
