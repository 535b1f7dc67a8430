use utoipa::OpenApi;

use super::dto::{CalculationResultDto, ErrorDto, MatrixPayloadDto};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::binary_operation, handlers::reduction_operation),
    components(schemas(MatrixPayloadDto, CalculationResultDto, ErrorDto)),
    tags((name = "Matrix Calculator", description = "Binary operations and reductions over JSON matrices"))
)]
pub struct MatrixCalcApi;
