//! Matrix Calculator Module
//!
//! Exposes element-wise binary operations between two cells and reductions
//! over a whole matrix, a row or a column.
//!
//! ## Architecture
//!
//! - `matrix_calc_sdk` holds the matrix model, argument grammars and errors
//! - [`domain`] decodes payloads and orchestrates a calculation per request
//! - `api::rest` maps HTTP requests onto the domain and errors onto
//!   `{"error": ...}` responses
//! - [`MatrixCalc`] plugs the routes and their `OpenAPI` description into
//!   the API gateway

// === MODULE DEFINITION ===
mod module;
pub use module::MatrixCalc;

pub mod config;
pub use config::MatrixCalcConfig;

// === PUBLIC EXPORTS ===
pub mod domain;
pub use domain::Service;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
