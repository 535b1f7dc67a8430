//! Matrix Calculator SDK
//!
//! Transport-independent core of the matrix calculator:
//!
//! - [`Position`] and [`Range`]: argument grammars (`"2-3"`, `"2-x"`, `"x-3"`)
//! - [`Matrix`]: validated, immutable rectangular grid with 1-indexed lookups
//! - [`BinaryOperation`] and [`ReductionOperation`]: the fixed operation tables
//! - [`MatrixCalcError`]: every failure the core can report, with its message
//!
//! Everything here is pure and synchronous; values are built per request and
//! never shared.

pub mod errors;
pub mod models;
pub mod operations;

pub use errors::MatrixCalcError;
pub use models::{Matrix, Position, Range};
pub use operations::{BinaryOperation, ReductionOperation};
