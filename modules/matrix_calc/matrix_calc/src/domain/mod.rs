//! Domain layer for the `matrix_calc` module
//!
//! Payload decoding and per-request orchestration of calculations.

pub mod payload;
pub mod service;

pub use payload::decode_matrix;
pub use service::{Service, compute_binary, compute_reduction};
