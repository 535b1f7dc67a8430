//! REST adapter for the `matrix_calc` module

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
