//! API Documentation module
//!
//! OpenAPI description of the relay's HTTP surface, generated with utoipa.

mod openapi;

pub use openapi::RelayApiDoc;
