//! Procore API integration
//!
//! Client and models for the upstream construction-management API.

pub mod client;
pub mod models;

pub use client::{ProcoreClient, TOKEN_EXCHANGE_TIMEOUT};
pub use models::*;
