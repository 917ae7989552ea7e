//! Middleware modules
//!
//! Request guards applied in front of the relayed routes.

pub mod auth;
