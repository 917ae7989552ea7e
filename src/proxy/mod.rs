//! Proxy module
//!
//! Header injection and pass-through relaying of Procore responses.

pub mod headers;
pub mod relay;

pub use relay::relay;
