//! Procore Relay - HTTP relay for Procore accident logs
//!
//! This library exposes a small HTTP surface that forwards accident-log
//! operations to Procore, injecting the company header and the project path,
//! and exchanges OAuth authorization codes for access tokens.

pub mod config;
pub mod docs;
pub mod error;
pub mod middleware;
pub mod procore;
pub mod proxy;
pub mod routes;

use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::error::{AppError, AppResult};
pub use crate::procore::ProcoreClient;

/// Application state shared across all request handlers
///
/// Read-only after construction; handlers never mutate it.
pub struct AppState {
    pub config: Config,
    pub procore: ProcoreClient,
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Every relayed call gets the same bounded timeout
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self::with_client(config, http_client))
    }

    /// Create application state around an existing HTTP client
    pub fn with_client(config: Config, http_client: reqwest::Client) -> Self {
        let procore = ProcoreClient::new(http_client, &config);

        Self {
            config,
            procore,
            start_time: Instant::now(),
        }
    }
}
