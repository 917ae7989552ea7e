//! Configuration management for the relay
//!
//! Configuration is loaded from environment variables once at startup and
//! shared read-only with every handler through `AppState`.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::procore::TOKEN_EXCHANGE_TIMEOUT;

/// Default Procore REST base URL (sandbox)
pub const DEFAULT_API_URL: &str = "https://sandbox.procore.com/rest/v1.0";
/// Default Procore login/OAuth base URL (sandbox)
pub const DEFAULT_LOGIN_URL: &str = "https://login-sandbox.procore.com";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Procore REST API base URL (without trailing slash)
    pub api_url: String,
    /// Procore login base URL hosting `/oauth/token` and `/oauth/authorize`
    pub login_url: String,

    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,

    /// Project whose accident logs are relayed
    pub project_id: String,
    /// Sent upstream as `Procore-Company-Id`
    pub company_id: String,

    /// Timeout applied to every relayed upstream call
    pub upstream_timeout: Duration,
    /// Timeout applied to the OAuth token exchange
    pub token_timeout: Duration,

    /// Key required in `X-Docs-Key` to read the API docs; docs are open when unset
    pub docs_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: var("RELAY_HOST", "0.0.0.0"),
            port: var("RELAY_PORT", "8080")
                .parse()
                .context("Invalid RELAY_PORT")?,

            api_url: var("PROCORE_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            login_url: var("PROCORE_LOGIN_URL", DEFAULT_LOGIN_URL)
                .trim_end_matches('/')
                .to_string(),

            client_id: var("PROCORE_CLIENT_ID", ""),
            client_secret: var("PROCORE_CLIENT_SECRET", ""),

            project_id: var("PROCORE_PROJECT_ID", ""),
            company_id: var("PROCORE_COMPANY_ID", ""),

            upstream_timeout: Duration::from_secs(
                var("UPSTREAM_TIMEOUT_SECS", "10")
                    .parse()
                    .context("Invalid UPSTREAM_TIMEOUT_SECS")?,
            ),
            token_timeout: Duration::from_secs(
                var(
                    "TOKEN_TIMEOUT_SECS",
                    &TOKEN_EXCHANGE_TIMEOUT.as_secs().to_string(),
                )
                .parse()
                .context("Invalid TOKEN_TIMEOUT_SECS")?,
            ),

            docs_api_key: lookup("DOCS_API_KEY").filter(|k| !k.is_empty()),
        })
    }

    /// Names of upstream settings that are empty
    ///
    /// Empty values are not rejected; upstream URLs and headers are built
    /// from them as-is.
    pub fn missing_upstream_settings(&self) -> Vec<&'static str> {
        [
            ("PROCORE_CLIENT_ID", &self.client_id),
            ("PROCORE_CLIENT_SECRET", &self.client_secret),
            ("PROCORE_PROJECT_ID", &self.project_id),
            ("PROCORE_COMPANY_ID", &self.company_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
