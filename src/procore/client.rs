//! Procore API client
//!
//! Builds every upstream call the relay makes: the OAuth code exchange and
//! the project-scoped accident-log resource.

use std::time::Duration;

use axum::{http::HeaderValue, response::Response};
use reqwest::{StatusCode, Url};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    procore::models::{AccidentLog, DateRange, TokenResponse, OOB_REDIRECT_URI},
    proxy::{headers::build_upstream_headers, relay},
};

/// Default upper bound on the OAuth token exchange round trip
pub const TOKEN_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Procore API client
pub struct ProcoreClient {
    client: reqwest::Client,
    api_url: String,
    login_url: String,
    client_id: String,
    client_secret: String,
    project_id: String,
    company_id: String,
    token_timeout: Duration,
}

impl ProcoreClient {
    /// Create a new Procore client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            login_url: config.login_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            project_id: config.project_id.clone(),
            company_id: config.company_id.clone(),
            token_timeout: config.token_timeout,
        }
    }

    /// URL of the consent page the user visits to obtain an authorization code
    pub fn authorization_url(&self) -> AppResult<String> {
        let url = Url::parse_with_params(
            &format!("{}/oauth/authorize", self.login_url),
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", OOB_REDIRECT_URI),
            ],
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid login URL: {}", e)))?;

        Ok(url.to_string())
    }

    /// Exchange an authorization code for tokens
    ///
    /// Any status other than 200 is returned as `UpstreamRejected` carrying
    /// Procore's status and raw body.
    #[instrument(skip_all)]
    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenResponse> {
        let url = format!("{}/oauth/token", self.login_url);

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", OOB_REDIRECT_URI),
        ];

        debug!(url = %url, "Exchanging authorization code with Procore");

        let response = self
            .client
            .post(&url)
            .timeout(self.token_timeout)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, timeout = e.is_timeout(), "Token request to Procore failed");
                if e.is_builder() {
                    AppError::TokenRequestBuild(e.to_string())
                } else {
                    AppError::TokenRequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(status = %status, error = %e, "Failed to read Procore token response");
            AppError::TokenResponseUnreadable(e.to_string())
        })?;

        if status != StatusCode::OK {
            warn!(status = %status, "Procore rejected the authorization code");
            return Err(AppError::UpstreamRejected { status, body });
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Procore token response");
            AppError::TokenResponseInvalid(e.to_string())
        })?;

        if token.access_token.is_empty() {
            warn!("Procore token response did not include an access token");
        }
        if token.refresh_token.is_none() {
            warn!("Procore token response did not include a refresh token");
        }
        info!(token_type = %token.token_type, expires_in = token.expires_in, "Token exchange succeeded");

        Ok(token)
    }

    /// List every accident log of the configured project
    #[instrument(skip_all, fields(project_id = %self.project_id))]
    pub async fn list_accident_logs(&self, authorization: &HeaderValue) -> AppResult<Response> {
        let url = self.accident_logs_url(None)?;
        let headers = build_upstream_headers(authorization, &self.company_id)?;

        relay(self.client.get(url).headers(headers), "list_accident_logs").await
    }

    /// List accident logs whose date falls within `range`
    #[instrument(skip_all, fields(project_id = %self.project_id, range = ?range))]
    pub async fn list_accident_logs_in_range(
        &self,
        authorization: &HeaderValue,
        range: &DateRange,
    ) -> AppResult<Response> {
        let url = self.accident_logs_url(None)?;
        let headers = build_upstream_headers(authorization, &self.company_id)?;

        let request = self
            .client
            .get(url)
            .headers(headers)
            .query(&range.filter_params());

        relay(request, "list_accident_logs_in_range").await
    }

    /// Create an accident log from `log`, sent as a bracketed form body
    #[instrument(skip_all, fields(project_id = %self.project_id))]
    pub async fn create_accident_log(
        &self,
        authorization: &HeaderValue,
        log: &AccidentLog,
    ) -> AppResult<Response> {
        let url = self.accident_logs_url(None)?;
        let headers = build_upstream_headers(authorization, &self.company_id)?;

        let request = self
            .client
            .post(url)
            .headers(headers)
            .form(&log.form_fields());

        relay(request, "create_accident_log").await
    }

    /// Delete the accident log identified by `log_id`
    #[instrument(skip_all, fields(project_id = %self.project_id, log_id = %log_id))]
    pub async fn delete_accident_log(
        &self,
        authorization: &HeaderValue,
        log_id: &str,
    ) -> AppResult<Response> {
        let url = self.accident_logs_url(Some(log_id))?;
        let headers = build_upstream_headers(authorization, &self.company_id)?;

        relay(self.client.delete(url).headers(headers), "delete_accident_log").await
    }

    /// `{api}/projects/{project}/accident_logs[/{id}]`
    ///
    /// The log id is appended as a single escaped path segment.
    fn accident_logs_url(&self, log_id: Option<&str>) -> AppResult<Url> {
        let mut url = Url::parse(&format!(
            "{}/projects/{}/accident_logs",
            self.api_url, self.project_id
        ))
        .map_err(|e| AppError::Upstream(format!("Invalid Procore URL: {}", e)))?;

        if let Some(id) = log_id {
            url.path_segments_mut()
                .map_err(|_| AppError::Upstream("Procore URL cannot take a path".to_string()))?
                .push(id);
        }

        Ok(url)
    }
}
