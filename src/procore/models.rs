//! Procore API models
//!
//! Request and response types exchanged with the relay's clients and with
//! Procore. The relay does not validate log contents; Procore is authoritative.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Fixed out-of-band redirect URI registered for the OAuth application
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Upstream filter key for the inclusive lower date bound
pub const FILTER_DATE_GTE: &str = "filters[date][gte]";
/// Upstream filter key for the inclusive upper date bound
pub const FILTER_DATE_LTE: &str = "filters[date][lte]";

// =============================================================================
// Accident logs
// =============================================================================

/// A single accident log entry
///
/// Missing or `null` fields decode to empty strings or zero, the same values
/// Procore receives when a form field is left blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AccidentLog {
    /// Assigned by Procore; ignored on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: String,
    /// Calendar date, e.g. `2024-01-01`
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    /// Full timestamp, e.g. `2024-01-01T10:00:00Z`
    #[serde(deserialize_with = "null_as_default")]
    pub datetime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub involved_company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub involved_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time_hour: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub time_minute: i64,
}

/// Decode `null` as the type's zero value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AccidentLog {
    /// Form fields for `POST /projects/{id}/accident_logs`
    ///
    /// Every field except `id` is sent under Procore's `accident_log[...]`
    /// naming. Hour and minute are plain decimal strings with no range check.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("accident_log[comments]", self.comments.clone()),
            ("accident_log[date]", self.date.clone()),
            ("accident_log[datetime]", self.datetime.clone()),
            ("accident_log[involved_company]", self.involved_company.clone()),
            ("accident_log[involved_name]", self.involved_name.clone()),
            ("accident_log[time_hour]", self.time_hour.to_string()),
            ("accident_log[time_minute]", self.time_minute.to_string()),
        ]
    }
}

/// Query string accepted by the filtered listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// Inclusive lower bound
    pub from_date: Option<String>,
    /// Inclusive upper bound
    pub to_date: Option<String>,
}

/// Date bounds for a filtered listing; at least one side is always set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRange {
    From(String),
    To(String),
    Between { from: String, to: String },
}

impl DateRange {
    /// Build a range from optional bounds, treating empty strings as absent
    ///
    /// Returns `None` when neither bound is supplied.
    pub fn from_bounds(from: Option<String>, to: Option<String>) -> Option<Self> {
        let from = from.filter(|d| !d.is_empty());
        let to = to.filter(|d| !d.is_empty());

        match (from, to) {
            (Some(from), Some(to)) => Some(DateRange::Between { from, to }),
            (Some(from), None) => Some(DateRange::From(from)),
            (None, Some(to)) => Some(DateRange::To(to)),
            (None, None) => None,
        }
    }

    /// Upstream filter parameters for exactly the bounds present
    pub fn filter_params(&self) -> Vec<(&'static str, &str)> {
        match self {
            DateRange::From(from) => vec![(FILTER_DATE_GTE, from.as_str())],
            DateRange::To(to) => vec![(FILTER_DATE_LTE, to.as_str())],
            DateRange::Between { from, to } => vec![
                (FILTER_DATE_GTE, from.as_str()),
                (FILTER_DATE_LTE, to.as_str()),
            ],
        }
    }
}

impl DateRangeQuery {
    /// Bounds supplied in the query, if any
    pub fn into_range(self) -> Option<DateRange> {
        DateRange::from_bounds(self.from_date, self.to_date)
    }
}

// =============================================================================
// OAuth
// =============================================================================

/// Body of `POST /api/auth/token`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TokenExchangeRequest {
    /// Authorization code obtained from the Procore consent screen
    #[serde(default)]
    pub code: String,
}

/// Token payload returned by Procore's `/oauth/token`
///
/// Every field is optional on the wire; absent or `null` values decode to
/// their zero value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub access_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub token_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}

/// Token payload returned to the relay's client
///
/// The refresh token is parsed from Procore's answer but not forwarded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenResponse> for AccessTokenResponse {
    fn from(token: TokenResponse) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Body of `GET /api/auth/url`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorizationUrlResponse {
    pub url: String,
}
