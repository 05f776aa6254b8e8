//! HTTP fetch unit
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with user agent and timeouts
//! - Building the bearer authorization header
//! - One authenticated GET per endpoint
//! - Classifying every failure into a `FetchResult` value
//!
//! Nothing here returns an error past the fetch boundary: non-success
//! statuses, transport faults and undecodable bodies all come back as
//! `FetchResult::Failure` so the round loop handles them uniformly. There is
//! no retry at this layer.

use crate::config::{ApiConfig, Config, CrawlerConfig};
use crate::endpoint::Endpoint;
use crate::CrawlerError;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Why a fetch produced no payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with a non-2xx status
    HttpStatus(u16),
    /// The request timed out
    Timeout,
    /// The connection could not be established
    Connect,
    /// Any other transport-level fault
    Transport,
    /// The body was empty or not JSON
    InvalidBody,
}

impl FailureKind {
    /// Returns true for non-success HTTP statuses
    pub fn is_http(&self) -> bool {
        matches!(self, Self::HttpStatus(_))
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpStatus(code) => write!(f, "HTTP {}", code),
            Self::Timeout => f.write_str("timeout"),
            Self::Connect => f.write_str("connection failure"),
            Self::Transport => f.write_str("transport failure"),
            Self::InvalidBody => f.write_str("invalid body"),
        }
    }
}

/// A classified fetch failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub detail: String,
}

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// Successfully fetched and parsed the response body
    Success {
        /// HTTP status code
        status_code: u16,
        /// The parsed JSON body
        payload: Value,
    },

    /// No payload; see the failure kind
    Failure(FetchFailure),
}

impl FetchResult {
    pub fn success(payload: Value) -> Self {
        Self::Success {
            status_code: 200,
            payload,
        }
    }

    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self::Failure(FetchFailure {
            kind,
            detail: detail.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The payload, if the fetch succeeded
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure(_) => None,
        }
    }
}

/// The fetch seam used by the crawler
///
/// Implementations must never panic or error past this boundary; every
/// failure is a `FetchResult::Failure`.
pub trait Fetch {
    fn fetch(&self, endpoint: &Endpoint) -> impl Future<Output = FetchResult>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `api` - Target API settings (user agent)
/// * `crawler` - Request and connect timeouts
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(api: &ApiConfig, crawler: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(api.user_agent.clone())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the `Authorization: Bearer <token>` header value
///
/// The token is opaque to the crawler; it only has to be non-empty and
/// representable as an HTTP header.
pub fn bearer_header(token: &str) -> Result<HeaderValue, CrawlerError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CrawlerError::InvalidToken("token is empty".to_string()));
    }

    let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
        CrawlerError::InvalidToken("token contains characters not allowed in a header".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Fetches one URL with a bearer token
///
/// # Outcomes
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with a JSON body | `Success` |
/// | Non-2xx status | `Failure(HttpStatus)` |
/// | Timeout | `Failure(Timeout)` |
/// | Connection refused, DNS, TLS | `Failure(Connect)` |
/// | Body read error | `Failure(Transport)` |
/// | Empty or non-JSON body | `Failure(InvalidBody)` |
pub async fn fetch_endpoint(client: &Client, url: &str, authorization: &HeaderValue) -> FetchResult {
    tracing::info!("Fetching GET {}", url);

    let response = match client
        .get(url)
        .header(AUTHORIZATION, authorization.clone())
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            let result = classify_transport_error(&e);
            tracing::warn!("Exception fetching {}: {}", url, e);
            return result;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("HTTP {} for {}", status.as_u16(), url);
        return FetchResult::failure(
            FailureKind::HttpStatus(status.as_u16()),
            status.canonical_reason().unwrap_or("non-success status"),
        );
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            let result = classify_transport_error(&e);
            tracing::warn!("Exception reading body of {}: {}", url, e);
            return result;
        }
    };

    match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => FetchResult::Success {
            status_code: status.as_u16(),
            payload,
        },
        Err(e) => {
            tracing::warn!("Invalid JSON body from {}: {}", url, e);
            FetchResult::failure(FailureKind::InvalidBody, e.to_string())
        }
    }
}

fn classify_transport_error(error: &reqwest::Error) -> FetchResult {
    let kind = if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Connect
    } else {
        FailureKind::Transport
    };
    FetchResult::failure(kind, error.to_string())
}

/// Fetch unit backed by a `reqwest` client and a fixed bearer token
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    authorization: HeaderValue,
}

impl HttpFetcher {
    /// Creates a fetcher for `base_url` authenticating with `token`
    pub fn new(client: Client, base_url: &str, token: &str) -> Result<Self, CrawlerError> {
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: bearer_header(token)?,
        })
    }

    /// Builds the client from config and creates the fetcher
    pub fn from_config(config: &Config, token: &str) -> Result<Self, CrawlerError> {
        let client = build_http_client(&config.api, &config.crawler)?;
        Self::new(client, &config.api.base_url, token)
    }

    /// Absolute URL of an endpoint
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, endpoint: &Endpoint) -> FetchResult {
        let url = self.url_for(endpoint);
        fetch_endpoint(&self.client, &url, &self.authorization).await
    }
}
