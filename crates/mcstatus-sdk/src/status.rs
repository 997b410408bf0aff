//! Status Lookup Client for the mcsrvstat.us v3 API.
//!
//! A lookup is a single `GET {base_url}/{address}`. Transport errors,
//! non-success HTTP statuses and bodies without a boolean `online` field
//! all become [`SdkError::Lookup`].

use std::fmt::Display;

use async_trait::async_trait;
use mcstatus_models::{ServerAddress, ServerStatus};
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::client::StatusLookup;
use crate::error::SdkError;

/// Public status endpoint (API version 3).
pub const DEFAULT_STATUS_API_URL: &str = "https://api.mcsrvstat.us/3";

/// HTTP client for the server-status API.
#[derive(Debug, Clone)]
pub struct StatusClient {
    base_url: Url,
    http: reqwest::Client,
}

impl StatusClient {
    /// Build a client for the given API base URL.
    ///
    /// Fails with [`SdkError::Config`] when the URL does not parse or cannot
    /// carry path segments.
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SdkError::Config(format!("invalid status API URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::Config(format!(
                "status API URL {base_url} cannot carry a path"
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| SdkError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    /// The base URL lookups are issued against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for `address`. The address becomes one path
    /// segment, percent-encoded where needed.
    pub fn status_url(&self, address: &ServerAddress) -> Result<Url, SdkError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| lookup_failure(address, "base URL cannot carry a path"))?
            .pop_if_empty()
            .push(address.as_str());
        Ok(url)
    }
}

#[async_trait]
impl StatusLookup for StatusClient {
    async fn lookup(&self, address: &ServerAddress) -> Result<ServerStatus, SdkError> {
        let url = self.status_url(address)?;
        debug!(address = %address, url = %url, "requesting server status");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| lookup_failure(address, e))?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(lookup_failure(
                address,
                format!("API request failed with status {http_status}"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| lookup_failure(address, e))?;
        let status = ServerStatus::from_json(&body).map_err(|e| lookup_failure(address, e))?;

        info!(address = %address, online = status.online, "server status received");
        Ok(status)
    }
}

fn lookup_failure(address: &ServerAddress, detail: impl Display) -> SdkError {
    warn!(address = %address, error = %detail, "status lookup failed");
    SdkError::Lookup {
        address: address.to_string(),
        detail: detail.to_string(),
    }
}
