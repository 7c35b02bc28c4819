//! Gateway HTTP client.

use crate::config::GatewayConfig;

use super::types::{Acknowledgement, EventResponse, Release};
use super::{GatewayError, GatewayResult};

/// Standard User-Agent header for Siren gateway requests.
const USER_AGENT: &str = concat!("siren/", env!("CARGO_PKG_VERSION"));

/// Client for the Event Data Gateway contract.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
}

impl GatewayClient {
    /// Creates a new gateway client from connection settings.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base URL the client was configured with (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetches one event by id. Fails with a `Status` error if no such id.
    pub async fn fetch_by_id(&self, id: i64) -> GatewayResult<EventResponse> {
        let url = format!("{}/api/events/{id}", self.base_url);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body = response.json::<EventResponse>().await.map_err(|err| {
            GatewayError::new(
                super::GatewayErrorKind::Decode,
                format!("invalid event body: {err}"),
            )
        })?;
        Ok(body)
    }

    /// Fetches the acknowledgements for a previously fetched response.
    ///
    /// The collection is addressed by the response's delivery metadata; the
    /// receipt token authorizes the read.
    pub async fn fetch_acknowledgements(
        &self,
        response: &EventResponse,
    ) -> GatewayResult<Vec<Acknowledgement>> {
        let url = format!("{}{}", self.base_url, response.delivery.acknowledgements_path);
        let reply = self
            .http
            .get(&url)
            .query(&[("receipt", response.delivery.receipt.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body = reply.json::<Vec<Acknowledgement>>().await.map_err(|err| {
            GatewayError::new(
                super::GatewayErrorKind::Decode,
                format!("invalid acknowledgements body: {err}"),
            )
        })?;
        Ok(body)
    }

    /// Fetches the latest release descriptor (the update-availability signal).
    pub async fn fetch_release(&self) -> GatewayResult<Release> {
        let url = format!("{}/api/release", self.base_url);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body = response.json::<Release>().await.map_err(|err| {
            GatewayError::new(
                super::GatewayErrorKind::Decode,
                format!("invalid release body: {err}"),
            )
        })?;
        Ok(body)
    }

    /// Probes gateway reachability. Any successful status counts as online.
    pub async fn probe(&self) -> bool {
        let url = format!("{}/healthz", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
