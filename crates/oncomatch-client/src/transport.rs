//! Vendor transport seam.
//!
//! `MatchTransport` is the one place HTTP happens; everything above it
//! works on raw status/body pairs so tests can swap in canned pages.

use async_trait::async_trait;
use oncomatch_common::Result;
use oncomatch_mapping::ApiRequest;
use tracing::{debug, instrument};

pub const DIRECT_MATCH_SERVICE_PATH: &str = "/v2.1/trials/directMatch";

/// One page of the vendor response, before any parsing.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait MatchTransport: Send + Sync {
    async fn fetch_page(&self, request: &ApiRequest) -> Result<RawPage>;
}

/// Production transport: authenticated JSON POST to the vendor's direct
/// match service.
pub struct VendorApiClient {
    client: reqwest::Client,
    match_url: String,
    bearer_token: String,
}

impl VendorApiClient {
    pub fn new(client: reqwest::Client, endpoint: &str, bearer_token: String) -> Self {
        Self {
            client,
            match_url: format!("{}{}", endpoint.trim_end_matches('/'), DIRECT_MATCH_SERVICE_PATH),
            bearer_token,
        }
    }
}

#[async_trait]
impl MatchTransport for VendorApiClient {
    #[instrument(skip_all, fields(page = request.page))]
    async fn fetch_page(&self, request: &ApiRequest) -> Result<RawPage> {
        debug!(url = %self.match_url, "sending match query");
        let response = self
            .client
            .post(&self.match_url)
            .bearer_auth(&self.bearer_token)
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, n_bytes = body.len(), "match page received");
        Ok(RawPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_url_normalizes_trailing_slash() {
        let client = reqwest::Client::new();
        let api = VendorApiClient::new(client, "https://api.example.com/", "t".to_string());
        assert_eq!(
            api.match_url,
            "https://api.example.com/v2.1/trials/directMatch"
        );
    }
}
