//! Bearer token acquisition.
//!
//! Client-credentials grant against the configured auth server. Skipped
//! entirely when the config carries a static token.

use oncomatch_common::{MatchError, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::MatcherConfig;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Resolve the bearer token for this request. The static token wins;
/// otherwise a form-urlencoded client-credentials POST to the auth
/// server. Config validation has already guaranteed one of the two
/// styles is fully present.
#[instrument(skip_all)]
pub async fn resolve_token(client: &reqwest::Client, config: &MatcherConfig) -> Result<String> {
    if let Some(token) = &config.auth_token {
        debug!("using static auth token");
        return Ok(token.clone());
    }

    let auth_server = config
        .auth_server
        .as_deref()
        .ok_or_else(|| MatchError::Config("missing auth_server".to_string()))?;
    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", config.auth_client_id.as_deref().unwrap_or("")),
        (
            "client_secret",
            config.auth_client_secret.as_deref().unwrap_or(""),
        ),
    ];

    let response = client.post(auth_server).form(&params).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MatchError::Api {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }
    let token: TokenResponse = response.json().await?;
    debug!("acquired bearer token from auth server");
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token_short_circuits() {
        let config = MatcherConfig {
            auth_token: Some("static-token".to_string()),
            ..Default::default()
        };
        let client = reqwest::Client::new();
        let token = tokio_test::block_on(resolve_token(&client, &config)).unwrap();
        assert_eq!(token, "static-token");
    }

    #[test]
    fn test_token_response_shape() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","expires_in":3600}"#).unwrap();
        assert_eq!(parsed.access_token, "abc");
    }
}
