//! Matcher configuration.
//!
//! Read from a TOML file (path usually supplied through the
//! `ONCOMATCH_CONFIG` env var by the binary). Either a static
//! `auth_token` or the full client-credentials triple must be present;
//! the two styles are mutually exclusive.

use std::path::{Path, PathBuf};

use oncomatch_common::{MatchError, Result};
use serde::{Deserialize, Serialize};

use oncomatch_mapping::request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Vendor API base URL.
    pub endpoint: Option<String>,
    /// Static bearer token. When set, the auth server is never contacted.
    pub auth_token: Option<String>,
    pub auth_server: Option<String>,
    pub auth_client_id: Option<String>,
    pub auth_client_secret: Option<String>,
    /// Cap on accumulated matches; 0 or absent means no cap.
    #[serde(default)]
    pub max_results_returned: Option<u32>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Two-letter country code restricting the search, e.g. "US".
    pub filter_by_country: Option<String>,
    /// Path to the zip code CSV; distance filtering is disabled without it.
    pub zip_data_path: Option<PathBuf>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

// The serde attribute only covers deserialization; programmatic
// construction must get the same page size.
impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth_token: None,
            auth_server: None,
            auth_client_id: None,
            auth_client_secret: None,
            max_results_returned: None,
            page_size: DEFAULT_PAGE_SIZE,
            filter_by_country: None,
            zip_data_path: None,
        }
    }
}

impl MatcherConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MatchError::Config(format!("cannot read config file {path:?}: {e}"))
        })?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| MatchError::Config(format!("invalid config file {path:?}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Fails on the first missing field. Called once at matcher
    /// construction; a matcher never exists with an invalid config.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_none() {
            return Err(MatchError::Config("missing endpoint".to_string()));
        }
        if self.auth_token.is_none() {
            if self.auth_server.is_none() {
                return Err(MatchError::Config(
                    "missing auth_server (or a static auth_token)".to_string(),
                ));
            }
            if self.auth_client_id.is_none() {
                return Err(MatchError::Config("missing auth_client_id".to_string()));
            }
            if self.auth_client_secret.is_none() {
                return Err(MatchError::Config("missing auth_client_secret".to_string()));
            }
        }
        if self.page_size == 0 {
            return Err(MatchError::Config("page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Configured page size clamped to the vendor range. The page size
    /// is a divisor in the pagination math, so zero is never returned.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// The match cap, with 0 normalized to "no cap".
    pub fn result_cap(&self) -> Option<u32> {
        self.max_results_returned.filter(|&cap| cap > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> MatcherConfig {
        MatcherConfig {
            endpoint: Some("https://api.example.com".to_string()),
            auth_token: Some("token".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_endpoint_named_in_error() {
        let config = MatcherConfig {
            endpoint: None,
            ..valid()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn test_static_token_skips_auth_fields() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_client_credentials_require_all_three() {
        let config = MatcherConfig {
            auth_token: None,
            auth_server: Some("https://auth.example.com".to_string()),
            auth_client_id: Some("id".to_string()),
            ..valid()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("auth_client_secret"));
    }

    #[test]
    fn test_page_size_clamped_to_vendor_max() {
        let config = MatcherConfig {
            page_size: 500,
            ..valid()
        };
        assert_eq!(config.effective_page_size(), 50);
    }

    #[test]
    fn test_default_page_size_matches_deserialized_default() {
        assert_eq!(MatcherConfig::default().page_size, 25);
    }

    #[test]
    fn test_zero_page_size_rejected_and_never_effective() {
        let config = MatcherConfig {
            page_size: 0,
            ..valid()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("page_size"));
        assert_eq!(config.effective_page_size(), 1);
    }

    #[test]
    fn test_toml_defaults() {
        let config: MatcherConfig = toml::from_str(
            r#"
            endpoint = "https://api.example.com"
            auth_token = "token"
            "#,
        )
        .unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.result_cap(), None);
    }
}
