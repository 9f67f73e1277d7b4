//! Paginated fetch and accumulation loop.
//!
//! Page numbers start at 1. The first page fixes the server total and
//! the number of pages to retrieve; later pages only contribute trials.
//! Fetches are strictly sequential.

use oncomatch_common::{MatchError, Result};
use oncomatch_mapping::ApiRequest;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::cache::ResponseCache;
use crate::transport::{MatchTransport, RawPage};

/// One parsed vendor page. All fields optional so the shape check can
/// run after parsing instead of during it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    total: Option<u64>,
    trials: Option<Vec<serde_json::Value>>,
    unused_field_values: Option<Vec<serde_json::Value>>,
    error: Option<String>,
}

/// The accumulated result set across all fetched pages. `total` is the
/// server-side match count, which can exceed `trials.len()` when a
/// result cap was configured.
#[derive(Debug)]
pub struct MatchResponse {
    pub total: u64,
    pub trials: Vec<serde_json::Value>,
}

/// Fetch every page of matches for `request`, mutating its page counter
/// as the loop advances. `max_results` caps how many trials are
/// retrieved overall; `None` retrieves the full server total.
#[instrument(skip_all, fields(page_size = request.page_size))]
pub async fn fetch_all_pages(
    transport: &dyn MatchTransport,
    cache: Option<&dyn ResponseCache>,
    endpoint: &str,
    request: &mut ApiRequest,
    max_results: Option<u32>,
) -> Result<MatchResponse> {
    let mut current_page: u32 = 1;
    let mut total_pages: u32 = 1;
    let mut server_total: Option<u64> = None;
    let mut trials: Vec<serde_json::Value> = Vec::new();
    let mut saw_trials = false;

    loop {
        request.page = current_page;
        // Cache key includes the endpoint so switching environments
        // never replays stale pages.
        let key = match cache {
            Some(_) => Some(format!("{endpoint}:{}", request.body_json()?)),
            None => None,
        };
        let cached = match (cache, &key) {
            (Some(cache), Some(key)) => cache.get(key),
            _ => None,
        };
        let from_cache = cached.is_some();
        let raw = match cached {
            Some(page) => page,
            None => transport.fetch_page(request).await?,
        };
        debug!(page = current_page, status = raw.status, from_cache, "match page fetched");

        if !(200..300).contains(&raw.status) {
            return Err(MatchError::Api {
                status: raw.status,
                body: raw.body,
            });
        }
        let page: PageResponse = serde_json::from_str(&raw.body)
            .map_err(|e| MatchError::Parse(format!("malformed match response: {e}")))?;
        if let Some(error) = page.error {
            return Err(MatchError::Api {
                status: raw.status,
                body: error,
            });
        }
        // Only pages that passed the status and error checks are worth
        // replaying; a cached failure would outlive the outage it
        // records.
        if !from_cache {
            if let (Some(cache), Some(key)) = (cache, &key) {
                cache.put(key, raw.clone());
            }
        }

        if current_page == 1 {
            if let Some(total) = page.total {
                server_total = Some(total);
                let to_return = match max_results {
                    Some(cap) => total.min(u64::from(cap)),
                    None => total,
                };
                // A zero page size is rejected at the config layer;
                // guard the division anyway for direct callers.
                total_pages = to_return
                    .div_ceil(u64::from(request.page_size).max(1))
                    .try_into()
                    .unwrap_or(u32::MAX);
            }
            if let Some(unused) = &page.unused_field_values {
                if !unused.is_empty() {
                    warn!(unused = %serde_json::to_string(unused).unwrap_or_default(),
                        "server ignored some filter field values");
                }
            }
        }
        if let Some(page_trials) = page.trials {
            saw_trials = true;
            trials.extend(page_trials);
        }

        if current_page >= total_pages {
            break;
        }
        current_page += 1;
    }

    let Some(total) = server_total else {
        return Err(MatchError::Parse(
            "unprocessable match response: missing numeric total".to_string(),
        ));
    };
    if !saw_trials {
        return Err(MatchError::Parse(
            "unprocessable match response: missing trials array".to_string(),
        ));
    }

    info!(total, n_retrieved = trials.len(), "all match pages retrieved");
    Ok(MatchResponse { total, trials })
}
