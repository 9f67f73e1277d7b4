//! Optional response cache.
//!
//! Keyed by endpoint plus serialized request body, so identical queries
//! against the same endpoint reuse a page. Get and put are separate
//! operations; two concurrent misses may both hit the network, which is
//! harmless because fetches are idempotent.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::transport::RawPage;

pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &str) -> Option<RawPage>;
    fn put(&self, key: &str, page: RawPage);
}

struct CachedPage {
    page: RawPage,
    inserted_at: DateTime<Utc>,
}

/// Process-local cache with no eviction. Suitable for short-lived
/// matcher processes; long-running deployments should supply their own
/// implementation.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CachedPage>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<RawPage> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        let hit = entries.get(key);
        if let Some(cached) = hit {
            debug!(age_s = (Utc::now() - cached.inserted_at).num_seconds(), "cache hit");
        }
        hit.map(|cached| cached.page.clone())
    }

    fn put(&self, key: &str, page: RawPage) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            CachedPage {
                page,
                inserted_at: Utc::now(),
            },
        );
    }
}
