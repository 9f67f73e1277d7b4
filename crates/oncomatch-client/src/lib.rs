//! oncomatch-client — Vendor API client and top-level matcher.
//!
//! `TrialMatcher` owns the whole pipeline: validate configuration once,
//! assemble a filter query from a patient bundle, fetch every result
//! page, and map the accumulated trials into FHIR ResearchStudy
//! resources. Transport, cache, and enrichment are trait seams so tests
//! and embedders can swap implementations.

pub mod auth;
pub mod cache;
pub mod config;
pub mod query;
pub mod research_study;
pub mod transport;

use async_trait::async_trait;
use oncomatch_common::{MatchError, Result};
use oncomatch_fhir::{Bundle, ResearchStudy};
use oncomatch_mapping::assembler::{convert_bundle_to_api_request, generate_api_query};
use oncomatch_mapping::tables::zip::ZipIndex;
use oncomatch_mapping::MappingTables;
use tracing::{info, instrument};

pub use cache::{MemoryCache, ResponseCache};
pub use config::MatcherConfig;
pub use query::MatchResponse;
pub use transport::{MatchTransport, RawPage, VendorApiClient};

/// Post-processing hook: given the mapped studies, enrich them with
/// data from elsewhere (e.g. a ClinicalTrials.gov lookup) before they
/// are returned. Failures abort the match.
#[async_trait]
pub trait StudyEnrichment: Send + Sync {
    async fn update_research_studies(&self, studies: &mut [ResearchStudy]) -> Result<()>;
}

pub struct TrialMatcher {
    config: MatcherConfig,
    tables: MappingTables,
    http: reqwest::Client,
    transport: Option<Box<dyn MatchTransport>>,
    cache: Option<Box<dyn ResponseCache>>,
    enrichment: Option<Box<dyn StudyEnrichment>>,
}

impl TrialMatcher {
    /// Build a matcher from validated configuration. Loads the zip code
    /// index when one is configured; without it the distance rule will
    /// reject any bundle asking for geographic filtering.
    pub fn new(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        let zip = match &config.zip_data_path {
            Some(path) => ZipIndex::load_from_path(path)?,
            None => ZipIndex::empty(),
        };
        Ok(Self {
            config,
            tables: MappingTables::new().with_zip_index(zip),
            http: reqwest::Client::new(),
            transport: None,
            cache: None,
            enrichment: None,
        })
    }

    /// Replace the HTTP transport. The bearer token is then the
    /// transport's concern and the auth server is never contacted.
    pub fn with_transport(mut self, transport: Box<dyn MatchTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_cache(mut self, cache: Box<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_enrichment(mut self, enrichment: Box<dyn StudyEnrichment>) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    /// Run a full match: bundle in, research studies out.
    #[instrument(skip_all, fields(n_entries = bundle.entry.len()))]
    pub async fn match_trials(&self, bundle: &Bundle) -> Result<Vec<ResearchStudy>> {
        let endpoint = self
            .config
            .endpoint
            .as_deref()
            .ok_or_else(|| MatchError::Config("missing endpoint".to_string()))?;

        let mut request = generate_api_query(
            self.config.filter_by_country.as_deref(),
            self.config.effective_page_size(),
        );
        convert_bundle_to_api_request(bundle, &self.tables, &mut request)?;

        let owned_transport;
        let transport: &dyn MatchTransport = match &self.transport {
            Some(transport) => transport.as_ref(),
            None => {
                let token = auth::resolve_token(&self.http, &self.config).await?;
                owned_transport = VendorApiClient::new(self.http.clone(), endpoint, token);
                &owned_transport
            }
        };

        let response = query::fetch_all_pages(
            transport,
            self.cache.as_deref(),
            endpoint,
            &mut request,
            self.config.result_cap(),
        )
        .await?;
        info!(
            total = response.total,
            n_retrieved = response.trials.len(),
            "match complete"
        );

        let mut studies = research_study::convert_trials(&self.tables, &response.trials)?;
        if let Some(enrichment) = &self.enrichment {
            enrichment.update_research_studies(&mut studies).await?;
        }
        Ok(studies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncomatch_mapping::ApiRequest;
    use std::sync::Mutex;

    struct CannedTransport {
        bodies: Vec<String>,
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl MatchTransport for CannedTransport {
        async fn fetch_page(&self, request: &ApiRequest) -> Result<RawPage> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(RawPage {
                status: 200,
                body: self.bodies[(request.page - 1) as usize].clone(),
            })
        }
    }

    fn matcher_with(bodies: Vec<String>) -> TrialMatcher {
        let config = MatcherConfig {
            endpoint: Some("https://api.example.com".to_string()),
            auth_token: Some("token".to_string()),
            ..Default::default()
        };
        TrialMatcher::new(config).unwrap().with_transport(Box::new(CannedTransport {
            bodies,
            seen: Mutex::new(Vec::new()),
        }))
    }

    fn empty_bundle() -> Bundle {
        serde_json::from_value(serde_json::json!({
            "resourceType": "Bundle", "type": "collection", "entry": []
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_match_trials_end_to_end() {
        let body = serde_json::json!({
            "total": 1,
            "trials": [ {
                "trialId": 1, "shortTitle": "T", "nctId": "NCT001",
                "phase": { "phaseId": "2" }, "status": { "statusId": "1" }
            } ]
        })
        .to_string();
        let matcher = matcher_with(vec![body]);
        let studies = matcher.match_trials(&empty_bundle()).await.unwrap();

        assert_eq!(studies.len(), 1);
        assert_eq!(studies[0].title.as_deref(), Some("T"));
        assert_eq!(studies[0].status.as_deref(), Some("active"));
        assert_eq!(
            studies[0]
                .phase
                .as_ref()
                .unwrap()
                .first_coding()
                .unwrap()
                .code
                .as_deref(),
            Some("phase-2")
        );
    }

    #[tokio::test]
    async fn test_enrichment_runs_after_mapping() {
        struct Tagger;
        #[async_trait]
        impl StudyEnrichment for Tagger {
            async fn update_research_studies(
                &self,
                studies: &mut [ResearchStudy],
            ) -> Result<()> {
                for study in studies.iter_mut() {
                    study.description = Some("enriched".to_string());
                }
                Ok(())
            }
        }

        let body = serde_json::json!({
            "total": 1,
            "trials": [ { "trialId": 1, "shortTitle": "T" } ]
        })
        .to_string();
        let matcher = matcher_with(vec![body]).with_enrichment(Box::new(Tagger));
        let studies = matcher.match_trials(&empty_bundle()).await.unwrap();
        assert_eq!(studies[0].description.as_deref(), Some("enriched"));
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let result = TrialMatcher::new(MatcherConfig::default());
        assert!(matches!(result, Err(MatchError::Config(_))));
    }
}
