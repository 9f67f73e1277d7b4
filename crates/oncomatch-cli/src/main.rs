//! Command-line matcher: patient bundle JSON in, research studies out.
//!
//! Config comes from the TOML file named by `ONCOMATCH_CONFIG`
//! (default `oncomatch.toml`). The single positional argument is the
//! path to a FHIR Bundle JSON file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use oncomatch_client::{MatcherConfig, TrialMatcher};
use oncomatch_fhir::Bundle;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let bundle_path = std::env::args()
        .nth(1)
        .context("usage: oncomatch <patient-bundle.json>")?;
    let config_path =
        std::env::var("ONCOMATCH_CONFIG").unwrap_or_else(|_| "oncomatch.toml".to_string());

    let config = MatcherConfig::load_from_path(&PathBuf::from(&config_path))
        .with_context(|| format!("loading config from {config_path}"))?;
    let matcher = TrialMatcher::new(config)?;

    let bundle_text = std::fs::read_to_string(Path::new(&bundle_path))
        .with_context(|| format!("reading bundle from {bundle_path}"))?;
    let bundle: Bundle =
        serde_json::from_str(&bundle_text).context("parsing patient bundle JSON")?;
    info!(n_entries = bundle.entry.len(), "loaded patient bundle");

    let studies = matcher.match_trials(&bundle).await?;
    info!(n_studies = studies.len(), "match finished");
    println!("{}", serde_json::to_string_pretty(&studies)?);
    Ok(())
}
