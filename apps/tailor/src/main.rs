mod config;
mod errors;
mod generation;
mod matching;
mod models;
mod session;
mod store;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::documents::MarkdownDocumentWriter;
use crate::generation::pipeline::{LogNotifier, Pipeline};
use crate::matching::profile::MatchingProfile;
use crate::store::JsonApplicationStore;

fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    let profile = load_profile(&config)?;

    let documents = MarkdownDocumentWriter::new(&config.output_dir)
        .context("cannot prepare the document output directory")?;
    info!("Resumes go to {}", documents.output_dir().display());

    let store = JsonApplicationStore::open(config.output_dir.join("applications"))
        .context("cannot open the application store")?;
    let previous = store.list().map(|r| r.len()).unwrap_or(0);
    info!("{previous} applications already stored in {}", store.dir().display());

    let pipeline = Pipeline::new(
        profile,
        Box::new(documents),
        Box::new(store),
        Box::new(LogNotifier),
    );
    info!("Minimum fit score: {}%", pipeline.min_fit_score());
    for line in pipeline.gate().describe() {
        info!("Strategy {line}");
    }

    match &config.postings_file {
        Some(path) => {
            let postings = session::load_batch(path)
                .with_context(|| format!("cannot load postings from {}", path.display()))?;
            let report = pipeline.process_batch(&postings);
            session::log_batch_summary(&report);
        }
        None => {
            let stdin = io::stdin();
            session::run_interactive(&pipeline, stdin.lock(), io::stdout())?;
        }
    }

    Ok(())
}

/// Built-in profile unless `PROFILE_PATH` names a file; `MIN_FIT_SCORE` wins over both.
fn load_profile(config: &Config) -> Result<Arc<MatchingProfile>> {
    let mut profile = match &config.profile_path {
        Some(path) => MatchingProfile::load(path)
            .with_context(|| format!("cannot load profile {}", path.display()))?,
        None => {
            info!("Using the built-in matching profile");
            MatchingProfile::default()
        }
    };

    if let Some(min) = config.min_fit_score {
        profile.min_fit_score = min;
        profile.validate()?;
    }

    Ok(Arc::new(profile))
}
