use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Process configuration loaded from environment variables (and `.env`, if present).
///
/// Matching rules live in the profile file named by `PROFILE_PATH`; this struct
/// only carries where things are and the threshold override.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub min_fit_score: Option<u32>,
    pub postings_file: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            profile_path: optional_env("PROFILE_PATH").map(PathBuf::from),
            output_dir: optional_env("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("generated")),
            min_fit_score: optional_env("MIN_FIT_SCORE")
                .map(|raw| parse_min_fit(&raw))
                .transpose()?,
            postings_file: optional_env("POSTINGS_FILE").map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_min_fit(raw: &str) -> Result<u32> {
    let value = raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("MIN_FIT_SCORE must be an integer, got '{raw}'"))?;
    if value > 100 {
        bail!("MIN_FIT_SCORE must be between 0 and 100, got {value}");
    }
    Ok(value)
}
