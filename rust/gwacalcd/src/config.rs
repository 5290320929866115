use crate::seed::SeedMode;
use anyhow::{anyhow, Result};

pub const SEED_ENV: &str = "GWACALCD_SEED";
pub const LOG_ENV: &str = "GWACALCD_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: SeedMode,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = match lookup(SEED_ENV).filter(|v| !v.trim().is_empty()) {
            None => SeedMode::Sample,
            Some(v) => SeedMode::parse(&v)
                .ok_or_else(|| anyhow!("{SEED_ENV} must be 'sample' or 'empty', got {v:?}"))?,
        };

        let log_filter = lookup(LOG_ENV)
            .or_else(|| lookup("RUST_LOG"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self { seed, log_filter })
    }
}
