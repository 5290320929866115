use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::roster::Roster;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: Config,
    pub roster: Roster,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Loads the configured seed and derives it before anything can read it.
    pub fn new(config: Config) -> Self {
        let roster = Roster::new(config.seed.subjects());
        Self {
            config,
            roster,
            started_at: Utc::now(),
        }
    }
}
