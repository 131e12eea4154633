use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read from the environment (and `.env` if present)
///
/// | Variable                 | Default                 |
/// |--------------------------|-------------------------|
/// | `TOUR_BACKEND_URL`       | `http://localhost:8001` |
/// | `TOUR_HTTP_TIMEOUT_SECS` | `30`                    |
/// | `TOUR_SHARE_BASE_URL`    | backend URL             |
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub timeout: Duration,
    pub share_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            share_base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend_url = lookup("TOUR_BACKEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let timeout = match lookup("TOUR_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("TOUR_HTTP_TIMEOUT_SECS must be an integer, got {raw:?}"))?,
            ),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let share_base_url = lookup("TOUR_SHARE_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| backend_url.clone());

        debug!(%backend_url, ?timeout, "Loaded configuration");

        Ok(Self {
            backend_url,
            timeout,
            share_base_url,
        })
    }

    /// Base path of the listing REST API
    pub fn api_url(&self) -> String {
        format!("{}/api", self.backend_url)
    }

    /// Public page URL for a listing, used by the share action
    pub fn page_url(&self, listing_id: &str) -> String {
        format!("{}/view/{}", self.share_base_url, listing_id)
    }
}
