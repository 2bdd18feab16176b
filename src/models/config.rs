//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_nearby_limit() -> usize {
    20
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by every API call made from one front-end process.
pub struct ClientConfig {
    /// Base URL of the booking API, e.g. `http://localhost:8000`.
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_nearby_limit")]
    pub nearby_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Access token of a previous login.
    #[serde(default)]
    pub token: Option<String>,
}
