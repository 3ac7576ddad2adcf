//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::listing::pager::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Base URL of the asset-management REST backend.
    pub backend_url: String,
    /// Base URL of the scheduling backend that owns workstations.
    pub workstations_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}
