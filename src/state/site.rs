//! Site configuration and statistics, with defaults until the first fetch.

use super::cell::StateCell;
use crate::api::ApiClient;
use crate::models::{SiteConfig, SiteConfigPatch, Statistics};

const CONFIG_PATH: &str = "/api/system/config/";
const STATISTICS_PATH: &str = "/api/blog/statistics/";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteState {
    pub config: SiteConfig,
    pub statistics: Statistics,
}

/// Best-effort mirror of backend settings. Fetch failures are logged and the
/// last known values kept.
#[derive(Debug, Clone)]
pub struct SiteModule {
    api: ApiClient,
    state: StateCell<SiteState>,
}

impl SiteModule {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: StateCell::default(),
        }
    }

    pub fn site_config(&self) -> SiteConfig {
        self.state.read(|s| s.config.clone())
    }

    pub fn statistics(&self) -> Statistics {
        self.state.read(|s| s.statistics.clone())
    }

    pub fn site_name(&self) -> String {
        self.state.read(|s| s.config.site_name.clone())
    }

    pub fn site_description(&self) -> String {
        self.state.read(|s| s.config.site_description.clone())
    }

    pub fn allow_register(&self) -> bool {
        self.state.read(|s| s.config.allow_register)
    }

    /// Refresh the config, merging the returned fields over the current ones.
    pub async fn get_site_config(&self) -> Option<SiteConfig> {
        match self.api.get_json::<SiteConfigPatch>(CONFIG_PATH).await {
            Ok(patch) => Some(self.state.update(|s| {
                s.config.merge(patch);
                s.config.clone()
            })),
            Err(e) => {
                tracing::error!("Failed to fetch site config: {}", e);
                None
            }
        }
    }

    pub async fn get_statistics(&self) -> Option<Statistics> {
        match self.api.get_json::<Statistics>(STATISTICS_PATH).await {
            Ok(stats) => {
                self.state.update(|s| s.statistics = stats.clone());
                Some(stats)
            }
            Err(e) => {
                tracing::error!("Failed to fetch statistics: {}", e);
                None
            }
        }
    }
}
