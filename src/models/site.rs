//! Site configuration and statistics.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE_NAME: &str = "Personal Blog";
pub const DEFAULT_SITE_DESCRIPTION: &str = "A personal blog about programming and technology";
pub const DEFAULT_SITE_KEYWORDS: &str = "Python,Django,Vue.js,Web Development";

/// Public site settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_description: String,
    pub site_keywords: String,
    pub allow_register: bool,
    pub comment_need_audit: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_description: DEFAULT_SITE_DESCRIPTION.to_string(),
            site_keywords: DEFAULT_SITE_KEYWORDS.to_string(),
            allow_register: true,
            comment_need_audit: false,
        }
    }
}

impl SiteConfig {
    /// Overlay the fields present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: SiteConfigPatch) {
        if let Some(v) = patch.site_name {
            self.site_name = v;
        }
        if let Some(v) = patch.site_description {
            self.site_description = v;
        }
        if let Some(v) = patch.site_keywords {
            self.site_keywords = v;
        }
        if let Some(v) = patch.allow_register {
            self.allow_register = v;
        }
        if let Some(v) = patch.comment_need_audit {
            self.comment_need_audit = v;
        }
    }
}

/// Site config as returned by the backend, where any field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfigPatch {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_description: Option<String>,
    #[serde(default)]
    pub site_keywords: Option<String>,
    #[serde(default)]
    pub allow_register: Option<bool>,
    #[serde(default)]
    pub comment_need_audit: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub article_count: u64,
    #[serde(default)]
    pub user_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub category_count: u64,
    #[serde(default)]
    pub tag_count: u64,
}
