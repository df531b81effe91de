//! Client configuration.
//!
//! # Environment
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BLOG_API_URL` | backend origin | `http://localhost:8000` |
//! | `BLOG_COOKIE_FILE` | cookie jar path; empty keeps cookies in memory | `~/.blog-client/cookies.json` |
//! | `BLOG_TIMEOUT_SECS` | transport timeout | none |
//! | `BLOG_PAGE_SIZE` | articles per page | `10` |

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::default_cookie_path;
use crate::error::{ApiError, ApiResult};
use crate::state::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const ENV_API_URL: &str = "BLOG_API_URL";
pub const ENV_COOKIE_FILE: &str = "BLOG_COOKIE_FILE";
pub const ENV_TIMEOUT_SECS: &str = "BLOG_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "BLOG_PAGE_SIZE";

/// Settings for building a [`crate::app::BlogApp`].
///
/// # Example
///
/// ```ignore
/// use blog_client::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_url("https://blog.example.com")
///     .with_page_size(20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash
    pub api_url: String,
    /// Where cookies are persisted; `None` keeps them in memory
    pub cookie_file: Option<PathBuf>,
    /// Overall request timeout; `None` uses the transport default
    pub timeout: Option<Duration>,
    /// Articles per page
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cookie_file: None,
            timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    /// Keep cookies in memory only.
    pub fn with_memory_cookies(mut self) -> Self {
        self.cookie_file = None;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Read configuration from the environment, falling back to defaults.
    ///
    /// Unlike [`Default`], an unset `BLOG_COOKIE_FILE` resolves to the cookie
    /// file under the home directory.
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(url) = non_empty_var(ENV_API_URL) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::Config {
                    message: format!("{} must be an http(s) URL, got '{}'", ENV_API_URL, url),
                });
            }
            config = config.with_api_url(url);
        }

        config.cookie_file = match std::env::var(ENV_COOKIE_FILE) {
            Ok(path) if path.trim().is_empty() => None,
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => default_cookie_path(),
        };

        if let Some(raw) = non_empty_var(ENV_TIMEOUT_SECS) {
            let secs = parse_number::<u64>(ENV_TIMEOUT_SECS, &raw)?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(raw) = non_empty_var(ENV_PAGE_SIZE) {
            let size = parse_number::<u32>(ENV_PAGE_SIZE, &raw)?;
            if size == 0 {
                return Err(ApiError::Config {
                    message: format!("{} must be at least 1", ENV_PAGE_SIZE),
                });
            }
            config.page_size = size;
        }

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> ApiResult<T> {
    raw.parse().map_err(|_| ApiError::Config {
        message: format!("{} must be a positive integer, got '{}'", name, raw),
    })
}
