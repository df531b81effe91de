//! Cookie store trait abstraction.
//!
//! The backend authenticates with a session cookie and protects writes with
//! a `csrftoken` cookie. The client replays both on every request, so the jar
//! lives behind [`CookieStore`] and can be kept in memory or on disk.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Name of the cookie carrying the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Cookie store operation errors.
#[derive(Debug, Clone, Error)]
pub enum CookieStoreError {
    #[error("Failed to load cookies: {0}")]
    LoadFailed(String),
    #[error("Failed to save cookies: {0}")]
    SaveFailed(String),
    #[error("Failed to clear cookies: {0}")]
    ClearFailed(String),
    #[error("Cookie serialization error: {0}")]
    Serialization(String),
}

/// Name/value pairs for the backend origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.cookies.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// The CSRF token, if the backend has issued one.
    pub fn csrf_token(&self) -> Option<&str> {
        self.get(CSRF_COOKIE).filter(|v| !v.is_empty())
    }

    /// Value for an outgoing `Cookie` header, or `None` when the jar is empty.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Apply one raw `Set-Cookie` header value.
    ///
    /// Returns `true` if the jar changed. A cookie with `Max-Age<=0` or an
    /// `Expires` date in the past is removed.
    pub fn apply_set_cookie(&mut self, raw: &str) -> bool {
        let mut parts = raw.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return false;
        };
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let value = value.trim().trim_matches('"');

        let mut expired = false;
        for attr in parts {
            let (key, val) = match attr.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (attr.trim(), ""),
            };
            if key.eq_ignore_ascii_case("max-age") {
                if let Ok(secs) = val.parse::<i64>() {
                    expired = secs <= 0;
                }
            } else if key.eq_ignore_ascii_case("expires") {
                if let Ok(when) = chrono::DateTime::parse_from_rfc2822(val) {
                    expired = expired || when < chrono::Utc::now();
                }
            }
        }

        if expired {
            return self.cookies.remove(name).is_some();
        }
        match self.cookies.get(name) {
            Some(existing) if existing == value => false,
            _ => {
                self.cookies.insert(name.to_string(), value.to_string());
                true
            }
        }
    }
}

/// Trait for cookie jar persistence.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Load the jar. A missing jar loads as empty.
    async fn load(&self) -> Result<CookieJar, CookieStoreError>;

    /// Replace the stored jar.
    async fn save(&self, jar: &CookieJar) -> Result<(), CookieStoreError>;

    /// Drop every stored cookie.
    async fn clear(&self) -> Result<(), CookieStoreError>;

    /// Apply raw `Set-Cookie` values to the stored jar as one step, so
    /// overlapping responses cannot drop each other's cookies.
    ///
    /// Returns `true` if the jar changed.
    async fn apply_set_cookies(&self, set_cookies: &[String]) -> Result<bool, CookieStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_set_cookie_stores_pair() {
        let mut jar = CookieJar::new();
        assert!(jar.apply_set_cookie(
            "csrftoken=AbC123; expires=Thu, 01 Jan 2099 00:00:00 GMT; Max-Age=31449600; Path=/; SameSite=Lax"
        ));
        assert_eq!(jar.csrf_token(), Some("AbC123"));
    }

    #[test]
    fn test_apply_set_cookie_same_value_is_not_a_change() {
        let mut jar = CookieJar::new();
        jar.set("sessionid", "s1");
        assert!(!jar.apply_set_cookie("sessionid=s1; HttpOnly; Path=/"));
    }

    #[test]
    fn test_apply_set_cookie_max_age_zero_removes() {
        let mut jar = CookieJar::new();
        jar.set("sessionid", "s1");
        assert!(jar.apply_set_cookie(
            "sessionid=\"\"; expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; Path=/"
        ));
        assert!(jar.get("sessionid").is_none());
    }

    #[test]
    fn test_apply_set_cookie_rejects_garbage() {
        let mut jar = CookieJar::new();
        assert!(!jar.apply_set_cookie("no-equals-sign"));
        assert!(!jar.apply_set_cookie("=value"));
        assert!(jar.is_empty());
    }

    #[test]
    fn test_header_value_joins_sorted() {
        let mut jar = CookieJar::new();
        assert_eq!(jar.header_value(), None);
        jar.set("sessionid", "s1");
        jar.set("csrftoken", "t1");
        assert_eq!(
            jar.header_value(),
            Some("csrftoken=t1; sessionid=s1".to_string())
        );
    }

    #[test]
    fn test_empty_csrf_token_is_absent() {
        let mut jar = CookieJar::new();
        jar.set(CSRF_COOKIE, "");
        assert_eq!(jar.csrf_token(), None);
    }
}
