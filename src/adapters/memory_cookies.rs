//! In-memory cookie store.
//!
//! Cookies live as long as the process. Used when no cookie file is
//! configured, and throughout the tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::traits::{CookieJar, CookieStore, CookieStoreError};

/// Cookie store backed by a shared in-memory jar. Clones share the jar.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    jar: Arc<Mutex<CookieJar>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with cookies.
    pub fn with_jar(jar: CookieJar) -> Self {
        Self {
            jar: Arc::new(Mutex::new(jar)),
        }
    }

    /// Current jar contents.
    pub async fn snapshot(&self) -> CookieJar {
        self.jar.lock().await.clone()
    }
}

#[async_trait]
impl CookieStore for MemoryCookieStore {
    async fn load(&self) -> Result<CookieJar, CookieStoreError> {
        Ok(self.jar.lock().await.clone())
    }

    async fn save(&self, jar: &CookieJar) -> Result<(), CookieStoreError> {
        *self.jar.lock().await = jar.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), CookieStoreError> {
        *self.jar.lock().await = CookieJar::new();
        Ok(())
    }

    async fn apply_set_cookies(&self, set_cookies: &[String]) -> Result<bool, CookieStoreError> {
        let mut jar = self.jar.lock().await;
        let mut changed = false;
        for raw in set_cookies {
            changed |= jar.apply_set_cookie(raw);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = MemoryCookieStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = MemoryCookieStore::new();
        let mut jar = CookieJar::new();
        jar.set("csrftoken", "t1");
        store.save(&jar).await.unwrap();

        let cloned = store.clone();
        assert_eq!(cloned.load().await.unwrap().csrf_token(), Some("t1"));

        store.clear().await.unwrap();
        assert!(cloned.snapshot().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_set_cookies_are_all_kept() {
        let store = MemoryCookieStore::new();
        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .apply_set_cookies(&[format!("c{}=v{}; Path=/", i, i)])
                        .await
                        .unwrap()
                })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap());
        }

        let jar = store.snapshot().await;
        assert_eq!(jar.len(), 32);
        assert_eq!(jar.get("c17"), Some("v17"));
    }
}
