//! File-based cookie store adapter.
//!
//! Persists the backend session across CLI invocations in
//! `~/.blog-client/cookies.json` (or a configured path).

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::traits::{CookieJar, CookieStore, CookieStoreError};

/// The cookie directory name under the home directory.
const COOKIE_DIR: &str = ".blog-client";

/// The cookie file name.
const COOKIE_FILE: &str = "cookies.json";

/// Default cookie file location, or `None` without a home directory.
pub fn default_cookie_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(COOKIE_DIR).join(COOKIE_FILE))
}

/// JSON file cookie store.
///
/// A missing or unreadable file loads as an empty jar, the same way a
/// browser starts without cookies. Clones share one lock, so writes from a
/// single process never interleave.
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileCookieStore {
    /// Store at the default location.
    pub fn new() -> Result<Self, CookieStoreError> {
        default_cookie_path()
            .map(Self::with_path)
            .ok_or_else(|| {
                CookieStoreError::LoadFailed("Failed to determine home directory".to_string())
            })
    }

    /// Store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> CookieJar {
        if !self.path.exists() {
            return CookieJar::default();
        }
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Cannot open cookie file {}: {}", self.path.display(), e);
                return CookieJar::default();
            }
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(jar) => jar,
            Err(e) => {
                tracing::warn!("Ignoring corrupt cookie file {}: {}", self.path.display(), e);
                CookieJar::default()
            }
        }
    }

    fn write(&self, jar: &CookieJar) -> Result<(), CookieStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| CookieStoreError::SaveFailed(e.to_string()))?;
            }
        }
        let file =
            File::create(&self.path).map_err(|e| CookieStoreError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, jar)
            .map_err(|e| CookieStoreError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CookieStoreError::SaveFailed(e.to_string()))
    }
}

#[async_trait]
impl CookieStore for FileCookieStore {
    async fn load(&self) -> Result<CookieJar, CookieStoreError> {
        let _held = self.lock.lock().await;
        Ok(self.read())
    }

    async fn save(&self, jar: &CookieJar) -> Result<(), CookieStoreError> {
        let _held = self.lock.lock().await;
        self.write(jar)
    }

    async fn apply_set_cookies(&self, set_cookies: &[String]) -> Result<bool, CookieStoreError> {
        let _held = self.lock.lock().await;
        let mut jar = self.read();
        let mut changed = false;
        for raw in set_cookies {
            changed |= jar.apply_set_cookie(raw);
        }
        if changed {
            self.write(&jar)?;
        }
        Ok(changed)
    }

    async fn clear(&self) -> Result<(), CookieStoreError> {
        let _held = self.lock.lock().await;
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|e| CookieStoreError::ClearFailed(e.to_string()))
    }
}
