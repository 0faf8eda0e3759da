//! File-backed freshness cache for raw provider responses.
//!
//! One file per request URL, named after the SHA-1 of the URL. The file's
//! modification time is the only freshness signal.

use std::{
    fs,
    path::PathBuf,
    time::{Duration, SystemTime},
};

use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use crate::error::CacheError;

/// Entries older than this are ignored.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(300);

/// Fixed-width hex token for a request URL.
pub fn cache_key(url: &str) -> String {
    hex::encode(Sha1::digest(url.as_bytes()))
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    freshness: Duration,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            freshness: FRESHNESS_WINDOW,
        }
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(url)))
    }

    /// Cached body for `url` if an entry exists and is still fresh.
    pub fn get(&self, url: &str) -> Option<String> {
        self.get_at(url, SystemTime::now())
    }

    /// Same as [`ResponseCache::get`], judged against an explicit clock reading.
    pub fn get_at(&self, url: &str, now: SystemTime) -> Option<String> {
        match self.read_fresh(url, now) {
            Ok(hit) => hit,
            Err(err) => {
                warn!(error = %err, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Write or overwrite the entry for `url`. Failures are logged only.
    pub fn put(&self, url: &str, body: &str) {
        if let Err(err) = self.write(url, body) {
            warn!(error = %err, "cache write failed, continuing without cache");
        }
    }

    fn read_fresh(&self, url: &str, now: SystemTime) -> Result<Option<String>, CacheError> {
        let path = self.entry_path(url);

        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(%url, "cache miss");
                return Ok(None);
            }
            Err(source) => return Err(CacheError::Read { path, source }),
        };

        let stored_at = meta
            .modified()
            .map_err(|source| CacheError::Read { path: path.clone(), source })?;

        // A timestamp in the future counts as just written.
        let age = now.duration_since(stored_at).unwrap_or(Duration::ZERO);
        if age >= self.freshness {
            debug!(%url, age_secs = age.as_secs(), "cache entry stale");
            return Ok(None);
        }

        let body =
            fs::read_to_string(&path).map_err(|source| CacheError::Read { path, source })?;

        debug!(%url, age_secs = age.as_secs(), "cache hit");
        Ok(Some(body))
    }

    fn write(&self, url: &str, body: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| CacheError::Write { path: self.dir.clone(), source })?;

        let path = self.entry_path(url);
        let tmp = path.with_extension("json.tmp");

        // Readers must never see a half-written entry.
        fs::write(&tmp, body).map_err(|source| CacheError::Write { path: tmp.clone(), source })?;
        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(CacheError::Write { path, source });
        }

        debug!(%url, path = %path.display(), "cache entry stored");
        Ok(())
    }
}
