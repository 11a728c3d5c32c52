//! Persistent rate cache keyed by `YYYY/MM/DD`.
//!
//! Layout: a single JSON document
//! `{ "version": 1, "entries": { "2024/05/01": { "rate": 1.08, "cached_at": "..." } } }`
//!
//! Features:
//! - Atomic writes (write to .tmp, rename into place) after every `set`
//! - Explicit close with a final flush; a dropped handle flushes best-effort
//! - Expiry policy: permanent by default, optional maximum entry age
//! - Entries accumulate across runs; there is no eviction

use crate::domain::DateKey;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CACHE_VERSION: u32 = 1;

/// Storage errors. Failing to open or close the cache is fatal for a run.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("cache serialization failed: {0}")]
    Serialize(String),

    #[error("cache is closed")]
    Closed,
}

/// When a cached entry stops being trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Presence implies validity. Rates for past dates never change.
    #[default]
    Permanent,
    /// Entries older than this are treated as missing and refetched.
    MaxAge(Duration),
}

impl CachePolicy {
    pub fn max_age_days(days: Option<u32>) -> Self {
        match days {
            Some(d) => Self::MaxAge(Duration::days(i64::from(d))),
            None => Self::Permanent,
        }
    }

    fn is_fresh(&self, cached_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Permanent => true,
            Self::MaxAge(max_age) => now - cached_at <= *max_age,
        }
    }
}

/// A cached rate and when it was stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub rate: f64,
    pub cached_at: DateTime<Utc>,
}

/// Key-value store the fetcher consults before touching the network.
pub trait RateCache {
    /// True if a fresh entry exists for `key`.
    fn contains(&self, key: &DateKey) -> bool {
        self.get(key).is_some()
    }

    /// The fresh cached rate for `key`, if any.
    fn get(&self, key: &DateKey) -> Option<f64>;

    /// Store `rate` under `key`, replacing any previous entry.
    fn set(&mut self, key: DateKey, rate: f64) -> Result<(), CacheError>;

    /// Flush and release the cache. Later calls to `set` fail with `Closed`.
    fn close(&mut self) -> Result<(), CacheError>;
}

fn lookup<'a>(
    entry: Option<&'a CacheEntry>,
    policy: CachePolicy,
    now: DateTime<Utc>,
) -> Option<&'a CacheEntry> {
    entry.filter(|e| policy.is_fresh(e.cached_at, now))
}

// ── On-disk cache ───────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheDocument {
    version: u32,
    entries: BTreeMap<DateKey, CacheEntry>,
}

/// JSON-file cache. Every `set` is durable on its own.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    policy: CachePolicy,
    entries: BTreeMap<DateKey, CacheEntry>,
    dirty: bool,
    closed: bool,
}

impl JsonFileCache {
    /// Open (or create) the cache file at `path`.
    ///
    /// The parent directory is created if needed. A missing file starts an
    /// empty cache; an unreadable or malformed file is an error.
    pub fn open(path: impl Into<PathBuf>, policy: CachePolicy) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CacheError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| CacheError::Io {
                path: path.clone(),
                source,
            })?;
            let doc: CacheDocument =
                serde_json::from_str(&content).map_err(|e| CacheError::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            if doc.version > CACHE_VERSION {
                return Err(CacheError::Corrupt {
                    path,
                    reason: format!(
                        "unsupported cache version {} (max supported: {CACHE_VERSION})",
                        doc.version
                    ),
                });
            }
            doc.entries
        } else {
            BTreeMap::new()
        };

        log::debug!("opened rate cache {} ({} entries)", path.display(), entries.len());

        Ok(Self {
            path,
            policy,
            entries,
            dirty: false,
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn persist(&mut self) -> Result<(), CacheError> {
        let doc = CacheDocument {
            version: CACHE_VERSION,
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| CacheError::Serialize(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|source| CacheError::Io {
            path: tmp_path.clone(),
            source,
        })?;

        // Atomic rename
        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            CacheError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        self.dirty = false;
        Ok(())
    }
}

impl RateCache for JsonFileCache {
    fn get(&self, key: &DateKey) -> Option<f64> {
        if self.closed {
            return None;
        }
        lookup(self.entries.get(key), self.policy, Utc::now()).map(|e| e.rate)
    }

    fn set(&mut self, key: DateKey, rate: f64) -> Result<(), CacheError> {
        if self.closed {
            return Err(CacheError::Closed);
        }
        self.entries.insert(
            key,
            CacheEntry {
                rate,
                cached_at: Utc::now(),
            },
        );
        self.dirty = true;
        self.persist()
    }

    fn close(&mut self) -> Result<(), CacheError> {
        if self.closed {
            return Ok(());
        }
        if self.dirty {
            self.persist()?;
        }
        self.closed = true;
        log::debug!("closed rate cache {}", self.path.display());
        Ok(())
    }
}

impl Drop for JsonFileCache {
    fn drop(&mut self) {
        if !self.closed && self.dirty {
            if let Err(e) = self.persist() {
                log::warn!("failed to flush rate cache on drop: {e}");
            }
        }
    }
}

// ── In-memory cache ─────────────────────────────────────────────────

/// Non-persistent cache with the same semantics, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    policy: CachePolicy,
    entries: HashMap<DateKey, CacheEntry>,
    closed: bool,
}

impl MemoryCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Seed an entry with an explicit timestamp.
    pub fn insert_at(&mut self, key: DateKey, rate: f64, cached_at: DateTime<Utc>) {
        self.entries.insert(key, CacheEntry { rate, cached_at });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RateCache for MemoryCache {
    fn get(&self, key: &DateKey) -> Option<f64> {
        if self.closed {
            return None;
        }
        lookup(self.entries.get(key), self.policy, Utc::now()).map(|e| e.rate)
    }

    fn set(&mut self, key: DateKey, rate: f64) -> Result<(), CacheError> {
        if self.closed {
            return Err(CacheError::Closed);
        }
        self.insert_at(key, rate, Utc::now());
        Ok(())
    }

    fn close(&mut self) -> Result<(), CacheError> {
        self.closed = true;
        Ok(())
    }
}
