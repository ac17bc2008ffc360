// src/similarity/cache.rs
//! Bounded memo of LCS lengths keyed by the normalized text pair.
//!
//! Shared across worker threads behind a mutex. Keys are SHA-256 digests of
//! the two texts, so an entry costs the same regardless of text size. LCS is
//! symmetric, so the smaller digest goes first and `(a, b)` hits the entry for
//! `(b, a)`.

use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

type TextDigest = [u8; 32];
type PairKey = (TextDigest, TextDigest);

pub struct LcsCache {
    entries: Mutex<LruCache<PairKey, usize>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LcsCache {
    /// Creates a cache holding at most `capacity` pairs.
    /// Returns `None` for a zero capacity (caching disabled).
    #[must_use]
    pub fn new(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(Self::with_capacity)
    }

    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached length for the pair, marking it most recently used.
    #[must_use]
    pub fn get(&self, x: &str, y: &str) -> Option<usize> {
        let key = pair_key(x, y);
        let found = self
            .entries
            .lock()
            .ok()
            .and_then(|mut entries| entries.get(&key).copied());
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Stores a length, evicting the least recently used pair when full.
    pub fn insert(&self, x: &str, y: &str, length: usize) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(pair_key(x, y), length);
        }
    }

    /// Returns the cached value or computes, stores and returns it.
    /// Errors from `compute` are passed through and never cached.
    ///
    /// # Errors
    /// Propagates the error returned by `compute`.
    pub fn get_or_try_insert<E>(
        &self,
        x: &str,
        y: &str,
        compute: impl FnOnce() -> Result<usize, E>,
    ) -> Result<usize, E> {
        if let Some(length) = self.get(x, y) {
            return Ok(length);
        }
        let length = compute()?;
        self.insert(x, y, length);
        Ok(length)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .map_or(0, |entries| entries.cap().get())
    }

    /// Returns `(hits, misses)` since construction.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

fn digest(text: &str) -> TextDigest {
    Sha256::digest(text.as_bytes()).into()
}

fn pair_key(x: &str, y: &str) -> PairKey {
    let (dx, dy) = (digest(x), digest(y));
    if dx <= dy {
        (dx, dy)
    } else {
        (dy, dx)
    }
}
