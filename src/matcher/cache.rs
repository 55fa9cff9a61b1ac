//! Caller-owned cache of matching results.
//!
//! Keyed by a content fingerprint of (catalog snapshot id, step list). The
//! cache is never shared implicitly: the caller decides its lifetime and
//! should keep one cache per matcher configuration.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::models::{Match, ProcessStep};

/// SHA-256 fingerprint (hex) of a catalog snapshot and a step list.
///
/// Every step field participates, length-prefixed so that field boundaries
/// cannot be confused.
pub fn fingerprint(snapshot_id: &str, steps: &[ProcessStep]) -> String {
    let mut hasher = Sha256::new();
    feed(&mut hasher, snapshot_id);
    hasher.update((steps.len() as u64).to_le_bytes());
    for step in steps {
        feed(&mut hasher, &step.name);
        feed(&mut hasher, &step.machine);
        hasher.update(step.minutes.to_le_bytes());
        feed(&mut hasher, step.tolerance.as_deref().unwrap_or("\u{0}none"));
        feed(&mut hasher, step.precision.as_deref().unwrap_or("\u{0}none"));
    }
    hex::encode(hasher.finalize())
}

fn feed(hasher: &mut Sha256, text: &str) {
    hasher.update((text.len() as u64).to_le_bytes());
    hasher.update(text.as_bytes());
}

/// Ranked match lists by fingerprint.
#[derive(Debug, Clone, Default)]
pub struct MatchCache {
    entries: HashMap<String, Vec<Match>>,
}

impl MatchCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for a fingerprint.
    pub fn get(&self, key: &str) -> Option<&[Match]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Stores a result.
    pub fn insert(&mut self, key: String, matches: Vec<Match>) {
        self.entries.insert(key, matches);
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
