//! Task category taxonomy.
//!
//! A fixed, ordered table of canonical manufacturing task categories. Each
//! category carries a display label, synonym phrases (Japanese and English),
//! and typical machine names. The table is scanned top to bottom; declaration
//! order is the tie-break whenever more than one category could apply.
//!
//! # Categories
//!
//! | Key | Label |
//! |-----|-------|
//! | `drilling` | Drilling / 穴あけ |
//! | `milling` | Milling / フライス |
//! | `turning` | Turning / 旋削 |
//! | `cutting` | Cutting / 切断 |
//! | `finishing` | Finishing / 仕上げ |
//! | `inspection` | Inspection / 検査 |
//!
//! All phrases are stored lowercase so lookups only lowercase the input.

mod categories;
mod classifier;

pub use categories::{ALIASES, CATEGORIES, FALLBACK_CATEGORIES};
pub use classifier::{classify_machine, classify_step, normalize_category_key};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical task category key.
///
/// Variants are declared in taxonomy order; `CATEGORIES[key.index()]` is the
/// row for `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Drilling,
    Milling,
    Turning,
    Cutting,
    Finishing,
    Inspection,
}

impl CategoryKey {
    /// All keys in declaration order.
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Drilling,
        CategoryKey::Milling,
        CategoryKey::Turning,
        CategoryKey::Cutting,
        CategoryKey::Finishing,
        CategoryKey::Inspection,
    ];

    /// Canonical lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drilling => "drilling",
            Self::Milling => "milling",
            Self::Turning => "turning",
            Self::Cutting => "cutting",
            Self::Finishing => "finishing",
            Self::Inspection => "inspection",
        }
    }

    /// Parses an exact canonical identifier. See [`normalize_category_key`]
    /// for alias-aware parsing.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Position in the taxonomy table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Taxonomy row for this key.
    pub fn category(self) -> &'static TaskCategory {
        &CATEGORIES[self.index()]
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        self.category().label
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One taxonomy row. Immutable, defined at compile time.
#[derive(Debug, Clone, Copy)]
pub struct TaskCategory {
    /// Canonical key.
    pub key: CategoryKey,
    /// Display label.
    pub label: &'static str,
    /// Operation words and phrases indicating this category (lowercase).
    pub synonyms: &'static [&'static str],
    /// Typical machine / equipment names (lowercase).
    pub machines: &'static [&'static str],
}

/// Keywords for a category: synonyms ∪ machines, de-duplicated, ordered by
/// (length, text).
pub fn keywords_for_category(key: CategoryKey) -> Vec<&'static str> {
    let cat = key.category();
    let mut words: Vec<&'static str> = cat
        .synonyms
        .iter()
        .chain(cat.machines.iter())
        .copied()
        .filter(|w| !w.trim().is_empty())
        .collect();
    words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    words.dedup();
    words
}

/// Counts the category keywords that occur as substrings of `text`.
///
/// `text` must already be lowercased.
pub fn keyword_hits(key: CategoryKey, text: &str) -> usize {
    keywords_for_category(key)
        .into_iter()
        .filter(|kw| text.contains(kw))
        .count()
}
