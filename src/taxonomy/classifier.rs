//! Free-text to category classification.
//!
//! # Precedence
//!
//! 1. Machine phrases of every category, in declaration order.
//! 2. Synonym phrases of every category, in declaration order.
//!
//! Equipment names are the higher-precision signal, so a machine phrase of a
//! later category beats a synonym of an earlier one. Within one pass the
//! earliest declared category wins.

use super::{CategoryKey, ALIASES, CATEGORIES};
use crate::models::ProcessStep;

/// Classifies a machine or operation name.
///
/// Returns `None` for blank input or when no phrase of any category occurs
/// as a substring of the lowercased input.
pub fn classify_machine(text: &str) -> Option<CategoryKey> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    CATEGORIES
        .iter()
        .find(|cat| cat.machines.iter().any(|m| lowered.contains(m)))
        .or_else(|| {
            CATEGORIES
                .iter()
                .find(|cat| cat.synonyms.iter().any(|s| lowered.contains(s)))
        })
        .map(|cat| cat.key)
}

/// Classifies a step by its machine, falling back to an exact alias match on
/// the step name.
pub fn classify_step(step: &ProcessStep) -> Option<CategoryKey> {
    classify_machine(&step.machine).or_else(|| normalize_category_key(&step.name))
}

/// Resolves a raw category name (alias or canonical key) to its key.
///
/// Idempotent: a canonical key string maps to itself.
pub fn normalize_category_key(raw: &str) -> Option<CategoryKey> {
    let k = raw.trim().to_lowercase();
    if k.is_empty() {
        return None;
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == k)
        .map(|(_, key)| *key)
        .or_else(|| CategoryKey::from_key(&k))
}
