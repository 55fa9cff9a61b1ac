//! Company model.
//!
//! Companies are the candidate partners a matching run ranks. Their
//! `machines` and `skills` arrive as comma-separated free text from the
//! store; both are parsed once into a [`TokenSet`] at this boundary so no
//! call site re-splits them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Stable company identifier assigned by the store.
pub type CompanyId = u64;

/// An ordered, de-duplicated set of trimmed, non-empty text tokens.
///
/// Parsed from comma-separated text. Order is first occurrence; it carries
/// no meaning for matching but keeps output stable. Serializes back to the
/// comma-separated form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Parses comma-separated text. Empty and whitespace-only entries are dropped.
    pub fn parse(text: &str) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for raw in text.split(',') {
            let token = raw.trim();
            if token.is_empty() || tokens.iter().any(|t| t == token) {
                continue;
            }
            tokens.push(token.to_string());
        }
        Self { tokens }
    }

    /// Exact (case-sensitive) membership.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Whether any token is in `other`.
    pub fn intersects(&self, other: &HashSet<&str>) -> bool {
        self.tokens.iter().any(|t| other.contains(t.as_str()))
    }

    /// Iterates tokens in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Joins tokens with `sep`.
    pub fn join(&self, sep: &str) -> String {
        self.tokens.join(sep)
    }
}

impl From<&str> for TokenSet {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for TokenSet {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<TokenSet> for String {
    fn from(set: TokenSet) -> Self {
        set.join(",")
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(","))
    }
}

/// A candidate partner company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique, stable identifier.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Machines / equipment the company operates.
    pub machines: TokenSet,
    /// Skills, materials, or part types the company advertises.
    pub skills: TokenSet,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Capacity hint (e.g., "Low", "High").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Company {
    /// Creates a company with no machines, skills, or notes.
    pub fn new(id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            machines: TokenSet::default(),
            skills: TokenSet::default(),
            notes: String::new(),
            capacity: None,
            location: None,
        }
    }

    /// Sets machines from comma-separated text.
    pub fn with_machines(mut self, machines: &str) -> Self {
        self.machines = TokenSet::parse(machines);
        self
    }

    /// Sets skills from comma-separated text.
    pub fn with_skills(mut self, skills: &str) -> Self {
        self.skills = TokenSet::parse(skills);
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Sets the capacity hint.
    pub fn with_capacity(mut self, capacity: impl Into<String>) -> Self {
        self.capacity = Some(capacity.into());
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Whether the company operates exactly this machine.
    pub fn has_machine(&self, machine: &str) -> bool {
        self.machines.contains(machine)
    }

    /// Lowercased machines + skills + notes, used for keyword hit counting.
    pub fn profile_text(&self) -> String {
        format!(
            "{} {} {}",
            self.machines.join(","),
            self.skills.join(","),
            self.notes
        )
        .to_lowercase()
    }

    /// Multi-line description used in advisory prompts.
    pub fn describe(&self) -> String {
        format!(
            "{}\nmachines: {}\nskills: {}\nnotes: {}",
            self.name, self.machines, self.skills, self.notes
        )
    }
}
