//! Manufacturing partner matching.
//!
//! Given the steps of a machining plan (each naming the machine it needs) and
//! a catalog of manufacturing companies, ranks the companies by fitness and,
//! when no single company can run every step, proposes an alliance of
//! companies that together cover the required machines.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessStep`, `Company`, `Match`, `Alliance`
//! - **`taxonomy`**: Fixed task category table, aliases, and the classifier
//! - **`scoring`**: Weighted fitness score and the optional advisory nudge
//! - **`matcher`**: Ranking, greedy alliance cover, cancellation, result cache
//! - **`router`**: Category grouping and category-scoped ranking
//! - **`store`**: Company catalog access and an in-memory store
//! - **`validation`**: Input integrity checks and step record intake
//! - **`config`**: Matcher and advisory client settings
//! - **`error`**: Error types
//!
//! # Architecture
//!
//! Scoring is a pure function of (company, steps) unless an advisory service
//! is configured, in which case its failures degrade to the heuristic score.
//! The crate holds no global state: the catalog is read through a
//! [`CompanyStore`](store::CompanyStore) snapshot per call and caching is
//! caller-owned.
//!
//! # Features
//!
//! - `parallel`: score companies with rayon
//! - `http`: OpenAI-compatible advisory client over reqwest
//!
//! # References
//!
//! - Chvátal (1979), "A Greedy Heuristic for the Set-Covering Problem"
//! - Weber, Current & Benton (1991), "Vendor selection criteria and methods"

pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod router;
pub mod scoring;
pub mod store;
pub mod taxonomy;
pub mod validation;

pub use error::{AdvisoryError, MatchError, StoreError};
pub use matcher::{CancelToken, MatchCache, Matcher};
pub use models::{Alliance, Company, Match, ProcessStep};
pub use scoring::Scorer;
pub use store::{CompanyStore, MemoryStore};
pub use taxonomy::CategoryKey;
