//! Company matching and alliance proposal.
//!
//! # Algorithm
//!
//! 1. Load the catalog snapshot from the store (an empty catalog yields no matches).
//! 2. Drop malformed steps and companies, logging each one.
//! 3. Score every company (optionally in parallel).
//! 4. Stable-sort by descending score; ties keep catalog order.
//! 5. If no single company operates every required machine, build a greedy
//!    alliance over the ranking and attach it to the top match.
//!
//! Scoring is independent per company, so the parallel path collects scores
//! in catalog order before the sort and yields the same output as the
//! sequential one.

mod alliance;
mod cache;
mod cancel;

pub use alliance::build_alliance;
pub use cache::{fingerprint, MatchCache};
pub use cancel::CancelToken;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::MatcherConfig;
use crate::error::MatchError;
use crate::models::{distinct_machines, Company, Match, ProcessStep};
use crate::scoring::Scorer;
use crate::store::CompanyStore;
use crate::validation::{retain_valid_companies, retain_valid_steps};

/// Ranks companies against a step list.
///
/// # Example
///
/// ```
/// use u_sourcing::matcher::Matcher;
/// use u_sourcing::models::{Company, ProcessStep};
///
/// let companies = vec![
///     Company::new(1, "A").with_machines("VMC"),
///     Company::new(2, "B").with_machines("NC Lathe"),
/// ];
/// let steps = vec![ProcessStep::new("Mill", "VMC"), ProcessStep::new("Turn", "NC Lathe")];
///
/// let matches = Matcher::new().rank(&companies, &steps);
/// let alliance = matches[0].alliance.as_ref().unwrap();
/// assert_eq!(alliance.company_ids(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    scorer: Scorer,
    config: MatcherConfig,
}

impl Matcher {
    /// Creates a matcher with a default scorer (no advisor).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scorer.
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Sets the execution config.
    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// The scorer in use.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// The execution config.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Matches steps against the store's current catalog.
    pub fn match_steps<S: CompanyStore>(
        &self,
        store: &S,
        steps: &[ProcessStep],
    ) -> Result<Vec<Match>, MatchError> {
        self.match_steps_with(store, steps, &CancelToken::new())
    }

    /// Like [`match_steps`](Self::match_steps), abandoning the run when
    /// `cancel` fires.
    pub fn match_steps_with<S: CompanyStore>(
        &self,
        store: &S,
        steps: &[ProcessStep],
        cancel: &CancelToken,
    ) -> Result<Vec<Match>, MatchError> {
        let companies = store.list_companies()?;
        self.rank_with(&companies, steps, cancel)
    }

    /// Like [`match_steps`](Self::match_steps), reusing a cached result when
    /// neither the catalog snapshot nor the steps changed.
    pub fn match_steps_cached<S: CompanyStore>(
        &self,
        store: &S,
        steps: &[ProcessStep],
        cache: &mut MatchCache,
    ) -> Result<Vec<Match>, MatchError> {
        let key = fingerprint(&store.snapshot_id()?, steps);
        if let Some(hit) = cache.get(&key) {
            debug!(%key, "match cache hit");
            return Ok(hit.to_vec());
        }
        let matches = self.match_steps(store, steps)?;
        cache.insert(key, matches.clone());
        Ok(matches)
    }

    /// Ranks a catalog snapshot. Infallible without cancellation.
    pub fn rank(&self, companies: &[Company], steps: &[ProcessStep]) -> Vec<Match> {
        // A fresh token never fires, so the run cannot fail.
        self.rank_with(companies, steps, &CancelToken::new())
            .unwrap_or_default()
    }

    /// Ranks a catalog snapshot, abandoning the run when `cancel` fires.
    pub fn rank_with(
        &self,
        companies: &[Company],
        steps: &[ProcessStep],
        cancel: &CancelToken,
    ) -> Result<Vec<Match>, MatchError> {
        let (steps, step_errors) = retain_valid_steps(steps);
        for e in &step_errors {
            warn!(kind = ?e.kind, "skipping step: {}", e.message);
        }
        let (companies, company_errors) = retain_valid_companies(companies);
        for e in &company_errors {
            warn!(kind = ?e.kind, "skipping company: {}", e.message);
        }

        if steps.is_empty() || companies.is_empty() {
            debug!(
                steps = steps.len(),
                companies = companies.len(),
                "nothing to match"
            );
            return Ok(Vec::new());
        }

        let mut matches = self.score_all(&companies, &steps, cancel)?;
        if cancel.is_cancelled() {
            return Err(MatchError::Cancelled);
        }

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));

        let required = distinct_machines(&steps);
        let full_cover = matches.iter().any(|m| m.covers_all(&required));
        if !full_cover {
            let alliance = build_alliance(&matches, &steps);
            if !alliance.is_empty() {
                debug!(
                    members = alliance.len(),
                    complete = alliance.is_complete(),
                    "alliance proposed"
                );
                matches[0].alliance = Some(alliance);
            }
        }

        info!(
            companies = matches.len(),
            steps = steps.len(),
            top_score = matches[0].score,
            full_cover,
            "matching run complete"
        );
        Ok(matches)
    }

    fn score_all(
        &self,
        companies: &[Company],
        steps: &[ProcessStep],
        cancel: &CancelToken,
    ) -> Result<Vec<Match>, MatchError> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return companies
                .par_iter()
                .map(|c| (!cancel.is_cancelled()).then(|| self.scorer.evaluate(c, steps)))
                .collect::<Option<Vec<_>>>()
                .ok_or(MatchError::Cancelled);
        }

        let mut matches = Vec::with_capacity(companies.len());
        for company in companies {
            if cancel.is_cancelled() {
                return Err(MatchError::Cancelled);
            }
            matches.push(self.scorer.evaluate(company, steps));
        }
        Ok(matches)
    }
}
