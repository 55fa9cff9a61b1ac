//! Company scoring.
//!
//! Computes a bounded fitness score for one company against one step list,
//! plus the steps the company can perform directly.
//!
//! # Algorithm
//!
//! | Signal | Contribution |
//! |--------|--------------|
//! | Machine coverage | `0.6 × |required ∩ company| / max(1, |required|)` |
//! | Stainless + milling/tapping step | `+0.1` per step |
//! | Tapping step + threading know-how | `+0.1` per step |
//! | Category keywords in profile | `min(0.15, 0.02 × hits)` per step |
//! | Advisory nudge (optional) | `score × 0.9 + boost × 0.1`, clamped |
//!
//! The sum is clamped to [0, 1] and rounded to two decimals. All weights are
//! fixed.
//!
//! The two text bonuses are not capped and repeat for every qualifying step,
//! unlike the keyword boost which is capped per step.

mod advisory;
#[cfg(feature = "http")]
mod http;

pub use advisory::{build_prompt, parse_boost, Advisor, DisabledAdvisor, SYSTEM_PROMPT};
#[cfg(feature = "http")]
pub use http::HttpAdvisor;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{describe_steps, distinct_machines, Company, Match, ProcessStep};
use crate::taxonomy::{classify_machine, keyword_hits};

/// Weight of the machine coverage ratio.
pub const COVERAGE_WEIGHT: f64 = 0.6;
/// Fixed bonus per qualifying step for each text heuristic.
pub const TEXT_BONUS: f64 = 0.1;
/// Boost per category keyword hit.
pub const KEYWORD_HIT_WEIGHT: f64 = 0.02;
/// Cap of the keyword boost per step.
pub const KEYWORD_BOOST_CAP: f64 = 0.15;
/// Share of the pre-nudge score kept when an advisory boost is blended in.
pub const ADVISORY_RETAIN: f64 = 0.9;
/// Weight of the advisory boost.
pub const ADVISORY_WEIGHT: f64 = 0.1;

const STAINLESS_TOKENS: &[&str] = &["sus", "ステンレス", "stainless"];
const MILLING_OR_TAPPING_TOKENS: &[&str] = &["vmc", "タッピング", "tapping"];
const TAPPING_TOKENS: &[&str] = &["タッピング", "tapping"];
const THREADING_TOKENS: &[&str] = &["ねじ", "thread"];

/// Per-signal contributions of one score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// `COVERAGE_WEIGHT × coverage ratio`.
    pub coverage: f64,
    /// Sum of the stainless / threading bonuses.
    pub text_bonus: f64,
    /// Sum of the capped per-step keyword boosts.
    pub keyword_boost: f64,
    /// Boost returned by the advisor, when one answered.
    pub advisory_boost: Option<f64>,
    /// Final score: clamped to [0, 1] and rounded to two decimals.
    pub total: f64,
}

impl ScoreBreakdown {
    /// Sum of the heuristic signals before the advisory nudge and clamping.
    pub fn heuristic_sum(&self) -> f64 {
        self.coverage + self.text_bonus + self.keyword_boost
    }
}

/// Scores companies against a step list.
///
/// Holds the advisory capability; disabled by default, which makes scoring
/// a pure function of its inputs.
///
/// # Example
///
/// ```
/// use u_sourcing::models::{Company, ProcessStep};
/// use u_sourcing::scoring::Scorer;
///
/// let company = Company::new(1, "A").with_machines("VMC,CMM");
/// let steps = vec![ProcessStep::new("Rough", "VMC"), ProcessStep::new("Inspect", "CMM")];
///
/// let (score, covered) = Scorer::new().score(&company, &steps);
/// assert!((score - 0.64).abs() < 1e-9);
/// assert_eq!(covered, vec!["Rough", "Inspect"]);
/// ```
#[derive(Debug, Clone)]
pub struct Scorer {
    advisor: Arc<dyn Advisor>,
}

impl Scorer {
    /// Creates a scorer without an advisor.
    pub fn new() -> Self {
        Self {
            advisor: Arc::new(DisabledAdvisor),
        }
    }

    /// Sets the advisory service.
    pub fn with_advisor<A: Advisor + 'static>(mut self, advisor: A) -> Self {
        self.advisor = Arc::new(advisor);
        self
    }

    /// Sets a shared advisory service.
    pub fn with_shared_advisor(mut self, advisor: Arc<dyn Advisor>) -> Self {
        self.advisor = advisor;
        self
    }

    /// Whether an advisor will be consulted.
    pub fn has_advisor(&self) -> bool {
        self.advisor.is_configured()
    }

    /// Scores a company. Returns the final score and the covered step names.
    pub fn score(&self, company: &Company, steps: &[ProcessStep]) -> (f64, Vec<String>) {
        (self.breakdown(company, steps).total, covered_steps(company, steps))
    }

    /// Scores a company into a [`Match`] without an alliance.
    pub fn evaluate(&self, company: &Company, steps: &[ProcessStep]) -> Match {
        let (score, covered) = self.score(company, steps);
        Match::new(company.clone(), score, covered)
    }

    /// Computes every signal of the score.
    pub fn breakdown(&self, company: &Company, steps: &[ProcessStep]) -> ScoreBreakdown {
        let coverage = COVERAGE_WEIGHT * coverage_ratio(company, steps);
        let text_bonus = text_bonus(company, steps);
        let keyword_boost = keyword_boost(company, steps);

        let mut score = coverage + text_bonus + keyword_boost;
        let mut advisory_boost = None;
        if self.advisor.is_configured() {
            if let Some(boost) = self.request_boost(company, steps) {
                score = (score * ADVISORY_RETAIN + boost * ADVISORY_WEIGHT).clamp(0.0, 1.0);
                advisory_boost = Some(boost);
            }
        }

        let total = round2(score.clamp(0.0, 1.0));
        debug!(
            company_id = company.id,
            company = %company.name,
            coverage,
            text_bonus,
            keyword_boost,
            total,
            "scored company"
        );

        ScoreBreakdown {
            coverage,
            text_bonus,
            keyword_boost,
            advisory_boost,
            total,
        }
    }

    fn request_boost(&self, company: &Company, steps: &[ProcessStep]) -> Option<f64> {
        match self
            .advisor
            .request_boost(&company.describe(), &describe_steps(steps))
        {
            Ok(boost) if boost.is_finite() => Some(boost.clamp(0.0, 1.0)),
            Ok(boost) => {
                warn!(
                    advisor = self.advisor.name(),
                    company_id = company.id,
                    boost,
                    "ignoring non-finite advisory boost"
                );
                None
            }
            Err(err) => {
                warn!(
                    advisor = self.advisor.name(),
                    company_id = company.id,
                    error = %err,
                    "advisory boost unavailable; keeping heuristic score"
                );
                None
            }
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fraction of distinct required machines the company operates.
///
/// Machine names compare exactly. An empty step list yields 0.
pub fn coverage_ratio(company: &Company, steps: &[ProcessStep]) -> f64 {
    let required = distinct_machines(steps);
    let hit = required.iter().filter(|m| company.has_machine(m)).count();
    hit as f64 / required.len().max(1) as f64
}

/// Names of the steps whose exact machine the company operates, in step order.
pub fn covered_steps(company: &Company, steps: &[ProcessStep]) -> Vec<String> {
    steps
        .iter()
        .filter(|s| company.has_machine(&s.machine))
        .map(|s| s.name.clone())
        .collect()
}

/// Stainless and threading bonuses, summed over steps.
///
/// For each step:
/// - `+0.1` when the company's skills/notes mention stainless and the step's
///   machine indicates milling or tapping;
/// - a further `+0.1` when the machine indicates tapping and the skills/notes
///   mention threading.
pub fn text_bonus(company: &Company, steps: &[ProcessStep]) -> f64 {
    let haystack = format!("{} {}", company.skills.join(" "), company.notes).to_lowercase();
    let stainless = contains_any(&haystack, STAINLESS_TOKENS);
    let threading = contains_any(&haystack, THREADING_TOKENS);

    steps
        .iter()
        .map(|step| {
            let machine = step.machine.to_lowercase();
            let mut bonus = 0.0;
            if stainless && contains_any(&machine, MILLING_OR_TAPPING_TOKENS) {
                bonus += TEXT_BONUS;
            }
            if threading && contains_any(&machine, TAPPING_TOKENS) {
                bonus += TEXT_BONUS;
            }
            bonus
        })
        .sum()
}

/// Category keyword boost, summed over steps.
///
/// Each classifiable step contributes `min(0.15, 0.02 × hits)`, where hits
/// counts its category's keywords found in the company profile.
pub fn keyword_boost(company: &Company, steps: &[ProcessStep]) -> f64 {
    let profile = company.profile_text();
    steps
        .iter()
        .filter_map(|step| classify_machine(&step.machine))
        .map(|key| (KEYWORD_HIT_WEIGHT * keyword_hits(key, &profile) as f64).min(KEYWORD_BOOST_CAP))
        .sum()
}

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| text.contains(t))
}

/// Rounds to two decimals.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisoryError;

    #[derive(Debug)]
    struct FixedAdvisor(f64);

    impl Advisor for FixedAdvisor {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn request_boost(&self, _company: &str, _steps: &str) -> Result<f64, AdvisoryError> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct FailingAdvisor;

    impl Advisor for FailingAdvisor {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn request_boost(&self, _company: &str, _steps: &str) -> Result<f64, AdvisoryError> {
            Err(AdvisoryError::Timeout)
        }
    }

    fn vmc_cmm_steps() -> Vec<ProcessStep> {
        vec![
            ProcessStep::new("Rough", "VMC"),
            ProcessStep::new("Inspect", "CMM"),
        ]
    }

    fn sus_steps() -> Vec<ProcessStep> {
        vec![
            ProcessStep::new("荒加工", "VMC").with_minutes(30),
            ProcessStep::new("穴あけ", "タッピングセンタ").with_minutes(20),
            ProcessStep::new("仕上げ", "VMC").with_minutes(25),
        ]
    }

    #[test]
    fn test_full_coverage_example() {
        let company = Company::new(1, "A").with_machines("VMC,CMM");
        let b = Scorer::new().breakdown(&company, &vmc_cmm_steps());

        assert!((b.coverage - 0.6).abs() < 1e-10);
        assert!((b.text_bonus - 0.0).abs() < 1e-10);
        // "vmc" hits milling, "cmm" hits inspection: 0.02 each
        assert!((b.keyword_boost - 0.04).abs() < 1e-10);
        assert!((b.total - 0.64).abs() < 1e-10);
        assert!(b.advisory_boost.is_none());
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let company = Company::new(2, "B").with_machines("NC Lathe");
        let (score, covered) = Scorer::new().score(&company, &vmc_cmm_steps());
        assert!((score - 0.0).abs() < 1e-10);
        assert!(covered.is_empty());
    }

    #[test]
    fn test_partial_coverage_ratio() {
        let company = Company::new(1, "A").with_machines("VMC");
        let steps = vec![
            ProcessStep::new("Rough", "VMC"),
            ProcessStep::new("Finish", "VMC"),
            ProcessStep::new("Turn", "NC Lathe"),
        ];
        // Distinct required machines: VMC, NC Lathe
        assert!((coverage_ratio(&company, &steps) - 0.5).abs() < 1e-10);
        assert_eq!(covered_steps(&company, &steps), vec!["Rough", "Finish"]);
    }

    #[test]
    fn test_covered_steps_not_deduplicated() {
        let company = Company::new(1, "A").with_machines("VMC");
        let steps = vec![
            ProcessStep::new("Pass", "VMC"),
            ProcessStep::new("Pass", "VMC"),
        ];
        assert_eq!(covered_steps(&company, &steps), vec!["Pass", "Pass"]);
    }

    #[test]
    fn test_machine_match_is_exact() {
        let company = Company::new(1, "A").with_machines("vmc");
        assert!((coverage_ratio(&company, &vmc_cmm_steps()) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_steps() {
        let company = Company::new(1, "A").with_machines("VMC");
        let (score, covered) = Scorer::new().score(&company, &[]);
        assert!((score - 0.0).abs() < 1e-10);
        assert!(covered.is_empty());
    }

    #[test]
    fn test_stainless_and_threading_bonus() {
        let company = Company::new(3, "Tap")
            .with_machines("タッピングセンタ")
            .with_skills("SUS,ねじ穴")
            .with_notes("ねじ穴加工の実績豊富。");
        // VMC steps: stainless bonus each (2 × 0.1)
        // Tapping step: stainless bonus + threading bonus (2 × 0.1)
        assert!((text_bonus(&company, &sus_steps()) - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_text_bonus_is_uncapped_per_step() {
        // Known quirk: the bonus repeats for every qualifying step.
        let company = Company::new(1, "A").with_skills("ステンレス");
        let steps: Vec<ProcessStep> = (0..8)
            .map(|i| ProcessStep::new(format!("Pass {i}"), "VMC"))
            .collect();
        assert!((text_bonus(&company, &steps) - 0.8).abs() < 1e-10);
        // The total is still clamped.
        let (score, _) = Scorer::new().score(&company, &steps);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_keyword_boost_capped_per_step() {
        // Ten drilling keywords in the profile: 0.2 uncapped, 0.15 capped
        let company = Company::new(1, "Drill Shop").with_notes(
            "drilling tapping reaming boring 穴あけ 下穴 座ぐり カウンターボア タッピング ねじ立て",
        );
        let steps = vec![ProcessStep::new("Drill", "ボール盤")];
        let boost = keyword_boost(&company, &steps);
        assert!((boost - KEYWORD_BOOST_CAP).abs() < 1e-10);
    }

    #[test]
    fn test_unclassified_step_adds_no_keyword_boost() {
        let company = Company::new(1, "A").with_machines("welding robot");
        let steps = vec![ProcessStep::new("Weld", "welding robot")];
        assert!((keyword_boost(&company, &steps) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_score_clamped_and_rounded() {
        let company = Company::new(3, "Tap")
            .with_machines("VMC,タッピングセンタ")
            .with_skills("SUS,ねじ穴")
            .with_notes("ねじ穴加工の実績豊富。マシニングセンタ");
        let (score, _) = Scorer::new().score(&company, &sus_steps());
        assert!((score - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_round2() {
        assert!((round2(0.644) - 0.64).abs() < 1e-10);
        assert!((round2(0.646) - 0.65).abs() < 1e-10);
    }

    #[test]
    fn test_advisory_nudge() {
        let company = Company::new(1, "A").with_machines("VMC,CMM");
        let b = Scorer::new()
            .with_advisor(FixedAdvisor(1.0))
            .breakdown(&company, &vmc_cmm_steps());
        // 0.64 × 0.9 + 1.0 × 0.1 = 0.676 → 0.68
        assert_eq!(b.advisory_boost, Some(1.0));
        assert!((b.total - 0.68).abs() < 1e-10);
    }

    #[test]
    fn test_advisory_out_of_range_clamped() {
        let company = Company::new(1, "A").with_machines("VMC,CMM");
        let b = Scorer::new()
            .with_advisor(FixedAdvisor(5.0))
            .breakdown(&company, &vmc_cmm_steps());
        assert_eq!(b.advisory_boost, Some(1.0));
    }

    #[test]
    fn test_advisory_failure_keeps_heuristic_score() {
        let company = Company::new(1, "A").with_machines("VMC,CMM");
        let scorer = Scorer::new().with_advisor(FailingAdvisor);
        assert!(scorer.has_advisor());
        let b = scorer.breakdown(&company, &vmc_cmm_steps());
        assert!(b.advisory_boost.is_none());
        assert!((b.total - 0.64).abs() < 1e-10);
    }

    #[test]
    fn test_advisory_non_finite_ignored() {
        let company = Company::new(1, "A").with_machines("VMC,CMM");
        let b = Scorer::new()
            .with_advisor(FixedAdvisor(f64::NAN))
            .breakdown(&company, &vmc_cmm_steps());
        assert!(b.advisory_boost.is_none());
        assert!((b.total - 0.64).abs() < 1e-10);
    }

    #[test]
    fn test_evaluate_builds_match() {
        let company = Company::new(1, "A").with_machines("VMC,CMM");
        let m = Scorer::new().evaluate(&company, &vmc_cmm_steps());
        assert_eq!(m.company.id, 1);
        assert_eq!(m.covered_steps, vec!["Rough", "Inspect"]);
        assert!(m.alliance.is_none());
    }
}
