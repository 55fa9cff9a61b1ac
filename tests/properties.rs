//! Property tests for scoring, ranking, and the alliance builder.

use proptest::prelude::*;
use u_sourcing::matcher::{build_alliance, Matcher};
use u_sourcing::models::{distinct_machines, Company, ProcessStep};
use u_sourcing::scoring::Scorer;
use u_sourcing::taxonomy::{normalize_category_key, CategoryKey, ALIASES};

const MACHINES: &[&str] = &[
    "VMC",
    "HMC",
    "NC Lathe",
    "CMM",
    "ボール盤",
    "タッピングセンタ",
    "三次元測定機",
    "平面研削盤",
    "welding robot",
];

const STEP_NAMES: &[&str] = &["荒加工", "穴あけ", "仕上げ", "検査", "Rough", "Finish"];

const SKILLS: &[&str] = &["SUS", "ステンレス", "ねじ穴", "アルミ", "thread", "stainless"];

// -- Strategy helpers --

fn arb_step() -> impl Strategy<Value = ProcessStep> {
    (
        prop::sample::select(STEP_NAMES),
        prop::sample::select(MACHINES),
        1u32..120,
    )
        .prop_map(|(name, machine, minutes)| ProcessStep::new(name, machine).with_minutes(minutes))
}

fn arb_steps() -> impl Strategy<Value = Vec<ProcessStep>> {
    prop::collection::vec(arb_step(), 0..12)
}

fn arb_profile() -> impl Strategy<Value = (Vec<&'static str>, Vec<&'static str>)> {
    (
        prop::sample::subsequence(MACHINES, 0..=4),
        prop::sample::subsequence(SKILLS, 0..=3),
    )
}

fn arb_companies() -> impl Strategy<Value = Vec<Company>> {
    prop::collection::vec(arb_profile(), 0..8).prop_map(|profiles| {
        profiles
            .into_iter()
            .enumerate()
            .map(|(i, (machines, skills))| {
                Company::new(i as u64 + 1, format!("Company {}", i + 1))
                    .with_machines(&machines.join(","))
                    .with_skills(&skills.join(","))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn score_is_bounded_and_rounded(
        (machines, skills) in arb_profile(),
        steps in arb_steps(),
    ) {
        let company = Company::new(1, "C")
            .with_machines(&machines.join(","))
            .with_skills(&skills.join(","));
        let (score, _) = Scorer::new().score(&company, &steps);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert!(((score * 100.0).round() - score * 100.0).abs() < 1e-6);
    }

    #[test]
    fn covered_steps_use_company_machines(
        (machines, _) in arb_profile(),
        steps in arb_steps(),
    ) {
        let company = Company::new(1, "C").with_machines(&machines.join(","));
        let (_, covered) = Scorer::new().score(&company, &steps);
        let expected: Vec<&str> = steps
            .iter()
            .filter(|s| machines.iter().any(|m| *m == s.machine))
            .map(|s| s.name.as_str())
            .collect();
        prop_assert_eq!(covered, expected);
    }

    #[test]
    fn ranking_is_deterministic(companies in arb_companies(), steps in arb_steps()) {
        let matcher = Matcher::new();
        prop_assert_eq!(matcher.rank(&companies, &steps), matcher.rank(&companies, &steps));
    }

    #[test]
    fn ranking_is_sorted_and_stable(companies in arb_companies(), steps in arb_steps()) {
        let matches = Matcher::new().rank(&companies, &steps);
        if steps.is_empty() {
            prop_assert!(matches.is_empty());
        } else {
            prop_assert_eq!(matches.len(), companies.len());
        }
        for pair in matches.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            // Catalog order (ascending IDs here) breaks ties
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].company.id < pair[1].company.id);
            }
        }
    }

    #[test]
    fn alliance_only_on_top_match(companies in arb_companies(), steps in arb_steps()) {
        let matches = Matcher::new().rank(&companies, &steps);
        prop_assert!(matches.iter().skip(1).all(|m| m.alliance.is_none()));
        if let Some(alliance) = matches.first().and_then(|m| m.alliance.as_ref()) {
            prop_assert!(!alliance.is_empty());
        }
    }

    #[test]
    fn alliance_terminates_and_partitions_machines(
        companies in arb_companies(),
        steps in arb_steps(),
    ) {
        let ranked = Matcher::new().rank(&companies, &steps);
        let alliance = build_alliance(&ranked, &steps);
        prop_assert!(alliance.len() <= ranked.len());

        // Members are distinct and appear in ranking order
        let positions: Vec<usize> = alliance
            .companies()
            .filter_map(|c| ranked.iter().position(|m| m.company.id == c.id))
            .collect();
        prop_assert_eq!(positions.len(), alliance.len());
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        // Whatever is left uncovered, no ranked company operates
        for machine in &alliance.uncovered_machines {
            prop_assert!(ranked.iter().all(|m| !m.company.has_machine(machine)));
        }

        let credited: usize = alliance.members.iter().map(|m| m.covered_steps.len()).sum();
        let needed = distinct_machines(&steps);
        let coverable = steps
            .iter()
            .filter(|s| !alliance.uncovered_machines.contains(&s.machine))
            .count();
        prop_assert_eq!(credited, coverable);
        prop_assert!(alliance.uncovered_machines.len() <= needed.len());
    }

    #[test]
    fn normalize_is_idempotent(idx in 0..ALIASES.len(), upper in any::<bool>()) {
        let (alias, key) = ALIASES[idx];
        let raw = if upper { alias.to_uppercase() } else { format!("  {alias} ") };
        let first = normalize_category_key(&raw);
        prop_assert_eq!(first, Some(key));
        let second = first.and_then(|k| normalize_category_key(k.as_str()));
        prop_assert_eq!(second, first);
    }

    #[test]
    fn normalize_never_panics(raw in ".{0,24}") {
        if let Some(key) = normalize_category_key(&raw) {
            prop_assert!(CategoryKey::ALL.contains(&key));
        }
    }
}
