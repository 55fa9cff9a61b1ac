//! Category-scoped views of a step list.
//!
//! Groups steps by [`CategoryKey`], summarizes which categories a plan
//! touches, and re-ranks companies for one selected category.
//!
//! # Category ranking
//!
//! 1. Scope the steps to the selected category (all steps if none match).
//! 2. Run the [`Matcher`] on the scoped steps.
//! 3. Stable re-sort by `(keyword hits, score)` descending, where hits count
//!    the selected category's keywords in the company profile once per
//!    company.
//!
//! The alliance, if any, stays on the match the matcher attached it to.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::matcher::Matcher;
use crate::models::{Company, Match, ProcessStep};
use crate::taxonomy::{classify_step, keyword_hits, CategoryKey, FALLBACK_CATEGORIES};

/// One entry of a category summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTab {
    pub key: CategoryKey,
    pub label: &'static str,
    /// Classified steps in this category. Zero for fallback entries.
    pub count: usize,
}

impl CategoryTab {
    fn new(key: CategoryKey, count: usize) -> Self {
        Self {
            key,
            label: key.label(),
            count,
        }
    }
}

/// Groups classifiable steps by category, keeping their original index.
///
/// Unclassifiable steps are left out. Within a group steps keep input order.
pub fn steps_by_category(
    steps: &[ProcessStep],
) -> BTreeMap<CategoryKey, Vec<(usize, ProcessStep)>> {
    let mut groups: BTreeMap<CategoryKey, Vec<(usize, ProcessStep)>> = BTreeMap::new();
    for (idx, step) in steps.iter().enumerate() {
        if let Some(key) = classify_step(step) {
            groups.entry(key).or_default().push((idx, step.clone()));
        }
    }
    groups
}

/// Categories present in a step list, in taxonomy order.
///
/// When no step classifies, returns [`FALLBACK_CATEGORIES`] with a count of 0.
pub fn categories_for_steps(steps: &[ProcessStep]) -> Vec<CategoryTab> {
    let mut counts = [0usize; CategoryKey::ALL.len()];
    for key in steps.iter().filter_map(classify_step) {
        counts[key.index()] += 1;
    }

    let tabs: Vec<CategoryTab> = CategoryKey::ALL
        .into_iter()
        .filter(|k| counts[k.index()] > 0)
        .map(|k| CategoryTab::new(k, counts[k.index()]))
        .collect();

    if tabs.is_empty() {
        FALLBACK_CATEGORIES
            .iter()
            .map(|&k| CategoryTab::new(k, 0))
            .collect()
    } else {
        tabs
    }
}

/// Ranks companies for one category.
pub fn rank_for_category(
    matcher: &Matcher,
    selected: CategoryKey,
    steps: &[ProcessStep],
    companies: &[Company],
) -> Vec<Match> {
    let scoped: Vec<ProcessStep> = steps
        .iter()
        .filter(|s| classify_step(s) == Some(selected))
        .cloned()
        .collect();
    let scoped = if scoped.is_empty() {
        steps.to_vec()
    } else {
        scoped
    };
    debug!(
        category = %selected,
        scoped = scoped.len(),
        total = steps.len(),
        "ranking for category"
    );

    let mut ranked: Vec<(usize, Match)> = matcher
        .rank(companies, &scoped)
        .into_iter()
        .map(|m| (keyword_hits(selected, &m.company.profile_text()), m))
        .collect();
    ranked.sort_by(|(ha, a), (hb, b)| hb.cmp(ha).then_with(|| b.score.total_cmp(&a.score)));
    ranked.into_iter().map(|(_, m)| m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_steps() -> Vec<ProcessStep> {
        vec![
            ProcessStep::new("荒加工", "VMC"),
            ProcessStep::new("穴あけ", "ボール盤"),
            ProcessStep::new("仕上げ", "VMC"),
            ProcessStep::new("溶接", "welding robot"),
            ProcessStep::new("検査", "三次元測定機"),
        ]
    }

    #[test]
    fn test_steps_by_category() {
        let groups = steps_by_category(&mixed_steps());
        assert_eq!(groups.len(), 3);

        let milling: Vec<usize> = groups[&CategoryKey::Milling].iter().map(|(i, _)| *i).collect();
        assert_eq!(milling, vec![0, 2]);
        assert_eq!(groups[&CategoryKey::Drilling][0].0, 1);
        assert_eq!(groups[&CategoryKey::Inspection][0].1.name, "検査");
        // The welding step is unclassifiable
        assert!(groups.values().flatten().all(|(i, _)| *i != 3));
    }

    #[test]
    fn test_step_name_used_when_machine_unknown() {
        let steps = vec![ProcessStep::new("Inspection", "Gauge block")];
        let groups = steps_by_category(&steps);
        assert!(groups.contains_key(&CategoryKey::Inspection));
    }

    #[test]
    fn test_categories_in_taxonomy_order() {
        let steps = vec![
            ProcessStep::new("検査", "CMM"),
            ProcessStep::new("荒加工", "VMC"),
            ProcessStep::new("仕上げ", "VMC"),
            ProcessStep::new("穴あけ", "ボール盤"),
        ];
        let tabs = categories_for_steps(&steps);
        let keys: Vec<CategoryKey> = tabs.iter().map(|t| t.key).collect();
        // Declaration order, not count order
        assert_eq!(
            keys,
            vec![CategoryKey::Drilling, CategoryKey::Milling, CategoryKey::Inspection]
        );
        assert_eq!(tabs[1].count, 2);
        assert_eq!(tabs[1].label, "Milling / フライス");
    }

    #[test]
    fn test_categories_fallback() {
        let steps = vec![ProcessStep::new("溶接", "welding robot")];
        let tabs = categories_for_steps(&steps);
        let keys: Vec<CategoryKey> = tabs.iter().map(|t| t.key).collect();
        assert_eq!(keys, FALLBACK_CATEGORIES.to_vec());
        assert!(tabs.iter().all(|t| t.count == 0));

        assert_eq!(categories_for_steps(&[]).len(), 4);
    }

    #[test]
    fn test_rank_for_category_prefers_keyword_hits() {
        let companies = vec![
            // Covers the drilling step, one drilling keyword in the profile
            Company::new(1, "Mill Co").with_machines("VMC,ボール盤"),
            // Covers nothing, strong drilling profile
            Company::new(2, "Drill Co")
                .with_machines("卓上ボール盤")
                .with_skills("穴あけ,タップ")
                .with_notes("下穴 座ぐり"),
        ];
        let steps = vec![
            ProcessStep::new("荒加工", "VMC"),
            ProcessStep::new("穴あけ", "ボール盤"),
        ];
        let ranked = rank_for_category(&Matcher::new(), CategoryKey::Drilling, &steps, &companies);
        let ids: Vec<u64> = ranked.iter().map(|m| m.company.id).collect();
        assert_eq!(ids, vec![2, 1]);
        // Only the drilling step was scored
        assert_eq!(ranked[1].covered_steps, vec!["穴あけ"]);
    }

    #[test]
    fn test_rank_for_category_ties_fall_back_to_score() {
        let companies = vec![
            Company::new(1, "A").with_machines("HMC"),
            Company::new(2, "B").with_machines("VMC"),
        ];
        let steps = vec![ProcessStep::new("Mill", "VMC")];
        // Both profiles hit one milling keyword; B covers the step
        let ranked = rank_for_category(&Matcher::new(), CategoryKey::Milling, &steps, &companies);
        assert_eq!(ranked[0].company.id, 2);
    }

    #[test]
    fn test_rank_for_empty_category_uses_all_steps() {
        let companies = vec![Company::new(1, "A").with_machines("VMC,CMM")];
        let steps = vec![
            ProcessStep::new("Rough", "VMC"),
            ProcessStep::new("Inspect", "CMM"),
        ];
        let ranked = rank_for_category(&Matcher::new(), CategoryKey::Cutting, &steps, &companies);
        assert_eq!(ranked[0].covered_steps, vec!["Rough", "Inspect"]);
        assert!((ranked[0].score - 0.64).abs() < 1e-10);
    }

    #[test]
    fn test_rank_for_category_empty_catalog() {
        let ranked = rank_for_category(&Matcher::new(), CategoryKey::Milling, &mixed_steps(), &[]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_tab_serializes_lowercase_key() {
        let tab = CategoryTab::new(CategoryKey::Finishing, 2);
        let json = serde_json::to_value(tab).unwrap();
        assert_eq!(json["key"], "finishing");
        assert_eq!(json["count"], 2);
    }
}
