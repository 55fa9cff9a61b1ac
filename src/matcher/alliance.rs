//! Greedy alliance builder.
//!
//! # Algorithm
//!
//! 1. Seed the needed set with every distinct required machine.
//! 2. Walk the ranked matches, best score first.
//! 3. A company operating at least one needed machine joins; the steps of
//!    those machines are credited to it and the machines leave the needed set.
//!    Other companies are skipped.
//! 4. Stop when nothing is needed or the ranking is exhausted.
//!
//! This is score-first, not cover-efficiency-first: a strong generalist ranked
//! above a set of specialists joins first even if the specialists alone would
//! need fewer members. It is not a minimum set cover.
//!
//! # Complexity
//! O(n × m) where n = ranked matches, m = distinct required machines.

use std::collections::HashSet;

use crate::models::{distinct_machines, Alliance, AllianceMember, Match, ProcessStep};

/// Builds an alliance from matches sorted by descending score.
///
/// Never visits more than `ranked.len()` companies. Machines no company
/// operates end up in [`Alliance::uncovered_machines`].
pub fn build_alliance(ranked: &[Match], steps: &[ProcessStep]) -> Alliance {
    let mut needed: Vec<&str> = distinct_machines(steps);
    let mut members = Vec::new();

    for candidate in ranked {
        if needed.is_empty() {
            break;
        }

        let newly: HashSet<&str> = needed
            .iter()
            .copied()
            .filter(|m| candidate.company.has_machine(m))
            .collect();
        if newly.is_empty() {
            continue;
        }

        let covered_steps = steps
            .iter()
            .filter(|s| newly.contains(s.machine.as_str()))
            .map(|s| s.name.clone())
            .collect();
        needed.retain(|m| !newly.contains(m));
        members.push(AllianceMember {
            company: candidate.company.clone(),
            covered_steps,
        });
    }

    Alliance {
        members,
        uncovered_machines: needed.into_iter().map(String::from).collect(),
    }
}
