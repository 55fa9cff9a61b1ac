//! Match (result) model.
//!
//! A match is the scored association between one company and the step list
//! of one matching run. Matches are recomputed on every run and never
//! persisted. When no single company covers every step, the top-ranked match
//! carries an [`Alliance`]: an ordered group of companies that jointly cover
//! as many required machines as the catalog allows.

use serde::{Deserialize, Serialize};

use super::{Company, CompanyId};

/// One company's result for a matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// The scored company.
    pub company: Company,
    /// Fitness in [0.0, 1.0], rounded to two decimals.
    pub score: f64,
    /// Names of the steps whose machine this company operates, in step order.
    /// Not de-duplicated.
    pub covered_steps: Vec<String>,
    /// Alliance proposal. Attached to the top-ranked match only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance: Option<Alliance>,
}

impl Match {
    /// Creates a match without an alliance.
    pub fn new(company: Company, score: f64, covered_steps: Vec<String>) -> Self {
        Self {
            company,
            score,
            covered_steps,
            alliance: None,
        }
    }

    /// Whether the company alone operates every required machine.
    ///
    /// An empty requirement never counts as a full cover.
    pub fn covers_all(&self, required_machines: &[&str]) -> bool {
        !required_machines.is_empty()
            && required_machines
                .iter()
                .all(|m| self.company.has_machine(m))
    }
}

/// A company chosen by the alliance builder and the steps it newly covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceMember {
    /// Member company.
    pub company: Company,
    /// Step names whose machine was still needed when this member joined.
    pub covered_steps: Vec<String>,
}

/// An ordered multi-company cover proposal.
///
/// Members appear in rank order. If the catalog cannot cover every required
/// machine, the remainder is listed in `uncovered_machines`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alliance {
    /// Members in join (rank) order.
    pub members: Vec<AllianceMember>,
    /// Required machines no member operates, in step order.
    pub uncovered_machines: Vec<String>,
}

impl Alliance {
    /// Member companies in order.
    pub fn companies(&self) -> impl Iterator<Item = &Company> {
        self.members.iter().map(|m| &m.company)
    }

    /// Member company IDs in order.
    pub fn company_ids(&self) -> Vec<CompanyId> {
        self.companies().map(|c| c.id).collect()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no company was selected.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether every required machine is covered.
    pub fn is_complete(&self) -> bool {
        self.uncovered_machines.is_empty()
    }
}
