//! Matching domain models.
//!
//! Provides the data types a matching run consumes and produces. Inputs are
//! read-only snapshots handed over by collaborators (the process planner and
//! the company store); outputs are transient and rebuilt on every run.
//!
//! # Domain Mappings
//!
//! | u-sourcing | Job shop | Role |
//! |------------|----------|------|
//! | ProcessStep | Operation | required input |
//! | Company | Supplier / partner | candidate |
//! | Match | Quote shortlist entry | derived output |
//! | Alliance | Multi-supplier plan | derived output |

mod company;
mod matching;
mod step;

pub use company::{Company, CompanyId, TokenSet};
pub use matching::{Alliance, AllianceMember, Match};
pub use step::{describe_steps, distinct_machines, ProcessStep, DEFAULT_STEP_MINUTES};
