// rust/engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod heuristic;
mod random;

/**
 * Curated policy public API.
 *
 * Internal implementation modules remain private; only stable policy entrypoints are re-exported.
 */
pub use base::{Decision, Policy, Reason};
pub use heuristic::{
    decide, Cell, Check, Condition, Rule, RuleId, RulePolicy, RuleTable, Test, STANDARD_RULES,
};
pub use random::RandomPolicy;
