//! Rule-validation state for business objects.
//!
//! Broken business rules are recorded as [`BrokenRule`] entries with a
//! [`Severity`]; only Error-severity entries count against validity.
//! Rules are evaluated by a per-entity-type [`ValidationEngine`] resolved
//! through an [`EngineProvider`], and each entity instance keeps its
//! aggregated results in a [`ValidationState`].
//!
//! Recomputation is lazy and targeted: a property mutation recomputes the
//! rules of that property and of every property declaring a dependency on
//! it, nothing more; [`ValidationState::check_all`] is the only wholesale
//! path.

pub mod engine;
pub mod errors;
pub mod rules;
pub mod state;
pub mod types;

#[cfg(test)]
mod rules_tests;

pub use engine::{resolve_for, EngineProvider, EngineRegistry, ValidationEngine};
pub use errors::ValidationError;
pub use rules::{RuleDescriptor, RuleSet, RuleSetBuilder};
pub use state::ValidationState;
pub use types::{BrokenRule, BrokenRuleSet, Severity};
