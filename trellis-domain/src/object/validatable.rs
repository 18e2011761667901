//! The queryable validity surface of a single entity.

use crate::validation::types::BrokenRuleSet;

/// An entity carrying lazily-maintained broken-rule state.
///
/// Rule violations are state, never an error channel: `check_rules` and
/// the property setters of an implementing entity never fail because a
/// business rule is broken; validity is discoverable only through the
/// queries below.
pub trait Validatable {
    /// Forces a full recomputation of broken rules for every declared
    /// property, replacing the broken-rule set wholesale. This is the only
    /// operation that discovers violations not tied to an explicit
    /// property mutation (e.g. required-but-never-set fields right after
    /// construction). Composite entities cascade this into their owned
    /// children.
    fn check_rules(&self);

    /// True iff the entity's own broken-rule set has no Error-severity
    /// entries. Warnings never affect validity. O(1).
    fn is_self_valid(&self) -> bool;

    /// A snapshot of the entity's own broken-rule set.
    fn broken_rules(&self) -> BrokenRuleSet;

    /// Overall validity. For a flat entity this equals `is_self_valid`;
    /// composite entities additionally require every owned child to be
    /// valid.
    fn is_valid(&self) -> bool {
        self.is_self_valid()
    }
}
