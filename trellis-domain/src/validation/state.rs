//! Per-instance validation state.

use super::engine::{resolve_for, EngineProvider, ValidationEngine};
use super::errors::ValidationError;
use super::types::BrokenRuleSet;
use crate::object::PropertyAccess;
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

/// Binds one entity instance to its type's validation engine and keeps the
/// aggregated broken-rule state consistent with the live property values.
///
/// The broken-rule set lives behind a `RefCell` so revalidation can read
/// the subject through a shared reference while updating the set; the
/// substrate is single-threaded by design, so no borrow is ever held
/// across a caller boundary.
pub struct ValidationState {
    engine: Rc<dyn ValidationEngine>,
    broken: RefCell<BrokenRuleSet>,
}

impl ValidationState {
    /// Creates a state bound to an already-resolved engine.
    pub fn new(engine: Rc<dyn ValidationEngine>) -> Self {
        Self {
            engine,
            broken: RefCell::new(BrokenRuleSet::new()),
        }
    }

    /// Resolves the engine for entity type `T` from the provider. Entities
    /// call this once at construction; a missing registration is a
    /// construction error.
    pub fn resolve<T: 'static>(provider: &dyn EngineProvider) -> Result<Self, ValidationError> {
        Ok(Self::new(resolve_for::<T>(provider)?))
    }

    /// Recomputes broken rules for exactly `property` and every property
    /// the engine declares as dependent on it, replacing only that slice
    /// of the broken-rule set.
    ///
    /// An unknown property name is a programming error on an internal call
    /// surface: it fails fast in debug builds and degrades to a logged
    /// no-op in release builds.
    pub fn revalidate_property(&self, subject: &dyn PropertyAccess, property: &str) {
        debug_assert!(
            self.engine.knows_property(property),
            "property '{}' is not declared on '{}'",
            property,
            subject.metadata().type_name()
        );
        if !self.engine.knows_property(property) {
            warn!(
                "revalidation requested for undeclared property '{}' on '{}'",
                property,
                subject.metadata().type_name()
            );
            return;
        }

        let mut affected = vec![property.to_string()];
        affected.extend(self.engine.dependent_properties(property));
        let fresh = self.engine.broken_rules(subject, property, true);
        self.broken.borrow_mut().replace_for_properties(&affected, fresh);
    }

    /// Recomputes broken rules for every declared property, replacing the
    /// set wholesale.
    pub fn check_all(&self, subject: &dyn PropertyAccess) {
        let fresh = self.engine.all_broken_rules(subject);
        self.broken.borrow_mut().replace_all(fresh);
    }

    /// True iff the current broken-rule set has zero Error-severity
    /// entries.
    pub fn is_self_valid(&self) -> bool {
        self.broken.borrow().error_count() == 0
    }

    /// A snapshot of the current broken-rule set.
    pub fn broken_rules(&self) -> BrokenRuleSet {
        self.broken.borrow().clone()
    }

    /// The engine this instance is bound to.
    pub fn engine(&self) -> &Rc<dyn ValidationEngine> {
        &self.engine
    }
}

impl std::fmt::Debug for ValidationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let broken = self.broken.borrow();
        f.debug_struct("ValidationState")
            .field("errors", &broken.error_count())
            .field("warnings", &broken.warning_count())
            .finish()
    }
}
