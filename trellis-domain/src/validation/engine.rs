//! The validation-engine seam and per-type engine resolution.

use super::errors::ValidationError;
use super::types::BrokenRule;
use crate::object::PropertyAccess;
use log::debug;
use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Evaluates business rules for instances of one entity type and reports
/// property dependency relationships.
///
/// The substrate consumes this surface; [`super::rules::RuleSet`] is the
/// bundled explicit-registration implementation.
pub trait ValidationEngine {
    /// Evaluates every registered rule against `subject`.
    fn all_broken_rules(&self, subject: &dyn PropertyAccess) -> Vec<BrokenRule>;

    /// Evaluates the rules of `property` — and, when `include_dependents`
    /// is set, of every property declaring a dependency on it — against
    /// `subject`.
    fn broken_rules(
        &self,
        subject: &dyn PropertyAccess,
        property: &str,
        include_dependents: bool,
    ) -> Vec<BrokenRule>;

    /// The properties whose rule outcomes must be recomputed when
    /// `property` changes.
    fn dependent_properties(&self, property: &str) -> Vec<String>;

    /// Whether `property` is declared on the engine's entity type.
    fn knows_property(&self, property: &str) -> bool;
}

/// Resolves the validation engine for a concrete entity type.
pub trait EngineProvider {
    fn engine_for(&self, entity_type: TypeId) -> Option<Rc<dyn ValidationEngine>>;
}

/// Resolves the engine for `T` from a provider, failing with
/// [`ValidationError::EngineNotRegistered`] when the type is unknown.
///
/// Entities call this once at construction; a missing engine is a
/// construction error surfaced synchronously to the caller.
pub fn resolve_for<T: 'static>(
    provider: &dyn EngineProvider,
) -> Result<Rc<dyn ValidationEngine>, ValidationError> {
    provider
        .engine_for(TypeId::of::<T>())
        .ok_or_else(|| ValidationError::EngineNotRegistered {
            type_name: std::any::type_name::<T>().to_string(),
        })
}

/// The default [`EngineProvider`]: a registry keyed by `TypeId`, populated
/// once at startup and shared by every entity of the object graph so the
/// whole graph uses a consistent engine-resolution strategy.
#[derive(Default)]
pub struct EngineRegistry {
    engines: RefCell<HashMap<TypeId, Rc<dyn ValidationEngine>>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the engine for entity type `T`. Registering a type twice
    /// replaces the previous engine.
    pub fn register<T: 'static>(&self, engine: Rc<dyn ValidationEngine>) {
        let previous = self
            .engines
            .borrow_mut()
            .insert(TypeId::of::<T>(), engine);
        if previous.is_some() {
            debug!(
                "validation engine for '{}' replaced",
                std::any::type_name::<T>()
            );
        }
    }

    /// Resolves the engine for entity type `T`.
    pub fn resolve<T: 'static>(&self) -> Result<Rc<dyn ValidationEngine>, ValidationError> {
        resolve_for::<T>(self)
    }
}

impl EngineProvider for EngineRegistry {
    fn engine_for(&self, entity_type: TypeId) -> Option<Rc<dyn ValidationEngine>> {
        self.engines.borrow().get(&entity_type).cloned()
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("registered_types", &self.engines.borrow().len())
            .finish()
    }
}
