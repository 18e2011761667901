//! Composition of entities that own child entities.

use super::validatable::Validatable;

/// A borrowed reference to one declared child entity.
pub struct ChildRef<'a> {
    name: &'static str,
    entity: &'a dyn Validatable,
}

impl<'a> ChildRef<'a> {
    /// Declares `entity` as the owned child registered under `name`.
    ///
    /// A child can only be constructed engine-bound (its constructor
    /// resolves a validation engine or fails), so a declared child is
    /// always validatable.
    pub fn new(name: &'static str, entity: &'a dyn Validatable) -> Self {
        Self { name, entity }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entity(&self) -> &'a dyn Validatable {
        self.entity
    }
}

impl std::fmt::Debug for ChildRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildRef")
            .field("name", &self.name)
            .field("is_valid", &self.entity.is_valid())
            .finish()
    }
}

/// An entity that owns nested entities and aggregates their validity.
///
/// Implementors enumerate their owned children; the provided methods
/// derive the aggregate behavior. Child mutation is orthogonal to parent
/// mutation: setting a property on a child updates only the child's own
/// broken-rule set, and the parent's `is_valid` reflects it the next time
/// it is queried, with no event or propagation call in between.
pub trait CompositeValidatable: Validatable {
    /// The children this entity owns, in declaration order.
    fn child_entities(&self) -> Vec<ChildRef<'_>>;

    /// Aggregate validity: the entity's own validity AND every declared
    /// child's validity, evaluated on demand by walking the children. No
    /// caching happens across the graph beyond each entity's own
    /// broken-rule set, so the aggregate is always consistent with the
    /// latest child mutation.
    fn graph_is_valid(&self) -> bool {
        self.is_self_valid() && self.child_entities().iter().all(|child| child.entity().is_valid())
    }

    /// Cascades `check_rules` into every declared child. Used by composite
    /// `check_rules` implementations after recomputing the entity's own
    /// rules.
    fn check_child_rules(&self) {
        for child in self.child_entities() {
            child.entity().check_rules();
        }
    }
}
