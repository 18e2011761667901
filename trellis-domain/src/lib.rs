//! Domain layer of the Trellis framework: the observable, self-validating
//! business-object substrate.
//!
//! Entities built on this crate expose their properties through a
//! change-notification contract consumable by UI binding layers and carry
//! an attached rule-validation state that aggregates across parent/child
//! object graphs:
//!
//! - [`notify`] — property mutation, pre/post-change events,
//!   binding-mode-aware batching, and scoped suppression.
//! - [`validation`] — broken-rule records, the per-type validation-engine
//!   seam, explicit rule registration, and per-instance validation state.
//! - [`object`] — the property metadata surface and the
//!   [`Validatable`]/[`CompositeValidatable`] traits.
//! - [`entities`] — concrete example entities wiring it all together.
//!
//! The substrate is single-threaded and synchronous by design: entities
//! are mutated and observed on the one logical thread that owns the bound
//! view, and validation triggered by a setter completes before the setter
//! returns.

// Re-export core layer
pub use trellis_core as core;

pub mod entities;
pub mod error;
pub mod notify;
pub mod object;
pub mod validation;

// Re-export common types and interfaces
pub use error::{DomainError, DomainResult};
pub use notify::{ChangeNotifier, Subscription, SuspendGuard};
pub use object::{
    ChildRef, CompositeValidatable, EntityMetadata, PropertyAccess, PropertyDescriptor,
    PropertyKind, PropertyValue, Validatable,
};
pub use validation::{
    BrokenRule, BrokenRuleSet, EngineProvider, EngineRegistry, RuleDescriptor, RuleSet,
    RuleSetBuilder, Severity, ValidationEngine, ValidationError, ValidationState,
};
