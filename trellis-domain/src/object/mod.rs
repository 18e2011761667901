//! Business-object traits and the property metadata surface.
//!
//! Entities describe their declared properties through a static
//! [`EntityMetadata`] table and expose current values through the
//! [`PropertyAccess`] trait. Rule checks and full-graph validation read
//! entities exclusively through these two surfaces, so no name-based
//! dynamic dispatch happens on the mutation hot path.
//!
//! [`Validatable`] is the queryable validity surface of a single entity;
//! [`CompositeValidatable`] extends it for entities that own child
//! entities and aggregate their validity.

pub mod composite;
pub mod metadata;
pub mod validatable;

pub use composite::{ChildRef, CompositeValidatable};
pub use metadata::{EntityMetadata, PropertyAccess, PropertyDescriptor, PropertyKind, PropertyValue};
pub use validatable::Validatable;
