//! Typed entity identifier.

use crate::error::CoreError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A normalized identifier for entities of type `T`.
///
/// The raw key is trimmed and lowercased at construction, so two keys that
/// differ only in case or surrounding whitespace produce equal identities.
/// The hash of the normalized key is computed once and cached, making the
/// value cheap to use as a map or set key.
///
/// The type parameter only tags the identity with the entity type it refers
/// to; it never constrains `T` and carries no data.
///
/// # Examples
///
/// ```
/// # use trellis_core::types::EntityId;
/// struct Tenant;
///
/// let a: EntityId<Tenant> = EntityId::new("  Acme-01 ").unwrap();
/// let b: EntityId<Tenant> = EntityId::new("acme-01").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.key(), "acme-01");
///
/// // Empty and all-whitespace keys are rejected.
/// assert!(EntityId::<Tenant>::new("   ").is_err());
/// // ...but `parse` maps them to "no identity" instead of failing.
/// assert!(EntityId::<Tenant>::parse("   ").is_none());
/// ```
pub struct EntityId<T> {
    key: String,
    hash: u64,
    _entity: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    /// Creates a new `EntityId` from a raw key.
    ///
    /// The key is trimmed and lowercased. Construction fails with
    /// [`CoreError::InvalidInput`] when the raw key is empty or consists
    /// only of whitespace.
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::InvalidInput(
                "Entity identity key must not be empty or whitespace.".to_string(),
            ));
        }

        let mut hasher = DefaultHasher::new();
        normalized.hash(&mut hasher);
        let hash = hasher.finish();

        Ok(Self {
            key: normalized,
            hash,
            _entity: PhantomData,
        })
    }

    /// Converts a raw string into an identity, mapping empty and
    /// all-whitespace input to `None` ("no identity") instead of an error.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::new(raw).ok()
    }

    /// Returns the normalized key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            hash: self.hash,
            _entity: PhantomData,
        }
    }
}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityId").field(&self.key).finish()
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl<T> AsRef<str> for EntityId<T> {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl<T> From<EntityId<T>> for String {
    fn from(id: EntityId<T>) -> Self {
        id.key
    }
}

impl<T> TryFrom<&str> for EntityId<T> {
    type Error = CoreError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        EntityId::new(&raw).map_err(|e| D::Error::custom(format!("{}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;
    use std::collections::HashMap;

    struct Tenant;

    assert_impl_all!(EntityId<Tenant>: fmt::Debug, Clone, PartialEq, Eq, Hash, Send, Sync, fmt::Display, AsRef<str>);

    fn hash_of<T>(id: &EntityId<T>) -> u64 {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn entity_id_normalizes_case_and_whitespace() {
        let a = EntityId::<Tenant>::new("  Acme-HQ  ").unwrap();
        let b = EntityId::<Tenant>::new("acme-hq").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key(), "acme-hq");
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn entity_id_rejects_empty_and_whitespace_keys() {
        for raw in ["", "   ", "\t\n"] {
            match EntityId::<Tenant>::new(raw) {
                Err(CoreError::InvalidInput(msg)) => {
                    assert!(msg.contains("must not be empty"));
                }
                other => panic!("Expected InvalidInput for {:?}, got {:?}", raw, other.map(|i| i.key).err()),
            }
        }
    }

    #[test]
    fn entity_id_parse_yields_no_identity_for_blank_input() {
        assert!(EntityId::<Tenant>::parse("").is_none());
        assert!(EntityId::<Tenant>::parse("   ").is_none());
        assert!(EntityId::<Tenant>::parse("acme").is_some());
    }

    #[test]
    fn absent_identities_compare_equal_through_option() {
        let none_a: Option<EntityId<Tenant>> = EntityId::parse(" ");
        let none_b: Option<EntityId<Tenant>> = EntityId::parse("");
        let some: Option<EntityId<Tenant>> = EntityId::parse("acme");

        assert_eq!(none_a, none_b);
        assert_ne!(none_a, some);
    }

    #[test]
    fn entity_id_usable_as_map_key() {
        let mut map: HashMap<EntityId<Tenant>, u32> = HashMap::new();
        map.insert(EntityId::new("Acme ").unwrap(), 1);
        assert_eq!(map.get(&EntityId::new("acme").unwrap()), Some(&1));
    }

    #[test]
    fn entity_id_display_and_conversions() {
        let id = EntityId::<Tenant>::new("Acme").unwrap();
        assert_eq!(format!("{}", id), "acme");
        assert_eq!(id.as_ref(), "acme");

        let s: String = id.clone().into();
        assert_eq!(s, "acme");

        let from_str = EntityId::<Tenant>::try_from("ACME").unwrap();
        assert_eq!(from_str, id);
    }

    #[test]
    fn entity_id_serde_round_trip() {
        let id = EntityId::<Tenant>::new(" Acme ").unwrap();
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, "\"acme\"");

        let deserialized: EntityId<Tenant> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, id);

        let blank: Result<EntityId<Tenant>, _> = serde_json::from_str("\"   \"");
        assert!(blank.is_err());
    }
}
