//! Quota policy entity, usable standalone or as an owned child.

use crate::notify::ChangeNotifier;
use crate::object::{
    EntityMetadata, PropertyAccess, PropertyDescriptor, PropertyKind, PropertyValue, Validatable,
};
use crate::validation::rules::required_positive;
use crate::validation::{
    BrokenRuleSet, EngineProvider, EngineRegistry, RuleSet, Severity, ValidationError,
    ValidationState,
};
use std::rc::Rc;

pub const PROP_STORAGE_LIMIT_MB: &str = "storage_limit_mb";
pub const PROP_BANDWIDTH_LIMIT_MB: &str = "bandwidth_limit_mb";

static METADATA: EntityMetadata = EntityMetadata::new(
    "QuotaPolicy",
    &[
        PropertyDescriptor::new(PROP_STORAGE_LIMIT_MB, PropertyKind::Integer),
        PropertyDescriptor::new(PROP_BANDWIDTH_LIMIT_MB, PropertyKind::Integer),
    ],
);

/// Resource limits attached to an account. Both limits are required.
pub struct QuotaPolicy {
    notifier: ChangeNotifier,
    validation: ValidationState,
    storage_limit_mb: i64,
    bandwidth_limit_mb: i64,
}

impl QuotaPolicy {
    pub fn rule_set() -> Result<RuleSet, ValidationError> {
        RuleSet::builder(&METADATA)
            .rule(
                "StorageLimitRequired",
                PROP_STORAGE_LIMIT_MB,
                Severity::Error,
                required_positive(PROP_STORAGE_LIMIT_MB),
            )
            .rule(
                "BandwidthLimitRequired",
                PROP_BANDWIDTH_LIMIT_MB,
                Severity::Error,
                required_positive(PROP_BANDWIDTH_LIMIT_MB),
            )
            .build()
    }

    pub fn register_rules(registry: &EngineRegistry) -> Result<(), ValidationError> {
        registry.register::<QuotaPolicy>(Rc::new(Self::rule_set()?));
        Ok(())
    }

    pub fn new(provider: &dyn EngineProvider) -> Result<Self, ValidationError> {
        Ok(Self {
            notifier: ChangeNotifier::default(),
            validation: ValidationState::resolve::<QuotaPolicy>(provider)?,
            storage_limit_mb: 0,
            bandwidth_limit_mb: 0,
        })
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn storage_limit_mb(&self) -> i64 {
        self.storage_limit_mb
    }

    pub fn bandwidth_limit_mb(&self) -> i64 {
        self.bandwidth_limit_mb
    }

    pub fn set_storage_limit_mb(&mut self, value: i64) {
        let changed =
            self.notifier
                .set_property(PROP_STORAGE_LIMIT_MB, &mut self.storage_limit_mb, value);
        if changed {
            self.validation
                .revalidate_property(&*self, PROP_STORAGE_LIMIT_MB);
        }
    }

    pub fn set_bandwidth_limit_mb(&mut self, value: i64) {
        let changed = self.notifier.set_property(
            PROP_BANDWIDTH_LIMIT_MB,
            &mut self.bandwidth_limit_mb,
            value,
        );
        if changed {
            self.validation
                .revalidate_property(&*self, PROP_BANDWIDTH_LIMIT_MB);
        }
    }
}

impl PropertyAccess for QuotaPolicy {
    fn metadata(&self) -> &'static EntityMetadata {
        &METADATA
    }

    fn property_value(&self, name: &str) -> Option<PropertyValue> {
        match name {
            PROP_STORAGE_LIMIT_MB => Some(PropertyValue::Integer(self.storage_limit_mb)),
            PROP_BANDWIDTH_LIMIT_MB => Some(PropertyValue::Integer(self.bandwidth_limit_mb)),
            _ => None,
        }
    }
}

impl Validatable for QuotaPolicy {
    fn check_rules(&self) {
        self.validation.check_all(self);
    }

    fn is_self_valid(&self) -> bool {
        self.validation.is_self_valid()
    }

    fn broken_rules(&self) -> BrokenRuleSet {
        self.validation.broken_rules()
    }
}
