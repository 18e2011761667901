//! Tenant group entity.

use crate::notify::ChangeNotifier;
use crate::object::{
    EntityMetadata, PropertyAccess, PropertyDescriptor, PropertyKind, PropertyValue, Validatable,
};
use crate::validation::rules::{integer_at_most, required_positive, required_text};
use crate::validation::{
    BrokenRuleSet, EngineProvider, EngineRegistry, RuleSet, Severity, ValidationError,
    ValidationState,
};
use std::rc::Rc;
use trellis_core::types::BindingMode;

pub const PROP_GROUP_NAME: &str = "group_name";
pub const PROP_MAX_USERS: &str = "max_users";
pub const PROP_MAX_TENANTS: &str = "max_tenants";

static METADATA: EntityMetadata = EntityMetadata::new(
    "TenantGroup",
    &[
        PropertyDescriptor::new(PROP_GROUP_NAME, PropertyKind::Text),
        PropertyDescriptor::new(PROP_MAX_USERS, PropertyKind::Integer),
        PropertyDescriptor::new(PROP_MAX_TENANTS, PropertyKind::Integer),
    ],
);

/// A flat bindable entity: a named group with user and tenant quotas.
///
/// All three fields are required; additionally `max_users` must cover
/// `max_tenants`, and an unusually high `max_users` raises a warning.
pub struct TenantGroup {
    notifier: ChangeNotifier,
    validation: ValidationState,
    group_name: String,
    max_users: i64,
    max_tenants: i64,
}

impl TenantGroup {
    /// Builds the rule set registered for this entity type.
    pub fn rule_set() -> Result<RuleSet, ValidationError> {
        RuleSet::builder(&METADATA)
            .rule(
                "GroupNameRequired",
                PROP_GROUP_NAME,
                Severity::Error,
                required_text(PROP_GROUP_NAME),
            )
            .rule(
                "MaxUsersRequired",
                PROP_MAX_USERS,
                Severity::Error,
                required_positive(PROP_MAX_USERS),
            )
            .rule(
                "MaxTenantsRequired",
                PROP_MAX_TENANTS,
                Severity::Error,
                required_positive(PROP_MAX_TENANTS),
            )
            .dependent_rule(
                "MaxUsersCoverTenants",
                PROP_MAX_USERS,
                Severity::Error,
                &[PROP_MAX_TENANTS],
                |subject| {
                    let users = subject.property_value(PROP_MAX_USERS)?.as_integer()?;
                    let tenants = subject.property_value(PROP_MAX_TENANTS)?.as_integer()?;
                    if users > 0 && tenants > 0 && users < tenants {
                        Some("max_users must cover max_tenants.".to_string())
                    } else {
                        None
                    }
                },
            )
            .rule(
                "MaxUsersUnusuallyHigh",
                PROP_MAX_USERS,
                Severity::Warning,
                integer_at_most(PROP_MAX_USERS, 10_000),
            )
            .build()
    }

    /// Registers this entity type's rule set in `registry`.
    pub fn register_rules(registry: &EngineRegistry) -> Result<(), ValidationError> {
        registry.register::<TenantGroup>(Rc::new(Self::rule_set()?));
        Ok(())
    }

    /// Creates a group with default (and therefore not yet validated)
    /// field values, bound to the engine registered for this type.
    pub fn new(provider: &dyn EngineProvider) -> Result<Self, ValidationError> {
        Ok(Self {
            notifier: ChangeNotifier::default(),
            validation: ValidationState::resolve::<TenantGroup>(provider)?,
            group_name: String::new(),
            max_users: 0,
            max_tenants: 0,
        })
    }

    /// Like [`TenantGroup::new`] with an explicit batching policy.
    pub fn with_binding_mode(
        provider: &dyn EngineProvider,
        mode: BindingMode,
    ) -> Result<Self, ValidationError> {
        let mut group = Self::new(provider)?;
        group.notifier = ChangeNotifier::new(mode);
        Ok(group)
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn max_users(&self) -> i64 {
        self.max_users
    }

    pub fn max_tenants(&self) -> i64 {
        self.max_tenants
    }

    pub fn set_group_name(&mut self, value: impl Into<String>) {
        let changed =
            self.notifier
                .set_property(PROP_GROUP_NAME, &mut self.group_name, value.into());
        if changed {
            self.validation.revalidate_property(&*self, PROP_GROUP_NAME);
        }
    }

    pub fn set_max_users(&mut self, value: i64) {
        let changed = self
            .notifier
            .set_property(PROP_MAX_USERS, &mut self.max_users, value);
        if changed {
            self.validation.revalidate_property(&*self, PROP_MAX_USERS);
        }
    }

    pub fn set_max_tenants(&mut self, value: i64) {
        let changed = self
            .notifier
            .set_property(PROP_MAX_TENANTS, &mut self.max_tenants, value);
        if changed {
            self.validation.revalidate_property(&*self, PROP_MAX_TENANTS);
        }
    }
}

impl PropertyAccess for TenantGroup {
    fn metadata(&self) -> &'static EntityMetadata {
        &METADATA
    }

    fn property_value(&self, name: &str) -> Option<PropertyValue> {
        match name {
            PROP_GROUP_NAME => Some(PropertyValue::Text(self.group_name.clone())),
            PROP_MAX_USERS => Some(PropertyValue::Integer(self.max_users)),
            PROP_MAX_TENANTS => Some(PropertyValue::Integer(self.max_tenants)),
            _ => None,
        }
    }
}

impl Validatable for TenantGroup {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn registry() -> EngineRegistry {
        let registry = EngineRegistry::new();
        TenantGroup::register_rules(&registry).unwrap();
        registry
    }

    #[test]
    fn construction_fails_without_registered_engine() {
        let empty = EngineRegistry::new();
        assert!(matches!(
            TenantGroup::new(&empty),
            Err(ValidationError::EngineNotRegistered { .. })
        ));
    }

    #[test]
    fn fresh_group_is_valid_until_checked() {
        let registry = registry();
        let group = TenantGroup::new(&registry).unwrap();

        assert!(group.is_valid());
        assert!(group.broken_rules().is_empty());
    }

    #[test]
    fn required_field_walkthrough() {
        let registry = registry();
        let mut group = TenantGroup::new(&registry).unwrap();

        group.check_rules();
        assert_eq!(group.broken_rules().error_count(), 3);
        assert!(!group.is_valid());

        group.set_group_name("x");
        assert_eq!(group.broken_rules().error_count(), 2);

        group.set_max_tenants(2);
        assert_eq!(group.broken_rules().error_count(), 1);

        group.set_max_users(2);
        assert_eq!(group.broken_rules().error_count(), 0);
        assert!(group.is_valid());

        group.set_group_name("");
        assert!(!group.is_valid());
    }

    #[test]
    fn validity_is_visible_immediately_after_each_setter() {
        let registry = registry();
        let mut group = TenantGroup::new(&registry).unwrap();
        group.check_rules();

        group.set_group_name("ops");
        group.set_max_tenants(1);
        assert!(!group.is_valid());
        group.set_max_users(1);
        assert!(group.is_valid());
    }

    #[test]
    fn changing_a_dependency_revalidates_the_dependent_property() {
        let registry = registry();
        let mut group = TenantGroup::new(&registry).unwrap();
        group.set_group_name("ops");
        group.set_max_users(1);
        group.set_max_tenants(5);

        // max_users' cross-field rule broke when max_tenants grew past it,
        // without max_users itself being touched again.
        let broken = group.broken_rules();
        assert_eq!(broken.for_property(PROP_MAX_USERS).count(), 1);
        assert!(!group.is_valid());

        group.set_max_tenants(1);
        assert!(group.is_valid());
    }

    #[test]
    fn warning_rule_never_affects_validity() {
        let registry = registry();
        let mut group = TenantGroup::new(&registry).unwrap();
        group.set_group_name("ops");
        group.set_max_tenants(3);
        group.set_max_users(20_000);

        let broken = group.broken_rules();
        assert_eq!(broken.warning_count(), 1);
        assert_eq!(broken.error_count(), 0);
        assert!(group.is_valid());
    }

    #[test]
    fn setters_raise_changed_events_with_property_names() {
        let registry = registry();
        let mut group = TenantGroup::new(&registry).unwrap();

        let events: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let _sub = group
            .notifier()
            .on_changed(move |name| sink.borrow_mut().push(name.to_string()));

        group.set_group_name("ops");
        group.set_max_users(5);
        group.set_max_users(5); // equal value, no event

        assert_eq!(
            *events.borrow(),
            vec![PROP_GROUP_NAME.to_string(), PROP_MAX_USERS.to_string()]
        );
    }

    #[test]
    fn suspension_drops_events_but_validation_stays_current() {
        let registry = registry();
        let mut group = TenantGroup::new(&registry).unwrap();
        group.check_rules();

        let events: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let _sub = group
            .notifier()
            .on_changed(move |name| sink.borrow_mut().push(name.to_string()));

        {
            let notifier = group.notifier().clone();
            let _guard = notifier.suspend();
            group.set_group_name("ops");
            group.set_max_users(2);
            group.set_max_tenants(2);
        }

        assert!(events.borrow().is_empty());
        assert!(group.is_valid());
    }

    #[test]
    fn binding_mode_controls_batch_notification_of_the_entity() {
        let registry = registry();
        let group = TenantGroup::with_binding_mode(&registry, BindingMode::Coalesced).unwrap();

        let events: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let _sub = group
            .notifier()
            .on_changed(move |name| sink.borrow_mut().push(name.to_string()));

        group
            .notifier()
            .notify_properties_changed(&[PROP_GROUP_NAME, PROP_MAX_USERS]);
        assert_eq!(*events.borrow(), vec![PROP_GROUP_NAME.to_string()]);
    }
}
