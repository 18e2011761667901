//! Tenant account entity: a composite parent owning a quota policy child.

use super::quota_policy::QuotaPolicy;
use crate::notify::ChangeNotifier;
use crate::object::{
    ChildRef, CompositeValidatable, EntityMetadata, PropertyAccess, PropertyDescriptor,
    PropertyKind, PropertyValue, Validatable,
};
use crate::validation::rules::{required_positive, required_text};
use crate::validation::{
    BrokenRuleSet, EngineProvider, EngineRegistry, RuleSet, Severity, ValidationError,
    ValidationState,
};
use std::rc::Rc;

pub const PROP_ACCOUNT_NAME: &str = "account_name";
pub const PROP_MAX_USERS: &str = "max_users";
pub const PROP_MAX_TENANTS: &str = "max_tenants";
pub const CHILD_QUOTA: &str = "quota";

static METADATA: EntityMetadata = EntityMetadata::new(
    "TenantAccount",
    &[
        PropertyDescriptor::new(PROP_ACCOUNT_NAME, PropertyKind::Text),
        PropertyDescriptor::new(PROP_MAX_USERS, PropertyKind::Integer),
        PropertyDescriptor::new(PROP_MAX_TENANTS, PropertyKind::Integer),
    ],
);

/// A composite entity: three required fields of its own plus an owned
/// [`QuotaPolicy`] child whose validity folds into the account's.
///
/// The child is constructed through the same engine provider as the
/// owner, so the whole graph shares one engine-resolution strategy.
/// `check_rules` cascades into the child; `error_count` on the account's
/// own broken-rule set never includes child entries.
pub struct TenantAccount {
    notifier: ChangeNotifier,
    validation: ValidationState,
    account_name: String,
    max_users: i64,
    max_tenants: i64,
    quota: QuotaPolicy,
}

impl TenantAccount {
    pub fn rule_set() -> Result<RuleSet, ValidationError> {
        RuleSet::builder(&METADATA)
            .rule(
                "AccountNameRequired",
                PROP_ACCOUNT_NAME,
                Severity::Error,
                required_text(PROP_ACCOUNT_NAME),
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
            .build()
    }

    pub fn register_rules(registry: &EngineRegistry) -> Result<(), ValidationError> {
        registry.register::<TenantAccount>(Rc::new(Self::rule_set()?));
        Ok(())
    }

    /// Creates an account and its owned quota child from the same
    /// provider. Fails when either type has no registered engine.
    pub fn new(provider: &dyn EngineProvider) -> Result<Self, ValidationError> {
        Ok(Self {
            notifier: ChangeNotifier::default(),
            validation: ValidationState::resolve::<TenantAccount>(provider)?,
            account_name: String::new(),
            max_users: 0,
            max_tenants: 0,
            quota: QuotaPolicy::new(provider)?,
        })
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn max_users(&self) -> i64 {
        self.max_users
    }

    pub fn max_tenants(&self) -> i64 {
        self.max_tenants
    }

    pub fn quota(&self) -> &QuotaPolicy {
        &self.quota
    }

    pub fn quota_mut(&mut self) -> &mut QuotaPolicy {
        &mut self.quota
    }

    /// Replaces the owned quota child, returning the previous one.
    ///
    /// The replacement is necessarily engine-bound already, since a
    /// [`QuotaPolicy`] can only be constructed by resolving its engine.
    /// The swap is announced as a change of the `quota` property.
    pub fn replace_quota(&mut self, quota: QuotaPolicy) -> QuotaPolicy {
        let previous = std::mem::replace(&mut self.quota, quota);
        self.notifier.notify_properties_changed(&[CHILD_QUOTA]);
        previous
    }

    pub fn set_account_name(&mut self, value: impl Into<String>) {
        let changed =
            self.notifier
                .set_property(PROP_ACCOUNT_NAME, &mut self.account_name, value.into());
        if changed {
            self.validation
                .revalidate_property(&*self, PROP_ACCOUNT_NAME);
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
            self.validation
                .revalidate_property(&*self, PROP_MAX_TENANTS);
        }
    }
}

impl PropertyAccess for TenantAccount {
    fn metadata(&self) -> &'static EntityMetadata {
        &METADATA
    }

    fn property_value(&self, name: &str) -> Option<PropertyValue> {
        match name {
            PROP_ACCOUNT_NAME => Some(PropertyValue::Text(self.account_name.clone())),
            PROP_MAX_USERS => Some(PropertyValue::Integer(self.max_users)),
            PROP_MAX_TENANTS => Some(PropertyValue::Integer(self.max_tenants)),
            _ => None,
        }
    }
}

impl Validatable for TenantAccount {
    fn check_rules(&self) {
        self.validation.check_all(self);
        self.check_child_rules();
    }

    fn is_self_valid(&self) -> bool {
        self.validation.is_self_valid()
    }

    fn broken_rules(&self) -> BrokenRuleSet {
        self.validation.broken_rules()
    }

    fn is_valid(&self) -> bool {
        self.graph_is_valid()
    }
}

impl CompositeValidatable for TenantAccount {
    fn child_entities(&self) -> Vec<ChildRef<'_>> {
        vec![ChildRef::new(CHILD_QUOTA, &self.quota)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::register_rule_sets;

    fn registry() -> EngineRegistry {
        let registry = EngineRegistry::new();
        register_rule_sets(&registry).unwrap();
        registry
    }

    #[test]
    fn construction_requires_engines_for_parent_and_child() {
        let partial = EngineRegistry::new();
        TenantAccount::register_rules(&partial).unwrap();
        // The child type is missing, so the graph cannot be built.
        assert!(matches!(
            TenantAccount::new(&partial),
            Err(ValidationError::EngineNotRegistered { .. })
        ));
    }

    #[test]
    fn parent_child_validity_walkthrough() {
        let registry = registry();
        let mut account = TenantAccount::new(&registry).unwrap();

        account.check_rules();
        // The account's own broken set holds its three required fields;
        // child entries are never mixed in.
        assert_eq!(account.broken_rules().error_count(), 3);
        assert!(!account.is_self_valid());
        assert!(!account.is_valid());

        account.set_account_name("acme");
        account.set_max_users(10);
        account.set_max_tenants(4);
        assert!(account.is_self_valid());
        // The cascaded check recorded the child's violations, so the
        // aggregate stays false while the child is unfixed.
        assert!(!account.is_valid());

        account.quota_mut().set_storage_limit_mb(512);
        account.quota_mut().set_bandwidth_limit_mb(128);
        assert!(account.is_valid());

        // Re-breaking one child field flips the aggregate back without
        // any re-check call on the parent.
        account.quota_mut().set_storage_limit_mb(0);
        assert!(!account.is_valid());
        assert!(account.is_self_valid());
    }

    #[test]
    fn child_mutation_needs_no_event_to_reach_the_parent() {
        let registry = registry();
        let mut account = TenantAccount::new(&registry).unwrap();
        account.check_rules();
        account.set_account_name("acme");
        account.set_max_users(1);
        account.set_max_tenants(1);

        assert!(!account.is_valid());
        account.quota_mut().set_storage_limit_mb(10);
        account.quota_mut().set_bandwidth_limit_mb(10);
        // No notification or propagation happened between child and
        // parent; the next query simply sees the child's current truth.
        assert!(account.is_valid());
    }

    #[test]
    fn child_entities_enumerates_the_declared_child() {
        let registry = registry();
        let account = TenantAccount::new(&registry).unwrap();

        let children = account.child_entities();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name(), CHILD_QUOTA);
    }

    #[test]
    fn replace_quota_swaps_the_child_and_notifies() {
        use std::cell::RefCell;

        let registry = registry();
        let mut account = TenantAccount::new(&registry).unwrap();
        account.check_rules();
        assert!(!account.quota().is_valid());

        let events: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let _sub = account
            .notifier()
            .on_changed(move |name| sink.borrow_mut().push(name.to_string()));

        let mut replacement = QuotaPolicy::new(&registry).unwrap();
        replacement.set_storage_limit_mb(64);
        replacement.set_bandwidth_limit_mb(64);
        replacement.check_rules();

        let previous = account.replace_quota(replacement);
        assert!(!previous.is_valid());
        assert!(account.quota().is_valid());
        assert_eq!(*events.borrow(), vec![CHILD_QUOTA.to_string()]);
    }
}
