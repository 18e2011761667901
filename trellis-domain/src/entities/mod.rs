//! Concrete example entities built on the substrate.
//!
//! These entities show the intended wiring: fields as ordinary typed
//! storage, every setter routed through the [`ChangeNotifier`], targeted
//! revalidation after each effective change, and rule sets registered once
//! per type in an [`EngineRegistry`].
//!
//! [`ChangeNotifier`]: crate::notify::ChangeNotifier
//! [`EngineRegistry`]: crate::validation::EngineRegistry

pub mod quota_policy;
pub mod tenant_account;
pub mod tenant_group;

pub use quota_policy::QuotaPolicy;
pub use tenant_account::TenantAccount;
pub use tenant_group::TenantGroup;

use crate::validation::{EngineRegistry, ValidationError};

/// Registers the rule sets of every entity in this module, so a single
/// registry can serve a whole object graph.
pub fn register_rule_sets(registry: &EngineRegistry) -> Result<(), ValidationError> {
    TenantGroup::register_rules(registry)?;
    QuotaPolicy::register_rules(registry)?;
    TenantAccount::register_rules(registry)?;
    Ok(())
}
