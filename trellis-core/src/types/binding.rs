//! Notification batching policy shared by the configuration layer and the
//! change-notification engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a batch of property-change notifications is delivered to consumers.
///
/// The policy is consumer-driven: some binding layers refresh every bound
/// field from a single signal, others re-read one property per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BindingMode {
    /// One event per batch: only the first property name in the batch is
    /// raised, on the assumption that the consumer refreshes all bound
    /// fields from any single signal.
    Coalesced,
    /// One event per property name, in batch order.
    #[default]
    PerProperty,
}

impl BindingMode {
    /// Returns a string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingMode::Coalesced => "coalesced",
            BindingMode::PerProperty => "per-property",
        }
    }
}

impl fmt::Display for BindingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
