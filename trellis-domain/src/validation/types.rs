//! Broken-rule records and the per-entity aggregate set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a broken rule affects the owning entity's validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Counts against validity.
    Error,
    /// Informational only; never affects validity.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A record of one failed business rule against one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenRule {
    rule_name: String,
    property: String,
    message: String,
    severity: Severity,
}

impl BrokenRule {
    pub fn new(
        rule_name: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            property: property.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Display for BrokenRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.rule_name, self.property, self.message
        )
    }
}

/// The current broken-rule set of one entity.
///
/// Maintained eagerly on write: property mutations replace only the slice
/// of entries belonging to the affected properties, a full check replaces
/// the set wholesale. Queries are therefore O(n) counts over an
/// already-computed set, never a recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenRuleSet {
    rules: Vec<BrokenRule>,
}

impl BrokenRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of Error-severity entries.
    pub fn error_count(&self) -> usize {
        self.rules
            .iter()
            .filter(|rule| rule.severity() == Severity::Error)
            .count()
    }

    /// Number of Warning-severity entries.
    pub fn warning_count(&self) -> usize {
        self.rules
            .iter()
            .filter(|rule| rule.severity() == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrokenRule> {
        self.rules.iter()
    }

    /// The entries recorded against one property.
    pub fn for_property<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a BrokenRule> {
        self.rules.iter().filter(move |rule| rule.property() == property)
    }

    /// Replaces the whole set.
    pub fn replace_all(&mut self, rules: Vec<BrokenRule>) {
        self.rules = rules;
    }

    /// Replaces the entries of exactly the given properties with
    /// `replacement`, leaving every other property's entries untouched.
    pub fn replace_for_properties(&mut self, properties: &[String], replacement: Vec<BrokenRule>) {
        debug_assert!(
            replacement
                .iter()
                .all(|rule| properties.iter().any(|p| p == rule.property())),
            "replacement entries must target the affected properties"
        );
        self.rules
            .retain(|rule| !properties.iter().any(|p| p == rule.property()));
        self.rules.extend(replacement);
    }
}
