//! Explicit rule registration and the bundled rule-set engine.
//!
//! Rules are registered per entity type as an ordered list of descriptors
//! and resolved once into an immutable [`RuleSet`]; nothing is discovered
//! reflectively at evaluation time. Each descriptor names its target
//! property, an optional list of properties it depends on, and a check
//! closure evaluated against the entity through [`PropertyAccess`].

use super::errors::ValidationError;
use super::types::{BrokenRule, Severity};
use crate::object::{EntityMetadata, PropertyAccess, PropertyValue};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A rule check: returns the failure message when the rule is broken for
/// the given subject, `None` otherwise.
pub type RuleCheck = Rc<dyn Fn(&dyn PropertyAccess) -> Option<String>>;

/// One registered rule: target property, severity, declared dependencies,
/// and the check itself.
pub struct RuleDescriptor {
    rule_name: String,
    property: String,
    severity: Severity,
    depends_on: Vec<String>,
    check: RuleCheck,
}

impl RuleDescriptor {
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    fn evaluate(&self, subject: &dyn PropertyAccess) -> Option<BrokenRule> {
        (self.check)(subject).map(|message| {
            BrokenRule::new(&self.rule_name, &self.property, message, self.severity)
        })
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("rule_name", &self.rule_name)
            .field("property", &self.property)
            .field("severity", &self.severity)
            .field("depends_on", &self.depends_on)
            .finish()
    }
}

/// Builder for a [`RuleSet`], bound to the entity type's metadata so that
/// rules against undeclared properties are rejected at build time.
pub struct RuleSetBuilder {
    metadata: &'static EntityMetadata,
    rules: Vec<RuleDescriptor>,
}

impl RuleSetBuilder {
    /// Registers a rule on `property`.
    pub fn rule(
        mut self,
        rule_name: &str,
        property: &str,
        severity: Severity,
        check: impl Fn(&dyn PropertyAccess) -> Option<String> + 'static,
    ) -> Self {
        self.rules.push(RuleDescriptor {
            rule_name: rule_name.to_string(),
            property: property.to_string(),
            severity,
            depends_on: Vec::new(),
            check: Rc::new(check),
        });
        self
    }

    /// Registers a rule on `property` whose outcome also depends on the
    /// values of `depends_on`: when any of those properties changes, the
    /// rules of `property` are recomputed as well.
    pub fn dependent_rule(
        mut self,
        rule_name: &str,
        property: &str,
        severity: Severity,
        depends_on: &[&str],
        check: impl Fn(&dyn PropertyAccess) -> Option<String> + 'static,
    ) -> Self {
        self.rules.push(RuleDescriptor {
            rule_name: rule_name.to_string(),
            property: property.to_string(),
            severity,
            depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
            check: Rc::new(check),
        });
        self
    }

    /// Validates every descriptor against the entity metadata and builds
    /// the immutable rule set, precomputing the reverse dependency index.
    pub fn build(self) -> Result<RuleSet, ValidationError> {
        for rule in &self.rules {
            if !self.metadata.has_property(rule.property()) {
                return Err(ValidationError::UndeclaredRuleProperty {
                    rule_name: rule.rule_name().to_string(),
                    property: rule.property().to_string(),
                    type_name: self.metadata.type_name().to_string(),
                });
            }
            for dependency in rule.depends_on() {
                if !self.metadata.has_property(dependency) {
                    return Err(ValidationError::UndeclaredRuleDependency {
                        rule_name: rule.rule_name().to_string(),
                        dependency: dependency.to_string(),
                        type_name: self.metadata.type_name().to_string(),
                    });
                }
            }
        }

        // Reverse index: changed property -> properties whose rules must
        // be recomputed.
        let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
        for rule in &self.rules {
            for dependency in rule.depends_on() {
                let entry = dependents.entry(dependency.clone()).or_default();
                if !entry.iter().any(|p| p == rule.property()) {
                    entry.push(rule.property().to_string());
                }
            }
        }

        Ok(RuleSet {
            metadata: self.metadata,
            rules: self.rules,
            dependents,
        })
    }
}

/// The bundled validation engine: an ordered, immutable list of rule
/// descriptors for one entity type, built once and shared behind `Rc`.
pub struct RuleSet {
    metadata: &'static EntityMetadata,
    rules: Vec<RuleDescriptor>,
    dependents: HashMap<String, Vec<String>>,
}

impl RuleSet {
    pub fn builder(metadata: &'static EntityMetadata) -> RuleSetBuilder {
        RuleSetBuilder {
            metadata,
            rules: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &'static EntityMetadata {
        self.metadata
    }

    pub fn rules(&self) -> &[RuleDescriptor] {
        &self.rules
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("type_name", &self.metadata.type_name())
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl super::engine::ValidationEngine for RuleSet {
    fn all_broken_rules(&self, subject: &dyn PropertyAccess) -> Vec<BrokenRule> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(subject))
            .collect()
    }

    fn broken_rules(
        &self,
        subject: &dyn PropertyAccess,
        property: &str,
        include_dependents: bool,
    ) -> Vec<BrokenRule> {
        let mut affected: Vec<&str> = vec![property];
        if include_dependents {
            if let Some(dependents) = self.dependents.get(property) {
                affected.extend(dependents.iter().map(String::as_str));
            }
        }
        self.rules
            .iter()
            .filter(|rule| affected.contains(&rule.property()))
            .filter_map(|rule| rule.evaluate(subject))
            .collect()
    }

    fn dependent_properties(&self, property: &str) -> Vec<String> {
        self.dependents.get(property).cloned().unwrap_or_default()
    }

    fn knows_property(&self, property: &str) -> bool {
        self.metadata.has_property(property)
    }
}

/// Check constructor: a text property must be present and not blank.
pub fn required_text(property: &'static str) -> impl Fn(&dyn PropertyAccess) -> Option<String> {
    move |subject| match subject.property_value(property) {
        Some(PropertyValue::Text(value)) if !value.trim().is_empty() => None,
        _ => Some(format!("{} is required.", property)),
    }
}

/// Check constructor: an integer property must be strictly positive.
pub fn required_positive(property: &'static str) -> impl Fn(&dyn PropertyAccess) -> Option<String> {
    move |subject| match subject.property_value(property) {
        Some(PropertyValue::Integer(value)) if value > 0 => None,
        _ => Some(format!("{} must be greater than zero.", property)),
    }
}

/// Check constructor: warn when an integer property exceeds `limit`.
pub fn integer_at_most(
    property: &'static str,
    limit: i64,
) -> impl Fn(&dyn PropertyAccess) -> Option<String> {
    move |subject| match subject.property_value(property) {
        Some(PropertyValue::Integer(value)) if value > limit => {
            Some(format!("{} exceeds {}.", property, limit))
        }
        _ => None,
    }
}
