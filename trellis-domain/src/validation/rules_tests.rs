use super::engine::ValidationEngine;
use super::errors::ValidationError;
use super::rules::{integer_at_most, required_positive, required_text, RuleSet};
use super::types::Severity;
use crate::object::{EntityMetadata, PropertyAccess, PropertyDescriptor, PropertyKind, PropertyValue};

static PROBE_METADATA: EntityMetadata = EntityMetadata::new(
    "Probe",
    &[
        PropertyDescriptor::new("name", PropertyKind::Text),
        PropertyDescriptor::new("count", PropertyKind::Integer),
        PropertyDescriptor::new("limit", PropertyKind::Integer),
    ],
);

struct Probe {
    name: String,
    count: i64,
    limit: i64,
}

impl Probe {
    fn new() -> Self {
        Self {
            name: String::new(),
            count: 0,
            limit: 0,
        }
    }
}

impl PropertyAccess for Probe {
    fn metadata(&self) -> &'static EntityMetadata {
        &PROBE_METADATA
    }

    fn property_value(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "count" => Some(PropertyValue::Integer(self.count)),
            "limit" => Some(PropertyValue::Integer(self.limit)),
            _ => None,
        }
    }
}

fn probe_rules() -> RuleSet {
    RuleSet::builder(&PROBE_METADATA)
        .rule("NameRequired", "name", Severity::Error, required_text("name"))
        .rule("CountRequired", "count", Severity::Error, required_positive("count"))
        .dependent_rule(
            "CountWithinLimit",
            "count",
            Severity::Error,
            &["limit"],
            |subject| {
                let count = subject.property_value("count")?.as_integer()?;
                let limit = subject.property_value("limit")?.as_integer()?;
                if limit > 0 && count > limit {
                    Some("count exceeds limit.".to_string())
                } else {
                    None
                }
            },
        )
        .rule("CountUnusuallyHigh", "count", Severity::Warning, integer_at_most("count", 100))
        .build()
        .unwrap()
}

#[test]
fn builder_rejects_rule_on_undeclared_property() {
    let result = RuleSet::builder(&PROBE_METADATA)
        .rule("Ghost", "ghost", Severity::Error, |_| None)
        .build();
    match result {
        Err(ValidationError::UndeclaredRuleProperty {
            rule_name,
            property,
            type_name,
        }) => {
            assert_eq!(rule_name, "Ghost");
            assert_eq!(property, "ghost");
            assert_eq!(type_name, "Probe");
        }
        other => panic!("Expected UndeclaredRuleProperty, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn builder_rejects_undeclared_dependency() {
    let result = RuleSet::builder(&PROBE_METADATA)
        .dependent_rule("Dep", "count", Severity::Error, &["ghost"], |_| None)
        .build();
    assert!(matches!(
        result,
        Err(ValidationError::UndeclaredRuleDependency { dependency, .. }) if dependency == "ghost"
    ));
}

#[test]
fn all_broken_rules_evaluates_every_registered_rule() {
    let rules = probe_rules();
    let probe = Probe::new();

    let broken = rules.all_broken_rules(&probe);
    let names: Vec<&str> = broken.iter().map(|rule| rule.rule_name()).collect();
    assert_eq!(names, vec!["NameRequired", "CountRequired"]);
}

#[test]
fn broken_rules_for_property_without_dependents() {
    let rules = probe_rules();
    let probe = Probe::new();

    let broken = rules.broken_rules(&probe, "name", false);
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].rule_name(), "NameRequired");
    assert_eq!(broken[0].property(), "name");
}

#[test]
fn broken_rules_with_dependents_covers_the_dependent_property() {
    let rules = probe_rules();
    let mut probe = Probe::new();
    probe.name = "probe".to_string();
    probe.count = 5;
    probe.limit = 3;

    // Asking about "limit" with dependents must evaluate count's rules too.
    let broken = rules.broken_rules(&probe, "limit", true);
    let names: Vec<&str> = broken.iter().map(|rule| rule.rule_name()).collect();
    assert_eq!(names, vec!["CountWithinLimit"]);

    // Without dependents, limit alone has no rules.
    assert!(rules.broken_rules(&probe, "limit", false).is_empty());
}

#[test]
fn dependent_properties_reports_reverse_dependencies() {
    let rules = probe_rules();
    assert_eq!(rules.dependent_properties("limit"), vec!["count".to_string()]);
    assert!(rules.dependent_properties("name").is_empty());
    assert!(rules.dependent_properties("count").is_empty());
}

#[test]
fn knows_property_follows_metadata() {
    let rules = probe_rules();
    assert!(rules.knows_property("count"));
    assert!(!rules.knows_property("ghost"));
}

#[test]
fn warning_rules_report_with_warning_severity() {
    let rules = probe_rules();
    let mut probe = Probe::new();
    probe.name = "probe".to_string();
    probe.count = 500;
    probe.limit = 1000;

    let broken = rules.all_broken_rules(&probe);
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].rule_name(), "CountUnusuallyHigh");
    assert_eq!(broken[0].severity(), Severity::Warning);
}

#[test]
fn required_text_rejects_blank_values() {
    let rules = RuleSet::builder(&PROBE_METADATA)
        .rule("NameRequired", "name", Severity::Error, required_text("name"))
        .build()
        .unwrap();

    let mut probe = Probe::new();
    probe.count = 1;
    probe.name = "   ".to_string();
    assert_eq!(rules.all_broken_rules(&probe).len(), 1);

    probe.name = "ok".to_string();
    assert!(rules.all_broken_rules(&probe).is_empty());
}
