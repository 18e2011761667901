use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No validation engine registered for entity type '{type_name}'.")]
    EngineNotRegistered { type_name: String },

    #[error("Rule '{rule_name}' targets property '{property}' which is not declared on entity type '{type_name}'.")]
    UndeclaredRuleProperty {
        rule_name: String,
        property: String,
        type_name: String,
    },

    #[error("Rule '{rule_name}' on entity type '{type_name}' depends on property '{dependency}' which is not declared.")]
    UndeclaredRuleDependency {
        rule_name: String,
        dependency: String,
        type_name: String,
    },
}
