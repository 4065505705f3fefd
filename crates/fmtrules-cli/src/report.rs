//! Data produced by the CLI commands, independent of how it is printed.

use std::fmt::Write as _;

use fmtrules_registry::{
    CaseMode, Deprecation, RegistryError, Rule, RuleRegistry, SelectOptions, SharedRegistry,
};
use serde::Serialize;

/// One row of the rule listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListing {
    pub name: String,
    pub pattern: String,
    pub case: CaseMode,
    pub message: String,
    pub deprecated_by: Option<String>,
}

/// Listing rows for every registered rule, sorted by name.
pub fn rule_listings(registry: &RuleRegistry) -> Vec<RuleListing> {
    registry
        .rules()
        .into_iter()
        .map(|rule| RuleListing {
            name: rule.name().to_string(),
            pattern: rule.source().to_string(),
            case: rule.case(),
            message: rule.message().to_string(),
            deprecated_by: registry
                .deprecation(rule.name())
                .map(|deprecation| deprecation.replacement.clone()),
        })
        .collect()
}

/// Multi-line description of a rule for `show`.
pub fn describe_rule(rule: &Rule, deprecation: Option<&Deprecation>) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "name: {}", rule.name());
    let _ = writeln!(text, "pattern: {}", rule.source());
    let _ = writeln!(text, "case: {}", rule.case().label());
    let _ = writeln!(text, "message: {}", rule.message());
    if let Some(deprecation) = deprecation {
        let _ = write!(text, "deprecated: use {}", deprecation.replacement);
        if let Some(version) = &deprecation.removal_version {
            let _ = write!(text, " (removal in {version})");
        }
        text.push('\n');
    }
    text
}

/// Result of checking one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub value: String,
    pub failure: Option<String>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Results of checking several values against one resolved rule.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub attribute: String,
    pub rule: String,
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| !outcome.passed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }
}

/// Resolve the rule for `attribute` and check each value against it.
///
/// # Errors
///
/// Returns [`RegistryError::MissingValidation`] if the rule cannot be resolved.
pub fn check_values(
    registry: &SharedRegistry,
    attribute: &str,
    values: &[String],
    options: &SelectOptions,
) -> Result<CheckReport, RegistryError> {
    let rule = registry.select(attribute, options)?;
    let outcomes = values
        .iter()
        .map(|value| CheckOutcome {
            value: value.clone(),
            failure: rule.check(value).err().map(str::to_string),
        })
        .collect();
    Ok(CheckReport {
        attribute: attribute.to_string(),
        rule: rule.name().to_string(),
        outcomes,
    })
}
