//! Custom rule definitions loaded from JSON.
//!
//! A rules file is a JSON array:
//!
//! ```json
//! [
//!   { "name": "sku", "pattern": "[A-Z]{3}-[0-9]{4}", "message": "is not a valid SKU" },
//!   { "name": "slug", "pattern": "[a-z0-9-]+", "case": "insensitive" }
//! ]
//! ```
//!
//! `message` and `case` are optional. Patterns always match the whole value.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fmtrules_registry::{CaseMode, Pattern, Rule, SharedRegistry};
use serde::Deserialize;
use tracing::info;

/// One entry of a rules file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub case: CaseMode,
}

impl RuleDefinition {
    /// Compile the definition into a rule.
    pub fn compile(&self) -> Result<Rule> {
        let pattern = Pattern::new(&self.pattern, self.case)
            .with_context(|| format!("invalid pattern for rule `{}`", self.name))?;
        Ok(Rule::new(&self.name, pattern, self.message.as_deref()))
    }
}

/// Parse rule definitions from JSON text.
pub fn parse_rule_definitions(text: &str) -> Result<Vec<RuleDefinition>> {
    serde_json::from_str(text).context("parse rule definitions")
}

/// Read and parse a rules file.
pub fn load_rule_definitions(path: &Path) -> Result<Vec<RuleDefinition>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read rules file {}", path.display()))?;
    parse_rule_definitions(&text).with_context(|| format!("load rules file {}", path.display()))
}

/// Register every rule in `path` into `registry`.
///
/// All definitions are compiled before any is registered, so a bad entry
/// leaves the registry untouched.
pub fn register_rules_file(registry: &SharedRegistry, path: &Path) -> Result<usize> {
    let rules = load_rule_definitions(path)?
        .iter()
        .map(RuleDefinition::compile)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("compile rules file {}", path.display()))?;
    let count = rules.len();
    for rule in rules {
        registry.insert(rule);
    }
    info!(path = %path.display(), count, "loaded custom rules");
    Ok(count)
}
