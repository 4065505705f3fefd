//! Rule registry and rule selection.
//!
//! [`RuleRegistry`] is a plain value that callers construct and inject where
//! needed. [`SharedRegistry`] wraps one behind a read/write lock for
//! process-wide use, and [`global`] returns the lazily-built default instance
//! seeded with the built-in rules.
//!
//! # Example
//!
//! ```
//! use fmtrules_registry::{RuleRegistry, SelectOptions};
//!
//! let registry = RuleRegistry::with_builtins();
//! let rule = registry
//!     .select("contact", &SelectOptions::using("email"))
//!     .expect("email is built in");
//! assert!(rule.is_match("someone@example.com"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;
use tracing::debug;

use crate::builtins::register_builtins;
use crate::diagnostics::{Deprecation, DeprecationNotice, DiagnosticSink, TracingSink};
use crate::error::{RegistryError, Result};
use crate::name::canonical_name;
use crate::pattern::Pattern;
use crate::rule::Rule;

/// Options recognised by [`RuleRegistry::select`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectOptions {
    /// Rule name to use instead of the attribute name.
    pub using: Option<String>,
}

impl SelectOptions {
    pub fn using(name: impl Into<String>) -> Self {
        Self {
            using: Some(name.into()),
        }
    }
}

/// Mapping from rule name to [`Rule`].
///
/// Names are canonicalised with [`canonical_name`] on every call, so string
/// and symbol spellings address the same entry.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, Rule>,
    deprecations: HashMap<String, Deprecation>,
    sink: Arc<dyn DiagnosticSink>,
}

impl RuleRegistry {
    /// Create an empty registry reporting diagnostics through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create an empty registry reporting diagnostics to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            rules: HashMap::new(),
            deprecations: HashMap::new(),
            sink,
        }
    }

    /// Create a registry seeded with the built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Replace the diagnostic sink.
    pub fn set_sink(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    /// Register a rule, replacing any rule already stored under `name`.
    ///
    /// The pattern always matches whole candidates; see [`Pattern::new`].
    pub fn add(&mut self, name: impl AsRef<str>, pattern: Pattern, message: Option<&str>) {
        self.insert(Rule::new(name, pattern, message));
    }

    /// Store a pre-built rule, replacing any rule with the same name.
    pub fn insert(&mut self, rule: Rule) {
        let name = rule.name().to_string();
        if self.rules.insert(name.clone(), rule).is_some() {
            debug!(rule = %name, "replaced validation rule");
        } else {
            debug!(rule = %name, "registered validation rule");
        }
    }

    /// Mark `alias` as deprecated in favour of `replacement`.
    pub fn deprecate(
        &mut self,
        alias: impl AsRef<str>,
        replacement: impl AsRef<str>,
        removal_version: Option<&str>,
    ) {
        self.deprecations.insert(
            canonical_name(alias.as_ref()).to_string(),
            Deprecation {
                replacement: canonical_name(replacement.as_ref()).to_string(),
                removal_version: removal_version.map(str::to_string),
            },
        );
    }

    /// Deprecation details for `name`, if it is a deprecated alias.
    pub fn deprecation(&self, name: &str) -> Option<&Deprecation> {
        self.deprecations.get(canonical_name(name))
    }

    /// Returns true if a rule is registered under `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.rules.contains_key(canonical_name(name))
    }

    /// Get the rule registered under `name`.
    ///
    /// Looking up a deprecated alias reports a notice to the sink on every
    /// call; the returned rule is unaffected.
    pub fn lookup(&self, name: &str) -> Option<&Rule> {
        let name = canonical_name(name);
        if let Some(deprecation) = self.deprecations.get(name) {
            self.sink
                .deprecated(&DeprecationNotice::new(name, deprecation));
        }
        self.rules.get(name)
    }

    /// Resolve the rule for `attribute`, honouring `options.using`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingValidation`] if no rule is registered
    /// under the resolved name.
    pub fn select(&self, attribute: &str, options: &SelectOptions) -> Result<&Rule> {
        let name = canonical_name(options.using.as_deref().unwrap_or(attribute));
        if !self.exists(name) {
            return Err(RegistryError::missing_validation(name));
        }
        self.lookup(name)
            .ok_or_else(|| RegistryError::missing_validation(name))
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered rules, sorted by name. Does not report deprecations.
    pub fn rules(&self) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self.rules.values().collect();
        rules.sort_by(|a, b| a.name().cmp(b.name()));
        rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .field("deprecations", &self.deprecations)
            .finish_non_exhaustive()
    }
}

/// A [`RuleRegistry`] shared across threads.
///
/// Writes take the write lock; reads share the read lock and return owned
/// copies of the resolved rule. A poisoned lock is recovered rather than
/// propagated, since no operation leaves the map half-updated.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    inner: RwLock<RuleRegistry>,
}

impl SharedRegistry {
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            inner: RwLock::new(registry),
        }
    }

    /// Create a shared registry seeded with the built-in rules.
    pub fn with_builtins() -> Self {
        Self::new(RuleRegistry::with_builtins())
    }

    fn read(&self) -> RwLockReadGuard<'_, RuleRegistry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RuleRegistry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`RuleRegistry::add`].
    pub fn add(&self, name: impl AsRef<str>, pattern: Pattern, message: Option<&str>) {
        self.write().add(name, pattern, message);
    }

    /// See [`RuleRegistry::insert`].
    pub fn insert(&self, rule: Rule) {
        self.write().insert(rule);
    }

    /// See [`RuleRegistry::deprecate`].
    pub fn deprecate(
        &self,
        alias: impl AsRef<str>,
        replacement: impl AsRef<str>,
        removal_version: Option<&str>,
    ) {
        self.write().deprecate(alias, replacement, removal_version);
    }

    /// See [`RuleRegistry::set_sink`].
    pub fn set_sink(&self, sink: Arc<dyn DiagnosticSink>) {
        self.write().set_sink(sink);
    }

    pub fn exists(&self, name: &str) -> bool {
        self.read().exists(name)
    }

    /// See [`RuleRegistry::deprecation`].
    pub fn deprecation(&self, name: &str) -> Option<Deprecation> {
        self.read().deprecation(name).cloned()
    }

    /// See [`RuleRegistry::lookup`].
    pub fn lookup(&self, name: &str) -> Option<Rule> {
        self.read().lookup(name).cloned()
    }

    /// See [`RuleRegistry::select`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingValidation`] if no rule is registered
    /// under the resolved name.
    pub fn select(&self, attribute: &str, options: &SelectOptions) -> Result<Rule> {
        self.read().select(attribute, options).cloned()
    }

    /// Copy of the current registry state.
    pub fn snapshot(&self) -> RuleRegistry {
        self.read().clone()
    }
}

impl From<RuleRegistry> for SharedRegistry {
    fn from(registry: RuleRegistry) -> Self {
        Self::new(registry)
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedRegistry> = OnceLock::new();

/// Process-wide registry seeded with the built-in rules.
///
/// Built on first access; every built-in rule is in place before any caller
/// can read from it.
pub fn global() -> &'static SharedRegistry {
    GLOBAL_REGISTRY.get_or_init(SharedRegistry::with_builtins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::pattern::CaseMode;

    fn pattern(source: &str) -> Pattern {
        Pattern::sensitive(source).unwrap()
    }

    fn recording_registry() -> (RuleRegistry, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let mut registry = RuleRegistry::with_builtins();
        registry.set_sink(sink.clone());
        (registry, sink)
    }

    #[test]
    fn add_overwrites_existing_rule() {
        let mut registry = RuleRegistry::new();
        registry.add("code", pattern("[0-9]+"), Some("first"));
        registry.add("code", pattern("[a-z]+"), Some("second"));

        let rule = registry.lookup("code").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(rule.message(), "second");
        assert!(rule.is_match("abc"));
        assert!(!rule.is_match("123"));
    }

    #[test]
    fn add_without_message_uses_default() {
        let mut registry = RuleRegistry::new();
        registry.add("code", pattern("[0-9]+"), None);
        assert_eq!(
            registry.lookup("code").unwrap().message(),
            "is not correctly formatted"
        );
    }

    #[test]
    fn added_pattern_matches_whole_candidate_only() {
        let mut registry = RuleRegistry::new();
        registry.add("zip5", pattern("[0-9]{5}"), None);

        let rule = registry.select("zip5", &SelectOptions::default()).unwrap();
        assert!(rule.is_match("12345"));
        assert!(!rule.is_match("abc12345xyz"));
        assert!(!rule.is_match("123456"));
    }

    #[test]
    fn added_pattern_keeps_declared_case() {
        let mut registry = RuleRegistry::new();
        registry.add("word", Pattern::insensitive("[a-z]+").unwrap(), None);
        let rule = registry.lookup("word").unwrap();
        assert_eq!(rule.case(), CaseMode::Insensitive);
        assert!(rule.is_match("Word"));
    }

    #[test]
    fn whitespace_in_names_is_significant() {
        let mut registry = RuleRegistry::new();
        registry.add(" code", pattern("[0-9]+"), None);
        assert!(registry.exists(" code"));
        assert!(!registry.exists("code"));
        assert!(registry.lookup("code").is_none());
        assert!(registry.select("code", &SelectOptions::default()).is_err());
    }

    #[test]
    fn symbol_and_string_names_are_equivalent() {
        let registry = RuleRegistry::with_builtins();
        assert!(registry.exists(":email"));
        assert_eq!(registry.lookup(":email"), registry.lookup("email"));
    }

    #[test]
    fn lookup_of_unknown_name_is_absent() {
        let registry = RuleRegistry::with_builtins();
        assert!(!registry.exists("postcode"));
        assert!(registry.lookup("postcode").is_none());
    }

    #[test]
    fn names_are_case_sensitive() {
        let registry = RuleRegistry::with_builtins();
        assert!(!registry.exists("EMAIL"));
    }

    #[test]
    fn select_prefers_using_over_attribute() {
        let registry = RuleRegistry::with_builtins();
        let via_using = registry
            .select("foo", &SelectOptions::using("email"))
            .unwrap();
        let direct = registry.select("email", &SelectOptions::default()).unwrap();
        assert_eq!(via_using, direct);
    }

    #[test]
    fn select_missing_rule_names_the_key() {
        let registry = RuleRegistry::with_builtins();
        let error = registry
            .select("foo", &SelectOptions::default())
            .unwrap_err();
        assert_eq!(error, RegistryError::missing_validation("foo"));
        assert!(error.to_string().contains("`foo`"));
        assert!(error.to_string().contains("not a built-in validation"));

        let error = registry
            .select("email", &SelectOptions::using("bar"))
            .unwrap_err();
        assert_eq!(error.name(), "bar");
    }

    #[test]
    fn deprecated_lookup_notifies_once_per_call() {
        let (registry, sink) = recording_registry();

        let legacy = registry.lookup("ip_address").cloned().unwrap();
        assert_eq!(sink.len(), 1);
        registry.lookup("ip_address");
        assert_eq!(sink.len(), 2);

        let notice = &sink.notices()[0];
        assert_eq!(notice.name, "ip_address");
        assert_eq!(notice.replacement, "ip_address_v4");

        let current = registry.lookup("ip_address_v4").unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(legacy.source(), current.source());
        assert_eq!(legacy.message(), current.message());
    }

    #[test]
    fn select_routes_through_lookup_notice() {
        let (registry, sink) = recording_registry();
        registry
            .select("server", &SelectOptions::using("ip_address"))
            .unwrap();
        assert_eq!(sink.len(), 1);

        registry.select("email", &SelectOptions::default()).unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn failed_select_does_not_notify() {
        let sink = Arc::new(RecordingSink::new());
        let mut registry = RuleRegistry::with_sink(sink.clone());
        registry.deprecate("old", "new", None);
        assert!(registry.select("old", &SelectOptions::default()).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn shared_registry_add_is_visible_to_readers() {
        let shared = SharedRegistry::with_builtins();
        assert!(!shared.exists("sku"));
        shared.add("sku", pattern("[A-Z]{3}-[0-9]{4}"), Some("is not a valid SKU"));
        let rule = shared
            .select("item", &SelectOptions::using("sku"))
            .unwrap();
        assert!(rule.is_match("ABC-1234"));
        assert_eq!(rule.message(), "is not a valid SKU");
    }

    #[test]
    fn shared_registry_serves_concurrent_readers() {
        let shared = Arc::new(SharedRegistry::with_builtins());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        shared.add(format!("custom_{i}"), pattern("x+"), None);
                    }
                    shared.select("email", &SelectOptions::default()).is_ok()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert!(shared.exists("custom_0"));
        assert!(shared.exists("custom_6"));
    }

    #[test]
    fn global_registry_has_builtins() {
        assert!(global().exists("email"));
        assert!(std::ptr::eq(global(), global()));
    }

    #[test]
    fn select_options_deserialize() {
        let options: SelectOptions = serde_json::from_str(r#"{"using":"email"}"#).unwrap();
        assert_eq!(options, SelectOptions::using("email"));
        let options: SelectOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SelectOptions::default());
    }
}
