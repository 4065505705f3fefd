//! Named registry of text-format validation rules.
//!
//! A [`Rule`] pairs a whole-string pattern with the message shown when a
//! candidate fails it. A [`RuleRegistry`] maps rule names to rules and
//! resolves the rule for an attribute, optionally overridden by
//! [`SelectOptions::using`].
//!
//! The four operations consumed by host integrations are
//! [`RuleRegistry::add`], [`RuleRegistry::exists`], [`RuleRegistry::lookup`]
//! and [`RuleRegistry::select`]; [`SharedRegistry`] offers the same surface
//! behind a lock, and [`global`] is the process-wide default.

pub mod builtins;
pub mod diagnostics;
pub mod error;
pub mod name;
pub mod pattern;
pub mod registry;
pub mod rule;

pub use builtins::{BUILTINS, builtin_names, register_builtins};
pub use diagnostics::{
    Deprecation, DeprecationNotice, DiagnosticSink, NullSink, RecordingSink, TracingSink,
    WriterSink,
};
pub use error::{RegistryError, Result};
pub use name::canonical_name;
pub use pattern::{CaseMode, Pattern};
pub use registry::{RuleRegistry, SelectOptions, SharedRegistry, global};
pub use rule::{DEFAULT_MESSAGE, Rule};
