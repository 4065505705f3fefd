//! A single named validation rule.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::name::canonical_name;
use crate::pattern::{CaseMode, Pattern};

/// Message used when a rule is registered without one.
pub const DEFAULT_MESSAGE: &str = "is not correctly formatted";

/// A named pattern with the message shown when a candidate fails it.
///
/// Rules are immutable; replacing a rule means registering a new one under
/// the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    pattern: Pattern,
    message: String,
}

impl Rule {
    /// Create a rule. `message` falls back to [`DEFAULT_MESSAGE`].
    pub fn new(name: impl AsRef<str>, pattern: Pattern, message: Option<&str>) -> Self {
        Self {
            name: canonical_name(name.as_ref()).to_string(),
            pattern,
            message: message.unwrap_or(DEFAULT_MESSAGE).to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Source text of the anchored pattern.
    pub fn source(&self) -> &str {
        self.pattern.source()
    }

    pub fn case(&self) -> CaseMode {
        self.pattern.case()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if the whole of `candidate` satisfies the rule.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }

    /// Check a candidate, returning the failure message when it does not match.
    ///
    /// # Errors
    ///
    /// Returns the rule message if `candidate` does not match the pattern.
    pub fn check(&self, candidate: &str) -> Result<(), &str> {
        if self.is_match(candidate) {
            Ok(())
        } else {
            Err(&self.message)
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule {} (pattern: {}, message: {})",
            self.name,
            self.source(),
            self.message
        )
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Rule", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("pattern", self.source())?;
        state.serialize_field("case", &self.case())?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}
