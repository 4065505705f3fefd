//! Whole-string patterns.
//!
//! Every rule pattern is applied to the entire candidate string. A
//! [`Pattern`] can only be built through [`Pattern::new`], which wraps the
//! caller's expression in `\A(?:...)\z` so alternations inside it cannot
//! escape the anchors.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Case sensitivity of a rule pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseMode {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sensitive => "sensitive",
            Self::Insensitive => "insensitive",
        }
    }

    fn flag(self) -> &'static str {
        match self {
            Self::Sensitive => "",
            Self::Insensitive => "(?i)",
        }
    }
}

/// A compiled expression that only matches whole candidate strings.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    case: CaseMode,
}

impl Pattern {
    /// Compile `source` anchored at both ends of the candidate.
    ///
    /// A leading `(?i)` in `source` covers the whole expression and is folded
    /// into [`CaseMode::Insensitive`].
    ///
    /// # Errors
    ///
    /// Returns the regex compile error when `source` is not a valid expression.
    pub fn new(source: &str, case: CaseMode) -> Result<Self, regex::Error> {
        let (source, case) = match source.strip_prefix("(?i)") {
            Some(rest) => (rest, CaseMode::Insensitive),
            None => (source, case),
        };
        let regex = Regex::new(&format!(r"{}\A(?:{source})\z", case.flag()))?;
        Ok(Self { regex, case })
    }

    /// Case-sensitive pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error when `source` is not a valid expression.
    pub fn sensitive(source: &str) -> Result<Self, regex::Error> {
        Self::new(source, CaseMode::Sensitive)
    }

    /// Case-insensitive pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error when `source` is not a valid expression.
    pub fn insensitive(source: &str) -> Result<Self, regex::Error> {
        Self::new(source, CaseMode::Insensitive)
    }

    /// Case mode the pattern was declared with.
    pub fn case(&self) -> CaseMode {
        self.case
    }

    /// Source text of the anchored expression.
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns true if the whole of `candidate` matches.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.case == other.case && self.source() == other.source()
    }
}

impl Eq for Pattern {}
