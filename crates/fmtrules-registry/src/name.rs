//! Rule name normalization.

/// Canonical form of a rule name.
///
/// One leading `:` is dropped, so `"email"` and `":email"` address the same
/// rule. Everything else, including case and whitespace, is significant.
pub fn canonical_name(name: &str) -> &str {
    name.strip_prefix(':').unwrap_or(name)
}
