//! Built-in validation rules.
//!
//! Patterns use ASCII classes (`[0-9]`, `[[:space:]]`) so digits and
//! whitespace mean exactly what they do in the rule descriptions, and are
//! compiled as a [`Pattern`] so each one must match the whole candidate.

use crate::pattern::{CaseMode, Pattern};
use crate::registry::RuleRegistry;

/// A built-in rule definition.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub source: &'static str,
    pub case: CaseMode,
    pub message: &'static str,
}

/// Deprecated built-in alias, its replacement and the version that drops it.
pub const DEPRECATED_ALIASES: &[(&str, &str, &str)] = &[("ip_address", "ip_address_v4", "0.7.0")];

// Domain labels may not start or end with a dash.
const EMAIL: &str =
    r"([^@[:space:]]+)@((?:[a-z0-9](?:[-a-z0-9]*[a-z0-9])?\.)+[a-z]{2,})";

const IPV4: &str = concat!(
    r"([0-9]{1,2}|1[0-9][0-9]|2[0-4][0-9]|25[0-5])\.",
    r"([0-9]{1,2}|1[0-9][0-9]|2[0-4][0-9]|25[0-5])\.",
    r"([0-9]{1,2}|1[0-9][0-9]|2[0-4][0-9]|25[0-5])\.",
    r"([0-9]{1,2}|1[0-9][0-9]|2[0-4][0-9]|25[0-5])",
);

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "email",
        source: EMAIL,
        case: CaseMode::Insensitive,
        message: "is not a valid email",
    },
    // Same language as `email`, kept for consumers that address it by name.
    Builtin {
        name: "simple_email",
        source: EMAIL,
        case: CaseMode::Insensitive,
        message: "is not a valid email",
    },
    Builtin {
        name: "url",
        source: r"https?://([^[:space:]:@]+:[^[:space:]:@]*@)?[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+\.?(:[0-9]{1,5})?([/?][^[:space:]]*)?",
        case: CaseMode::Insensitive,
        message: "is not a valid URL",
    },
    // Letters, underscores and dashes; the empty string is accepted.
    Builtin {
        name: "alpha",
        source: r"[A-Za-z_-]*",
        case: CaseMode::Sensitive,
        message: "must be only letters or dashes",
    },
    Builtin {
        name: "alphanum",
        source: r"[A-Z0-9[:space:]]+",
        case: CaseMode::Insensitive,
        message: "must be letters, numbers",
    },
    // Visa, Mastercard and Discover in 4-digit groups, or 15-digit AmEx.
    Builtin {
        name: "credit_card",
        source: r"((4[0-9]{3})|(5[1-5][0-9]{2})|(6011))-?[0-9]{4}-?[0-9]{4}-?[0-9]{4}|3[4,7][0-9]{13}",
        case: CaseMode::Sensitive,
        message: "is not a valid credit card number",
    },
    Builtin {
        name: "us_zip",
        source: r"[0-9]{5}(-[0-9]{4})?",
        case: CaseMode::Sensitive,
        message: "is not a valid zipcode",
    },
    // ###.###.####, ###-###-####, (###) ###-####, (###)###-####, ##########, ### ###-####
    Builtin {
        name: "us_phone",
        source: r"(\(([0-9]{3})\)|[0-9]{3})[ |.\-]?([0-9]{3})[ |.\-]?([0-9]{4})",
        case: CaseMode::Sensitive,
        message: "is not a valid phone number",
    },
    Builtin {
        name: "ip_address",
        source: IPV4,
        case: CaseMode::Sensitive,
        message: "is not a valid IPv4 address",
    },
    Builtin {
        name: "ip_address_v4",
        source: IPV4,
        case: CaseMode::Sensitive,
        message: "is not a valid IPv4 address",
    },
    Builtin {
        name: "ssn",
        source: r"[0-9]{3}[-.][0-9]{2}[-.][0-9]{4}",
        case: CaseMode::Sensitive,
        message: "is not a valid social security number",
    },
    Builtin {
        name: "hex_color",
        source: r"[A-F0-9]{6}|[A-F0-9]{3}",
        case: CaseMode::Insensitive,
        message: "is not a valid hex color",
    },
    Builtin {
        name: "dollars",
        source: r"\$?([0-9]{1,3}(,[0-9]{3})*|([0-9]+))(\.[0-9]{2})?",
        case: CaseMode::Sensitive,
        message: "is not a valid dollar amount",
    },
];

/// Names of all built-in rules.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

/// Register every built-in rule and deprecated alias into `registry`.
///
/// # Panics
///
/// Panics if a built-in pattern fails to compile, which the tests rule out.
pub fn register_builtins(registry: &mut RuleRegistry) {
    for builtin in BUILTINS {
        let pattern = Pattern::new(builtin.source, builtin.case).expect("Invalid built-in rule regex");
        registry.add(builtin.name, pattern, Some(builtin.message));
    }
    for &(alias, replacement, removal_version) in DEPRECATED_ALIASES {
        registry.deprecate(alias, replacement, Some(removal_version));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_is_four_identical_octets() {
        let octet = r"([0-9]{1,2}|1[0-9][0-9]|2[0-4][0-9]|25[0-5])";
        assert_eq!(IPV4, [octet; 4].join(r"\."));
    }

    #[test]
    fn every_builtin_compiles() {
        for builtin in BUILTINS {
            let pattern = Pattern::new(builtin.source, builtin.case);
            assert!(pattern.is_ok(), "{} failed to compile", builtin.name);
            assert_eq!(pattern.unwrap().case(), builtin.case);
        }
    }

    #[test]
    fn builtin_names_are_unique() {
        let mut names: Vec<_> = builtin_names().collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTINS.len());
    }

    #[test]
    fn deprecated_aliases_point_at_builtins() {
        for &(alias, replacement, _) in DEPRECATED_ALIASES {
            assert!(builtin_names().any(|name| name == alias));
            assert!(builtin_names().any(|name| name == replacement));
        }
    }
}
