//! Scope token syntax
//!
//! `[name]`, `[!name]` and `[+name]` request expansion; anything else is an opaque
//! scope passed through verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// A token requests expansion iff its full string matches this pattern
static EXPANSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[.+\]$").expect("expansion pattern is a valid regex"));

/// Returns true if the token is wrapped in expansion brackets
pub fn is_expandable(token: &str) -> bool {
    EXPANSION_PATTERN.is_match(token)
}

/// Strips the expansion brackets, `[+user]` → `+user`
///
/// Returns `None` for tokens that do not request expansion.
pub fn unwrap_brackets(token: &str) -> Option<&str> {
    if is_expandable(token) {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

/// Modifier carried by a scope token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modifier {
    /// No prefix; expands to ancestors
    #[default]
    Plain,
    /// `+` prefix; expands to descendants
    Require,
    /// `!` prefix; expands to ancestors
    Forbid,
}

impl Modifier {
    /// Returns the prefix written before the scope name
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Require => "+",
            Self::Forbid => "!",
        }
    }

    /// Returns true if this modifier walks down the hierarchy
    pub fn expands_downward(&self) -> bool {
        matches!(self, Self::Require)
    }

    /// Applies this modifier to a scope name
    pub fn apply(&self, scope: &str) -> String {
        format!("{}{}", self.prefix(), scope)
    }
}

/// A scope token split into its modifier and scope name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeToken<'a> {
    /// Modifier prefix
    pub modifier: Modifier,
    /// Scope name without the modifier
    pub scope: &'a str,
}

impl<'a> ScopeToken<'a> {
    /// Splits a (bracket-free) token into modifier and scope name
    pub fn parse(token: &'a str) -> Self {
        let (modifier, scope) = if let Some(rest) = token.strip_prefix('+') {
            (Modifier::Require, rest)
        } else if let Some(rest) = token.strip_prefix('!') {
            (Modifier::Forbid, rest)
        } else {
            (Modifier::Plain, token)
        };

        Self { modifier, scope }
    }
}

impl fmt::Display for ScopeToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifier.prefix(), self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expandable() {
        assert!(is_expandable("[user]"));
        assert!(is_expandable("[+user]"));
        assert!(is_expandable("[!user]"));
        assert!(is_expandable("[[user]]"));

        assert!(!is_expandable("user"));
        assert!(!is_expandable("[]"));
        assert!(!is_expandable("[user"));
        assert!(!is_expandable("user]"));
        assert!(!is_expandable(" [user]"));
        assert!(!is_expandable("[user]\n"));
    }

    #[test]
    fn test_unwrap_brackets() {
        assert_eq!(unwrap_brackets("[+user]"), Some("+user"));
        assert_eq!(unwrap_brackets("[[user]]"), Some("[user]"));
        assert_eq!(unwrap_brackets("some-scope"), None);
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(
            ScopeToken::parse("+user"),
            ScopeToken {
                modifier: Modifier::Require,
                scope: "user"
            }
        );
        assert_eq!(
            ScopeToken::parse("!user"),
            ScopeToken {
                modifier: Modifier::Forbid,
                scope: "user"
            }
        );
        assert_eq!(
            ScopeToken::parse("user"),
            ScopeToken {
                modifier: Modifier::Plain,
                scope: "user"
            }
        );
    }

    #[test]
    fn test_only_first_character_is_a_modifier() {
        let token = ScopeToken::parse("+!user");
        assert_eq!(token.modifier, Modifier::Require);
        assert_eq!(token.scope, "!user");
        assert_eq!(token.to_string(), "+!user");
    }

    #[test]
    fn test_modifier_apply() {
        assert_eq!(Modifier::Forbid.apply("dad"), "!dad");
        assert_eq!(Modifier::Plain.apply("dad"), "dad");
        assert!(Modifier::Require.expands_downward());
        assert!(!Modifier::Forbid.expands_downward());
    }
}
