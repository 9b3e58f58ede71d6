//! Provider tokens
//!
//! A token is the unique key of a providable value inside one resolution
//! scope. Tokens are explicit names handed over at registration time; nothing
//! is discovered through reflection.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::constants::ANONYMOUS_CLASS_NAMES;

/// Unique identifier of a providable dependency
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(Arc<str>);

impl Token {
    /// Create a token from a name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Token name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token name is empty or whitespace only
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Whether the name looks like an anonymous class or closure
    pub fn is_anonymous(&self) -> bool {
        let name = self.0.trim();
        ANONYMOUS_CLASS_NAMES.contains(&name) || name.contains("{{closure}}")
    }

    /// Argument key under which this token is injected
    pub fn camel_case(&self) -> String {
        camelize(&self.0)
    }
}

/// Convert a token name into its camel-cased argument key
///
/// The first character is lower-cased. Separators (`-`, `_`, whitespace) are
/// dropped and the character following them is upper-cased.
///
/// ```
/// use modwire_domain::token::camelize;
///
/// assert_eq!(camelize("MessageStore"), "messageStore");
/// assert_eq!(camelize("recent_messages"), "recentMessages");
/// ```
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' || ch == '_' || ch.is_whitespace() {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }
    out
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for Token {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
