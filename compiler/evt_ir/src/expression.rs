//! Parameter values.

use std::fmt;

/// The textual value of one instruction parameter.
///
/// The plain string is the source of truth: two expressions are equal iff
/// their text is equal. Expressions are immutable once built; rewrites
/// produce a new `Expression` that replaces the old one wholesale, so any
/// parse state cached against the old text is never silently invalidated.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Expression {
    plain: String,
}

impl Expression {
    /// Create an expression from its text.
    #[inline]
    pub fn new(plain: impl Into<String>) -> Self {
        Expression {
            plain: plain.into(),
        }
    }

    /// The expression text.
    #[inline]
    pub fn plain_string(&self) -> &str {
        &self.plain
    }

    /// True when the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }
}

impl From<&str> for Expression {
    fn from(plain: &str) -> Self {
        Expression::new(plain)
    }
}

impl From<String> for Expression {
    fn from(plain: String) -> Self {
        Expression::new(plain)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({:?})", self.plain)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain)
    }
}
