//! Style rules: a selector plus an opaque declaration block.

use std::fmt;

/// A single style rule collected from a stylesheet.
///
/// The selector may hold several comma-separated clauses. The declaration
/// block is opaque; pruning only ever inspects the selector. Relative
/// order among rules is significant (the cascade depends on it) and is
/// preserved by the pruner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    selector: String,
    declarations: String,
}

impl StyleRule {
    /// Create a rule from its selector and declaration block.
    pub fn new(selector: impl Into<String>, declarations: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: declarations.into(),
        }
    }

    /// The rule's selector text.
    #[inline]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The opaque declaration block.
    #[inline]
    pub fn declarations(&self) -> &str {
        &self.declarations
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.selector.trim(), self.declarations)
    }
}
