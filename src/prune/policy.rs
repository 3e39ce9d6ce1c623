//! Allow/deny overrides for pruning.
//!
//! Patterns are regexes matched against the full trimmed selector and
//! against each trimmed comma clause, so both `\.modal` and
//! `^\.debug-` style patterns behave as expected.

use regex::RegexSet;
use thiserror::Error;

/// Override compilation errors.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid override pattern")]
    Pattern(#[from] regex::Error),
}

/// Compiled allow/deny selector patterns.
///
/// Precedence: deny beats allow, allow beats usage evidence. The empty
/// policy matches nothing and leaves every decision to reachability.
#[derive(Debug, Default)]
pub struct RulePolicy {
    allow: Option<RegexSet>,
    deny: Option<RegexSet>,
}

impl RulePolicy {
    /// Compile a policy from raw pattern lists.
    pub fn new<S: AsRef<str>>(allow: &[S], deny: &[S]) -> Result<Self, PolicyError> {
        Ok(Self {
            allow: Self::compile(allow)?,
            deny: Self::compile(deny)?,
        })
    }

    fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Option<RegexSet>, PolicyError> {
        if patterns.is_empty() {
            return Ok(None);
        }
        Ok(Some(RegexSet::new(patterns)?))
    }

    /// Whether the selector is allow-listed (never pruned).
    pub(crate) fn allows(&self, selector: &str) -> bool {
        Self::matches(self.allow.as_ref(), selector)
    }

    /// Whether the selector is deny-listed (always pruned).
    pub(crate) fn denies(&self, selector: &str) -> bool {
        Self::matches(self.deny.as_ref(), selector)
    }

    fn matches(set: Option<&RegexSet>, selector: &str) -> bool {
        let Some(set) = set else {
            return false;
        };
        set.is_match(selector.trim())
            || selector
                .split(',')
                .any(|clause| set.is_match(clause.trim()))
    }
}
