//! Filename templates with `[placeholder]` substitution.
//!
//! A template is an ordered sequence of literal and placeholder tokens,
//! parsed once from a configuration string and reused for every unit:
//!
//! - `[name]` - the unit's logical name
//! - `[ext]`  - the unit's logical extension
//! - `[hash]` / `[hash:k]` - the content digest, optionally truncated to
//!   its first `k` hex characters
//! - `[id]`   - the unit's logical identifier (chunk/group id)
//!
//! # Example
//!
//! ```ignore
//! let template: NameTemplate = "[name].[hash:8].[ext]".parse()?;
//! ```

use std::str::FromStr;
use thiserror::Error;

use super::digest::ContentDigest;

// ============================================================================
// TemplateError
// ============================================================================

/// Template parsing and rendering errors.
///
/// Fatal to the single render call they occur in; other units are
/// unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder `[{0}]`")]
    UnknownPlaceholder(String),

    #[error("invalid hash truncation length `{0}`")]
    InvalidTruncation(String),

    #[error("hash truncation length {len} out of range (1..={max})")]
    TruncationOutOfRange { len: usize, max: usize },

    #[error("unclosed `[` at byte {0}")]
    UnclosedPlaceholder(usize),

    #[error("template references `[id]` but the unit has no id")]
    MissingId,
}

// ============================================================================
// Token
// ============================================================================

/// One template token: a literal run or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Verbatim text between placeholders.
    Literal(String),
    /// `[name]`
    Name,
    /// `[ext]`
    Ext,
    /// `[hash]` or `[hash:k]` with a truncation length.
    Hash(Option<usize>),
    /// `[id]`
    Id,
}

// ============================================================================
// NameTemplate
// ============================================================================

/// A parsed filename template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    tokens: Vec<Token>,
}

impl NameTemplate {
    /// Parse a template string.
    ///
    /// A stray `]` is a literal; an unterminated `[` is an error.
    /// Truncation bounds are checked here, so rendering a parsed
    /// template can never slice out of range.
    pub fn parse(input: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = input;
        let mut offset = 0;

        while let Some(open) = rest.find('[') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find(']') else {
                return Err(TemplateError::UnclosedPlaceholder(offset + open));
            };

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Self::placeholder(&after[..close])?);

            let consumed = open + 1 + close + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self { tokens })
    }

    /// Resolve a placeholder name to its token.
    fn placeholder(inner: &str) -> Result<Token, TemplateError> {
        match inner {
            "name" => Ok(Token::Name),
            "ext" => Ok(Token::Ext),
            "id" => Ok(Token::Id),
            "hash" => Ok(Token::Hash(None)),
            _ => match inner.strip_prefix("hash:") {
                Some(len) => {
                    let k: usize = len
                        .parse()
                        .map_err(|_| TemplateError::InvalidTruncation(len.to_string()))?;
                    if !(1..=ContentDigest::HEX_LEN).contains(&k) {
                        return Err(TemplateError::TruncationOutOfRange {
                            len: k,
                            max: ContentDigest::HEX_LEN,
                        });
                    }
                    Ok(Token::Hash(Some(k)))
                }
                None => Err(TemplateError::UnknownPlaceholder(inner.to_string())),
            },
        }
    }

    /// The parsed token sequence, in order.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether any token is a `[hash]` placeholder.
    pub fn references_hash(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Hash(_)))
    }

    /// Whether any token is the `[id]` placeholder.
    pub fn references_id(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Id))
    }
}

impl FromStr for NameTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
