//! Source assets and token extraction.
//!
//! Extractors deliberately over-extract candidate tokens: a
//! false-positive token only keeps an unused rule alive, while a false
//! negative could strip styles still in use.

use rustc_hash::{FxHashMap, FxHashSet};

// ============================================================================
// SourceAsset
// ============================================================================

/// Kind of source asset handed to the pruner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Markup documents (HTML, templates).
    Markup,
    /// Script output that may reference selectors at runtime.
    Script,
}

/// Read-only text content scanned for selector usage.
#[derive(Debug, Clone)]
pub struct SourceAsset {
    kind: AssetKind,
    text: String,
}

impl SourceAsset {
    /// Create an asset of the given kind.
    pub fn new(kind: AssetKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Shorthand for a markup asset.
    pub fn markup(text: impl Into<String>) -> Self {
        Self::new(AssetKind::Markup, text)
    }

    /// Shorthand for a script asset.
    pub fn script(text: impl Into<String>) -> Self {
        Self::new(AssetKind::Script, text)
    }

    #[inline]
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

// ============================================================================
// TokenExtractor
// ============================================================================

/// Extracts the candidate identifier tokens found in an asset's text.
///
/// Implementations must be pure: same text, same tokens.
pub trait TokenExtractor: Sync {
    fn extract(&self, text: &str) -> FxHashSet<String>;
}

/// Default extractor: maximal runs of characters excluding whitespace
/// and quote/angle-bracket delimiters.
///
/// Each raw run is also split into its inner `[A-Za-z0-9_-]` runs, so
/// unquoted markup like `class=active` still yields `active`. Both
/// layers only ever add candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimiterTokens;

impl TokenExtractor for DelimiterTokens {
    fn extract(&self, text: &str) -> FxHashSet<String> {
        let mut tokens = FxHashSet::default();
        for run in text.split(is_delimiter).filter(|run| !run.is_empty()) {
            for inner in run.split(|c: char| !is_ident_char(c)).filter(|t| !t.is_empty()) {
                if inner != run {
                    tokens.insert(inner.to_string());
                }
            }
            tokens.insert(run.to_string());
        }
        tokens
    }
}

#[inline]
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '<' | '>')
}

#[inline]
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

// ============================================================================
// Extractors registry
// ============================================================================

/// Extractor registry keyed by asset kind.
///
/// Every kind resolves to the default [`DelimiterTokens`] unless the
/// host registers something more precise; an unregistered kind never
/// silently contributes zero tokens.
pub struct Extractors {
    map: FxHashMap<AssetKind, Box<dyn TokenExtractor>>,
    fallback: DelimiterTokens,
}

impl Default for Extractors {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
            fallback: DelimiterTokens,
        }
    }
}

impl Extractors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor for an asset kind, replacing any previous one.
    pub fn set(&mut self, kind: AssetKind, extractor: Box<dyn TokenExtractor>) {
        self.map.insert(kind, extractor);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, kind: AssetKind, extractor: Box<dyn TokenExtractor>) -> Self {
        self.set(kind, extractor);
        self
    }

    /// Extract from one asset with the extractor registered for its kind.
    pub fn extract(&self, asset: &SourceAsset) -> FxHashSet<String> {
        self.map
            .get(&asset.kind())
            .map(|e| e.extract(asset.text()))
            .unwrap_or_else(|| self.fallback.extract(asset.text()))
    }

    /// Union of the tokens of all assets.
    pub(crate) fn extract_all(&self, sources: &[SourceAsset]) -> FxHashSet<String> {
        let mut used = FxHashSet::default();
        for source in sources {
            used.extend(self.extract(source));
        }
        used
    }
}
