//! Pipeline-facing configuration.
//!
//! The host build pipeline supplies naming templates per output kind and
//! pruning overrides, typically as a TOML fragment of its own config:
//!
//! ```toml
//! [naming]
//! script = "[name].[hash:16].[ext]"
//! style = "[name].[hash:16].[ext]"
//! chunk = "[id].[hash:16].[ext]"
//!
//! [prune]
//! allow = ['^\.js-']
//! deny = ['^\.debug-']
//! ```
//!
//! [`Config::compile`] validates everything up front: templates are
//! parsed and override patterns compiled once, so render and prune calls
//! made with a [`CompiledConfig`] can no longer fail on bad
//! configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fingerprint::{NameTemplate, TemplateError};
use crate::prune::{PolicyError, RulePolicy};

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("invalid `{kind}` naming template")]
    Template {
        kind: &'static str,
        #[source]
        source: TemplateError,
    },

    #[error("invalid prune override")]
    Policy(#[from] PolicyError),
}

// ============================================================================
// Raw config
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Naming templates per output kind.
    pub naming: NamingConfig,
    /// Pruning overrides.
    pub prune: PruneConfig,
}

/// Naming template strings, one per output kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Template for script outputs.
    pub script: String,
    /// Template for style outputs.
    pub style: String,
    /// Template for chunk outputs (grouped splits, keyed by `[id]`).
    pub chunk: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            script: "[name].[hash:16].[ext]".into(),
            style: "[name].[hash:16].[ext]".into(),
            chunk: "[id].[hash:16].[ext]".into(),
        }
    }
}

/// Allow/deny selector pattern lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Selector patterns never pruned.
    pub allow: Vec<String>,
    /// Selector patterns always pruned.
    pub deny: Vec<String>,
}

impl Config {
    /// Parse a TOML fragment.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Validate and compile into ready-to-use form.
    pub fn compile(&self) -> Result<CompiledConfig, ConfigError> {
        Ok(CompiledConfig {
            script: Self::template("script", &self.naming.script)?,
            style: Self::template("style", &self.naming.style)?,
            chunk: Self::template("chunk", &self.naming.chunk)?,
            policy: RulePolicy::new(&self.prune.allow, &self.prune.deny)?,
        })
    }

    fn template(kind: &'static str, raw: &str) -> Result<NameTemplate, ConfigError> {
        NameTemplate::parse(raw).map_err(|source| ConfigError::Template { kind, source })
    }
}

// ============================================================================
// Compiled config
// ============================================================================

/// Kind of emitted output a template applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Script,
    Style,
    Chunk,
}

/// Validated configuration: parsed templates plus compiled policy.
#[derive(Debug)]
pub struct CompiledConfig {
    script: NameTemplate,
    style: NameTemplate,
    chunk: NameTemplate,
    /// Compiled allow/deny overrides for pruning.
    pub policy: RulePolicy,
}

impl CompiledConfig {
    /// The naming template for an output kind.
    pub fn template(&self, kind: OutputKind) -> &NameTemplate {
        match kind {
            OutputKind::Script => &self.script,
            OutputKind::Style => &self.style,
            OutputKind::Chunk => &self.chunk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{ContentUnit, render};

    #[test]
    fn test_defaults_compile() {
        let config = Config::default();
        assert_eq!(config.naming.script, "[name].[hash:16].[ext]");
        assert!(config.prune.allow.is_empty());
        config.compile().unwrap();
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml_str(
            r#"
[naming]
chunk = "chunks/[id]-[hash:8].[ext]"

[prune]
deny = ['^\.debug-']
"#,
        )
        .unwrap();

        // Unset sections keep their defaults
        assert_eq!(config.naming.script, "[name].[hash:16].[ext]");
        assert_eq!(config.naming.chunk, "chunks/[id]-[hash:8].[ext]");
        assert_eq!(config.prune.deny, ["^\\.debug-"]);
    }

    #[test]
    fn test_compiled_templates_by_kind() {
        let compiled = Config::from_toml_str("[naming]\nstyle = \"[name].[ext]\"")
            .unwrap()
            .compile()
            .unwrap();

        let unit = ContentUnit::new("app", "css", b"body{}".to_vec());
        let name = render(compiled.template(OutputKind::Style), &unit).unwrap();
        assert_eq!(name, "app.css");
    }

    #[test]
    fn test_bad_template_fails_compile() {
        let config = Config::from_toml_str("[naming]\nscript = \"[bogus]\"").unwrap();
        assert!(matches!(
            config.compile(),
            Err(ConfigError::Template { kind: "script", .. })
        ));
    }

    #[test]
    fn test_bad_pattern_fails_compile() {
        let config = Config::from_toml_str("[prune]\nallow = ['(unclosed']").unwrap();
        assert!(matches!(config.compile(), Err(ConfigError::Policy(_))));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml_str("naming = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
