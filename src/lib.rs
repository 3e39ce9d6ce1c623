//! Cinder - content-addressed naming and style-rule pruning for build
//! pipelines.
//!
//! Two independent, composable components, both pure and synchronous:
//!
//! - [`fingerprint`] - computes a deterministic blake3 digest from a
//!   unit of emitted content and renders its final output name from a
//!   placeholder template (`[name].[hash:8].[ext]`). Identical bytes
//!   always produce identical names, so unchanged assets stay cached.
//! - [`prune`] - given the finalized style-rule sequence and the markup
//!   and script assets shipping next to it, keeps only the rules whose
//!   selectors have textual evidence of use, preserving source order.
//!
//! The host pipeline owns all file I/O, CLI parsing and log rendering;
//! this crate only transforms values. Calls are independent and may run
//! concurrently. Warnings and errors are returned to the caller, logged
//! through the [`log`] facade where useful, and never terminate the
//! process.

pub mod config;
pub mod fingerprint;
pub mod prune;

pub use config::{CompiledConfig, Config, ConfigError, OutputKind};
pub use fingerprint::{
    ContentDigest, ContentUnit, NameTemplate, TemplateError, render, render_all, versioned_url,
};
pub use prune::{
    AssetKind, DelimiterTokens, Extractors, PolicyError, PruneOutcome, PruneStats, PruneWarning,
    RulePolicy, SourceAsset, StyleRule, TokenExtractor, prune,
};
