//! Reachable-rule pruning: drop style rules no source asset references.
//!
//! The pipeline hands over the finalized rule sequence plus the markup
//! and script assets that will ship next to it; [`prune`] keeps the
//! rules whose selectors have textual evidence of use and returns them
//! in their original order (the cascade depends on it).
//!
//! Matching is conservative by design. A clause like `.a .b` is kept
//! when both `a` and `b` appear anywhere in the used-token set, even
//! though that cannot prove the compound relationship holds in the DOM;
//! retaining an occasional unused rule is the accepted cost of never
//! stripping a live one. Rules whose selectors cannot be decomposed are
//! kept for the same reason.
//!
//! # Example
//!
//! ```ignore
//! let outcome = prune(rules, &sources, &Extractors::new(), &RulePolicy::default());
//! for rule in &outcome.rules {
//!     stylesheet.push_str(&rule.to_string());
//! }
//! ```

mod extract;
mod policy;
mod rule;
mod selector;

pub use extract::{AssetKind, DelimiterTokens, Extractors, SourceAsset, TokenExtractor};
pub use policy::{PolicyError, RulePolicy};
pub use rule::StyleRule;

use thiserror::Error;

// ============================================================================
// Outcome
// ============================================================================

/// Non-fatal conditions surfaced alongside the pruned rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PruneWarning {
    /// Pruning against zero evidence would delete every rule; the input
    /// was returned unchanged instead.
    #[error("no source assets provided; style rules returned unpruned")]
    NoSourcesProvided,
}

/// Counters describing a prune pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    /// Rules present in the output.
    pub kept: usize,
    /// Rules removed as unreachable or deny-listed.
    pub dropped: usize,
    /// Rules kept because their selector could not be decomposed.
    pub unparsed: usize,
}

/// Result of a prune pass: the surviving rules in input order, any
/// warnings, and the decision counters.
#[derive(Debug)]
pub struct PruneOutcome {
    pub rules: Vec<StyleRule>,
    pub warnings: Vec<PruneWarning>,
    pub stats: PruneStats,
}

// ============================================================================
// Prune
// ============================================================================

/// Prune the rule sequence down to the subset reachable from `sources`.
///
/// Per rule, in input order: deny-listed rules are dropped regardless of
/// usage; allow-listed rules are kept regardless of usage; rules with
/// undecomposable selectors are kept; everything else is kept iff at
/// least one selector clause has all of its components in the used-token
/// set. With no sources at all the input is returned unchanged along
/// with [`PruneWarning::NoSourcesProvided`].
pub fn prune(
    rules: Vec<StyleRule>,
    sources: &[SourceAsset],
    extractors: &Extractors,
    policy: &RulePolicy,
) -> PruneOutcome {
    if sources.is_empty() {
        log::warn!(
            "no source assets provided; returning {} style rules unpruned",
            rules.len()
        );
        let stats = PruneStats {
            kept: rules.len(),
            ..PruneStats::default()
        };
        return PruneOutcome {
            rules,
            warnings: vec![PruneWarning::NoSourcesProvided],
            stats,
        };
    }

    let used = extractors.extract_all(sources);
    let mut stats = PruneStats::default();

    let kept: Vec<StyleRule> = rules
        .into_iter()
        .filter(|rule| {
            let keep = decide(rule, &used, policy, &mut stats);
            if keep {
                stats.kept += 1;
            } else {
                stats.dropped += 1;
                log::debug!("pruned `{}`", rule.selector().trim());
            }
            keep
        })
        .collect();

    PruneOutcome {
        rules: kept,
        warnings: Vec::new(),
        stats,
    }
}

/// Keep/drop decision for one rule.
fn decide(
    rule: &StyleRule,
    used: &rustc_hash::FxHashSet<String>,
    policy: &RulePolicy,
    stats: &mut PruneStats,
) -> bool {
    let sel = rule.selector();

    if policy.denies(sel) {
        return false;
    }
    if policy.allows(sel) {
        return true;
    }
    match selector::decompose(sel) {
        Some(clauses) => selector::is_reachable(&clauses, used),
        // Malformed selector: never dropped on parse failure
        None => {
            stats.unparsed += 1;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(selectors: &[&str]) -> Vec<StyleRule> {
        selectors
            .iter()
            .map(|s| StyleRule::new(*s, "color:red"))
            .collect()
    }

    fn selectors(outcome: &PruneOutcome) -> Vec<&str> {
        outcome.rules.iter().map(|r| r.selector()).collect()
    }

    fn run(rule_set: Vec<StyleRule>, sources: &[SourceAsset]) -> PruneOutcome {
        prune(rule_set, sources, &Extractors::new(), &RulePolicy::default())
    }

    #[test]
    fn test_used_rule_kept_unused_dropped() {
        let sources = [SourceAsset::markup("<div class='used'>")];
        let outcome = run(rules(&[".used", ".unused"]), &sources);
        assert_eq!(selectors(&outcome), [".used"]);
        assert_eq!(outcome.stats.kept, 1);
        assert_eq!(outcome.stats.dropped, 1);
    }

    #[test]
    fn test_order_preserved() {
        // Spec example: .a and .c survive in order, .b is dropped
        let input = vec![
            StyleRule::new(".a", "color:red"),
            StyleRule::new(".b", "color:blue"),
            StyleRule::new(".c", "color:green"),
        ];
        let sources = [SourceAsset::markup("<div class='a c'>")];
        let outcome = run(input, &sources);

        assert_eq!(
            outcome.rules,
            vec![
                StyleRule::new(".a", "color:red"),
                StyleRule::new(".c", "color:green"),
            ]
        );
    }

    #[test]
    fn test_empty_rules() {
        let sources = [SourceAsset::markup("<div>")];
        let outcome = run(Vec::new(), &sources);
        assert!(outcome.rules.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_no_sources_is_identity_with_warning() {
        let input = rules(&[".a", ".b"]);
        let outcome = run(input.clone(), &[]);
        assert_eq!(outcome.rules, input);
        assert_eq!(outcome.warnings, [PruneWarning::NoSourcesProvided]);
        assert_eq!(outcome.stats.kept, 2);
    }

    #[test]
    fn test_compound_needs_all_tokens() {
        let sources = [SourceAsset::markup("<div class='a'>")];
        let outcome = run(rules(&[".a .b"]), &sources);
        assert!(outcome.rules.is_empty());

        let sources = [SourceAsset::markup("<div class='a'><p class='b'>")];
        let outcome = run(rules(&[".a .b"]), &sources);
        assert_eq!(selectors(&outcome), [".a .b"]);
    }

    #[test]
    fn test_clause_alternatives() {
        // Either comma clause keeps the whole rule
        let sources = [SourceAsset::markup("<div class='b'>")];
        let outcome = run(rules(&[".a, .b"]), &sources);
        assert_eq!(selectors(&outcome), [".a, .b"]);
    }

    #[test]
    fn test_pseudo_matched_on_base_name() {
        let sources = [SourceAsset::markup("<a class='btn'>")];
        let outcome = run(rules(&[".btn:hover", ".btn::before", ".other:hover"]), &sources);
        assert_eq!(selectors(&outcome), [".btn:hover", ".btn::before"]);
    }

    #[test]
    fn test_malformed_selector_kept() {
        let sources = [SourceAsset::markup("<div class='x'>")];
        let outcome = run(rules(&[".\\e9 tude", ".x"]), &sources);
        assert_eq!(selectors(&outcome), [".\\e9 tude", ".x"]);
        assert_eq!(outcome.stats.unparsed, 1);
    }

    #[test]
    fn test_script_sources_count_as_evidence() {
        let sources = [SourceAsset::script("element.classList.add('toast')")];
        let outcome = run(rules(&[".toast", ".unused"]), &sources);
        assert_eq!(selectors(&outcome), [".toast"]);
    }

    #[test]
    fn test_deny_wins_over_usage_and_allow() {
        let sources = [SourceAsset::markup("<div class='debug-grid keep-me'>")];
        let policy = RulePolicy::new(&["^\\.keep-"], &["^\\.debug-"]).unwrap();
        let outcome = prune(
            rules(&[".debug-grid", ".keep-me"]),
            &sources,
            &Extractors::new(),
            &policy,
        );
        // Token `debug-grid` appears in sources, deny still drops it
        assert_eq!(selectors(&outcome), [".keep-me"]);
    }

    #[test]
    fn test_allow_keeps_unused_rule() {
        let sources = [SourceAsset::markup("<div>")];
        let policy = RulePolicy::new::<&str>(&[r"^\.modal"], &[]).unwrap();
        let outcome = prune(rules(&[".modal", ".gone"]), &sources, &Extractors::new(), &policy);
        assert_eq!(selectors(&outcome), [".modal"]);
    }

    #[test]
    fn test_universal_and_root_always_kept() {
        let sources = [SourceAsset::markup("<div class='x'>")];
        let outcome = run(rules(&["*", ":root", "::selection"]), &sources);
        assert_eq!(selectors(&outcome), ["*", ":root", "::selection"]);
    }
}
