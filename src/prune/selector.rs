//! Selector decomposition into atomic identifier components.
//!
//! A selector is split into comma-separated clauses; each clause yields
//! the class, id and tag identifiers it structurally depends on.
//! Pseudo-classes/elements and attribute selector contents are stripped:
//! matching happens on base names only. Anything the scanner cannot make
//! sense of is reported as malformed and the caller keeps the rule.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::iter::Peekable;
use std::str::Chars;

/// Atomic identifiers one selector clause depends on.
///
/// Compound selectors are short; four inline slots cover the common case.
pub(crate) type Components = SmallVec<[String; 4]>;

/// Decompose a selector into per-clause component lists.
///
/// Returns `None` when the selector is malformed (unbalanced brackets,
/// escape sequences, unexpected punctuation); the pruner keeps such
/// rules rather than guessing.
pub(crate) fn decompose(selector: &str) -> Option<Vec<Components>> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return None;
    }
    split_clauses(trimmed)?
        .into_iter()
        .map(clause_components)
        .collect()
}

/// A rule is reachable when at least one clause has all of its
/// components in the used-token set. A clause with no components
/// (`*`, `:root`, `::selection`) is vacuously reachable.
pub(crate) fn is_reachable(clauses: &[Components], used: &FxHashSet<String>) -> bool {
    clauses
        .iter()
        .any(|clause| clause.iter().all(|token| used.contains(token.as_str())))
}

/// Split on top-level commas, respecting `()` and `[]` nesting.
fn split_clauses(selector: &str) -> Option<Vec<&str>> {
    let mut clauses = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;

    for (i, c) in selector.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            ',' if depth == 0 => {
                clauses.push(&selector[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    clauses.push(&selector[start..]);
    Some(clauses)
}

/// Extract the identifier components of a single clause.
fn clause_components(clause: &str) -> Option<Components> {
    let mut components = Components::new();
    let mut chars = clause.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // Escapes need a real CSS tokenizer; report malformed instead
            '\\' => return None,

            // Attribute selector: matched on the base selector only
            '[' => skip_balanced(&mut chars, '[', ']')?,

            // Pseudo arguments, e.g. the body of `:not(...)`
            '(' => skip_balanced(&mut chars, '(', ')')?,

            // Pseudo-class/element: strip `:`/`::` and the pseudo name
            ':' => {
                while chars.peek() == Some(&':') {
                    chars.next();
                }
                take_ident(&mut chars);
            }

            '.' | '#' => {
                let ident = take_ident(&mut chars);
                if ident.is_empty() {
                    return None;
                }
                components.push(ident);
            }

            // Universal selector and nesting parent carry no identifier
            '*' | '&' => {}

            c if is_combinator(c) => {}

            // Tag name
            c if is_ident_char(c) => {
                let mut ident = String::new();
                ident.push(c);
                ident.push_str(&take_ident(&mut chars));
                components.push(ident);
            }

            _ => return None,
        }
    }
    Some(components)
}

/// Skip past the closer matching an already-consumed opener.
fn skip_balanced(chars: &mut Peekable<Chars>, open: char, close: char) -> Option<()> {
    let mut depth = 1u32;
    for c in chars.by_ref() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(());
            }
        }
    }
    None
}

/// Consume a run of identifier characters.
fn take_ident(chars: &mut Peekable<Chars>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

#[inline]
fn is_combinator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '>' | '+' | '~')
}

#[inline]
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(selector: &str) -> Vec<Vec<String>> {
        decompose(selector)
            .unwrap()
            .into_iter()
            .map(|c| c.into_vec())
            .collect()
    }

    fn used(tokens: &[&str]) -> FxHashSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_simple_selectors() {
        assert_eq!(components(".card"), vec![vec!["card"]]);
        assert_eq!(components("#header"), vec![vec!["header"]]);
        assert_eq!(components("nav"), vec![vec!["nav"]]);
    }

    #[test]
    fn test_compound_and_descendant() {
        assert_eq!(components("div.card"), vec![vec!["div", "card"]]);
        assert_eq!(components(".a .b"), vec![vec!["a", "b"]]);
        assert_eq!(components("ul > li + li"), vec![vec!["ul", "li", "li"]]);
    }

    #[test]
    fn test_clauses_split_on_commas() {
        assert_eq!(components(".a, .b"), vec![vec!["a"], vec!["b"]]);
        // Comma inside pseudo arguments does not split
        assert_eq!(components(".a:is(.b, .c)"), vec![vec!["a"]]);
    }

    #[test]
    fn test_pseudo_stripped() {
        assert_eq!(components(".btn:hover"), vec![vec!["btn"]]);
        assert_eq!(components("a::before"), vec![vec!["a"]]);
        assert_eq!(components(".a:not(.b)"), vec![vec!["a"]]);
    }

    #[test]
    fn test_attribute_stripped() {
        assert_eq!(components("input[type=\"text\"]"), vec![vec!["input"]]);
        assert_eq!(components("[hidden]"), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_universal_has_no_components() {
        assert_eq!(components("*"), vec![Vec::<String>::new()]);
        assert_eq!(components("::selection"), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_malformed() {
        assert!(decompose("").is_none());
        assert!(decompose("   ").is_none());
        assert!(decompose(".a[unclosed").is_none());
        assert!(decompose(".a)").is_none());
        assert!(decompose(".\\31 23").is_none());
        assert!(decompose(".").is_none());
    }

    #[test]
    fn test_reachability() {
        let clauses = decompose(".a .b").unwrap();
        assert!(is_reachable(&clauses, &used(&["a", "b", "c"])));
        assert!(!is_reachable(&clauses, &used(&["a"])));

        // Either clause suffices
        let either = decompose(".a, .b").unwrap();
        assert!(is_reachable(&either, &used(&["b"])));

        // No components: vacuously reachable
        let star = decompose("*").unwrap();
        assert!(is_reachable(&star, &used(&[])));
    }
}
