//! Read-only pattern queries over a [`ConfigTree`].
//!
//! All matching is caller-specified regex; the engine interprets nothing
//! beyond text and hierarchy. Every query is total: zero matches is an empty
//! result, never an error. Patterns arrive pre-compiled, so the only fallible
//! step (regex compilation) stays with rule construction.
//!
//! "Exact" matching means the pattern must match starting at the beginning of
//! the line; "partial" matching allows a match anywhere in the line. Matching
//! runs against the indentation-stripped line text.

use crate::tree::{ConfigTree, Node};
use regex::Regex;
use std::str::FromStr;

pub(crate) fn line_matches(text: &str, pattern: &Regex, exact: bool) -> bool {
    if exact {
        // Leftmost-first search: if any match starts at offset 0, the
        // leftmost match does.
        pattern.find(text).is_some_and(|m| m.start() == 0)
    } else {
        pattern.is_match(text)
    }
}

impl ConfigTree {
    /// Text of every line matching `pattern`, in file order.
    pub fn find_lines(&self, pattern: &Regex, exact: bool) -> Vec<&str> {
        self.iter()
            .filter(|n| line_matches(n.text(), pattern, exact))
            .map(|n| n.text())
            .collect()
    }

    /// Node handles for every line matching `pattern` anywhere, in file order.
    pub fn find_objects(&self, pattern: &Regex) -> Vec<Node<'_>> {
        self.iter().filter(|n| n.matches(pattern)).collect()
    }

    /// Every node matching `parent` that has at least one **direct** child
    /// matching `child`. A match on a grandchild or deeper descendant does
    /// not qualify.
    pub fn find_objects_with_child(&self, parent: &Regex, child: &Regex) -> Vec<Node<'_>> {
        self.iter()
            .filter(|n| n.matches(parent) && n.has_matching_child(child))
            .collect()
    }
}

impl<'t> Node<'t> {
    /// Whether this line matches `pattern` anywhere.
    pub fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.text())
    }

    /// Whether any **direct** child matches `pattern`.
    pub fn has_matching_child(&self, pattern: &Regex) -> bool {
        self.children().any(|c| c.matches(pattern))
    }

    /// First direct child matching `pattern`.
    pub fn matching_child(&self, pattern: &Regex) -> Option<Node<'t>> {
        self.children().find(|c| c.matches(pattern))
    }

    /// First line in this node's subtree (the node itself included) matching
    /// `pattern`, depth-first.
    pub fn find_in_subtree(&self, pattern: &Regex) -> Option<Node<'t>> {
        self.subtree().find(|n| n.matches(pattern))
    }

    /// Scan this node and its full descendant subtree for the first line
    /// matching `pattern`, extract capture `group`, and convert it.
    ///
    /// `None` is the explicit not-found outcome: no line matched, the group
    /// did not participate, or the captured text did not parse. Callers
    /// compare against `None`, never against a sentinel value.
    pub fn value_in_subtree<T: FromStr>(&self, pattern: &Regex, group: usize) -> Option<T> {
        self.subtree().find_map(|n| {
            let caps = pattern.captures(n.text())?;
            caps.get(group)?.as_str().parse().ok()
        })
    }
}
