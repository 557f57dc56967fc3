//! Tree traversal helpers

use std::collections::VecDeque;

use super::{SyntaxNode, point_to_position};
use crate::infra::node_types::is_comment;
use crate::models::lsp::Range;

/// Every node under `root` (root included), breadth-first
pub fn nodes(root: SyntaxNode<'_>) -> Vec<SyntaxNode<'_>> {
    let mut result = Vec::with_capacity(root.tree().len());
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        queue.extend(node.children());
        result.push(node);
    }
    result
}

/// First strict ancestor matching `predicate`
pub fn find_parent<'t>(
    start: SyntaxNode<'t>,
    predicate: impl Fn(SyntaxNode<'t>) -> bool,
) -> Option<SyntaxNode<'t>> {
    let mut current = start.parent();
    while let Some(node) = current {
        if predicate(node) {
            return Some(node);
        }
        current = node.parent();
    }
    None
}

fn comment_run(node: SyntaxNode<'_>) -> impl Iterator<Item = SyntaxNode<'_>> {
    std::iter::successors(node.prev_named_sibling(), |n| n.prev_named_sibling())
        .take_while(|n| is_comment(*n))
}

/// Text of the comment lines directly above `node`, in source order
pub fn preceding_comments(node: SyntaxNode<'_>) -> String {
    let mut lines: Vec<&str> = comment_run(node).map(|c| strip_comment(c.text())).collect();
    lines.reverse();
    lines.join("\n")
}

/// Range of `node` widened to start at its first preceding comment
pub fn range_with_preceding_comments(node: SyntaxNode<'_>) -> Range {
    let mut range = node.range();
    if let Some(first) = comment_run(node).last() {
        range.start = point_to_position(first.start_position());
    }
    range
}

fn strip_comment(text: &str) -> &str {
    let body = text.trim_start_matches('#');
    body.strip_prefix(char::is_whitespace).unwrap_or(body)
}
