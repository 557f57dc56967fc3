//! Range geometry
//!
//! Line-oriented comparisons between document ranges. Characters are only
//! consulted on the boundary lines.

use crate::infra::syntax::{SyntaxNode, point_to_position};
use crate::models::lsp::{Position, Range};

/// Whether `inner` lies inside `outer`. Every range contains itself.
pub fn contains_range(outer: Range, inner: Range) -> bool {
    if inner.start.line < outer.start.line || inner.end.line < outer.start.line {
        return false;
    }
    if inner.start.line > outer.end.line || inner.end.line > outer.end.line {
        return false;
    }
    if inner.start.line == outer.start.line && inner.start.character < outer.start.character {
        return false;
    }
    if inner.end.line == outer.end.line && inner.end.character > outer.end.character {
        return false;
    }
    true
}

/// Whether `before` starts strictly earlier than `after`
pub fn precedes_range(before: Range, after: Range) -> bool {
    before.start < after.start
}

/// Closed-interval membership
pub fn is_position_within_range(position: Position, range: Range) -> bool {
    range.start <= position && position <= range.end
}

pub fn is_node_within_range(node: SyntaxNode<'_>, range: Range) -> bool {
    range.start <= point_to_position(node.start_position())
        && point_to_position(node.end_position()) <= range.end
}
