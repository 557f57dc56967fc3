//! Coordinate conversion and point lookup

use super::{Point, SyntaxNode};
use crate::models::lsp::{Position, Range};

pub fn point_to_position(point: Point) -> Position {
    Position::new(point.row, point.column)
}

pub fn position_to_point(position: Position) -> Point {
    Point::new(position.line, position.character)
}

pub fn get_range(node: SyntaxNode<'_>) -> Range {
    node.range()
}

/// Deepest node under `root` containing the point.
///
/// Children are matched on their half-open span; the root also accepts its
/// own end point so a cursor at end of file still lands in the document.
pub fn get_node_at(root: SyntaxNode<'_>, line: u32, column: u32) -> Option<SyntaxNode<'_>> {
    let point = Point::new(line, column);
    if point < root.start_position() || point > root.end_position() {
        return None;
    }

    let mut current = root;
    'descend: loop {
        for child in current.children() {
            if child.start_position() > point {
                break;
            }
            if point < child.end_position() {
                current = child;
                continue 'descend;
            }
        }
        return Some(current);
    }
}

/// Token under the cursor, tolerating positions just past a token.
///
/// Backs off one column at a time towards column 0 until a leaf is found;
/// otherwise falls back to [`get_node_at`] at the original point. Columns
/// past the end of the line start the back-off at the line end.
pub fn find_node_at(root: SyntaxNode<'_>, line: u32, column: u32) -> Option<SyntaxNode<'_>> {
    let line_end = line_len(root.tree().source(), line);
    for col in (0..=column.min(line_end)).rev() {
        match get_node_at(root, line, col) {
            Some(node) if node.child_count() == 0 => return Some(node),
            _ => {}
        }
    }
    get_node_at(root, line, column)
}

/// Byte length of a line, 0 past the last line
fn line_len(source: &str, line: u32) -> u32 {
    source
        .split('\n')
        .nth(line as usize)
        .map_or(0, |text| u32::try_from(text.len()).unwrap_or(u32::MAX))
}

/// Deepest node whose span covers the whole range
pub fn get_node_at_range(root: SyntaxNode<'_>, range: Range) -> Option<SyntaxNode<'_>> {
    let start = position_to_point(range.start);
    let end = position_to_point(range.end);
    let covers = |node: SyntaxNode<'_>| node.start_position() <= start && end <= node.end_position();

    if !covers(root) {
        return None;
    }

    let mut current = root;
    while let Some(child) = current.children().find(|child| covers(*child)) {
        current = child;
    }
    Some(current)
}
