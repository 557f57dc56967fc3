//! Fish syntax trees
//!
//! An arena of nodes produced by a single parse. Nodes are addressed by
//! [`NodeId`]; [`SyntaxNode`] is a cheap borrowed handle with the navigation
//! API of a tree-sitter node. Trees come from a [`TreeBuilder`], a JSON
//! [`TreeDump`], or a `tree_sitter::Tree`.

mod builder;
#[cfg(test)]
pub(crate) mod fixture;
mod position;
mod walk;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node_types::NodeKind;
use crate::models::lsp::Range;

pub use builder::{NodeDump, TreeBuilder, TreeDump};
pub use position::{
    find_node_at, get_node_at, get_node_at_range, get_range, point_to_position,
    position_to_point,
};
pub use walk::{find_parent, nodes, preceding_comments, range_with_preceding_comments};

/// Parser coordinate (zero-based row and column)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl Point {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Byte and point extent of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Point,
    pub end: Point,
}

impl Span {
    pub fn new(start_byte: usize, end_byte: usize, start: Point, end: Point) -> Self {
        Self {
            start_byte,
            end_byte,
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) span: Span,
    pub(crate) parent: Option<NodeId>,
    /// Position in the parent's child list
    pub(crate) slot: usize,
    pub(crate) children: Vec<NodeId>,
}

/// One parse of one document
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub(crate) fn from_parts(source: String, nodes: Vec<NodeData>) -> Self {
        Self { source, nodes }
    }

    /// Root node, `None` for an empty tree
    pub fn root(&self) -> Option<SyntaxNode<'_>> {
        self.node(NodeId(0))
    }

    pub fn node(&self, id: NodeId) -> Option<SyntaxNode<'_>> {
        (id.0 < self.nodes.len()).then_some(SyntaxNode { tree: self, id })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Borrowed handle to a node in a [`SyntaxTree`]
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}@{}:{}-{}:{}",
            self.kind(),
            self.start_position().row,
            self.start_position().column,
            self.end_position().row,
            self.end_position().column
        )
    }
}

impl<'t> SyntaxNode<'t> {
    fn data(&self) -> &'t NodeData {
        self.tree.data(self.id)
    }

    fn wrap(&self, id: NodeId) -> SyntaxNode<'t> {
        SyntaxNode {
            tree: self.tree,
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn is_named(&self) -> bool {
        self.kind().is_named()
    }

    pub fn text(&self) -> &'t str {
        let span = self.data().span;
        self.tree
            .source
            .get(span.start_byte..span.end_byte)
            .unwrap_or_default()
    }

    pub fn span(&self) -> Span {
        self.data().span
    }

    pub fn start_byte(&self) -> usize {
        self.data().span.start_byte
    }

    pub fn end_byte(&self) -> usize {
        self.data().span.end_byte
    }

    pub fn start_position(&self) -> Point {
        self.data().span.start
    }

    pub fn end_position(&self) -> Point {
        self.data().span.end
    }

    pub fn range(&self) -> Range {
        Range::new(
            point_to_position(self.start_position()),
            point_to_position(self.end_position()),
        )
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.data().parent.map(|id| self.wrap(id))
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn child(&self, index: usize) -> Option<SyntaxNode<'t>> {
        self.data().children.get(index).map(|id| self.wrap(*id))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + use<'t> {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |id| SyntaxNode { tree, id: *id })
    }

    pub fn named_children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + use<'t> {
        self.children().filter(|child| child.is_named())
    }

    pub fn first_named_child(&self) -> Option<SyntaxNode<'t>> {
        self.named_children().next()
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode<'t>> {
        let slot = self.data().slot.checked_sub(1)?;
        self.parent()?.child(slot)
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.parent()?.child(self.data().slot + 1)
    }

    pub fn prev_named_sibling(&self) -> Option<SyntaxNode<'t>> {
        let mut current = self.prev_sibling();
        while let Some(node) = current {
            if node.is_named() {
                return Some(node);
            }
            current = node.prev_sibling();
        }
        None
    }

    pub fn next_named_sibling(&self) -> Option<SyntaxNode<'t>> {
        let mut current = self.next_sibling();
        while let Some(node) = current {
            if node.is_named() {
                return Some(node);
            }
            current = node.next_sibling();
        }
        None
    }
}
