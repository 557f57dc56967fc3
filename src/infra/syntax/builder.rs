//! Tree construction
//!
//! Every tree goes through [`TreeBuilder::finish`], which checks that node
//! spans describe the source text before any handle is given out.

use serde::{Deserialize, Serialize};

use super::{NodeData, NodeId, Point, Span, SyntaxTree};
use crate::error::{FishscopeResult, TreeError};
use crate::infra::node_types::NodeKind;

/// Incremental arena builder.
///
/// Nodes are pushed in pre-order; a node's parent must already exist.
#[derive(Debug)]
pub struct TreeBuilder {
    source: String,
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Append a node as the last child of `parent`
    pub fn push(&mut self, parent: Option<NodeId>, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        let (parent, slot) = match parent.and_then(|p| self.nodes.get_mut(p.0).map(|d| (p, d))) {
            Some((parent_id, data)) => {
                data.children.push(id);
                (Some(parent_id), data.children.len() - 1)
            }
            None => (None, 0),
        };
        self.nodes.push(NodeData {
            kind,
            span,
            parent,
            slot,
            children: Vec::new(),
        });
        id
    }

    /// Move the end of an already pushed node
    pub fn set_end(&mut self, id: NodeId, end_byte: usize, end: Point) {
        if let Some(data) = self.nodes.get_mut(id.0) {
            data.span.end_byte = end_byte;
            data.span.end = end;
        }
    }

    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        let len = self.source.len();
        for (index, data) in self.nodes.iter().enumerate() {
            let span = data.span;
            if span.start_byte > len || span.end_byte > len {
                return Err(TreeError::SpanOutOfBounds {
                    node: index,
                    start: span.start_byte,
                    end: span.end_byte,
                    len,
                });
            }
            if span.start_byte > span.end_byte || span.start > span.end {
                return Err(TreeError::InvertedSpan {
                    node: index,
                    start: span.start,
                    end: span.end,
                });
            }
            for offset in [span.start_byte, span.end_byte] {
                if !self.source.is_char_boundary(offset) {
                    return Err(TreeError::NotCharBoundary { node: index, offset });
                }
            }
            match data.parent {
                None if index > 0 => return Err(TreeError::OrphanNode(index)),
                None => {}
                Some(parent) => {
                    let outer = self.nodes[parent.0].span;
                    if span.start_byte < outer.start_byte || span.end_byte > outer.end_byte {
                        return Err(TreeError::ChildOutsideParent {
                            node: index,
                            parent: parent.0,
                        });
                    }
                }
            }
        }
        Ok(SyntaxTree::from_parts(self.source, self.nodes))
    }
}

// =============================================================================
// Serialized trees
// =============================================================================

/// A whole parse in JSON form, as emitted by an external parser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDump {
    pub source: String,
    pub root: NodeDump,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDump {
    pub kind: String,
    #[serde(default = "default_named")]
    pub named: bool,
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub children: Vec<NodeDump>,
}

fn default_named() -> bool {
    true
}

impl NodeDump {
    fn span(&self) -> Span {
        Span::new(self.start_byte, self.end_byte, self.start, self.end)
    }
}

impl SyntaxTree {
    pub fn from_dump(dump: &TreeDump) -> Result<Self, TreeError> {
        let mut builder = TreeBuilder::new(dump.source.clone());
        let mut stack: Vec<(Option<NodeId>, &NodeDump)> = vec![(None, &dump.root)];

        while let Some((parent, node)) = stack.pop() {
            let kind = NodeKind::from_grammar_name(&node.kind, node.named);
            let id = builder.push(parent, kind, node.span());
            stack.extend(node.children.iter().rev().map(|child| (Some(id), child)));
        }

        builder.finish()
    }

    pub fn from_json(json: &str) -> FishscopeResult<Self> {
        let dump: TreeDump = serde_json::from_str(json)?;
        Ok(Self::from_dump(&dump)?)
    }

    /// Convert a tree-sitter parse of `source`
    pub fn from_tree_sitter(tree: &tree_sitter::Tree, source: &str) -> Result<Self, TreeError> {
        let mut builder = TreeBuilder::new(source);
        let mut cursor = tree.walk();
        let mut parents: Vec<NodeId> = Vec::new();

        loop {
            let node = cursor.node();
            let kind = NodeKind::from_grammar_name(node.kind(), node.is_named());
            let span = Span::new(
                node.start_byte(),
                node.end_byte(),
                convert_point(node.start_position()),
                convert_point(node.end_position()),
            );
            let id = builder.push(parents.last().copied(), kind, span);

            if cursor.goto_first_child() {
                parents.push(id);
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return builder.finish();
                }
                parents.pop();
            }
        }
    }
}

fn convert_point(point: tree_sitter::Point) -> Point {
    Point::new(point.row as u32, point.column as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end, Point::new(0, start as u32), Point::new(0, end as u32))
    }

    #[test]
    fn test_builder_links_children_in_order() {
        let mut builder = TreeBuilder::new("echo hi");
        let root = builder.push(None, NodeKind::Program, span(0, 7));
        let command = builder.push(Some(root), NodeKind::Command, span(0, 7));
        builder.push(Some(command), NodeKind::Word, span(0, 4));
        builder.push(Some(command), NodeKind::Word, span(5, 7));
        let tree = builder.finish().unwrap();

        let command = tree.root().unwrap().child(0).unwrap();
        let words: Vec<_> = command.children().map(|n| n.text()).collect();
        assert_eq!(words, vec!["echo", "hi"]);
        assert_eq!(command.child(1).unwrap().prev_sibling(), command.child(0));
    }

    #[test]
    fn test_set_end_extends_open_node() {
        let mut builder = TreeBuilder::new("echo hi");
        let root = builder.push(None, NodeKind::Program, span(0, 0));
        builder.set_end(root, 7, Point::new(0, 7));
        let tree = builder.finish().unwrap();
        assert_eq!(tree.root().unwrap().text(), "echo hi");
    }

    #[test]
    fn test_finish_rejects_bad_spans() {
        let mut builder = TreeBuilder::new("echo");
        builder.push(None, NodeKind::Program, span(0, 9));
        assert!(matches!(
            builder.finish(),
            Err(TreeError::SpanOutOfBounds { node: 0, len: 4, .. })
        ));

        let mut builder = TreeBuilder::new("echo");
        builder.push(None, NodeKind::Program, Span::new(3, 1, Point::new(0, 3), Point::new(0, 1)));
        assert!(matches!(builder.finish(), Err(TreeError::InvertedSpan { node: 0, .. })));

        let mut builder = TreeBuilder::new("é");
        builder.push(None, NodeKind::Program, span(0, 1));
        assert!(matches!(
            builder.finish(),
            Err(TreeError::NotCharBoundary { node: 0, offset: 1 })
        ));

        let mut builder = TreeBuilder::new("echo hi");
        let root = builder.push(None, NodeKind::Program, span(0, 4));
        builder.push(Some(root), NodeKind::Word, span(2, 7));
        assert!(matches!(
            builder.finish(),
            Err(TreeError::ChildOutsideParent { node: 1, parent: 0 })
        ));

        let mut builder = TreeBuilder::new("echo");
        builder.push(None, NodeKind::Program, span(0, 4));
        builder.push(None, NodeKind::Word, span(0, 4));
        assert!(matches!(builder.finish(), Err(TreeError::OrphanNode(1))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "source": "greet Bob",
            "root": {
                "kind": "program", "start_byte": 0, "end_byte": 9,
                "start": {"row": 0, "column": 0}, "end": {"row": 0, "column": 9},
                "children": [{
                    "kind": "command", "start_byte": 0, "end_byte": 9,
                    "start": {"row": 0, "column": 0}, "end": {"row": 0, "column": 9},
                    "children": [
                        {"kind": "word", "start_byte": 0, "end_byte": 5,
                         "start": {"row": 0, "column": 0}, "end": {"row": 0, "column": 5}},
                        {"kind": "word", "start_byte": 6, "end_byte": 9,
                         "start": {"row": 0, "column": 6}, "end": {"row": 0, "column": 9}}
                    ]
                }]
            }
        }"#;
        let tree = SyntaxTree::from_json(json).unwrap();
        let command = tree.root().unwrap().first_named_child().unwrap();
        assert_eq!(command.kind(), NodeKind::Command);
        assert_eq!(command.first_named_child().unwrap().text(), "greet");
        assert_eq!(command.child(1).unwrap().text(), "Bob");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_from_json_reports_invalid_dump() {
        let json = r#"{"source": "x", "root": {"kind": "program", "start_byte": 0,
            "end_byte": 5, "start": {"row": 0, "column": 0}, "end": {"row": 0, "column": 5}}}"#;
        let err = SyntaxTree::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            crate::error::FishscopeError::Tree(TreeError::SpanOutOfBounds { .. })
        ));
        assert!(SyntaxTree::from_json("{").is_err());
    }

    #[test]
    fn test_from_tree_sitter_keeps_shape() {
        let source = "greet() {\n  echo \"$1\"\n}\ngreet Bob\n";
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_bash::LANGUAGE.into())
            .unwrap();
        let parsed = parser.parse(source, None).unwrap();
        let tree = SyntaxTree::from_tree_sitter(&parsed, source).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(root.kind(), NodeKind::Program);
        assert_eq!(root.text(), source);
        assert_eq!(root.child_count(), parsed.root_node().child_count());

        let last = root.named_children().last().unwrap();
        assert_eq!(last.kind(), NodeKind::Command);
        assert_eq!(last.text(), "greet Bob");
        assert_eq!(last.start_position(), Point::new(3, 0));

        // bash-only tags fall outside the fish vocabulary
        let first = root.first_named_child().unwrap();
        assert_eq!(first.kind(), NodeKind::FunctionDefinition);
        assert!(
            super::super::nodes(root)
                .iter()
                .any(|n| n.kind() == NodeKind::Unknown)
        );
    }
}
