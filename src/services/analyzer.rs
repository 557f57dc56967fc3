//! Analyzer
//!
//! Position-based entry points over a document store: the operations an LSP
//! handler or the CLI calls. Unknown documents and positions yield empty
//! results.

use std::collections::HashMap;
use std::sync::Arc;

use super::definition::{get_definition_kind, get_local_refs};
use super::scope::nearby_symbols;
use super::symbols::collect_symbols;
use crate::infra::builtins::{BuiltinRegistry, FishBuiltins};
use crate::infra::dependency::{DependencyResolver, SearchPathResolver};
use crate::infra::node_types::{NodeKind, is_command};
use crate::infra::syntax::{SyntaxNode, SyntaxTree, find_node_at};
use crate::models::config::FishscopeConfig;
use crate::models::lsp::{Location, Position, Range, path_to_uri};
use crate::models::symbol::{DefinitionKind, Symbol};

/// Source of parsed documents
pub trait DocumentStore: Send + Sync {
    fn root_node(&self, uri: &str) -> Option<SyntaxNode<'_>>;
    fn text(&self, uri: &str, range: Range) -> Option<String>;
}

/// Fixed set of parsed documents keyed by URI
#[derive(Debug, Default)]
pub struct InMemoryDocuments {
    documents: HashMap<String, SyntaxTree>,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: impl Into<String>, tree: SyntaxTree) -> Option<SyntaxTree> {
        self.documents.insert(uri.into(), tree)
    }

    pub fn remove(&mut self, uri: &str) -> Option<SyntaxTree> {
        self.documents.remove(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for InMemoryDocuments {
    fn root_node(&self, uri: &str) -> Option<SyntaxNode<'_>> {
        self.documents.get(uri)?.root()
    }

    fn text(&self, uri: &str, range: Range) -> Option<String> {
        let source = self.documents.get(uri)?.source();
        let start = byte_offset(source, range.start)?;
        let end = byte_offset(source, range.end)?;
        source.get(start..end.max(start)).map(str::to_string)
    }
}

/// Byte offset of a position, clamped to the end of its line
fn byte_offset(source: &str, position: Position) -> Option<usize> {
    let line_start = if position.line == 0 {
        0
    } else {
        source
            .match_indices('\n')
            .nth(position.line as usize - 1)
            .map(|(i, _)| i + 1)?
    };
    let line_len = source[line_start..].find('\n').unwrap_or(source.len() - line_start);
    Some(line_start + (position.character as usize).min(line_len))
}

pub struct Analyzer {
    documents: Arc<dyn DocumentStore>,
    builtins: Arc<dyn BuiltinRegistry>,
    dependencies: Option<Arc<dyn DependencyResolver>>,
}

impl Analyzer {
    pub fn new(documents: Arc<dyn DocumentStore>, builtins: Arc<dyn BuiltinRegistry>) -> Self {
        Self {
            documents,
            builtins,
            dependencies: None,
        }
    }

    pub fn with_dependency_resolver(mut self, resolver: Arc<dyn DependencyResolver>) -> Self {
        self.dependencies = Some(resolver);
        self
    }

    pub fn from_config(documents: Arc<dyn DocumentStore>, config: &FishscopeConfig) -> Self {
        Self::new(documents, Arc::new(FishBuiltins::from_config(&config.analysis)))
            .with_dependency_resolver(Arc::new(SearchPathResolver::from_config(&config.paths)))
    }

    fn root(&self, uri: &str) -> Option<SyntaxNode<'_>> {
        let root = self.documents.root_node(uri);
        if root.is_none() {
            tracing::debug!("Unknown document: {}", uri);
        }
        root
    }

    /// Token at a cursor, with `$name` normalized to its name
    fn node_at<'t>(&self, root: SyntaxNode<'t>, position: Position) -> Option<SyntaxNode<'t>> {
        let node = find_node_at(root, position.line, position.character)?;
        let expansion = match node.kind() {
            NodeKind::VariableExpansion => Some(node),
            NodeKind::Anonymous if node.text() == "$" => {
                node.parent().filter(|p| p.kind() == NodeKind::VariableExpansion)
            }
            _ => None,
        };
        let normalized = expansion
            .and_then(|e| e.named_children().find(|c| c.kind() == NodeKind::VariableName))
            .unwrap_or(node);
        tracing::trace!("Node at {}:{} is {:?}", position.line, position.character, normalized);
        Some(normalized)
    }

    pub fn document_symbols(&self, uri: &str) -> Vec<Symbol> {
        self.root(uri).map(collect_symbols).unwrap_or_default()
    }

    pub fn goto_definition(&self, uri: &str, position: Position) -> Vec<Location> {
        let Some(root) = self.root(uri) else {
            return Vec::new();
        };
        let Some(node) = self.node_at(root, position) else {
            return Vec::new();
        };

        if is_source_argument(node) {
            return self.resolve_file(node, uri).into_iter().collect();
        }

        let mut definitions = Vec::new();
        match get_definition_kind(uri, root, node, &mut definitions, self.builtins.as_ref()) {
            DefinitionKind::Local => definitions,
            DefinitionKind::File => self.resolve_file(node, uri).into_iter().collect(),
            DefinitionKind::None => Vec::new(),
        }
    }

    fn resolve_file(&self, node: SyntaxNode<'_>, uri: &str) -> Option<Location> {
        let path = self.dependencies.as_ref()?.resolve(node, uri)?;
        tracing::debug!("Resolved {} to {}", node.text(), path.display());
        Some(Location::new(path_to_uri(&path), Range::default()))
    }

    pub fn references(&self, uri: &str, position: Position) -> Vec<Location> {
        let Some(root) = self.root(uri) else {
            return Vec::new();
        };
        match self.node_at(root, position) {
            Some(node) => get_local_refs(uri, root, node),
            None => Vec::new(),
        }
    }

    pub fn completion_symbols(&self, uri: &str, position: Position) -> Vec<Symbol> {
        self.root(uri)
            .map(|root| nearby_symbols(root, Range::point(position)))
            .unwrap_or_default()
    }

    pub fn definition_kind(&self, uri: &str, position: Position) -> DefinitionKind {
        let Some(root) = self.root(uri) else {
            return DefinitionKind::None;
        };
        let Some(node) = self.node_at(root, position) else {
            return DefinitionKind::None;
        };
        let mut definitions = Vec::new();
        get_definition_kind(uri, root, node, &mut definitions, self.builtins.as_ref())
    }

    pub fn location_text(&self, location: &Location) -> Option<String> {
        self.documents.text(&location.uri, location.range)
    }
}

/// The file argument of `source`/`.`
fn is_source_argument(node: SyntaxNode<'_>) -> bool {
    let Some(command) = node.parent().filter(|p| is_command(*p)) else {
        return false;
    };
    let Some(name) = command.child(0) else {
        return false;
    };
    name != node && matches!(name.text(), "source" | ".")
}
