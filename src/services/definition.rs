//! Definition and reference resolution within one document

use super::geometry::precedes_range;
use super::scope::prune_client_tree;
use super::symbols::{collect_symbols, flatten_symbols, symbol_node};
use crate::infra::builtins::BuiltinRegistry;
use crate::infra::node_types::{
    NodeKind, definition_scope, is_command_name, is_function_definition,
    is_function_definition_name, is_variable,
};
use crate::infra::syntax::{SyntaxNode, find_parent, nodes};
use crate::models::lsp::Location;
use crate::models::symbol::{DefinitionKind, Symbol, SymbolKind};

/// Symbol kind a node can refer to, `None` when any kind will do
fn expected_kind(node: SyntaxNode<'_>) -> Option<SymbolKind> {
    if is_command_name(node) || is_function_definition_name(node) {
        Some(SymbolKind::Function)
    } else if node.kind() == NodeKind::VariableName {
        Some(SymbolKind::Variable)
    } else {
        None
    }
}

/// Definition `current` refers to.
///
/// Among the visible symbols of the right kind, the one declared latest
/// before `current` wins. A definition token resolves to itself. Functions
/// are global, so a call before the `function` block still resolves.
pub fn find_definition(root: SyntaxNode<'_>, current: SyntaxNode<'_>) -> Option<Symbol> {
    let name = current.text();
    if name == "argv" {
        return enclosing_function(root, current);
    }

    let expected = expected_kind(current);
    let target = current.range();
    let forest = collect_symbols(root);

    // a definition token is its own definition
    if let Some(own) = flatten_symbols(&forest)
        .into_iter()
        .find(|symbol| symbol.selection_range == target && symbol.name == name)
    {
        return Some(own.leaf());
    }

    let candidates: Vec<Symbol> = prune_client_tree(root, current)
        .into_iter()
        .filter(|symbol| symbol.name == name && expected.is_none_or(|kind| symbol.kind == kind))
        .collect();

    let preceding = candidates
        .into_iter()
        .filter(|symbol| precedes_range(symbol.selection_range, target))
        .max_by_key(|symbol| symbol.selection_range.start);
    if preceding.is_some() {
        return preceding;
    }

    if expected == Some(SymbolKind::Variable) {
        return None;
    }
    let global = flatten_symbols(&forest)
        .into_iter()
        .find(|symbol| symbol.is_function() && symbol.name == name)
        .map(Symbol::leaf);
    if let Some(function) = &global {
        tracing::trace!("Resolved {} to global function at {}", name, function.selection_range);
    }
    global
}

/// `$argv` belongs to the innermost function around it
fn enclosing_function(root: SyntaxNode<'_>, current: SyntaxNode<'_>) -> Option<Symbol> {
    let function = find_parent(current, is_function_definition)?;
    let name = function.first_named_child()?;
    let forest = collect_symbols(root);
    flatten_symbols(&forest)
        .into_iter()
        .find(|symbol| symbol.is_function() && symbol.selection_range == name.range())
        .map(Symbol::leaf)
}

pub fn get_local_defs(uri: &str, root: SyntaxNode<'_>, current: SyntaxNode<'_>) -> Vec<Location> {
    find_definition(root, current)
        .map(|symbol| Location::new(uri, symbol.selection_range))
        .into_iter()
        .collect()
}

/// Every use of the definition `current` resolves to, in document order.
///
/// Variables match within the definition's scope; functions match anywhere
/// in the document.
pub fn get_local_refs(uri: &str, root: SyntaxNode<'_>, current: SyntaxNode<'_>) -> Vec<Location> {
    if current.text() == "argv" {
        return argv_refs(uri, root, current);
    }

    let Some(definition) = find_definition(root, current) else {
        return Vec::new();
    };
    let Some(definition_node) = symbol_node(root, &definition) else {
        return Vec::new();
    };
    let scope = definition_scope(definition_node);

    let mut refs: Vec<SyntaxNode<'_>> = nodes(root)
        .into_iter()
        .filter(|node| node.text() == definition.name)
        .filter(|node| match definition.kind {
            SymbolKind::Function => is_command_name(*node) || is_function_definition_name(*node),
            SymbolKind::Variable => is_variable(*node) && definition_scope(*node) == scope,
        })
        .collect();
    refs.sort_by_key(|node| (node.start_position(), node.end_position()));

    tracing::debug!("Found {} references to {}", refs.len(), definition.name);
    refs.into_iter()
        .map(|node| Location::new(uri, node.range()))
        .collect()
}

/// Every `$argv` of the innermost function around `current`
fn argv_refs(uri: &str, root: SyntaxNode<'_>, current: SyntaxNode<'_>) -> Vec<Location> {
    let Some(function) = find_parent(current, is_function_definition) else {
        return Vec::new();
    };

    let mut refs: Vec<SyntaxNode<'_>> = nodes(root)
        .into_iter()
        .filter(|node| node.kind() == NodeKind::VariableName && node.text() == "argv")
        .filter(|node| definition_scope(*node) == Some(function))
        .collect();
    refs.sort_by_key(|node| (node.start_position(), node.end_position()));

    refs.into_iter()
        .map(|node| Location::new(uri, node.range()))
        .collect()
}

/// Classify where the definition of `current` lives.
///
/// Builtins win over everything, then local definitions (appended to
/// `definitions`), then a bare command name points at another file.
pub fn get_definition_kind(
    uri: &str,
    root: SyntaxNode<'_>,
    current: SyntaxNode<'_>,
    definitions: &mut Vec<Location>,
    builtins: &dyn BuiltinRegistry,
) -> DefinitionKind {
    if builtins.is_builtin(current.text()) {
        return DefinitionKind::None;
    }

    definitions.extend(get_local_defs(uri, root, current));
    if !definitions.is_empty() {
        return DefinitionKind::Local;
    }

    if is_command_name(current) {
        return DefinitionKind::File;
    }
    DefinitionKind::None
}
