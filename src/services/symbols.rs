//! Symbol collection
//!
//! Builds the nested symbol forest of a document. Names defined inside a
//! function become children of that function's symbol and never leak into
//! the enclosing level. Flat views are derived from the forest.

use crate::infra::node_types::{is_command, is_definition, is_loop, is_variable_definition};
use crate::infra::syntax::{
    SyntaxNode, get_node_at_range, preceding_comments, range_with_preceding_comments,
};
use crate::models::symbol::{Symbol, SymbolKind};

/// Nested symbol forest for everything under `node`, in source order
pub fn collect_symbols(node: SyntaxNode<'_>) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    collect_into(node, &mut symbols);
    symbols
}

fn collect_into(node: SyntaxNode<'_>, out: &mut Vec<Symbol>) {
    if is_definition(node) {
        let mut children = Vec::new();
        for child in node.children() {
            collect_into(child, &mut children);
        }
        match function_symbol(node) {
            Some(symbol) => out.push(symbol.with_children(children)),
            None => out.extend(children),
        }
    } else if is_variable_definition(node) {
        out.push(variable_symbol(node));
    } else {
        for child in node.children() {
            collect_into(child, out);
        }
    }
}

fn function_symbol(node: SyntaxNode<'_>) -> Option<Symbol> {
    let name = node.first_named_child()?;
    let symbol = Symbol::new(
        name.text(),
        SymbolKind::Function,
        range_with_preceding_comments(node),
        name.range(),
    );
    Some(symbol.with_detail(preceding_comments(node)))
}

fn variable_symbol(node: SyntaxNode<'_>) -> Symbol {
    let declaration = declaring_node(node);
    Symbol::new(
        node.text(),
        SymbolKind::Variable,
        range_with_preceding_comments(declaration),
        node.range(),
    )
    .with_detail(preceding_comments(declaration))
}

/// The construct a variable definition belongs to: the `set`/`read`
/// command, the `for` loop, or the argument name token itself
fn declaring_node(node: SyntaxNode<'_>) -> SyntaxNode<'_> {
    match node.parent() {
        Some(parent) if is_command(parent) || is_loop(parent) => parent,
        _ => node,
    }
}

/// Pre-order flattening: each symbol precedes its children
pub fn flatten_symbols(symbols: &[Symbol]) -> Vec<&Symbol> {
    let mut result = Vec::new();
    let mut stack: Vec<&Symbol> = symbols.iter().rev().collect();
    while let Some(symbol) = stack.pop() {
        result.push(symbol);
        stack.extend(symbol.children.iter().rev());
    }
    result
}

/// Top-level forest where each function lists all of its local
/// definitions, at any depth, as direct children
pub fn definition_symbols(root: SyntaxNode<'_>) -> Vec<Symbol> {
    collect_symbols(root)
        .into_iter()
        .map(|symbol| {
            if !symbol.is_function() {
                return symbol;
            }
            let locals = flatten_symbols(&symbol.children)
                .into_iter()
                .map(Symbol::leaf)
                .collect();
            symbol.leaf().with_children(locals)
        })
        .collect()
}

/// Name token a symbol was collected from
pub fn symbol_node<'t>(root: SyntaxNode<'t>, symbol: &Symbol) -> Option<SyntaxNode<'t>> {
    get_node_at_range(root, symbol.selection_range)
}
