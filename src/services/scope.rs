//! Scope pruning
//!
//! Narrows the symbol forest to the names visible from a position. fish
//! scoping is mostly textual: the nearest earlier definition wins, and
//! functions are visible everywhere.

use std::collections::{HashMap, HashSet};

use super::geometry::contains_range;
use super::symbols::{collect_symbols, flatten_symbols};
use crate::infra::node_types::is_program;
use crate::infra::syntax::SyntaxNode;
use crate::models::lsp::Range;
use crate::models::symbol::Symbol;

/// Symbols reachable from `reference`, outermost level first.
///
/// Each ancestor step adds one level of the forest. Only functions whose
/// range contains the reference are descended into.
pub fn prune_client_tree(root: SyntaxNode<'_>, reference: SyntaxNode<'_>) -> Vec<Symbol> {
    let forest = collect_symbols(root);
    let target = reference.range();

    let mut pruned = Vec::new();
    let mut level: Vec<&Symbol> = forest.iter().collect();
    let mut current = reference.parent();

    while let Some(node) = current
        && !is_program(node)
    {
        current = node.parent();
        pruned.extend(level.iter().map(|symbol| symbol.leaf()));
        level = level
            .into_iter()
            .filter(|symbol| symbol.is_function() && contains_range(symbol.range, target))
            .flat_map(|symbol| symbol.children.iter())
            .collect();
    }

    pruned
}

/// Latest definition of each name declared on a line before `range`.
///
/// Output keeps the order in which names were first seen.
pub fn most_recent_symbols<'a, I>(symbols: I, range: Range) -> Vec<Symbol>
where
    I: IntoIterator<Item = &'a Symbol>,
{
    let mut result: Vec<Symbol> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for symbol in symbols {
        if range.start.line <= symbol.range.start.line {
            continue;
        }
        match index.get(&symbol.name) {
            Some(&slot) => result[slot] = symbol.clone(),
            None => {
                index.insert(symbol.name.clone(), result.len());
                result.push(symbol.clone());
            }
        }
    }

    result
}

/// Completion candidates at `range`: visible local definitions, then every
/// function in the document. Names are unique.
pub fn nearby_symbols(root: SyntaxNode<'_>, range: Range) -> Vec<Symbol> {
    let forest = collect_symbols(root);
    let flat = flatten_symbols(&forest);

    // pre-order: the last enclosing function is the innermost one
    let scope = flat
        .iter()
        .rev()
        .find(|symbol| symbol.is_function() && contains_range(symbol.range, range));

    let recent = match scope {
        Some(function) => {
            tracing::trace!("Nearby symbols scoped to function: {}", function.name);
            most_recent_symbols(flatten_symbols(&function.children), range)
        }
        None => most_recent_symbols(&forest, range),
    };

    let functions = flat.iter().filter(|symbol| symbol.is_function()).copied();

    let mut seen = HashSet::new();
    recent
        .iter()
        .chain(functions)
        .filter(|symbol| seen.insert(symbol.name.clone()))
        .map(Symbol::leaf)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::node_types::NodeKind;
    use crate::infra::syntax::fixture::parse;
    use crate::infra::syntax::nodes;
    use crate::models::lsp::Position;
    use crate::models::symbol::SymbolKind;

    fn names(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(|s| s.name.as_str()).collect()
    }

    fn at_line(line: u32) -> Range {
        Range::point(Position::new(line, 0))
    }

    #[test]
    fn test_prune_hides_other_function_locals() {
        let source = "function func_a\n    set -l var_b 1; set -l var_c 2\nend\nset -l search_for 3\necho $search_for\n";
        let tree = parse(source);
        let root = tree.root().unwrap();
        let reference = nodes(root)
            .into_iter()
            .find(|n| n.kind() == NodeKind::VariableName)
            .unwrap();

        let pruned = prune_client_tree(root, reference);
        assert_eq!(names(&pruned), vec!["func_a", "search_for"]);
    }

    #[test]
    fn test_prune_descends_into_enclosing_function() {
        let source = "set -l x 0\nfunction f\n    set -l y 1\n    echo \"$y\"\nend\n";
        let tree = parse(source);
        let root = tree.root().unwrap();
        let reference = nodes(root)
            .into_iter()
            .find(|n| n.kind() == NodeKind::VariableName && n.text() == "y")
            .unwrap();

        let pruned = prune_client_tree(root, reference);
        assert_eq!(names(&pruned), vec!["x", "f", "y"]);
        assert!(pruned.iter().all(|s| !s.has_children()));
    }

    #[test]
    fn test_most_recent_keeps_latest_per_name() {
        let source = "set a 1\nset b 2\nset a 3\nset c 4\n";
        let tree = parse(source);
        let symbols = collect_symbols(tree.root().unwrap());

        let recent = most_recent_symbols(&symbols, at_line(3));
        assert_eq!(names(&recent), vec!["a", "b"]);
        assert_eq!(recent[0].range.start.line, 2);
    }

    #[test]
    fn test_most_recent_skips_same_line() {
        let tree = parse("set a 1; set b 2\n");
        let symbols = collect_symbols(tree.root().unwrap());
        assert!(most_recent_symbols(&symbols, at_line(0)).is_empty());
        assert_eq!(most_recent_symbols(&symbols, at_line(1)).len(), 2);
    }

    #[test]
    fn test_most_recent_is_idempotent() {
        let source = "set a 1\nset b 2\nset a 3\nfunction f\nend\nset b 5\n";
        let tree = parse(source);
        let symbols = collect_symbols(tree.root().unwrap());

        for line in 0..7 {
            let once = most_recent_symbols(&symbols, at_line(line));
            let twice = most_recent_symbols(&once, at_line(line));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_nearby_inside_function() {
        let source = "set -g outside 1\nfunction f\n    set -l inner 1\n    function g\n    end\n    \nend\nfunction h\nend\n";
        let tree = parse(source);
        let nearby = nearby_symbols(tree.root().unwrap(), at_line(5));
        assert_eq!(names(&nearby), vec!["inner", "g", "f", "h"]);
    }

    #[test]
    fn test_nearby_at_top_level() {
        let source = "set x 1\nfunction f\n    set -l hidden 1\n    function nested\n    end\nend\nset x 2\n\n";
        let tree = parse(source);
        let nearby = nearby_symbols(tree.root().unwrap(), at_line(7));

        assert_eq!(names(&nearby), vec!["x", "f", "nested"]);
        assert_eq!(nearby[0].range.start.line, 6);
        assert_eq!(nearby[1].kind, SymbolKind::Function);
        assert!(nearby.iter().all(|s| !s.has_children()));
    }
}
