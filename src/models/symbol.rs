//! Symbol model definitions
//!
//! Core types for representing fish definitions found in a syntax tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lsp::Range;

/// A named definition: a function or a variable.
///
/// `range` covers the whole defining construct including any comments
/// directly above it; `selection_range` covers only the identifier token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub selection_range: Range,
    /// Text of the comments directly preceding the definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        range: Range,
        selection_range: Range,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            selection_range,
            detail: None,
            children: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.detail = (!detail.is_empty()).then_some(detail);
        self
    }

    pub fn with_children(mut self, children: Vec<Symbol>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_function(&self) -> bool {
        self.kind == SymbolKind::Function
    }

    pub fn is_variable(&self) -> bool {
        self.kind == SymbolKind::Variable
    }

    /// Copy of this symbol without its nested children
    pub fn leaf(&self) -> Symbol {
        Symbol {
            children: Vec::new(),
            ..self.clone()
        }
    }

    /// Identity used to compare the nested and flattened views
    pub fn identity(&self) -> (&str, SymbolKind, Range, Range) {
        (&self.name, self.kind, self.range, self.selection_range)
    }
}

/// Symbol classification (the subset of LSP SymbolKind that fish produces)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Variable,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Function => "function",
            Self::Variable => "variable",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SymbolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "function" | "fn" => Ok(Self::Function),
            "variable" | "var" => Ok(Self::Variable),
            _ => Err(format!("Unknown symbol kind: {}", s)),
        }
    }
}

/// Where the definition of a reference lives.
///
/// `File` tells the caller to continue through the function search path;
/// `None` means nothing is resolvable (builtins land here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    Local,
    File,
    None,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Local => "local",
            Self::File => "file",
            Self::None => "none",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_symbol(name: &str, kind: SymbolKind) -> Symbol {
        Symbol::new(
            name,
            kind,
            Range::from_coords(0, 0, 3, 3),
            Range::from_coords(0, 9, 0, 14),
        )
    }

    #[test]
    fn test_with_detail_ignores_empty_text() {
        let sym = make_symbol("greet", SymbolKind::Function).with_detail("");
        assert!(sym.detail.is_none());

        let sym = make_symbol("greet", SymbolKind::Function).with_detail("say hello");
        assert_eq!(sym.detail.as_deref(), Some("say hello"));
    }

    #[test]
    fn test_leaf_drops_children_only() {
        let child = make_symbol("name", SymbolKind::Variable);
        let func = make_symbol("greet", SymbolKind::Function).with_children(vec![child]);
        assert!(func.has_children());

        let leaf = func.leaf();
        assert!(!leaf.has_children());
        assert_eq!(leaf.identity(), func.identity());
    }

    #[test]
    fn test_symbol_kind_parse() {
        assert_eq!("function".parse::<SymbolKind>(), Ok(SymbolKind::Function));
        assert_eq!("VAR".parse::<SymbolKind>(), Ok(SymbolKind::Variable));
        assert!("class".parse::<SymbolKind>().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let sym = make_symbol("greet", SymbolKind::Function);
        let json = serde_json::to_value(&sym).unwrap();
        assert_eq!(json["kind"], "function");
        assert_eq!(json["selection_range"]["start"]["character"], 9);
        assert!(json.get("children").is_none());
        assert!(json.get("detail").is_none());
    }
}
