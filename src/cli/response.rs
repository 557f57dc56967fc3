//! Response types for CLI output
//!
//! Positions are 1-indexed, paths relative to the working directory where
//! possible.

use serde::Serialize;

use super::OutputContext;
use crate::models::lsp::{Location, Range, uri_to_path};
use crate::models::symbol::Symbol;

/// Span of text in a file
#[derive(Debug, Clone, Serialize)]
pub struct LocationOutput {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl LocationOutput {
    pub fn new(file: impl Into<String>, range: Range) -> Self {
        let (line, column) = range.start.to_display();
        let (end_line, end_column) = range.end.to_display();
        Self {
            file: file.into(),
            line,
            column,
            end_line,
            end_column,
            text: None,
        }
    }

    pub fn from_location(location: &Location, ctx: &OutputContext) -> Self {
        Self::new(ctx.relative_path(&uri_to_path(&location.uri)), location.range)
    }

    pub fn with_text(mut self, text: Option<String>) -> Self {
        self.text = text;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolOutput {
    pub name: String,
    pub kind: String,
    pub location: LocationOutput,
    pub selection: LocationOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SymbolOutput>>,
}

impl SymbolOutput {
    pub fn from_symbol(symbol: &Symbol, file: &str) -> Self {
        Self {
            name: symbol.name.clone(),
            kind: symbol.kind.to_string(),
            location: LocationOutput::new(file, symbol.range),
            selection: LocationOutput::new(file, symbol.selection_range),
            detail: symbol.detail.clone(),
            children: if symbol.children.is_empty() {
                None
            } else {
                Some(
                    symbol
                        .children
                        .iter()
                        .map(|s| SymbolOutput::from_symbol(s, file))
                        .collect(),
                )
            },
        }
    }
}

/// Response for symbols and nearby commands
#[derive(Debug, Serialize)]
pub struct SymbolsResponse {
    pub count: usize,
    pub symbols: Vec<SymbolOutput>,
}

/// Response for refs command
#[derive(Debug, Serialize)]
pub struct ReferencesResponse {
    pub count: usize,
    pub references: Vec<LocationOutput>,
}

/// Response for def command
#[derive(Debug, Serialize)]
pub struct DefinitionResponse {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<LocationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for kind command
#[derive(Debug, Serialize)]
pub struct KindResponse {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
