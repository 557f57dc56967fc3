//! Symbols command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::App;
use crate::cli::response::{SymbolOutput, SymbolsResponse};
use crate::models::symbol::{Symbol, SymbolKind};
use crate::services::symbols::flatten_symbols;

#[derive(Args, Debug)]
pub struct SymbolsArgs {
    /// Tree dump (JSON)
    pub file: PathBuf,

    /// Fish file the tree was parsed from
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Only symbols of this kind (function, variable)
    #[arg(short, long)]
    pub kind: Option<SymbolKind>,

    /// List every symbol at top level instead of nesting
    #[arg(long)]
    pub flat: bool,
}

pub fn execute(args: SymbolsArgs, app: &App) -> Result<()> {
    let document = app.load_document(&args.file, args.path.as_deref())?;
    let forest = document.analyzer.document_symbols(&document.uri);

    let symbols: Vec<Symbol> = if args.flat || args.kind.is_some() {
        flatten_symbols(&forest)
            .into_iter()
            .filter(|symbol| args.kind.is_none_or(|kind| symbol.kind == kind))
            .map(|symbol| if args.flat { symbol.leaf() } else { symbol.clone() })
            .collect()
    } else {
        forest
    };

    let symbols: Vec<SymbolOutput> = symbols
        .iter()
        .map(|symbol| SymbolOutput::from_symbol(symbol, &document.file))
        .collect();

    app.output.print_success(SymbolsResponse {
        count: symbols.len(),
        symbols,
    });
    Ok(())
}
