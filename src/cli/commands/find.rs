//! Position-based commands: def, refs, kind, nearby

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::{App, LoadedDocument};
use crate::cli::ParsedLocation;
use crate::cli::response::{
    DefinitionResponse, KindResponse, LocationOutput, ReferencesResponse, SymbolOutput,
    SymbolsResponse,
};
use crate::models::lsp::{Location, Position};
use crate::models::symbol::DefinitionKind;

#[derive(Args, Debug)]
pub struct PositionArgs {
    /// Tree dump with position (tree.json:line[:column])
    pub location: String,

    /// Fish file the tree was parsed from
    #[arg(long)]
    pub path: Option<PathBuf>,
}

impl PositionArgs {
    fn open(&self, app: &App) -> Result<(LoadedDocument, Position)> {
        let location = ParsedLocation::parse(&self.location)?.to_absolute()?;
        let document = app.load_document(&location.file, self.path.as_deref())?;
        location.validate_position_with_content(&document.source)?;
        Ok((document, location.position()))
    }
}

fn location_output(app: &App, document: &LoadedDocument, location: &Location) -> LocationOutput {
    LocationOutput::from_location(location, &app.output)
        .with_text(document.analyzer.location_text(location))
}

pub fn def(args: PositionArgs, app: &App) -> Result<()> {
    let (document, position) = args.open(app)?;
    let analyzer = &document.analyzer;

    let kind = analyzer.definition_kind(&document.uri, position);
    let definition = analyzer
        .goto_definition(&document.uri, position)
        .first()
        .map(|location| location_output(app, &document, location));

    let message = match (kind, &definition) {
        (DefinitionKind::None, _) => Some("No definition (builtin or unresolved name)".to_string()),
        (_, None) => Some("Definition not found".to_string()),
        _ => None,
    };

    app.output.print_success(DefinitionResponse {
        kind: kind.to_string(),
        definition,
        message,
    });
    Ok(())
}

pub fn refs(args: PositionArgs, app: &App) -> Result<()> {
    let (document, position) = args.open(app)?;

    let references: Vec<LocationOutput> = document
        .analyzer
        .references(&document.uri, position)
        .iter()
        .map(|location| location_output(app, &document, location))
        .collect();

    app.output.print_success(ReferencesResponse {
        count: references.len(),
        references,
    });
    Ok(())
}

pub fn kind(args: PositionArgs, app: &App) -> Result<()> {
    let (document, position) = args.open(app)?;
    let analyzer = &document.analyzer;

    let kind = analyzer.definition_kind(&document.uri, position);
    let name = analyzer
        .references(&document.uri, position)
        .first()
        .and_then(|location| analyzer.location_text(location));

    app.output.print_success(KindResponse {
        kind: kind.to_string(),
        name,
    });
    Ok(())
}

pub fn nearby(args: PositionArgs, app: &App) -> Result<()> {
    let (document, position) = args.open(app)?;

    let symbols: Vec<SymbolOutput> = document
        .analyzer
        .completion_symbols(&document.uri, position)
        .iter()
        .map(|symbol| SymbolOutput::from_symbol(symbol, &document.file))
        .collect();

    app.output.print_success(SymbolsResponse {
        count: symbols.len(),
        symbols,
    });
    Ok(())
}
