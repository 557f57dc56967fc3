//! CLI module for fishscope
//!
//! Commands read a syntax tree dump (JSON) of a fish script and answer
//! navigation queries over it.

pub mod commands;
pub mod location;
pub mod output;
pub mod response;

pub use location::ParsedLocation;
pub use output::OutputContext;

use clap::{Parser, Subcommand};

use commands::{config::ConfigArgs, find::PositionArgs, symbols::SymbolsArgs};

const LONG_ABOUT: &str = r#"
fishscope - definitions, references and symbols for fish scripts

Input is a syntax tree dump: {"source": "...", "root": {kind, start_byte,
end_byte, start, end, children}} as produced by a tree-sitter fish parser.

EXAMPLES:
  fishscope symbols greet.json
  fishscope def greet.json:5:1 --path greet.fish
  fishscope refs greet.json:3:15
  fishscope nearby greet.json:4:1
  fishscope kind greet.json:5:1
"#;

/// fishscope - semantic navigation for fish scripts
#[derive(Parser, Debug)]
#[command(name = "fishscope")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
#[command(after_help = "Use 'fishscope <COMMAND> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the symbols defined in a document
    Symbols(SymbolsArgs),

    /// Go to the definition of the name at a position
    Def(PositionArgs),

    /// Find references to the name at a position
    Refs(PositionArgs),

    /// Symbols visible at a position (completion candidates)
    Nearby(PositionArgs),

    /// Where the definition of the name at a position lives (local, file, none)
    Kind(PositionArgs),

    /// Configuration management
    Config(ConfigArgs),
}
