//! Data models for fishscope
//!
//! Contains core type definitions used throughout the application.

pub mod config;
pub mod lsp;
pub mod symbol;

// Re-export commonly used types
pub use config::FishscopeConfig;
pub use lsp::{Location, Position, Range};
pub use symbol::{DefinitionKind, Symbol, SymbolKind};
