//! fishscope - semantic core of a fish shell language server
//!
//! Works over an already-parsed fish syntax tree: collects function and
//! variable symbols, resolves go-to-definition and find-references, and
//! lists the names visible at a position. Scoping follows fish: functions
//! are global, variables resolve to the nearest earlier definition in an
//! enclosing scope.

pub mod app;
pub mod cli;
pub mod error;
pub mod infra;
pub mod models;
pub mod services;

pub use error::{FishscopeError, FishscopeResult};
pub use services::analyzer::Analyzer;
