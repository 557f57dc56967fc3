//! Error types for fishscope
//!
//! Resolution itself never fails: missing nodes and unknown documents come
//! back as empty results. Errors are only raised while loading trees and
//! configuration.

use thiserror::Error;

use crate::infra::syntax::Point;

pub type FishscopeResult<T> = std::result::Result<T, FishscopeError>;

#[derive(Debug, Error)]
pub enum FishscopeError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A syntax tree that does not describe its source text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Node {node} spans bytes {start}..{end} but source is {len} bytes")]
    SpanOutOfBounds {
        node: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Node {node} byte offset {offset} is not on a char boundary")]
    NotCharBoundary { node: usize, offset: usize },

    #[error("Node {node} ends before it starts ({start:?} > {end:?})")]
    InvertedSpan { node: usize, start: Point, end: Point },

    #[error("Node {node} lies outside its parent {parent}")]
    ChildOutsideParent { node: usize, parent: usize },

    #[error("Node {0} has no parent but is not the root")]
    OrphanNode(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
