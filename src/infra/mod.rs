//! Infrastructure layer for fishscope
//!
//! Syntax trees, node classification and the collaborators the resolver
//! consults (builtin registry, dependency lookup).

pub mod builtins;
pub mod dependency;
pub mod node_types;
pub mod syntax;
