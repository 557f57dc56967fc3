//! Service layer for fishscope

pub mod analyzer;
pub mod config;
pub mod definition;
pub mod geometry;
pub mod scope;
pub mod symbols;

pub use analyzer::{Analyzer, DocumentStore, InMemoryDocuments};
pub use config::{ConfigService, DefaultConfigService};
pub use definition::{find_definition, get_definition_kind, get_local_defs, get_local_refs};
pub use geometry::{contains_range, is_node_within_range, is_position_within_range, precedes_range};
pub use scope::{most_recent_symbols, nearby_symbols, prune_client_tree};
pub use symbols::{collect_symbols, definition_symbols, flatten_symbols, symbol_node};
