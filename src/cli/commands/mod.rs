//! Command implementations for fishscope

pub mod config;
pub mod find;
pub mod symbols;
