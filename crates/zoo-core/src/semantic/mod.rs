//! Declaration-level semantic model
//!
//! Resolves the named entities of a single file so rules can inspect them
//! without walking the syntax tree themselves.

pub mod symbol_table;

pub use symbol_table::{Symbol, SymbolKind, SymbolTable};
