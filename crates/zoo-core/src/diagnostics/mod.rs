//! Diagnostics: the records rules emit, their locations, and how they are rendered

pub mod renderer;
pub mod types;

pub use renderer::{DiagnosticRenderer, OutputFormat};
pub use types::*;
