//! Command-line interface for Makor.
//!
//! The CLI is the engine's reference caller: it owns the catalog file,
//! passes books into the pure resolve functions, and persists derived
//! results back out.

mod commands;

pub use commands::{is_verbose, run};
