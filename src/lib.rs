//! Makor - source reference resolution and validation for multi-volume
//! Torah and Chassidic texts.
//!
//! The engine maps a book's internal page numbers to the equivalent
//! locations on five external platforms (HebrewBooks, Chabad.org, Lahak,
//! ChabadLibrary, Sefaria) and keeps per-chapter page ranges internally
//! consistent as editors enter data by hand or import it.
//!
//! Layering:
//! - [`models`] - the catalog data shapes
//! - [`resolve`] - the pure resolution engine (locator, boundary
//!   validator, link builder, folio parsing)
//! - [`sync`] - the async Chabad.org chapter importer
//! - [`catalog`] - the JSON-file catalog the CLI passes into the engine
//! - [`config`] / [`cli`] - settings and the administrative command tree

pub mod catalog;
pub mod cli;
pub mod config;
pub mod models;
pub mod resolve;
pub mod sync;
