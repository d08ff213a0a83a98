//! Data models for Makor.

mod book;
mod chapter;
mod links;

pub use book::{ReferenceStyle, SourceBook};
pub use chapter::{PageRange, PageValidationStatus, SourceBookChapter};
pub use links::{Platform, PlatformLinks};
