//! Book inspection commands.

use console::style;

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::models::{Platform, SourceBook};
use crate::resolve::get_links_for_book;

/// Platforms a book can link to at the book level, as a compact string.
fn platform_summary(book: &SourceBook) -> String {
    let available = get_links_for_book(book).available();
    if available.is_empty() {
        return "-".to_string();
    }
    available
        .iter()
        .map(Platform::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// List all books with their platform coverage.
pub fn cmd_book_list(settings: &Settings) -> anyhow::Result<()> {
    let catalog = Catalog::load(settings.catalog_path())?;

    if catalog.books().is_empty() {
        println!("{} Catalog is empty", style("!").yellow());
        return Ok(());
    }

    println!(
        "{:<24} {:<32} {:>8}  {}",
        style("SLUG").bold(),
        style("NAME").bold(),
        style("CHAPTERS").bold(),
        style("PLATFORMS").bold()
    );
    for book in catalog.books() {
        println!(
            "{:<24} {:<32} {:>8}  {}",
            book.slug,
            book.canonical_name,
            book.chapters.len(),
            platform_summary(book)
        );
    }
    println!("\n{} book(s)", catalog.books().len());
    Ok(())
}
