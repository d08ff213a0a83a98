//! Resolve command: platform links for a book, chapter, or page.

use anyhow::{bail, Context};
use console::style;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::models::{Platform, PlatformLinks, ReferenceStyle, SourceBook, SourceBookChapter};
use crate::resolve::{
    get_links_for_book, get_links_for_chapter, get_links_for_page, locate_chapter, parse_folio,
};

/// Machine-readable resolve response.
#[derive(Debug, Serialize)]
struct ResolveResponse<'a> {
    links: &'a PlatformLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_chapter: Option<&'a SourceBookChapter>,
}

/// Parse the `--page` argument: a plain page number, or a folio
/// reference (12a/12b) for folio-style books.
fn parse_page_arg(book: &SourceBook, raw: &str) -> anyhow::Result<u32> {
    if let Ok(page) = raw.trim().parse::<u32>() {
        if page == 0 {
            bail!("page must be positive");
        }
        return Ok(page);
    }
    if book.reference_style == ReferenceStyle::Folio {
        if let Some(folio) = parse_folio(raw) {
            return Ok(folio.page);
        }
        bail!("'{raw}' is not a page number or folio reference (like 12a)");
    }
    bail!("'{raw}' is not a page number");
}

/// Find a chapter by `chapter_number`, falling back to `sort`.
fn find_chapter(book: &SourceBook, number: u32) -> Option<&SourceBookChapter> {
    book.chapters
        .iter()
        .find(|ch| ch.chapter_number == Some(number))
        .or_else(|| book.chapters.iter().find(|ch| ch.sort == Some(number)))
}

fn print_links(links: &PlatformLinks) {
    for platform in Platform::ALL {
        match links.get(platform) {
            Some(url) => println!("  {:<14} {}", platform.as_str(), style(url).cyan()),
            None => println!("  {:<14} {}", platform.as_str(), style("-").dim()),
        }
    }
}

fn chapter_label(chapter: &SourceBookChapter) -> String {
    let name = chapter
        .chapter_name_english
        .as_deref()
        .or(chapter.chapter_name.as_deref())
        .unwrap_or("(unnamed)");
    match chapter.chapter_number {
        Some(n) => format!("chapter {n}: {name}"),
        None => name.to_string(),
    }
}

pub fn cmd_resolve(
    settings: &Settings,
    slug: &str,
    page: Option<&str>,
    chapter_number: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = Catalog::load(settings.catalog_path())
        .with_context(|| format!("loading catalog from {}", settings.catalog_path().display()))?;
    let book = catalog
        .find_by_slug(slug)
        .with_context(|| format!("no book with slug '{slug}'"))?;

    let (links, resolved_chapter) = match (page, chapter_number) {
        (Some(raw), None) => {
            let page = parse_page_arg(book, raw)?;
            let chapter = locate_chapter(&book.chapters, page);
            (get_links_for_page(book, page), chapter)
        }
        (None, Some(number)) => {
            if number == 0 {
                bail!("chapter must be positive");
            }
            let chapter = find_chapter(book, number)
                .with_context(|| format!("'{slug}' has no chapter {number}"))?;
            (get_links_for_chapter(book, chapter), Some(chapter))
        }
        (None, None) => (get_links_for_book(book), None),
        // clap's conflicts_with makes this unreachable from the parser
        (Some(_), Some(_)) => bail!("--page and --chapter are mutually exclusive"),
    };

    if json {
        let response = ResolveResponse {
            links: &links,
            resolved_chapter,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", style(&book.canonical_name).bold());
    match resolved_chapter {
        Some(chapter) => println!("  resolved to {}", chapter_label(chapter)),
        None if page.is_some() => println!(
            "  {} page is outside every chapter range",
            style("!").yellow()
        ),
        None => {}
    }
    print_links(&links);
    Ok(())
}
