//! Deep-link construction for the supported external platforms.
//!
//! Every builder is identifier-gated: a book or chapter without the
//! identifier a platform needs yields `None` for that platform, never an
//! error and never a malformed URL. The three `get_links_for_*` entry
//! points always return the full platform set.

use crate::models::{Platform, PlatformLinks, SourceBook, SourceBookChapter};

use super::locate::locate_chapter;

const HEBREWBOOKS_BASE: &str = "https://hebrewbooks.org";
const HEBREWBOOKS_DOWNLOAD_BASE: &str = "https://download.hebrewbooks.org";
const CHABAD_ORG_TEXTS_BASE: &str = "https://www.chabad.org/torah-texts";
const LAHAK_BASE: &str = "https://lahak.org";
const CHABAD_LIBRARY_BASE: &str = "https://chabadlibrary.org/books";
const SEFARIA_BASE: &str = "https://www.sefaria.org";

// ---- HebrewBooks ----

/// PDF viewer URL for a specific internal page, using the book-level
/// offset. `None` without a `hebrewbooks_id`.
pub fn hebrew_books_page_url(book: &SourceBook, page: u32) -> Option<String> {
    let id = book.hebrewbooks_id?;
    let pgnum = i64::from(page) + i64::from(book.hebrewbooks_offset);
    Some(format!("{HEBREWBOOKS_BASE}/pdfpager.aspx?req={id}&pgnum={pgnum}"))
}

/// Book info page URL.
pub fn hebrew_books_book_url(book: &SourceBook) -> Option<String> {
    let id = book.hebrewbooks_id?;
    Some(format!("{HEBREWBOOKS_BASE}/{id}"))
}

/// Cover image URL at the requested dimensions.
pub fn hebrew_books_cover_url(book: &SourceBook, width: u32, height: u32) -> Option<String> {
    let id = book.hebrewbooks_id?;
    Some(format!(
        "{HEBREWBOOKS_BASE}/coverpage.aspx?req={id}&width={width}&height={height}"
    ))
}

/// Full PDF download URL.
pub fn hebrew_books_download_url(book: &SourceBook) -> Option<String> {
    let id = book.hebrewbooks_id?;
    Some(format!(
        "{HEBREWBOOKS_DOWNLOAD_BASE}/downloadhandler.ashx?req={id}"
    ))
}

/// HebrewBooks page number for an internal page, honoring a chapter's
/// pagination override when present.
///
/// When the owning chapter carries `hebrewbooks_start_page`, the platform
/// page is that override plus the page's distance from the chapter's own
/// `start_page`; otherwise the book-level offset applies directly.
fn hebrew_books_resolved_page(
    book: &SourceBook,
    chapter: Option<&SourceBookChapter>,
    page: u32,
) -> i64 {
    if let Some(chapter) = chapter {
        if let (Some(hb_start), Some(start)) = (chapter.hebrewbooks_start_page, chapter.start_page)
        {
            return i64::from(hb_start) + (i64::from(page) - i64::from(start));
        }
    }
    i64::from(page) + i64::from(book.hebrewbooks_offset)
}

fn hebrew_books_resolved_page_url(
    book: &SourceBook,
    chapter: Option<&SourceBookChapter>,
    page: u32,
) -> Option<String> {
    let id = book.hebrewbooks_id?;
    let pgnum = hebrew_books_resolved_page(book, chapter, page);
    Some(format!("{HEBREWBOOKS_BASE}/pdfpager.aspx?req={id}&pgnum={pgnum}"))
}

// ---- Chabad.org ----

pub fn chabad_org_chapter_url(chapter: &SourceBookChapter) -> Option<String> {
    let article_id = chapter.chabad_org_article_id?;
    Some(format!("{CHABAD_ORG_TEXTS_BASE}/{article_id}"))
}

pub fn chabad_org_book_url(book: &SourceBook) -> Option<String> {
    let root_id = book.chabad_org_root_id?;
    Some(format!("{CHABAD_ORG_TEXTS_BASE}/{root_id}"))
}

// ---- Lahak ----

pub fn lahak_chapter_url(chapter: &SourceBookChapter) -> Option<String> {
    let content_id = chapter.lahak_content_id.as_deref()?;
    Some(format!("{LAHAK_BASE}/{content_id}"))
}

pub fn lahak_book_url(book: &SourceBook) -> Option<String> {
    let root_id = book.lahak_root_id.as_deref()?;
    Some(format!("{LAHAK_BASE}/{root_id}"))
}

// ---- ChabadLibrary ----

pub fn chabad_library_book_url(book: &SourceBook) -> Option<String> {
    let id = book.chabadlibrary_id.as_deref()?;
    Some(format!("{CHABAD_LIBRARY_BASE}/{id}"))
}

// ---- Sefaria ----

pub fn sefaria_chapter_url(chapter: &SourceBookChapter) -> Option<String> {
    let sefaria_ref = chapter.sefaria_ref.as_deref()?;
    Some(format!(
        "{SEFARIA_BASE}/{}?lang=bi",
        urlencoding::encode(sefaria_ref)
    ))
}

pub fn sefaria_book_url(book: &SourceBook) -> Option<String> {
    let slug = book.sefaria_slug.as_deref()?;
    Some(format!(
        "{SEFARIA_BASE}/{}?tab=contents",
        urlencoding::encode(slug)
    ))
}

// ---- Uniform construction ----

/// What a link set is being built for.
enum LinkTarget<'a> {
    Book,
    Chapter(&'a SourceBookChapter),
    Page {
        chapter: Option<&'a SourceBookChapter>,
        page: u32,
    },
}

type BuildFn = for<'a> fn(&'a SourceBook, &LinkTarget<'a>) -> Option<String>;

/// One entry per platform; adding a platform means adding one row here
/// (plus its slot on `PlatformLinks`).
const PLATFORM_BUILDERS: [(Platform, BuildFn); 5] = [
    (Platform::Hebrewbooks, build_hebrewbooks),
    (Platform::ChabadOrg, build_chabad_org),
    (Platform::Lahak, build_lahak),
    (Platform::Chabadlibrary, build_chabad_library),
    (Platform::Sefaria, build_sefaria),
];

fn build_hebrewbooks(book: &SourceBook, target: &LinkTarget<'_>) -> Option<String> {
    match target {
        LinkTarget::Book => hebrew_books_book_url(book),
        LinkTarget::Chapter(chapter) => match chapter.start_page {
            Some(start) => hebrew_books_resolved_page_url(book, Some(chapter), start),
            None => hebrew_books_book_url(book),
        },
        LinkTarget::Page { chapter, page } => {
            hebrew_books_resolved_page_url(book, *chapter, *page)
        }
    }
}

fn build_chabad_org(book: &SourceBook, target: &LinkTarget<'_>) -> Option<String> {
    match target {
        LinkTarget::Book => chabad_org_book_url(book),
        LinkTarget::Chapter(chapter) => chabad_org_chapter_url(chapter),
        LinkTarget::Page { chapter, .. } => chapter.and_then(chabad_org_chapter_url),
    }
}

fn build_lahak(book: &SourceBook, target: &LinkTarget<'_>) -> Option<String> {
    match target {
        LinkTarget::Book => lahak_book_url(book),
        LinkTarget::Chapter(chapter) => lahak_chapter_url(chapter),
        LinkTarget::Page { chapter, .. } => chapter.and_then(lahak_chapter_url),
    }
}

fn build_chabad_library(book: &SourceBook, target: &LinkTarget<'_>) -> Option<String> {
    // ChabadLibrary has no chapter- or page-level addressing.
    match target {
        LinkTarget::Book | LinkTarget::Chapter(_) | LinkTarget::Page { .. } => {
            chabad_library_book_url(book)
        }
    }
}

fn build_sefaria(book: &SourceBook, target: &LinkTarget<'_>) -> Option<String> {
    match target {
        LinkTarget::Book => sefaria_book_url(book),
        LinkTarget::Chapter(chapter) => sefaria_chapter_url(chapter),
        LinkTarget::Page { chapter, .. } => chapter.and_then(sefaria_chapter_url),
    }
}

fn links_for(book: &SourceBook, target: LinkTarget<'_>) -> PlatformLinks {
    let mut links = PlatformLinks::default();
    for (platform, build) in PLATFORM_BUILDERS {
        links.set(platform, build(book, &target));
    }
    links
}

/// Links for a specific internal page.
///
/// Resolves the owning chapter first; chapter-addressed platforms
/// (Chabad.org, Lahak, Sefaria) yield links only when a chapter matches
/// and carries the identifier.
pub fn get_links_for_page(book: &SourceBook, page: u32) -> PlatformLinks {
    let chapter = locate_chapter(&book.chapters, page);
    links_for(book, LinkTarget::Page { chapter, page })
}

/// Links for a known chapter, without page arithmetic.
pub fn get_links_for_chapter(book: &SourceBook, chapter: &SourceBookChapter) -> PlatformLinks {
    links_for(book, LinkTarget::Chapter(chapter))
}

/// Book-level links from the book's own root identifiers.
pub fn get_links_for_book(book: &SourceBook) -> PlatformLinks {
    links_for(book, LinkTarget::Book)
}
