//! The pure resolution engine.
//!
//! Everything in this module is a synchronous, side-effect-free function
//! over caller-supplied data:
//! - `locate`: map an internal page number to the chapter that contains it
//! - `boundaries`: validate that chapter page ranges are well-formed and
//!   non-overlapping
//! - `links`: build deep links into the supported external platforms
//! - `folio`: parse folio-style references (12a, 12b) into page numbers
//!
//! Missing identifiers, malformed ranges, and unmatched pages are data
//! conditions reported as `None` or status flags, never as errors.

mod boundaries;
mod folio;
mod links;
mod locate;

pub use boundaries::{validate_page_boundaries, BoundaryReport, ChapterRef, OverlapPair};
pub use folio::{format_folio, parse_folio, FolioRef, FolioSide};
pub use links::{
    chabad_library_book_url, chabad_org_book_url, chabad_org_chapter_url, get_links_for_book,
    get_links_for_chapter, get_links_for_page, hebrew_books_book_url, hebrew_books_cover_url,
    hebrew_books_download_url, hebrew_books_page_url, lahak_book_url, lahak_chapter_url,
    sefaria_book_url, sefaria_chapter_url,
};
pub use locate::{chapter_page_range, locate_chapter};
