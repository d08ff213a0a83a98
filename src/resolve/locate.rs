//! Page-to-chapter resolution.

use crate::models::{PageRange, SourceBookChapter};

/// Usable page range of a chapter.
///
/// Returns `None` when either bound is absent ("not yet catalogued") or
/// when `end_page < start_page`. A malformed chapter is reported as having
/// no range rather than treated as an error.
pub fn chapter_page_range(chapter: &SourceBookChapter) -> Option<PageRange> {
    let start = chapter.start_page?;
    let end = chapter.end_page?;
    if end < start {
        return None;
    }
    Some(PageRange { start, end })
}

/// Find the chapter that contains an internal page number.
///
/// Chapters are considered in ascending (`sort`, `chapter_number`) order
/// regardless of input order; the first whose inclusive range contains
/// `page` wins. Chapters without a usable range are skipped. Pages in a
/// gap, before the first chapter, or after the last return `None` — an
/// expected case (front matter), not an error.
pub fn locate_chapter(chapters: &[SourceBookChapter], page: u32) -> Option<&SourceBookChapter> {
    let mut ordered: Vec<&SourceBookChapter> = chapters.iter().collect();
    ordered.sort_by_key(|ch| ch.order_key());

    ordered
        .into_iter()
        .find(|ch| chapter_page_range(ch).is_some_and(|range| range.contains(page)))
}
