//! Chapter page-boundary validation.
//!
//! A single forward pass over chapters in (`sort`, `chapter_number`) order,
//! comparing each chapter's range against the immediately following one.
//! Overlaps between non-adjacent chapters separated by a rangeless chapter
//! are intentionally not detected; editors fix the missing chapter first
//! and re-run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{PageRange, PageValidationStatus, SourceBookChapter};

use super::locate::chapter_page_range;

/// Identifying fields of a chapter involved in an overlap, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRef {
    pub id: String,
    pub sort: Option<u32>,
    pub chapter_number: Option<u32>,
    pub chapter_name: Option<String>,
}

impl From<&SourceBookChapter> for ChapterRef {
    fn from(chapter: &SourceBookChapter) -> Self {
        Self {
            id: chapter.id.clone(),
            sort: chapter.sort,
            chapter_number: chapter.chapter_number,
            chapter_name: chapter.chapter_name.clone(),
        }
    }
}

/// Two adjacent chapters whose ranges share at least one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapPair {
    pub current: ChapterRef,
    pub next: ChapterRef,
    pub current_range: PageRange,
    pub next_range: PageRange,
}

/// Result of one validation pass.
///
/// `status_by_id` has an entry for every chapter in the input; the caller
/// is responsible for persisting it back to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoundaryReport {
    pub overlaps: Vec<OverlapPair>,
    pub status_by_id: BTreeMap<String, PageValidationStatus>,
}

impl BoundaryReport {
    pub fn missing_count(&self) -> usize {
        self.status_by_id
            .values()
            .filter(|s| **s == PageValidationStatus::Missing)
            .count()
    }
}

/// Validate that a book's chapter page ranges are well-formed and
/// non-overlapping.
///
/// - Chapters without a usable range (absent bound, or end before start)
///   are flagged `missing`.
/// - Adjacent chapters in sort order whose ranges intersect are both
///   flagged `overlap` and recorded in `overlaps`; the flag is sticky and
///   never downgraded by a clean comparison later in the pass.
/// - Everything else is `ok`.
///
/// Pure and idempotent; identical input yields identical output.
pub fn validate_page_boundaries(chapters: &[SourceBookChapter]) -> BoundaryReport {
    let mut ordered: Vec<&SourceBookChapter> = chapters.iter().collect();
    ordered.sort_by_key(|ch| ch.order_key());

    let mut report = BoundaryReport::default();

    for (idx, chapter) in ordered.iter().enumerate() {
        let Some(range) = chapter_page_range(chapter) else {
            report
                .status_by_id
                .insert(chapter.id.clone(), PageValidationStatus::Missing);
            continue;
        };

        let next_overlap = ordered.get(idx + 1).and_then(|next| {
            let next_range = chapter_page_range(next)?;
            (next_range.start <= range.end).then_some((*next, next_range))
        });

        if let Some((next, next_range)) = next_overlap {
            report.overlaps.push(OverlapPair {
                current: ChapterRef::from(*chapter),
                next: ChapterRef::from(next),
                current_range: range,
                next_range,
            });
            report
                .status_by_id
                .insert(chapter.id.clone(), PageValidationStatus::Overlap);
            report
                .status_by_id
                .insert(next.id.clone(), PageValidationStatus::Overlap);
        } else {
            // Sticky overlap: don't downgrade a flag set by the
            // comparison with this chapter's predecessor.
            report
                .status_by_id
                .entry(chapter.id.clone())
                .or_insert(PageValidationStatus::Ok);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(id: &str, sort: u32, start: Option<u32>, end: Option<u32>) -> SourceBookChapter {
        SourceBookChapter {
            id: id.to_string(),
            sort: Some(sort),
            start_page: start,
            end_page: end,
            ..SourceBookChapter::new("book-1")
        }
    }

    fn status(report: &BoundaryReport, id: &str) -> PageValidationStatus {
        report.status_by_id[id]
    }

    #[test]
    fn test_clean_ranges_are_ok() {
        let report = validate_page_boundaries(&[
            chapter("a", 1, Some(1), Some(10)),
            chapter("b", 2, Some(11), Some(20)),
            chapter("c", 3, Some(21), Some(30)),
        ]);
        assert!(report.overlaps.is_empty());
        for id in ["a", "b", "c"] {
            assert_eq!(status(&report, id), PageValidationStatus::Ok);
        }
    }

    #[test]
    fn test_adjacent_overlap_flags_both_chapters() {
        let report = validate_page_boundaries(&[
            chapter("a", 1, Some(1), Some(10)),
            chapter("b", 2, Some(9), Some(15)),
        ]);
        assert_eq!(report.overlaps.len(), 1);
        assert_eq!(report.overlaps[0].current.id, "a");
        assert_eq!(report.overlaps[0].next.id, "b");
        assert_eq!(report.overlaps[0].current_range, PageRange { start: 1, end: 10 });
        assert_eq!(report.overlaps[0].next_range, PageRange { start: 9, end: 15 });
        assert_eq!(status(&report, "a"), PageValidationStatus::Overlap);
        assert_eq!(status(&report, "b"), PageValidationStatus::Overlap);
    }

    #[test]
    fn test_shared_boundary_page_counts_as_overlap() {
        let report = validate_page_boundaries(&[
            chapter("a", 1, Some(1), Some(10)),
            chapter("b", 2, Some(10), Some(15)),
        ]);
        assert_eq!(report.overlaps.len(), 1);
    }

    #[test]
    fn test_overlap_is_sticky_against_later_clean_comparison() {
        // b overlaps a, but b vs c is clean; b must stay overlap.
        let report = validate_page_boundaries(&[
            chapter("a", 1, Some(1), Some(10)),
            chapter("b", 2, Some(9), Some(15)),
            chapter("c", 3, Some(16), Some(20)),
        ]);
        assert_eq!(status(&report, "b"), PageValidationStatus::Overlap);
        assert_eq!(status(&report, "c"), PageValidationStatus::Ok);
    }

    #[test]
    fn test_missing_and_malformed_ranges() {
        let report = validate_page_boundaries(&[
            chapter("absent", 1, None, None),
            chapter("half", 2, Some(5), None),
            chapter("backwards", 3, Some(10), Some(5)),
            chapter("fine", 4, Some(11), Some(20)),
        ]);
        assert!(report.overlaps.is_empty());
        assert_eq!(report.missing_count(), 3);
        assert_eq!(status(&report, "backwards"), PageValidationStatus::Missing);
        assert_eq!(status(&report, "fine"), PageValidationStatus::Ok);
    }

    #[test]
    fn test_no_transitive_detection_across_missing_chapter() {
        // a and c overlap, but b between them has no range: only adjacent
        // pairs are compared, so the overlap goes unreported.
        let report = validate_page_boundaries(&[
            chapter("a", 1, Some(1), Some(20)),
            chapter("b", 2, None, None),
            chapter("c", 3, Some(15), Some(25)),
        ]);
        assert!(report.overlaps.is_empty());
        assert_eq!(status(&report, "a"), PageValidationStatus::Ok);
        assert_eq!(status(&report, "b"), PageValidationStatus::Missing);
        assert_eq!(status(&report, "c"), PageValidationStatus::Ok);
    }

    #[test]
    fn test_chained_overlaps_report_each_pair() {
        let report = validate_page_boundaries(&[
            chapter("a", 1, Some(1), Some(10)),
            chapter("b", 2, Some(8), Some(14)),
            chapter("c", 3, Some(13), Some(20)),
        ]);
        assert_eq!(report.overlaps.len(), 2);
        for id in ["a", "b", "c"] {
            assert_eq!(status(&report, id), PageValidationStatus::Overlap);
        }
    }

    #[test]
    fn test_unsorted_input_is_sorted_before_comparison() {
        let report = validate_page_boundaries(&[
            chapter("b", 2, Some(9), Some(15)),
            chapter("a", 1, Some(1), Some(10)),
        ]);
        assert_eq!(report.overlaps.len(), 1);
        assert_eq!(report.overlaps[0].current.id, "a");
    }

    #[test]
    fn test_idempotent() {
        let chapters = vec![
            chapter("a", 1, Some(1), Some(10)),
            chapter("b", 2, Some(9), Some(15)),
            chapter("c", 3, None, None),
        ];
        let first = validate_page_boundaries(&chapters);
        let second = validate_page_boundaries(&chapters);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let report = validate_page_boundaries(&[]);
        assert!(report.overlaps.is_empty());
        assert!(report.status_by_id.is_empty());
    }
}
