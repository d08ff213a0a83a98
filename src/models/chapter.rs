//! Chapter models and the page-range validation status cache.

use serde::{Deserialize, Serialize};

/// Validation status of a chapter's page range.
///
/// Derived by the boundary validator and persisted back by the caller so
/// readers don't re-validate on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageValidationStatus {
    /// Range is present and does not collide with its neighbors.
    Ok,
    /// Range intersects an adjacent chapter's range.
    Overlap,
    /// Range is absent or malformed (end before start).
    Missing,
    /// Not yet validated.
    #[default]
    Pending,
}

impl PageValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Overlap => "overlap",
            Self::Missing => "missing",
            Self::Pending => "pending",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ok" => Some(Self::Ok),
            "overlap" => Some(Self::Overlap),
            "missing" => Some(Self::Missing),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// An inclusive internal page interval claimed by a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn contains(&self, page: u32) -> bool {
        page >= self.start && page <= self.end
    }
}

/// One internally-numbered division of a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceBookChapter {
    /// Unique identifier for this chapter.
    pub id: String,
    /// Parent book id.
    pub book_id: String,
    /// Display/iteration order; may differ from `chapter_number`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<u32>,
    /// Nominal chapter number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_number: Option<u32>,
    /// Hebrew chapter title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_name: Option<String>,
    /// English chapter title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_name_english: Option<String>,
    /// First internal page of the chapter (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<u32>,
    /// Last internal page of the chapter (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_page: Option<u32>,
    /// HebrewBooks page for `start_page`, when the platform's pagination
    /// diverges from the book-level offset for this chapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hebrewbooks_start_page: Option<u32>,
    /// HebrewBooks page for `end_page`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hebrewbooks_end_page: Option<u32>,
    /// Chabad.org torah-texts article id for this chapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chabad_org_article_id: Option<u32>,
    /// Lahak.org content id for this chapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lahak_content_id: Option<String>,
    /// Sefaria reference string (platform-native, not a page number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sefaria_ref: Option<String>,
    /// Cached result of the last boundary validation pass.
    #[serde(default)]
    pub page_validation_status: PageValidationStatus,
}

impl SourceBookChapter {
    /// Create an empty chapter for the given book with a fresh id.
    pub fn new(book_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            book_id: book_id.into(),
            sort: None,
            chapter_number: None,
            chapter_name: None,
            chapter_name_english: None,
            start_page: None,
            end_page: None,
            hebrewbooks_start_page: None,
            hebrewbooks_end_page: None,
            chabad_org_article_id: None,
            lahak_content_id: None,
            sefaria_ref: None,
            page_validation_status: PageValidationStatus::Pending,
        }
    }

    /// Key used everywhere chapters are ordered: `sort`, then
    /// `chapter_number`. Chapters without either sort first.
    pub fn order_key(&self) -> (Option<u32>, Option<u32>) {
        (self.sort, self.chapter_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            PageValidationStatus::Ok,
            PageValidationStatus::Overlap,
            PageValidationStatus::Missing,
            PageValidationStatus::Pending,
        ] {
            assert_eq!(PageValidationStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(PageValidationStatus::from_str("valid"), None);
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = PageRange { start: 5, end: 12 };
        assert!(range.contains(5));
        assert!(range.contains(12));
        assert!(!range.contains(4));
        assert!(!range.contains(13));
    }
}
