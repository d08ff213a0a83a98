//! Book models for the source catalog.
//!
//! A `SourceBook` is one catalogued volume with its external platform
//! identifiers and an owned list of chapters. Chapters are never shared
//! between books.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SourceBookChapter;

/// How a book is traditionally cited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceStyle {
    /// Plain page numbers (1, 2, 3...).
    #[default]
    Page,
    /// Folio references (1a, 1b, 2a...).
    Folio,
    /// Cited by chapter.
    Chapter,
    /// Cited by section.
    Section,
}

impl ReferenceStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Folio => "folio",
            Self::Chapter => "chapter",
            Self::Section => "section",
        }
    }
}

/// A catalogued volume with multi-platform linking support.
///
/// All external identifiers are optional and independently present; a book
/// with no identifier for a platform simply yields no link for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceBook {
    /// Unique identifier for this book.
    pub id: String,
    /// URL-safe identifier, globally unique (case-insensitive for lookup).
    pub slug: String,
    /// Primary English name (e.g., "Derech Mitzvosecha").
    pub canonical_name: String,
    /// Hebrew name (e.g., "דרך מצוותיך").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hebrew_name: Option<String>,
    /// Other spellings/names used for search.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_names: Vec<String>,
    /// Author name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Category (chassidus, halacha, maamarim, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// How this book is traditionally cited.
    #[serde(default)]
    pub reference_style: ReferenceStyle,
    /// Total printed pages, advisory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    /// HebrewBooks.org book id (from the URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hebrewbooks_id: Option<u32>,
    /// PDF page offset: internal page N maps to PDF page N + offset.
    #[serde(default)]
    pub hebrewbooks_offset: i32,
    /// Chabad.org torah-texts root article id (enables chapter sync).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chabad_org_root_id: Option<u32>,
    /// Last time chapters were synced from the Chabad.org API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chabad_org_synced_at: Option<DateTime<Utc>>,
    /// Lahak.org content id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lahak_root_id: Option<String>,
    /// ChabadLibrary.org book id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chabadlibrary_id: Option<String>,
    /// Sefaria book slug (e.g., "Derekh_Mitzvotekha").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sefaria_slug: Option<String>,

    /// Chapters in display order.
    #[serde(default)]
    pub chapters: Vec<SourceBookChapter>,
}

impl SourceBook {
    /// Create a book with a fresh id and the given slug and name.
    pub fn new(slug: impl Into<String>, canonical_name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            slug: slug.into(),
            canonical_name: canonical_name.into(),
            hebrew_name: None,
            alternate_names: Vec::new(),
            author: None,
            category: None,
            reference_style: ReferenceStyle::default(),
            total_pages: None,
            hebrewbooks_id: None,
            hebrewbooks_offset: 0,
            chabad_org_root_id: None,
            chabad_org_synced_at: None,
            lahak_root_id: None,
            chabadlibrary_id: None,
            sefaria_slug: None,
            chapters: Vec::new(),
        }
    }
}
