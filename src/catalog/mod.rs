//! The JSON-file book catalog.
//!
//! This is the caller side of the engine: it loads `SourceBook` records,
//! hands them to the pure functions in [`crate::resolve`], and persists
//! derived results (validation statuses, imported chapters) back out.
//! The engine itself never touches storage.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{PageValidationStatus, SourceBook, SourceBookChapter};
use crate::resolve::{validate_page_boundaries, BoundaryReport};
use crate::sync::SyncedChapter;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no book with slug '{0}'")]
    BookNotFound(String),
    #[error("duplicate slug '{0}' (slugs are case-insensitive)")]
    DuplicateSlug(String),
}

/// Result of reconciling imported chapters into a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub created: usize,
    pub updated: usize,
}

/// On-disk catalog shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    books: Vec<SourceBook>,
}

/// A catalog of source books backed by a pretty-printed JSON file.
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    books: Vec<SourceBook>,
}

impl Catalog {
    /// Create an empty catalog that will save to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            books: Vec::new(),
        }
    }

    /// Load the catalog, rejecting case-insensitive duplicate slugs.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let contents = fs::read_to_string(&path)?;
        let file: CatalogFile = serde_json::from_str(&contents)?;

        let mut seen: Vec<String> = Vec::with_capacity(file.books.len());
        for book in &file.books {
            let key = book.slug.to_lowercase();
            if seen.contains(&key) {
                return Err(CatalogError::DuplicateSlug(book.slug.clone()));
            }
            seen.push(key);
        }

        debug!("Loaded {} books from {}", file.books.len(), path.display());
        Ok(Self {
            path,
            books: file.books,
        })
    }

    /// Save the catalog atomically (write to a temp file, then rename).
    pub fn save(&self) -> Result<(), CatalogError> {
        let file = CatalogFile {
            books: self.books.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let dir = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        std::io::Write::write_all(&mut tmp, json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Saved {} books to {}", self.books.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn books(&self) -> &[SourceBook] {
        &self.books
    }

    /// Add a book, enforcing case-insensitive slug uniqueness.
    pub fn add_book(&mut self, book: SourceBook) -> Result<(), CatalogError> {
        if self.find_by_slug(&book.slug).is_some() {
            return Err(CatalogError::DuplicateSlug(book.slug));
        }
        self.books.push(book);
        Ok(())
    }

    /// Case-insensitive slug lookup.
    pub fn find_by_slug(&self, slug: &str) -> Option<&SourceBook> {
        self.books
            .iter()
            .find(|b| b.slug.eq_ignore_ascii_case(slug))
    }

    pub fn find_by_slug_mut(&mut self, slug: &str) -> Option<&mut SourceBook> {
        self.books
            .iter_mut()
            .find(|b| b.slug.eq_ignore_ascii_case(slug))
    }

    /// Run the boundary validator over a book and write the resulting
    /// statuses back into its chapter records.
    ///
    /// A chapter the validator has no entry for keeps its current status.
    pub fn apply_validation(&mut self, slug: &str) -> Result<BoundaryReport, CatalogError> {
        let book = self
            .find_by_slug_mut(slug)
            .ok_or_else(|| CatalogError::BookNotFound(slug.to_string()))?;

        let report = validate_page_boundaries(&book.chapters);
        for chapter in &mut book.chapters {
            if let Some(status) = report.status_by_id.get(&chapter.id) {
                chapter.page_validation_status = *status;
            }
        }
        Ok(report)
    }

    /// Merge imported chapters into a book.
    ///
    /// Existing chapters are matched by `chabad_org_article_id` first,
    /// then by `sort`; matches get their article id, name, and sort
    /// updated, everything else (page ranges, other platform ids) is
    /// preserved. Unmatched imports become new `pending` chapters.
    pub fn reconcile_synced_chapters(
        &mut self,
        slug: &str,
        synced: Vec<SyncedChapter>,
    ) -> Result<SyncOutcome, CatalogError> {
        let book = self
            .find_by_slug_mut(slug)
            .ok_or_else(|| CatalogError::BookNotFound(slug.to_string()))?;

        let mut outcome = SyncOutcome::default();
        for incoming in synced {
            let existing = book
                .chapters
                .iter()
                .position(|ch| ch.chabad_org_article_id == Some(incoming.chabad_org_article_id))
                .or_else(|| {
                    book.chapters
                        .iter()
                        .position(|ch| ch.sort == Some(incoming.sort))
                });

            match existing {
                Some(idx) => {
                    let chapter = &mut book.chapters[idx];
                    chapter.chabad_org_article_id = Some(incoming.chabad_org_article_id);
                    chapter.sort = Some(incoming.sort);
                    if !incoming.chapter_name.is_empty() {
                        chapter.chapter_name = Some(incoming.chapter_name);
                    }
                    outcome.updated += 1;
                }
                None => {
                    let mut chapter = SourceBookChapter::new(book.id.clone());
                    chapter.sort = Some(incoming.sort);
                    chapter.chapter_number = Some(incoming.sort);
                    chapter.chapter_name = (!incoming.chapter_name.is_empty())
                        .then_some(incoming.chapter_name);
                    chapter.chabad_org_article_id = Some(incoming.chabad_org_article_id);
                    chapter.page_validation_status = PageValidationStatus::Pending;
                    book.chapters.push(chapter);
                    outcome.created += 1;
                }
            }
        }

        book.chabad_org_synced_at = Some(Utc::now());
        info!(
            "Reconciled chapters for '{}': {} created, {} updated",
            book.slug, outcome.created, outcome.updated
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(book_id: &str, sort: u32, start: u32, end: u32) -> SourceBookChapter {
        SourceBookChapter {
            sort: Some(sort),
            start_page: Some(start),
            end_page: Some(end),
            ..SourceBookChapter::new(book_id)
        }
    }

    fn catalog_with_book() -> Catalog {
        let mut book = SourceBook::new("tanya", "Tanya");
        book.chapters = vec![
            chapter(&book.id, 1, 1, 10),
            chapter(&book.id, 2, 9, 15),
        ];
        let mut catalog = Catalog::empty("/tmp/unused.json");
        catalog.add_book(book).unwrap();
        catalog
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut catalog = Catalog::empty(&path);
        catalog.add_book(SourceBook::new("tanya", "Tanya")).unwrap();
        catalog.save().unwrap();

        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded.books().len(), 1);
        assert_eq!(loaded.books()[0].slug, "tanya");
    }

    #[test]
    fn test_slug_lookup_is_case_insensitive() {
        let catalog = catalog_with_book();
        assert!(catalog.find_by_slug("TANYA").is_some());
        assert!(catalog.find_by_slug("Tanya").is_some());
        assert!(catalog.find_by_slug("torah-or").is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected_on_add_and_load() {
        let mut catalog = catalog_with_book();
        let err = catalog.add_book(SourceBook::new("TaNyA", "Other")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(_)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"books":[
                {"id":"1","slug":"tanya","canonical_name":"Tanya"},
                {"id":"2","slug":"Tanya","canonical_name":"Tanya again"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            Catalog::load(&path),
            Err(CatalogError::DuplicateSlug(_))
        ));
    }

    #[test]
    fn test_apply_validation_writes_statuses_back() {
        let mut catalog = catalog_with_book();
        let report = catalog.apply_validation("tanya").unwrap();
        assert_eq!(report.overlaps.len(), 1);

        let book = catalog.find_by_slug("tanya").unwrap();
        for chapter in &book.chapters {
            assert_eq!(
                chapter.page_validation_status,
                PageValidationStatus::Overlap
            );
        }
    }

    #[test]
    fn test_apply_validation_unknown_slug() {
        let mut catalog = catalog_with_book();
        assert!(matches!(
            catalog.apply_validation("nope"),
            Err(CatalogError::BookNotFound(_))
        ));
    }

    #[test]
    fn test_reconcile_matches_by_article_id_then_sort() {
        let mut catalog = catalog_with_book();
        {
            let book = catalog.find_by_slug_mut("tanya").unwrap();
            book.chapters[0].chabad_org_article_id = Some(111);
        }

        let outcome = catalog
            .reconcile_synced_chapters(
                "tanya",
                vec![
                    // Matches chapter 1 by article id even at a new sort
                    SyncedChapter {
                        sort: 5,
                        chapter_name: "פרק א".into(),
                        chabad_org_article_id: 111,
                    },
                    // Matches chapter 2 by sort
                    SyncedChapter {
                        sort: 2,
                        chapter_name: "פרק ב".into(),
                        chabad_org_article_id: 222,
                    },
                    // Brand new
                    SyncedChapter {
                        sort: 3,
                        chapter_name: "פרק ג".into(),
                        chabad_org_article_id: 333,
                    },
                ],
            )
            .unwrap();

        assert_eq!(outcome, SyncOutcome { created: 1, updated: 2 });

        let book = catalog.find_by_slug("tanya").unwrap();
        assert_eq!(book.chapters.len(), 3);
        assert_eq!(book.chapters[0].sort, Some(5));
        // Page ranges survive the merge
        assert_eq!(book.chapters[0].start_page, Some(1));
        assert_eq!(book.chapters[1].chabad_org_article_id, Some(222));
        assert_eq!(
            book.chapters[2].page_validation_status,
            PageValidationStatus::Pending
        );
        assert!(book.chabad_org_synced_at.is_some());
    }
}
