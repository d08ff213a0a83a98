//! Chabad.org chapter importer.
//!
//! One GET to the torah-texts book-navigation endpoint, normalized into
//! the chapter shape the rest of the engine consumes. The platform's
//! hyphenated JSON field names stay inside this module; callers only ever
//! see [`SyncedChapter`].

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::SourceBook;

const BOOK_NAVIGATION_BASE: &str =
    "https://www.chabad.org/api/v2/chabadorg/torahtexts/book-navigation";

/// Failure crossing the Chabad.org I/O boundary.
///
/// The importer never retries; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to Chabad.org failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Chabad.org returned HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("unexpected Chabad.org response shape: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Chabad.org response for article {0} has no children")]
    NoChildren(u32),
    #[error("book '{0}' has no chabad_org_root_id")]
    MissingRootId(String),
}

/// One chapter as normalized from the external table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedChapter {
    /// 1-based position in the response's `children` array; the response
    /// order is authoritative.
    pub sort: u32,
    /// Hebrew chapter title.
    pub chapter_name: String,
    pub chabad_org_article_id: u32,
}

/// Raw navigation response; external field names end here.
#[derive(Debug, Deserialize)]
struct BookNavigation {
    #[serde(rename = "article-id")]
    #[allow(dead_code)]
    article_id: u32,
    children: Option<Vec<NavigationChild>>,
}

#[derive(Debug, Deserialize)]
struct NavigationChild {
    #[serde(rename = "article-id")]
    article_id: u32,
    #[serde(rename = "hebrew-title", default)]
    hebrew_title: Option<String>,
    #[serde(rename = "toc-hebrew-title", default)]
    toc_hebrew_title: Option<String>,
}

fn normalize(root_id: u32, navigation: BookNavigation) -> Result<Vec<SyncedChapter>, FetchError> {
    let children = navigation
        .children
        .ok_or(FetchError::NoChildren(root_id))?;

    Ok(children
        .into_iter()
        .enumerate()
        .map(|(idx, child)| SyncedChapter {
            sort: idx as u32 + 1,
            chapter_name: child
                .hebrew_title
                .or(child.toc_hebrew_title)
                .unwrap_or_default(),
            chabad_org_article_id: child.article_id,
        })
        .collect())
}

/// Fetch and normalize the chapter list under a Chabad.org root article.
///
/// Issues exactly one request and holds no cross-call state; concurrent
/// fetches for different root ids are independent.
pub async fn fetch_chabad_org_chapters(
    client: &reqwest::Client,
    root_id: u32,
) -> Result<Vec<SyncedChapter>, FetchError> {
    let url = format!("{BOOK_NAVIGATION_BASE}/{root_id}");
    debug!("Fetching Chabad.org book navigation: {}", url);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            status: response.status(),
            url,
        });
    }

    let body = response.text().await?;
    let navigation: BookNavigation = serde_json::from_str(&body)?;
    let chapters = normalize(root_id, navigation)?;
    debug!("Normalized {} chapters from article {}", chapters.len(), root_id);
    Ok(chapters)
}

/// Convenience wrapper: fetch chapters for a catalogued book.
pub async fn sync_chabad_org_chapters(
    client: &reqwest::Client,
    book: &SourceBook,
) -> Result<Vec<SyncedChapter>, FetchError> {
    let root_id = book
        .chabad_org_root_id
        .ok_or_else(|| FetchError::MissingRootId(book.slug.clone()))?;
    fetch_chabad_org_chapters(client, root_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Vec<SyncedChapter>, FetchError> {
        let navigation: BookNavigation = serde_json::from_str(body)?;
        normalize(9001, navigation)
    }

    #[test]
    fn test_normalize_assigns_sort_in_response_order() {
        let chapters = parse(
            r#"{
                "article-id": 9001,
                "children": [
                    {"article-id": 111, "hebrew-title": "פרק א"},
                    {"article-id": 222, "hebrew-title": "פרק ב"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].sort, 1);
        assert_eq!(chapters[0].chabad_org_article_id, 111);
        assert_eq!(chapters[0].chapter_name, "פרק א");
        assert_eq!(chapters[1].sort, 2);
        assert_eq!(chapters[1].chabad_org_article_id, 222);
    }

    #[test]
    fn test_normalize_falls_back_to_toc_title() {
        let chapters = parse(
            r#"{
                "article-id": 9001,
                "children": [
                    {"article-id": 111, "toc-hebrew-title": "הקדמה"},
                    {"article-id": 222}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(chapters[0].chapter_name, "הקדמה");
        assert_eq!(chapters[1].chapter_name, "");
    }

    #[test]
    fn test_missing_children_is_an_error() {
        let err = parse(r#"{"article-id": 9001}"#).unwrap_err();
        assert!(matches!(err, FetchError::NoChildren(9001)));
    }

    #[test]
    fn test_malformed_body_is_a_parse_error() {
        let err = parse(r#"{"article-id": "not-a-number"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_empty_children_normalizes_to_empty_list() {
        let chapters = parse(r#"{"article-id": 9001, "children": []}"#).unwrap();
        assert!(chapters.is_empty());
    }

    #[tokio::test]
    async fn test_sync_requires_root_id() {
        let book = SourceBook::new("tanya", "Tanya");
        let client = reqwest::Client::new();
        let err = sync_chabad_org_chapters(&client, &book).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingRootId(slug) if slug == "tanya"));
    }
}
