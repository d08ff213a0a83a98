//! Importers for external platform table-of-contents data.

mod chabad_org;

pub use chabad_org::{
    fetch_chabad_org_chapters, sync_chabad_org_chapters, FetchError, SyncedChapter,
};
