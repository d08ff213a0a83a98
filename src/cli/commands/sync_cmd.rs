//! Sync command: import the Chabad.org table of contents for a book.

use anyhow::{bail, Context};
use console::style;

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::sync::sync_chabad_org_chapters;

pub async fn cmd_sync(settings: &Settings, slug: &str, dry_run: bool) -> anyhow::Result<()> {
    let mut catalog = Catalog::load(settings.catalog_path())
        .with_context(|| format!("loading catalog from {}", settings.catalog_path().display()))?;
    let Some(book) = catalog.find_by_slug(slug) else {
        bail!("no book with slug '{slug}'");
    };

    let client = settings.http_client()?;
    let chapters = sync_chabad_org_chapters(&client, book)
        .await
        .with_context(|| format!("syncing chapters for '{slug}'"))?;

    println!(
        "Fetched {} chapter(s) from Chabad.org for {}",
        chapters.len(),
        style(&book.canonical_name).bold()
    );

    if dry_run {
        for chapter in &chapters {
            println!(
                "  {:>3}. {} (article {})",
                chapter.sort, chapter.chapter_name, chapter.chabad_org_article_id
            );
        }
        println!("{} Dry run: catalog not modified", style("!").yellow());
        return Ok(());
    }

    let outcome = catalog.reconcile_synced_chapters(slug, chapters)?;
    catalog.save()?;
    println!(
        "{} {} chapter(s) created, {} updated",
        style("✓").green(),
        outcome.created,
        outcome.updated
    );
    Ok(())
}
