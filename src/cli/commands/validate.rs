//! Validate command: chapter page-boundary checks.

use anyhow::{bail, Context};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::resolve::BoundaryReport;

/// Summary across a bulk validation run, one counter per book condition.
#[derive(Debug, Default)]
struct ValidationSummary {
    total_books: usize,
    books_with_overlaps: usize,
    total_overlaps: usize,
    books_with_missing_ranges: usize,
}

fn print_report(slug: &str, report: &BoundaryReport) {
    if report.overlaps.is_empty() && report.missing_count() == 0 {
        println!("{} {}: all chapter ranges ok", style("✓").green(), slug);
        return;
    }

    for pair in &report.overlaps {
        println!(
            "{} {}: chapters {} and {} overlap (pages {}-{} vs {}-{})",
            style("✗").red(),
            slug,
            pair.current
                .chapter_number
                .map_or_else(|| pair.current.id.clone(), |n| n.to_string()),
            pair.next
                .chapter_number
                .map_or_else(|| pair.next.id.clone(), |n| n.to_string()),
            pair.current_range.start,
            pair.current_range.end,
            pair.next_range.start,
            pair.next_range.end,
        );
    }
    let missing = report.missing_count();
    if missing > 0 {
        println!(
            "{} {}: {} chapter(s) with missing or malformed ranges",
            style("!").yellow(),
            slug,
            missing
        );
    }
}

pub fn cmd_validate(
    settings: &Settings,
    slug: Option<&str>,
    all: bool,
    write: bool,
) -> anyhow::Result<()> {
    let mut catalog = Catalog::load(settings.catalog_path())
        .with_context(|| format!("loading catalog from {}", settings.catalog_path().display()))?;

    let slugs: Vec<String> = match (slug, all) {
        (Some(slug), false) => {
            if catalog.find_by_slug(slug).is_none() {
                bail!("no book with slug '{slug}'");
            }
            vec![slug.to_string()]
        }
        (None, true) => catalog.books().iter().map(|b| b.slug.clone()).collect(),
        _ => bail!("pass a book slug or --all"),
    };

    let mut summary = ValidationSummary {
        total_books: slugs.len(),
        ..Default::default()
    };

    let progress = if slugs.len() > 1 {
        let bar = ProgressBar::new(slugs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    for slug in &slugs {
        if let Some(bar) = &progress {
            bar.set_message(slug.clone());
        }
        let report = catalog.apply_validation(slug)?;
        if let Some(bar) = &progress {
            bar.suspend(|| print_report(slug, &report));
            bar.inc(1);
        } else {
            print_report(slug, &report);
        }

        if !report.overlaps.is_empty() {
            summary.books_with_overlaps += 1;
            summary.total_overlaps += report.overlaps.len();
        }
        if report.missing_count() > 0 {
            summary.books_with_missing_ranges += 1;
        }
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    if write {
        catalog.save()?;
        println!("{} Statuses written to catalog", style("✓").green());
    }

    if summary.total_books > 1 {
        println!(
            "\n{}: {} book(s), {} with overlaps ({} pair(s)), {} with missing ranges",
            style("Summary").bold(),
            summary.total_books,
            summary.books_with_overlaps,
            summary.total_overlaps,
            summary.books_with_missing_ranges,
        );
    }
    Ok(())
}
