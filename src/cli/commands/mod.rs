//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod book;
mod init;
mod resolve_cmd;
mod sync_cmd;
mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions};

#[derive(Parser)]
#[command(name = "makor")]
#[command(about = "Source reference resolution for multi-volume Torah texts")]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides config file and environment)
    #[arg(long, short = 'd', global = true)]
    data: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and an empty catalog
    Init,

    /// Inspect catalogued books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },

    /// Resolve platform links for a book, chapter, or page
    Resolve {
        /// Book slug (case-insensitive)
        slug: String,
        /// Internal page number (or folio like 12b for folio-style books)
        #[arg(short, long, conflicts_with = "chapter")]
        page: Option<String>,
        /// Chapter number
        #[arg(short = 'n', long)]
        chapter: Option<u32>,
        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate chapter page boundaries
    Validate {
        /// Book slug (omit with --all to validate every book)
        slug: Option<String>,
        /// Validate every book in the catalog
        #[arg(long, conflicts_with = "slug")]
        all: bool,
        /// Persist recomputed statuses back to the catalog
        #[arg(short, long)]
        write: bool,
    },

    /// Sync chapters from the Chabad.org table of contents
    Sync {
        /// Book slug (must have a chabad_org_root_id)
        slug: String,
        /// Fetch and report without writing to the catalog
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// List all books with their platform coverage
    List,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&LoadOptions {
        config_path: cli.config.clone(),
        data: cli.data.clone(),
    });

    match cli.command {
        Commands::Init => init::cmd_init(&settings),
        Commands::Book { command } => match command {
            BookCommands::List => book::cmd_book_list(&settings),
        },
        Commands::Resolve {
            slug,
            page,
            chapter,
            json,
        } => resolve_cmd::cmd_resolve(&settings, &slug, page.as_deref(), chapter, json),
        Commands::Validate { slug, all, write } => {
            validate::cmd_validate(&settings, slug.as_deref(), all, write)
        }
        Commands::Sync { slug, dry_run } => {
            sync_cmd::cmd_sync(&settings, &slug, dry_run).await
        }
    }
}
