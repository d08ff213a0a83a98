//! Initialize command.

use console::style;

use crate::catalog::Catalog;
use crate::config::Settings;

/// Initialize the data directory and an empty catalog file.
pub fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let catalog_path = settings.catalog_path();
    if catalog_path.exists() {
        println!(
            "{} Catalog already exists at {}",
            style("!").yellow(),
            catalog_path.display()
        );
        return Ok(());
    }

    Catalog::empty(&catalog_path).save()?;
    println!(
        "{} Initialized Makor in {}",
        style("✓").green(),
        settings.data_dir.display()
    );
    Ok(())
}
