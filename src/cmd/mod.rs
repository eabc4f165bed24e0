mod config;
mod extract;
mod open;
mod preview;
mod upload;

pub use config::cmd_config;
pub use extract::{cmd_extract, parse_region, Region};
pub use open::cmd_open;
pub use preview::cmd_preview;
pub use upload::cmd_upload;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use tablesnap::{Config, HttpBackend, IntakeFile, TerminalNotifier, Workbench};

/// A workbench talking to the configured endpoint, alerting on stderr.
fn workbench(config: Config) -> Result<Workbench> {
    let backend = HttpBackend::new(&config)?;
    Ok(Workbench::new(config, Arc::new(backend), Arc::new(TerminalNotifier)))
}

async fn read_file(path: &Path) -> Result<IntakeFile> {
    IntakeFile::from_path(path, None)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

async fn read_files(paths: &[PathBuf]) -> Result<Vec<IntakeFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_file(path).await?);
    }
    Ok(files)
}

/// Preview `path` and move to `page`.
async fn show_page(bench: &mut Workbench, path: &Path, page: usize) -> Result<()> {
    let file = read_file(path).await?;
    if !bench.preview(&file).await {
        anyhow::bail!("could not render {} ({})", path.display(), file.media_type);
    }

    let count = bench.session().navigator().page_count();
    if page == 0 || page > count {
        anyhow::bail!("page {page} is out of range ({} has {count} pages)", path.display());
    }
    if page != 1 && !bench.go_to_page(page).await {
        anyhow::bail!("could not render page {page} of {}", path.display());
    }
    Ok(())
}
