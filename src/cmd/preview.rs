use std::path::Path;

use anyhow::Result;

use tablesnap::Config;

use super::{show_page, workbench};

pub async fn cmd_preview(config: Config, path: &Path, page: usize, output: &Path) -> Result<()> {
    let mut bench = workbench(config)?;
    show_page(&mut bench, path, page).await?;

    let canvas = &bench.session().canvas;
    canvas.save_png(output)?;
    println!(
        "🖼️  {} → {} ({}×{})",
        bench.session().navigator().status_label(),
        output.display(),
        canvas.width(),
        canvas.height()
    );
    Ok(())
}
