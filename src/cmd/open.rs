use std::path::PathBuf;

use anyhow::Result;

use tablesnap::Config;

use super::{read_files, workbench};

pub async fn cmd_open(config: Config, paths: &[PathBuf]) -> Result<()> {
    let files = read_files(paths).await?;
    let mut bench = workbench(config)?;

    let Some(report) = bench.open(files).await else {
        return Ok(());
    };

    if let Some(current) = bench.intake().current() {
        println!("📄 {} ({})", current.name, current.media_type);
    }
    if report.previewed {
        let canvas = &bench.session().canvas;
        println!(
            "🖼️  {} - {}×{}",
            bench.session().navigator().status_label(),
            canvas.width(),
            canvas.height()
        );
    } else {
        println!("🖼️  No preview available");
    }

    println!("⬆️  Uploaded {}/{}", report.uploaded, paths.len());
    if report.failed_uploads > 0 {
        println!("⚠️  {} upload(s) failed", report.failed_uploads);
    }
    Ok(())
}
