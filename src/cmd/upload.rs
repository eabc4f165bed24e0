use std::path::PathBuf;

use anyhow::Result;

use tablesnap::{Config, HttpBackend, TableBackend};

use super::read_files;

pub async fn cmd_upload(config: &Config, paths: &[PathBuf]) -> Result<()> {
    let backend = HttpBackend::new(config)?;

    for file in read_files(paths).await? {
        let receipt = backend.upload(&file).await?;
        match (receipt.error, receipt.message) {
            (Some(error), _) => println!("❌ {}: {error}", file.name),
            (None, Some(message)) => println!("✅ {}: {message}", file.name),
            (None, None) => println!("✅ {}", file.name),
        }
    }
    Ok(())
}
