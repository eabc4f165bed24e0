//! `tablesnap` CLI - preview documents and extract tables from selected regions

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tablesnap::Config;

use cmd::Region;

#[derive(Parser)]
#[command(name = "tablesnap")]
#[command(about = "Preview a document, select a region, extract the table inside it")]
#[command(version)]
struct Cli {
    /// Extraction service base URL (overrides config and TABLESNAP_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Preview viewport width in pixels
    #[arg(long, global = true)]
    viewport_width: Option<u32>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload files and preview the first one
    Open {
        /// Files to open (PDF or image)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Render a page of a document to PNG
    Preview {
        /// Document to render
        file: PathBuf,

        /// Page to render (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Output PNG path
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },

    /// Extract the table inside a region of a page
    Extract {
        /// Document to extract from
        file: PathBuf,

        /// Region in canvas pixels: X,Y,WIDTH,HEIGHT
        #[arg(short, long, value_parser = cmd::parse_region)]
        region: Region,

        /// Page to extract from (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Also export the table to an .xlsx workbook (defaults to `export_path`)
        #[arg(long, num_args = 0..=1, value_name = "PATH")]
        xlsx: Option<Option<PathBuf>>,

        /// Print the returned HTML instead of Markdown
        #[arg(long)]
        html: bool,
    },

    /// Upload files to the extraction service
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(width) = cli.viewport_width {
        config.viewport_width = width;
    }
    config.validate()?;

    match cli.command {
        Commands::Open { files } => {
            cmd::cmd_open(config, &files).await?;
        }
        Commands::Preview { file, page, output } => {
            cmd::cmd_preview(config, &file, page, &output).await?;
        }
        Commands::Extract {
            file,
            region,
            page,
            xlsx,
            html,
        } => {
            let xlsx = xlsx.map(|path| path.unwrap_or_else(|| config.export_path.clone()));
            cmd::cmd_extract(config, &file, region, page, xlsx.as_deref(), html).await?;
        }
        Commands::Upload { files } => {
            cmd::cmd_upload(&config, &files).await?;
        }
        Commands::Config => {
            cmd::cmd_config(&config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "tablesnap=debug" } else { "tablesnap=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
