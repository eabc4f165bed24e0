use std::path::Path;

use anyhow::Result;

use tablesnap::{Config, ExtractOutcome, Point, ViewportBounds, XlsxWriter};

use super::{show_page, workbench};

/// A selection given on the command line, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Parse `X,Y,WIDTH,HEIGHT`.
pub fn parse_region(s: &str) -> Result<Region, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid region '{s}': {e}"))?;

    let [x, y, width, height] = parts[..] else {
        return Err(format!("invalid region '{s}': expected X,Y,WIDTH,HEIGHT"));
    };
    if x < 0.0 || y < 0.0 || width <= 0.0 || height <= 0.0 {
        return Err(format!(
            "invalid region '{s}': offsets must be non-negative and size positive"
        ));
    }
    Ok(Region { x, y, width, height })
}

pub async fn cmd_extract(
    config: Config,
    path: &Path,
    region: Region,
    page: usize,
    xlsx: Option<&Path>,
    html: bool,
) -> Result<()> {
    let mut bench = workbench(config)?;
    show_page(&mut bench, path, page).await?;

    // Drive the selection exactly as a pointer drag would.
    let viewport = bench.session().viewport;
    let bounds = ViewportBounds::new(0.0, 0.0, f64::from(viewport.width), f64::from(viewport.height));
    bench.toggle_selection();
    bench.pointer_down(Point::new(region.x, region.y), bounds);
    bench.pointer_move(Point::new(region.x + region.width, region.y + region.height), bounds);
    bench.pointer_up();

    match bench.extract().await {
        ExtractOutcome::Presented { rows, columns } => {
            let Some(table) = bench.tables().current() else {
                anyhow::bail!("extracted table went missing");
            };
            if html {
                println!("{}", table.markup);
            } else {
                print!("{}", table.to_markdown());
            }
            eprintln!("📊 {rows} rows × {columns} columns");

            if let Some(path) = xlsx {
                bench.export(&XlsxWriter::default(), path)?;
                eprintln!("💾 Saved {}", path.display());
            }
            Ok(())
        }
        ExtractOutcome::Declined(message) | ExtractOutcome::Failed(message) => {
            anyhow::bail!(message)
        }
        ExtractOutcome::Stale => anyhow::bail!("extraction superseded"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_region() {
        assert_eq!(
            parse_region("10, 20,300,150").unwrap(),
            Region { x: 10.0, y: 20.0, width: 300.0, height: 150.0 }
        );
    }

    #[test]
    fn rejects_short_region() {
        assert!(parse_region("1,2,3").unwrap_err().contains("X,Y,WIDTH,HEIGHT"));
    }

    #[test]
    fn rejects_empty_region() {
        assert!(parse_region("0,0,0,10").is_err());
        assert!(parse_region("a,b,c,d").is_err());
    }
}
