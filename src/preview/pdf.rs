//! PDF rasterization via `pdfium-render` (Chromium's PDF library).
//!
//! The pdfium binding is not shareable across threads, so each call binds
//! the library and reloads the document from the retained bytes. Page
//! sizes are read once at load time.

use std::sync::Arc;

use image::RgbaImage;
use pdfium_render::prelude::*;
use tracing::debug;

use super::{PageSize, Rasterizer};
use crate::error::{Error, Result};

/// A loaded PDF.
pub struct PdfDocument {
    bytes: Arc<[u8]>,
    page_sizes: Vec<PageSize>,
}

impl PdfDocument {
    /// Parse `bytes` and record every page's size in points.
    pub fn load(bytes: Arc<[u8]>) -> Result<Self> {
        let pdfium = bind()?;
        let page_sizes = {
            let doc = pdfium
                .load_pdf_from_byte_slice(&bytes, None)
                .map_err(|e| Error::Rasterize(format!("failed to parse PDF: {e}")))?;
            doc.pages()
                .iter()
                .map(|page| PageSize {
                    width: page.width().value,
                    height: page.height().value,
                })
                .collect::<Vec<_>>()
        };
        debug!(pages = page_sizes.len(), "PDF loaded");
        Ok(Self { bytes, page_sizes })
    }
}

impl Rasterizer for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_sizes.len()
    }

    fn page_size(&self, page: usize) -> Result<PageSize> {
        page.checked_sub(1)
            .and_then(|index| self.page_sizes.get(index))
            .copied()
            .ok_or(Error::PageOutOfRange {
                page,
                count: self.page_sizes.len(),
            })
    }

    fn render(&self, page: usize, width: u32, height: u32) -> Result<RgbaImage> {
        self.page_size(page)?;
        let pdfium = bind()?;
        let doc = pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(|e| Error::Rasterize(format!("failed to parse PDF: {e}")))?;
        let pdf_page = doc
            .pages()
            .iter()
            .nth(page - 1)
            .ok_or(Error::PageOutOfRange {
                page,
                count: self.page_sizes.len(),
            })?;

        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32);
        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| Error::Rasterize(e.to_string()))?;
        Ok(bitmap.as_image().into_rgba8())
    }
}

/// Bind pdfium from the working directory, else the system library.
fn bind() -> Result<Pdfium> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| Error::Rasterize(format!("pdfium library not available: {e}")))
}
