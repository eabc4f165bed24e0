//! Document preview onto the shared canvas.
//!
//! Routes an [`IntakeFile`] to a [`Rasterizer`] by media type, then
//! renders pages scaled to the viewer width.
//!
//! # Supported Media Types
//!
//! | Type | Rasterizer | Feature Flag |
//! |------|------------|-------------|
//! | `application/pdf` | [`pdf::PdfDocument`] | `pdf` |
//! | `image/*` | [`raster::ImageDocument`] | always |
//!
//! Anything else is ignored: [`PreviewRenderer::open`] returns `Ok(None)`.

pub mod canvas;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod raster;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::intake::IntakeFile;

pub use canvas::Canvas;

/// Horizontal padding of the viewer around the canvas, in pixels.
pub const VIEWER_PADDING: u32 = 40;

/// Content is never shrunk below this scale, however narrow the viewer.
pub const MIN_SCALE: f32 = 0.8;

/// Natural page size at scale 1.0 (PDF points, or pixels for images).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// A paginated source of pixels.
///
/// Implementations are synchronous; [`PreviewRenderer`] runs them on the
/// blocking pool. Pages are 1-based.
pub trait Rasterizer: Send + Sync {
    fn page_count(&self) -> usize;

    /// Size of `page` at scale 1.0.
    fn page_size(&self, page: usize) -> Result<PageSize>;

    /// Render `page` into a `width` x `height` raster.
    fn render(&self, page: usize, width: u32, height: u32) -> Result<RgbaImage>;
}

/// A loaded document handle.
pub type Document = Arc<dyn Rasterizer>;

/// The visible region hosting the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Set on first document display.
    pub active: bool,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            active: false,
        }
    }

    /// Width available to content once padding is taken off.
    pub fn container_width(&self) -> u32 {
        self.width.saturating_sub(VIEWER_PADDING)
    }

    /// Grow or shrink to hold a canvas of `canvas_height` pixels.
    pub fn fit_canvas(&mut self, canvas_height: u32) {
        self.height = canvas_height + VIEWER_PADDING;
    }
}

/// Fit-to-width scale, floored at [`MIN_SCALE`].
pub fn fit_scale(container_width: f32, content_width: f32) -> f32 {
    if content_width <= 0.0 {
        return 1.0;
    }
    (container_width / content_width).max(MIN_SCALE)
}

/// A page rendered at viewer scale, ready for the canvas.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub page: usize,
    pub page_count: usize,
    pub scale: f32,
    pub image: RgbaImage,
}

/// Opens documents and renders their pages.
pub struct PreviewRenderer;

impl PreviewRenderer {
    /// Decode `file` into a document, or `None` for unsupported media.
    #[instrument(skip(file), fields(name = %file.name, media_type = %file.media_type))]
    pub async fn open(file: &IntakeFile) -> Result<Option<Document>> {
        if file.is_pdf() {
            return open_pdf(Arc::clone(&file.bytes)).await.map(Some);
        }
        if file.is_image() {
            let bytes = Arc::clone(&file.bytes);
            let document = tokio::task::spawn_blocking(move || raster::ImageDocument::decode(&bytes))
                .await
                .map_err(|e| Error::Rasterize(e.to_string()))??;
            return Ok(Some(Arc::new(document)));
        }
        debug!("unsupported media type, no preview");
        Ok(None)
    }

    /// Render `page` scaled to fit `container_width`.
    pub async fn render(document: Document, page: usize, container_width: u32) -> Result<RenderedFrame> {
        tokio::task::spawn_blocking(move || Self::render_blocking(document.as_ref(), page, container_width))
            .await
            .map_err(|e| Error::Rasterize(e.to_string()))?
    }

    /// Synchronous body of [`PreviewRenderer::render`].
    pub fn render_blocking(
        document: &dyn Rasterizer,
        page: usize,
        container_width: u32,
    ) -> Result<RenderedFrame> {
        let page_count = document.page_count();
        if page == 0 || page > page_count {
            return Err(Error::PageOutOfRange { page, count: page_count });
        }

        let size = document.page_size(page)?;
        let scale = fit_scale(container_width as f32, size.width);
        let width = ((size.width * scale) as u32).max(1);
        let height = ((size.height * scale) as u32).max(1);
        debug!(page, scale, width, height, "rendering page");

        let image = document.render(page, width, height)?;
        Ok(RenderedFrame {
            page,
            page_count,
            scale,
            image,
        })
    }
}

#[cfg(feature = "pdf")]
async fn open_pdf(bytes: Arc<[u8]>) -> Result<Document> {
    let document = tokio::task::spawn_blocking(move || pdf::PdfDocument::load(bytes))
        .await
        .map_err(|e| Error::Rasterize(e.to_string()))??;
    Ok(Arc::new(document))
}

#[cfg(not(feature = "pdf"))]
async fn open_pdf(_bytes: Arc<[u8]>) -> Result<Document> {
    Err(Error::UnsupportedMedia(
        "application/pdf (built without the `pdf` feature)".to_string(),
    ))
}
