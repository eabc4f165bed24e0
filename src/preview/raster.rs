//! Raster images as single-page documents.

use image::imageops::FilterType;
use image::RgbaImage;

use super::{PageSize, Rasterizer};
use crate::error::{Error, Result};

/// A decoded image, presented as a one-page document.
pub struct ImageDocument {
    image: RgbaImage,
}

impl ImageDocument {
    /// Decode PNG, JPEG, GIF, BMP, TIFF or WebP bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.into_rgba8();
        Ok(Self { image })
    }

    /// Natural pixel dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

impl Rasterizer for ImageDocument {
    fn page_count(&self) -> usize {
        1
    }

    fn page_size(&self, page: usize) -> Result<PageSize> {
        if page != 1 {
            return Err(Error::PageOutOfRange { page, count: 1 });
        }
        let (width, height) = self.image.dimensions();
        Ok(PageSize {
            width: width as f32,
            height: height as f32,
        })
    }

    fn render(&self, page: usize, width: u32, height: u32) -> Result<RgbaImage> {
        self.page_size(page)?;
        if self.image.dimensions() == (width, height) {
            return Ok(self.image.clone());
        }
        Ok(image::imageops::resize(&self.image, width, height, FilterType::Triangle))
    }
}
