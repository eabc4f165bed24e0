//! In-memory rasterizer for tests.

use image::RgbaImage;

use super::{PageSize, Rasterizer};
use crate::error::{Error, Result};

/// Fixed-size pages filled with white.
pub(crate) struct SolidPages {
    pub pages: usize,
    pub size: PageSize,
    /// Page whose render fails.
    pub broken: Option<usize>,
}

impl SolidPages {
    pub fn new(pages: usize, width: f32, height: f32) -> Self {
        Self {
            pages,
            size: PageSize { width, height },
            broken: None,
        }
    }

    pub fn failing_on(mut self, page: usize) -> Self {
        self.broken = Some(page);
        self
    }
}

impl Rasterizer for SolidPages {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn page_size(&self, _page: usize) -> Result<PageSize> {
        Ok(self.size)
    }

    fn render(&self, page: usize, width: u32, height: u32) -> Result<RgbaImage> {
        if self.broken == Some(page) {
            return Err(Error::Rasterize(format!("page {page} is damaged")));
        }
        Ok(RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255])))
    }
}
