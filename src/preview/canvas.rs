//! The shared raster surface every page and image is drawn onto.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

use super::RenderedFrame;
use crate::error::{Error, Result};

/// One canvas, reused across pages and files. Starts empty (0 x 0).
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            pixels: RgbaImage::new(0, 0),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_blank(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Resize to the frame and draw it.
    pub fn draw(&mut self, frame: RenderedFrame) {
        self.pixels = frame.image;
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Encode the canvas as JPEG. Alpha is dropped.
    pub fn to_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        if self.is_blank() {
            return Err(Error::EmptyCanvas);
        }
        let rgb = DynamicImage::ImageRgba8(self.pixels.clone()).into_rgb8();
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(&rgb)?;
        Ok(bytes)
    }

    /// Write the canvas as PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        if self.is_blank() {
            return Err(Error::EmptyCanvas);
        }
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> RenderedFrame {
        RenderedFrame {
            page: 1,
            page_count: 1,
            scale: 1.0,
            image: RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255])),
        }
    }

    #[test]
    fn starts_blank() {
        let canvas = Canvas::new();
        assert!(canvas.is_blank());
        assert!(matches!(canvas.to_jpeg(90), Err(Error::EmptyCanvas)));
    }

    #[test]
    fn draw_resizes_surface() {
        let mut canvas = Canvas::new();
        canvas.draw(frame(30, 20));
        assert_eq!((canvas.width(), canvas.height()), (30, 20));
        canvas.draw(frame(10, 50));
        assert_eq!((canvas.width(), canvas.height()), (10, 50));
    }

    #[test]
    fn jpeg_snapshot_decodes_back() {
        let mut canvas = Canvas::new();
        canvas.draw(frame(40, 30));
        let jpeg = canvas.to_jpeg(92).unwrap();
        assert!(jpeg.starts_with(&[0xFF, 0xD8]));
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn png_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        let mut canvas = Canvas::new();
        canvas.draw(frame(5, 5));
        canvas.save_png(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
