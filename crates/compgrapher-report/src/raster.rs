//! PNG and JPG output, rasterized from the SVG chart.

use std::fmt::Display;
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{ReportError, Result};

/// Output pixels per SVG user unit.
pub const RASTER_SCALE: f32 = 2.0;

fn raster_error(err: impl Display) -> ReportError {
    ReportError::Raster(err.to_string())
}

/// Rasterizes an SVG document to PNG bytes.
pub fn render_png(svg: &str) -> Result<Vec<u8>> {
    encode(&rasterize(svg)?, ImageFormat::Png)
}

/// Rasterizes an SVG document to JPG bytes. JPG has no alpha channel, so
/// the image is flattened to RGB first.
pub fn render_jpg(svg: &str) -> Result<Vec<u8>> {
    encode(&DynamicImage::ImageRgb8(rasterize(svg)?.to_rgb8()), ImageFormat::Jpeg)
}

fn rasterize(svg: &str) -> Result<DynamicImage> {
    let mut options = Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = Tree::from_str(svg, &options).map_err(raster_error)?;

    let size = tree.size();
    let width = (size.width() * RASTER_SCALE).ceil() as u32;
    let height = (size.height() * RASTER_SCALE).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| raster_error(format!("cannot allocate a {width}x{height} canvas")))?;

    let transform = Transform::from_scale(RASTER_SCALE, RASTER_SCALE);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let image = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| raster_error("pixel buffer does not match canvas size"))?;
    Ok(DynamicImage::ImageRgba8(image))
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(raster_error)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"><rect width="10" height="20" fill="#ff0000"/></svg>"##;

    #[test]
    fn png_is_scaled() {
        let bytes = render_png(SQUARE).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((image.width(), image.height()), (20, 40));
        assert_eq!(image.to_rgba8().get_pixel(5, 5).0, [255, 0, 0, 255]);
    }

    #[test]
    fn jpg_has_jpeg_magic() {
        let bytes = render_jpg(SQUARE).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn invalid_svg_is_reported() {
        assert!(matches!(render_png("<not svg"), Err(ReportError::Raster(_))));
    }
}
