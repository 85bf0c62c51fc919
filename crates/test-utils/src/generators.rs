//! Generators for synthetic image payloads.
//!
//! Payloads are encoded with the `image` crate so they decode exactly like
//! a provider response would.

use std::io::Cursor;

use image::{ImageOutputFormat, Rgba, RgbaImage};

/// Encode a `width x height` PNG with a predictable checkerboard pattern.
///
/// Pixel (x, y) is white when `x + y` is even, blue otherwise.
///
/// # Example
///
/// ```
/// use test_utils::png_bytes;
///
/// let bytes = png_bytes(2, 2);
/// assert_eq!(&bytes[1..4], b"PNG");
/// ```
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageOutputFormat::Png)
}

/// Encode a `width x height` JPEG with the same pattern as [`png_bytes`].
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageOutputFormat::Jpeg(90))
}

fn encode(width: u32, height: u32, format: ImageOutputFormat) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });

    let mut out = Cursor::new(Vec::new());
    let dynamic = image::DynamicImage::ImageRgba8(img);
    let dynamic = match format {
        // JPEG has no alpha channel
        ImageOutputFormat::Jpeg(_) => image::DynamicImage::ImageRgb8(dynamic.to_rgb8()),
        _ => dynamic,
    };
    dynamic
        .write_to(&mut out, format)
        .expect("encoding an in-memory image cannot fail");
    out.into_inner()
}

/// A temporary directory removed when dropped.
pub fn temp_output_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}
