//! Fixtures shared by the unit tests of this crate.

use ab_glyph::FontVec;
use bytes::Bytes;
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;

/// DejaVu Sans Mono, see `tests/fixtures/DejaVuSansMono-LICENSE.txt`.
pub const TEST_FONT: &[u8] = include_bytes!("../tests/fixtures/DejaVuSansMono.ttf");

/// A solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Bytes {
    let img = RgbaImage::from_pixel(width, height, Rgba([20, 40, 60, 255]));
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .unwrap();
    Bytes::from(buffer)
}

pub fn test_font() -> FontVec {
    FontVec::try_from_vec(TEST_FONT.to_vec()).unwrap()
}

/// The bundled font written to disk, for code paths that load by path.
pub fn test_font_file() -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), TEST_FONT).unwrap();
    file
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of pixels matching `pred`.
pub fn bbox_where(
    img: &RgbaImage,
    pred: impl Fn(&Rgba<u8>) -> bool,
) -> Option<(u32, u32, u32, u32)> {
    img.enumerate_pixels()
        .filter(|(_, _, p)| pred(p))
        .fold(None, |acc, (x, y, _)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

/// Strongly red pixels, as left by the overlay.
pub fn is_red(p: &Rgba<u8>) -> bool {
    p[0] > 200 && p[1] < 80 && p[2] < 80
}
