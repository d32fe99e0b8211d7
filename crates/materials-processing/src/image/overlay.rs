use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::error::EditorError;

/// Fonts tried when no overlay font is configured, in order.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Fixed look of the overlay text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Left edge of the text
    pub x: i32,
    /// Baseline of the text
    pub baseline: i32,
    /// Pixel height of the font
    pub size: f32,
    pub color: Rgba<u8>,
}

impl Default for OverlayStyle {
    /// 30px red text with its baseline at (10, 30).
    fn default() -> Self {
        Self {
            x: 10,
            baseline: 30,
            size: 30.0,
            color: Rgba([255, 0, 0, 255]),
        }
    }
}

/// Text stamp applied to an image surface
pub struct TextOverlay {
    font: FontVec,
    style: OverlayStyle,
}

impl std::fmt::Debug for TextOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextOverlay")
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl TextOverlay {
    pub fn new(font: FontVec, style: OverlayStyle) -> Self {
        Self { font, style }
    }

    /// Load the configured font, or the first system font found.
    pub fn load(configured: Option<&Path>, style: OverlayStyle) -> Result<Self, EditorError> {
        let path = match configured {
            Some(path) => path.to_path_buf(),
            None => FONT_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .find(|p| p.is_file())
                .ok_or_else(|| {
                    EditorError::FontUnavailable(
                        "no configured font and no system font found".into(),
                    )
                })?,
        };

        let data = std::fs::read(&path).map_err(|e| {
            EditorError::FontUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let font = FontVec::try_from_vec(data).map_err(|e| {
            EditorError::FontUnavailable(format!("{} is not a usable font: {}", path.display(), e))
        })?;

        tracing::debug!(font = %path.display(), "Loaded overlay font");
        Ok(Self::new(font, style))
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Top edge for `draw_text_mut`, which positions by the line's top rather
    /// than its baseline.
    fn top(&self) -> i32 {
        let ascent = self.font.as_scaled(PxScale::from(self.style.size)).ascent();
        self.style.baseline - ascent.round() as i32
    }

    /// Draw `text` onto `img`. Stamping twice draws twice.
    pub fn stamp(&self, img: &mut RgbaImage, text: &str) {
        imageproc::drawing::draw_text_mut(
            img,
            self.style.color,
            self.style.x,
            self.top(),
            PxScale::from(self.style.size),
            &self.font,
            text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bbox_where, is_red, test_font, test_font_file};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_default_style() {
        let style = OverlayStyle::default();
        assert_eq!((style.x, style.baseline), (10, 30));
        assert_eq!(style.size, 30.0);
        assert_eq!(style.color, Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_missing_configured_font() {
        let err = TextOverlay::load(
            Some(Path::new("/definitely/not/a/font.ttf")),
            OverlayStyle::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EditorError::FontUnavailable(_)));
    }

    #[test]
    fn test_non_font_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"plain text, not a font").unwrap();
        let err = TextOverlay::load(Some(file.path()), OverlayStyle::default()).unwrap_err();
        assert!(matches!(err, EditorError::FontUnavailable(_)));
    }

    #[test]
    fn test_load_configured_font() {
        let file = test_font_file();
        let overlay = TextOverlay::load(Some(file.path()), OverlayStyle::default()).unwrap();
        assert_eq!(overlay.style(), &OverlayStyle::default());
    }

    #[test]
    fn test_text_sits_on_baseline_right_of_x() {
        let overlay = TextOverlay::new(test_font(), OverlayStyle::default());
        let mut img = RgbaImage::from_pixel(200, 60, WHITE);
        overlay.stamp(&mut img, "EDIT");

        let (min_x, min_y, _, max_y) = bbox_where(&img, is_red).expect("no red pixels drawn");
        assert!((10..=16).contains(&min_x), "min_x = {min_x}");
        // Capitals end on the baseline and rise roughly 19px above it.
        assert!((24..=30).contains(&max_y), "max_y = {max_y}");
        assert!((5..=16).contains(&min_y), "min_y = {min_y}");
        for y in 0..img.height() {
            for x in 0..10 {
                assert_eq!(img.get_pixel(x, y), &WHITE);
            }
        }
        assert_eq!(img.dimensions(), (200, 60));
    }

    #[test]
    fn test_descenders_drop_below_baseline() {
        let overlay = TextOverlay::new(test_font(), OverlayStyle::default());
        let mut img = RgbaImage::from_pixel(200, 60, WHITE);
        overlay.stamp(&mut img, "gjpq");

        let (_, _, _, max_y) = bbox_where(&img, is_red).expect("no red pixels drawn");
        assert!(max_y > 30, "max_y = {max_y}");
        assert!(max_y < 40, "max_y = {max_y}");
    }

    #[test]
    fn test_stamp_on_tiny_image_is_clipped() {
        let overlay = TextOverlay::new(test_font(), OverlayStyle::default());
        let mut img = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 255]));
        overlay.stamp(&mut img, "Edited");
        assert_eq!(img.dimensions(), (5, 5));
        assert!(bbox_where(&img, is_red).is_none());
    }
}
