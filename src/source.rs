//! Pixel sources and the black/white decision.

use image::{DynamicImage, GrayImage};

/// Luma weights and threshold fixed by the printed output; changing them
/// would shift the black/white cut on labels already in the field.
const LUMA_RED: u32 = 299;
const LUMA_GREEN: u32 = 587;
const LUMA_BLUE: u32 = 114;

pub(crate) const BLACK_THRESHOLD: u8 = 128;

/// A decoded image ready for thresholding.
///
/// The variant is picked once per image so the per-pixel loop can run the
/// cheapest accessor available:
///
/// * `Gray` reads the raw 8-bit intensity plane directly.
/// * `Indexed` looks indices up in a per-palette-entry cache, so the luma
///   computation runs once per palette entry instead of once per pixel.
/// * `Generic` computes luma from the full color accessor (slow path).
#[derive(Debug)]
pub enum PixelSource {
    Gray(GrayImage),
    Indexed {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        palette: Vec<[u8; 3]>,
    },
    Generic(DynamicImage),
}

impl PixelSource {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Gray(gray) => gray.dimensions(),
            Self::Indexed { width, height, .. } => (*width, *height),
            Self::Generic(image) => {
                use image::GenericImageView;
                image.dimensions()
            }
        }
    }
}

impl From<DynamicImage> for PixelSource {
    fn from(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(gray) => Self::Gray(gray),
            other => Self::Generic(other),
        }
    }
}

/// Decide whether a color prints black.
pub(crate) fn is_black_rgb(r: u8, g: u8, b: u8) -> bool {
    let lum = (LUMA_RED * r as u32 + LUMA_GREEN * g as u32 + LUMA_BLUE * b as u32) / 1000;
    lum < BLACK_THRESHOLD as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundary() {
        assert!(is_black_rgb(127, 127, 127));
        assert!(!is_black_rgb(128, 128, 128));
        assert!(is_black_rgb(0, 0, 0));
        assert!(!is_black_rgb(255, 255, 255));
    }

    #[test]
    fn saturated_primaries() {
        // Pure red and blue carry little luma and print black.
        assert!(is_black_rgb(255, 0, 0));
        assert!(is_black_rgb(0, 0, 255));
        // Pure green is bright enough to stay white.
        assert!(!is_black_rgb(0, 255, 0));
    }

    #[test]
    fn dynamic_image_dispatch() {
        let gray = DynamicImage::new_luma8(4, 2);
        assert!(matches!(PixelSource::from(gray), PixelSource::Gray(_)));

        let rgb = DynamicImage::new_rgb8(4, 2);
        let source = PixelSource::from(rgb);
        assert!(matches!(source, PixelSource::Generic(_)));
        assert_eq!(source.dimensions(), (4, 2));
    }
}
