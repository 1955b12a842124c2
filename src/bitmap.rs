//! Packing thresholded pixels into 1-bit printer rows.

use log::debug;

use crate::source::{is_black_rgb, PixelSource, BLACK_THRESHOLD};

/// A monochrome bitmap packed row-major, MSB-first.
///
/// Each row occupies `bytes_per_row = ceil(width / 8)` bytes. Bit `x` of
/// row `y` sits at `data[y * bytes_per_row + x / 8]`, bit position
/// `7 - (x % 8)`. Padding bits past `width` in the last byte of a row are
/// always zero; the printer interprets the row stride from the byte count.
pub struct Bitmap {
    width: u32,
    height: u32,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Threshold `source` and pack it into printer rows.
    ///
    /// With `invert` set, the black/white decision is negated for every
    /// pixel, uniformly across all source kinds.
    pub fn pack(source: &PixelSource, invert: bool) -> Self {
        let (width, height) = source.dimensions();
        let bytes_per_row = ((width as usize) + 7) / 8;
        let mut data = Vec::with_capacity(bytes_per_row * height as usize);

        match source {
            PixelSource::Gray(gray) => {
                let pixels = gray.as_raw();
                pack_rows(&mut data, width, height, invert, |x, y| {
                    pixels[(y * width + x) as usize] < BLACK_THRESHOLD
                });
            }
            PixelSource::Indexed {
                pixels, palette, ..
            } => {
                // Indices are u8, so a 256-entry cache covers every lookup.
                // Entries past the palette stay white.
                let mut black = vec![false; 256];
                for (cached, entry) in black.iter_mut().zip(palette.iter()) {
                    *cached = is_black_rgb(entry[0], entry[1], entry[2]);
                }
                pack_rows(&mut data, width, height, invert, |x, y| {
                    black[pixels[(y * width + x) as usize] as usize]
                });
            }
            PixelSource::Generic(image) => {
                use image::GenericImageView;
                pack_rows(&mut data, width, height, invert, |x, y| {
                    let image::Rgba([r, g, b, _]) = image.get_pixel(x, y);
                    is_black_rgb(r, g, b)
                });
            }
        }

        debug!(
            "packed {}x{} image into {} rows of {} bytes",
            width, height, height, bytes_per_row
        );

        Bitmap {
            width,
            height,
            bytes_per_row,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read a single pixel back out of the packed rows.
    pub fn bit(&self, x: u32, y: u32) -> bool {
        let byte = self.data[y as usize * self.bytes_per_row + (x / 8) as usize];
        byte >> (7 - x % 8) & 1 == 1
    }
}

fn pack_rows<F>(data: &mut Vec<u8>, width: u32, height: u32, invert: bool, is_black: F)
where
    F: Fn(u32, u32) -> bool,
{
    for y in 0..height {
        let mut acc: u8 = 0;
        let mut bit: i8 = 7;
        for x in 0..width {
            if is_black(x, y) != invert {
                acc |= 1 << bit;
            }
            bit -= 1;
            if bit < 0 {
                data.push(acc);
                acc = 0;
                bit = 7;
            }
        }
        if bit != 7 {
            data.push(acc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, RgbImage};

    fn gray_source(width: u32, height: u32, pixel: impl Fn(u32, u32) -> u8) -> PixelSource {
        PixelSource::Gray(GrayImage::from_fn(width, height, |x, y| {
            image::Luma([pixel(x, y)])
        }))
    }

    #[test]
    fn single_black_pixel() {
        let bitmap = Bitmap::pack(&gray_source(1, 1, |_, _| 0), false);
        assert_eq!(bitmap.bytes_per_row(), 1);
        assert_eq!(bitmap.data(), &[0x80]);
    }

    #[test]
    fn full_black_row() {
        let bitmap = Bitmap::pack(&gray_source(8, 1, |_, _| 0), false);
        assert_eq!(bitmap.data(), &[0xff]);
    }

    #[test]
    fn partial_rows_pad_with_zero_bits() {
        // 10 black pixels per row leave 6 unused bits in the second byte.
        let bitmap = Bitmap::pack(&gray_source(10, 3, |_, _| 0), false);
        assert_eq!(bitmap.bytes_per_row(), 2);
        assert_eq!(bitmap.data(), &[0xff, 0xc0, 0xff, 0xc0, 0xff, 0xc0]);
    }

    #[test]
    fn zero_area_image_packs_to_nothing() {
        let bitmap = Bitmap::pack(&gray_source(0, 5, |_, _| 0), false);
        assert_eq!(bitmap.bytes_per_row(), 0);
        assert!(bitmap.data().is_empty());
    }

    #[test]
    fn invert_negates_every_pixel() {
        let source = gray_source(19, 7, |x, y| (x * 16 + y * 8) as u8);
        let plain = Bitmap::pack(&source, false);
        let inverted = Bitmap::pack(&source, true);
        for y in 0..7 {
            for x in 0..19 {
                assert_eq!(plain.bit(x, y), !inverted.bit(x, y), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn repeated_packing_is_deterministic() {
        let source = gray_source(23, 5, |x, y| (x * 11 + y * 37) as u8);
        let a = Bitmap::pack(&source, false);
        let b = Bitmap::pack(&source, false);
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn palette_cache_matches_per_pixel_evaluation() {
        let palette = vec![[0, 0, 0], [255, 255, 255], [200, 30, 40], [90, 200, 90]];
        let width = 13;
        let height = 4;
        let pixels: Vec<u8> = (0..width * height).map(|i| (i % 4) as u8).collect();

        let rgb = RgbImage::from_fn(width as u32, height as u32, |x, y| {
            image::Rgb(palette[pixels[(y * width as u32 + x) as usize] as usize])
        });

        let indexed = PixelSource::Indexed {
            width: width as u32,
            height: height as u32,
            pixels,
            palette,
        };
        let generic = PixelSource::Generic(DynamicImage::ImageRgb8(rgb));

        assert_eq!(
            Bitmap::pack(&indexed, false).data(),
            Bitmap::pack(&generic, false).data()
        );
        assert_eq!(
            Bitmap::pack(&indexed, true).data(),
            Bitmap::pack(&generic, true).data()
        );
    }

    #[test]
    fn out_of_palette_indices_stay_white() {
        let indexed = PixelSource::Indexed {
            width: 2,
            height: 1,
            pixels: vec![0, 200],
            palette: vec![[0, 0, 0]],
        };
        let bitmap = Bitmap::pack(&indexed, false);
        assert_eq!(bitmap.data(), &[0x80]);
    }
}
