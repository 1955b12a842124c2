//! Image decoding collaborators.
//!
//! Decoding stays outside the conversion pipeline: it either produces a
//! usable [`PixelSource`] or fails before any thresholding runs.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::error::Error;
use crate::source::PixelSource;

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

/// Open an image file and pick the cheapest pixel source for it.
///
/// 8-bit indexed PNGs keep their palette so thresholding can run once per
/// palette entry. Everything else goes through the `image` crate, which
/// expands palettes and exotic layouts into plain pixel buffers.
pub fn open_image(path: &Path) -> Result<PixelSource, Error> {
    if is_png(path)? {
        if let Some(source) = open_indexed_png(path)? {
            return Ok(source);
        }
    }
    let source = PixelSource::from(image::open(path)?);
    match &source {
        PixelSource::Gray(gray) => {
            debug!("decoded grayscale image: {:?}", gray.dimensions())
        }
        _ => debug!("decoded image via generic color path"),
    }
    Ok(source)
}

fn is_png(path: &Path) -> Result<bool, io::Error> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 8];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == PNG_SIGNATURE),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err),
    }
}

/// Decode an indexed-color PNG without expanding its palette.
///
/// Returns `Ok(None)` for PNGs that should take the generic path instead:
/// non-indexed color types, and sub-byte index depths where the `image`
/// crate's expansion is equivalent anyway.
fn open_indexed_png(path: &Path) -> Result<Option<PixelSource>, Error> {
    let mut decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let info = reader.info();
    if info.color_type != png::ColorType::Indexed || info.bit_depth != png::BitDepth::Eight {
        return Ok(None);
    }
    let width = info.width;
    let height = info.height;
    let palette: Vec<[u8; 3]> = match info.palette.as_deref() {
        Some(plte) => plte.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
        None => return Ok(None),
    };

    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut pixels)?;
    pixels.truncate(frame.buffer_size());

    debug!(
        "decoded indexed png: {}x{}, {} palette entries",
        width,
        height,
        palette.len()
    );

    Ok(Some(PixelSource::Indexed {
        width,
        height,
        pixels,
        palette,
    }))
}
