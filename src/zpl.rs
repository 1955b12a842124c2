//! ZPL `^GFA` field assembly.
//!
//! The graphic field carries the packed bitmap as lowercase hex text,
//! shrunk by the ZPL run-length scheme over the hex characters:
//!
//! * `z` repeats the next character 400 times,
//! * `g`..=`y` repeat it 20..=380 times in steps of 20,
//! * `G`..=`Y` repeat it 1..=19 times,
//! * counts are additive until a data character lands.
//!
//! Runs shorter than 3 characters are copied through without a count
//! prefix.

use log::debug;

use crate::bitmap::Bitmap;
use crate::source::PixelSource;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encode packed bitmap bytes as lowercase hex, two characters per byte.
pub fn hex_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for &byte in data {
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    }
    out
}

/// Run-length compress an ASCII hex stream with the ZPL count characters.
///
/// The 400/20/19 tier boundaries are part of the printer command language
/// and every emitted count sequence sums back to the original run length.
pub fn compress(data: &str) -> String {
    let bytes = data.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];
        let mut j = i + 1;
        while j < bytes.len() && bytes[j] == ch {
            j += 1;
        }
        let run = j - i;

        if run >= 3 {
            let mut remaining = run;
            if remaining > 400 {
                for _ in 0..remaining / 400 {
                    out.push('z');
                }
                remaining %= 400;
            }
            if remaining >= 20 {
                let times = remaining / 20;
                out.push((b'f' + times as u8) as char);
                remaining -= times * 20;
            }
            if remaining > 0 {
                out.push((b'F' + remaining as u8) as char);
            }
            out.push(ch as char);
        } else {
            for _ in 0..run {
                out.push(ch as char);
            }
        }
        i = j;
    }

    out
}

/// Wrap a packed bitmap in the `^GFA` command template.
///
/// The byte count appears twice; both fields and the trailing newlines are
/// what the printer firmware expects.
pub fn graphic_field(bitmap: &Bitmap) -> String {
    let total = bitmap.data().len();
    let hex = hex_encode(bitmap.data());
    let compressed = compress(&hex);

    debug!(
        "graphic field: {} bytes, {} hex chars compressed to {}",
        total,
        hex.len(),
        compressed.len()
    );

    format!(
        "^XA\n^FO0,0\n^GFA,{},{},{},{}\n^XZ\n",
        total,
        total,
        bitmap.bytes_per_row(),
        compressed
    )
}

/// Threshold, pack and serialize an image in one call.
pub fn label(source: &PixelSource, invert: bool) -> String {
    graphic_field(&Bitmap::pack(source, invert))
}
