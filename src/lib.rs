//! ZPL Graphic Field Encoder
//!
//! This crate converts raster images into monochrome `^GFA` graphic fields
//! for Zebra ZPL label printers.
//!
//! # Example
//!
//! ```rust,no_run
//! use zpl_label::{label, open_image};
//!
//! let source = open_image("label.png".as_ref()).unwrap();
//! let field = label(&source, false);
//! print!("{}", field);
//! ```

mod bitmap;
mod decode;
mod error;
mod source;
mod zpl;

pub use crate::{
    bitmap::Bitmap,
    decode::open_image,
    error::Error,
    source::PixelSource,
    zpl::{compress, graphic_field, hex_encode, label},
};
