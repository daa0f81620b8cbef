//! Turns an encoded picture (PNG/JPEG/BMP/GIF) into a `RawImage`, so a digit
//! drawn or photographed outside the dataset can go through the same
//! `convert_image` path as the training data.

use image::imageops::FilterType;

use crate::dataset::raw::RawImage;
use crate::error::Result;

/// MNIST digits are 28×28.
pub const MNIST_SIDE: u32 = 28;

/// Decodes image bytes, resizes to `width × height` and converts to 8-bit
/// grayscale.
///
/// Returns row-major pixels, `width * height` bytes long.
pub fn decode_grayscale(bytes: &[u8], width: u32, height: u32) -> Result<RawImage> {
    let img = image::load_from_memory(bytes)?;
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);
    Ok(resized.to_luma8().into_raw())
}

/// `decode_grayscale` at the MNIST digit size.
pub fn decode_mnist_digit(bytes: &[u8]) -> Result<RawImage> {
    decode_grayscale(bytes, MNIST_SIDE, MNIST_SIDE)
}
