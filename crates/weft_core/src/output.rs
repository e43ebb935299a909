//! BMP output for rendered pixel buffers.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;
use weft_math::Colour;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Buffer holds {len} pixels, {needed} needed for {width}x{height} with stride {stride}")]
    BufferTooSmall {
        len: usize,
        needed: usize,
        width: u32,
        height: u32,
        stride: usize,
    },
}

/// Convert a packed `0x00RRGGBB` buffer into an RGB image.
///
/// Buffer row 0 is the bottom scan-line, so rows are flipped into the
/// top-down order image files use. `stride` is the number of pixels between
/// the starts of consecutive buffer rows.
pub fn to_rgb_image(
    pixels: &[u32],
    width: u32,
    height: u32,
    stride: usize,
) -> Result<RgbImage, ImageError> {
    let needed = if height == 0 {
        0
    } else {
        (height as usize - 1) * stride + width as usize
    };
    if pixels.len() < needed || stride < width as usize {
        return Err(ImageError::BufferTooSmall {
            len: pixels.len(),
            needed,
            width,
            height,
            stride,
        });
    }

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let row = (height - 1 - y) as usize;
        Rgb(Colour::unpack_pixel(pixels[row * stride + x as usize]))
    }))
}

/// Write a packed pixel buffer as a BMP file.
pub fn write_bmp<P: AsRef<Path>>(
    path: P,
    pixels: &[u32],
    width: u32,
    height: u32,
    stride: usize,
) -> Result<(), ImageError> {
    let path = path.as_ref();
    let image = to_rgb_image(pixels, width, height, stride)?;
    image.save_with_format(path, ImageFormat::Bmp)?;
    log::info!("Wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_flipped() {
        // 2x2: bottom row red, top row blue
        let pixels = [0x00FF_0000, 0x00FF_0000, 0x0000_00FF, 0x0000_00FF];
        let image = to_rgb_image(&pixels, 2, 2, 2).unwrap();

        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_stride_skips_padding() {
        let pixels = [0x0000_FF00, 0xDEAD_BEEF, 0x0000_FF00, 0xDEAD_BEEF];
        let image = to_rgb_image(&pixels, 1, 2, 2).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 255, 0]));
        assert_eq!(image.get_pixel(0, 1), &Rgb([0, 255, 0]));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let pixels = [0u32; 3];
        assert!(matches!(
            to_rgb_image(&pixels, 2, 2, 2),
            Err(ImageError::BufferTooSmall { needed: 4, .. })
        ));
    }

    #[test]
    fn test_write_bmp() {
        let path =
            std::env::temp_dir().join(format!("weft_output_test_{}.bmp", std::process::id()));
        let pixels = vec![0x0080_8080u32; 4 * 3];
        write_bmp(&path, &pixels, 4, 3, 4).unwrap();

        let written = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(&written[..2], b"BM");
    }
}
