/*!
    Conversions between FFmpeg types and our own.
*/

use ffmpeg_next::format::Pixel;

use stereo_types::{Error, PixelFormat, Rational, Result};

/**
    Map a packed pixel format to the FFmpeg pixel format.

    Frames are exchanged as a single tightly packed plane, so planar
    formats are rejected with [`Error::UnsupportedFormat`].
*/
pub fn packed_pixel_to_ffmpeg(format: PixelFormat) -> Result<Pixel> {
    match format {
        PixelFormat::Bgr24 => Ok(Pixel::BGR24),
        PixelFormat::Rgb24 => Ok(Pixel::RGB24),
        PixelFormat::Bgra => Ok(Pixel::BGRA),
        PixelFormat::Rgba => Ok(Pixel::RGBA),
        PixelFormat::Gray8 => Ok(Pixel::GRAY8),
        other => Err(Error::unsupported_format(format!(
            "{other} is not a packed pixel format"
        ))),
    }
}

/**
    Convert an FFmpeg rational to ours, or `None` if it is not a
    usable positive value.
*/
pub(crate) fn rational_from_ffmpeg(value: ffmpeg_next::Rational) -> Option<Rational> {
    Rational::positive(value.numerator(), value.denominator())
}

/**
    Copy the visible part of each row out of a strided plane into a
    tightly packed buffer.
*/
pub(crate) fn copy_packed_rows(
    plane: &[u8],
    stride: usize,
    row_bytes: usize,
    height: usize,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(row_bytes * height);
    for y in 0..height {
        let start = y * stride;
        data.extend_from_slice(&plane[start..start + row_bytes]);
    }
    data
}
