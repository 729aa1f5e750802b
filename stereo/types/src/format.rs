/*!
    Pixel format types.
*/

use std::fmt;
use std::str::FromStr;

use crate::Error;

/**
    Video pixel formats.

    Frames handed to the layout transform use one of the packed formats,
    where every pixel occupies the same number of bytes. Planar formats
    are listed so that decoder output can be described, but they must be
    converted before the layout transform sees them.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Packed BGR, 24bpp (default working format)
    Bgr24,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGRA, 32bpp
    Bgra,
    /// Packed RGBA, 32bpp
    Rgba,
    /// Single-channel 8-bit luma
    Gray8,
    /// Planar YUV 4:2:0, 12bpp (most common encoder input)
    Yuv420p,
    /// Semi-planar YUV 4:2:0, 12bpp
    Nv12,
}

impl PixelFormat {
    /**
        Returns the number of bytes each pixel occupies in a packed buffer,
        or `None` for planar formats.
    */
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            Self::Gray8 => Some(1),
            Self::Rgb24 | Self::Bgr24 => Some(3),
            Self::Bgra | Self::Rgba => Some(4),
            Self::Yuv420p | Self::Nv12 => None,
        }
    }

    /**
        Returns true if this is a planar format.
    */
    pub const fn is_planar(self) -> bool {
        self.bytes_per_pixel().is_none()
    }

    /**
        Lowercase name matching FFmpeg's pixel format naming.
    */
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bgr24 => "bgr24",
            Self::Rgb24 => "rgb24",
            Self::Bgra => "bgra",
            Self::Rgba => "rgba",
            Self::Gray8 => "gray",
            Self::Yuv420p => "yuv420p",
            Self::Nv12 => "nv12",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bgr24" => Ok(Self::Bgr24),
            "rgb24" => Ok(Self::Rgb24),
            "bgra" => Ok(Self::Bgra),
            "rgba" => Ok(Self::Rgba),
            "gray" | "gray8" => Ok(Self::Gray8),
            "yuv420p" => Ok(Self::Yuv420p),
            "nv12" => Ok(Self::Nv12),
            other => Err(Error::unsupported_format(format!(
                "unknown pixel format: {other}"
            ))),
        }
    }
}
