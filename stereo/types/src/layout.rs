/*!
    Stereoscopic layout and frame geometry types.
*/

use std::fmt;
use std::str::FromStr;

use crate::{Dimension, Error, Result};

/**
    How the two eye images are packed into a single frame.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Left and right eye images placed next to each other horizontally.
    SideBySide,
    /// Left and right eye images stacked vertically, left on top.
    TopAndBottom,
}

impl Layout {
    /**
        Short name used on the command line and in messages.
    */
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::SideBySide => "sbs",
            Self::TopAndBottom => "tab",
        }
    }

    /**
        The axis along which the two eye images are concatenated.
    */
    pub const fn split_axis(self) -> Dimension {
        match self {
            Self::SideBySide => Dimension::Width,
            Self::TopAndBottom => Dimension::Height,
        }
    }

    /**
        The other layout.
    */
    pub const fn opposite(self) -> Self {
        match self {
            Self::SideBySide => Self::TopAndBottom,
            Self::TopAndBottom => Self::SideBySide,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sbs" | "side-by-side" => Ok(Self::SideBySide),
            "tab" | "top-and-bottom" => Ok(Self::TopAndBottom),
            _ => Err(Error::UnsupportedLayout {
                value: s.to_string(),
            }),
        }
    }
}

/**
    Dimensions of a single frame buffer, in pixels.

    Both values are always greater than zero.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    /**
        Create frame dimensions, rejecting a zero width or height.
    */
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 {
            return Err(Error::invalid_data("frame width must be greater than zero"));
        }
        if height == 0 {
            return Err(Error::invalid_data(
                "frame height must be greater than zero",
            ));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/**
    Resolution of one eye's sub-image once a combined frame is split.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EyeResolution {
    pub eye_width: u32,
    pub eye_height: u32,
}

impl fmt::Display for EyeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.eye_width, self.eye_height)
    }
}

/**
    A layout conversion, resolved once per video.

    The input and output layouts always differ.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input_layout: Layout,
    pub output_layout: Layout,
    pub dimensions: FrameDimensions,
}

impl ConversionRequest {
    /**
        Create a conversion request.

        Returns [`Error::NoConversionNeeded`] if both layouts are the same.
    */
    pub fn new(
        input_layout: Layout,
        output_layout: Layout,
        dimensions: FrameDimensions,
    ) -> Result<Self> {
        if input_layout == output_layout {
            return Err(Error::NoConversionNeeded {
                layout: input_layout,
            });
        }
        Ok(Self {
            input_layout,
            output_layout,
            dimensions,
        })
    }
}
