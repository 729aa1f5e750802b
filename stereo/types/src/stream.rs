/*!
    Stream information types.
*/

use crate::{FrameDimensions, PixelFormat, Rational, Result};

/**
    Properties of a video stream, as declared by the decoder before the
    first frame is read.

    Dimensions are constant for the whole stream.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoStreamInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub frame_rate: Rational,
    /// Time base of the frames' timestamps.
    pub time_base: Rational,
    /// Pixel format of the frames the decoder hands out.
    pub format: PixelFormat,
}

impl VideoStreamInfo {
    /**
        Returns the declared frame dimensions.
    */
    pub fn dimensions(&self) -> Result<FrameDimensions> {
        FrameDimensions::new(self.width, self.height)
    }

    /**
        Returns a copy of this info with different frame dimensions.

        Used to describe the encoder's output stream, which keeps the
        input's frame rate and pixel format.
    */
    pub fn with_dimensions(self, dimensions: FrameDimensions) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
            ..self
        }
    }
}
