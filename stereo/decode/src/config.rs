/*!
    Decoder configuration types.
*/

use stereo_types::PixelFormat;

/**
    Frame rate assumed when the container does not declare one.
*/
pub const DEFAULT_FRAME_RATE: (i32, i32) = (25, 1);

/**
    Configuration for the video decoder.
*/
#[derive(Clone, Debug)]
pub struct VideoDecoderConfig {
    /// Packed pixel format decoded frames are converted to.
    pub output_format: PixelFormat,
}

impl Default for VideoDecoderConfig {
    fn default() -> Self {
        Self {
            output_format: PixelFormat::Bgr24,
        }
    }
}

impl VideoDecoderConfig {
    /**
        Create a new config with default settings (BGR24 output).
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Set the packed pixel format frames are delivered in.
    */
    pub fn with_output_format(mut self, format: PixelFormat) -> Self {
        self.output_format = format;
        self
    }
}
