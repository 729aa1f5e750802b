/*!
    Video decoding for the stereoscopic layout converter.

    This crate turns a video file into a sequence of tightly packed
    frames that the layout transform can split and restack. Decoders
    output whatever pixel format the codec uses, so every frame is run
    through a software scaler into a packed format (BGR24 by default)
    at its native resolution.

    # Example

    ```ignore
    use stereo_decode::{VideoDecoder, VideoDecoderConfig};
    use stereo_transform::FrameSource;

    let mut decoder = VideoDecoder::open("movie_sbs.mp4", VideoDecoderConfig::new())?;
    let info = *decoder.info();

    while let Some(frame) = decoder.next_frame()? {
        // frame.width == info.width, frame.format == PixelFormat::Bgr24
    }
    ```

    Only the best video stream is decoded. Audio and other streams are
    skipped.
*/

pub use stereo_types::{Error, PixelFormat, Result, VideoFrame, VideoStreamInfo};

mod config;
mod convert;
mod video;

pub use config::{DEFAULT_FRAME_RATE, VideoDecoderConfig};
pub use convert::packed_pixel_to_ffmpeg;
pub use video::VideoDecoder;
