/*!
    Video encoding and muxing for the stereoscopic layout converter.

    This crate handles the output side of the conversion. It takes packed
    frames from the layout transform, converts them to the pixel format the
    encoder wants, encodes them and writes the packets into a container.

    # Basic Usage

    ```ignore
    use stereo_sink::{EncoderConfig, VideoEncoder};
    use stereo_transform::FrameSink;

    // Same frame rate and pixel format as the input, new dimensions
    let out_info = decoder.info().with_dimensions(transform.output_dimensions());

    let mut encoder = VideoEncoder::create("movie_tab.mp4", &out_info, EncoderConfig::new("mp4v"))?;

    for frame in converted_frames {
        encoder.write_frame(&frame)?;
    }

    // Flush the codec and write the trailer
    encoder.finish()?;
    ```

    # Codecs

    Any FFmpeg video encoder can be named. The FourCC-style names the
    classic OpenCV writers accept (`mp4v`, `xvid`, `mjpg`, `avc1`, ...)
    are mapped to their FFmpeg encoders, see [`resolve_codec_name`].

    # Containers

    The container is guessed from the output file extension unless one is
    forced with [`EncoderConfig::with_container`]:

    - **MP4** / **MOV**: fast start enabled by default
    - **MKV**: accepts virtually any codec
    - **AVI**: the classic home of MPEG-4 Part 2
    - **MPEG-TS**: transport stream

    # Finalization

    Always call `finish()` after the last frame. A dropped encoder finalizes
    what it has on a best-effort basis, but errors from that can only be
    logged.
*/

pub use stereo_types::{Error, PixelFormat, Rational, Result, VideoFrame, VideoStreamInfo};

mod config;
mod encoder;

pub use config::{ContainerFormat, DEFAULT_CODEC, EncoderConfig, resolve_codec_name};
pub use encoder::VideoEncoder;
