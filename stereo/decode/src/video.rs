/*!
    Video decoder implementation.
*/

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use ffmpeg_next::{
    codec::{self, decoder::Video as VideoDecoderFFmpeg},
    format::{self, Pixel},
    media,
    software::scaling::{Context as ScalerContext, Flags as ScalerFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use stereo_transform::FrameSource;
use stereo_types::{Error, PixelFormat, Pts, Rational, Result, VideoFrame, VideoStreamInfo};

use crate::config::{DEFAULT_FRAME_RATE, VideoDecoderConfig};
use crate::convert::{copy_packed_rows, packed_pixel_to_ffmpeg, rational_from_ffmpeg};

/**
    Video decoder.

    Owns the demuxer and codec context for the best video stream of one
    input file. Every decoded frame is converted to the configured packed
    pixel format at its native resolution. Both contexts are released when
    the decoder is dropped.
*/
pub struct VideoDecoder {
    path: PathBuf,
    input: format::context::Input,
    decoder: VideoDecoderFFmpeg,
    stream_index: usize,
    info: VideoStreamInfo,
    output_pixel: Pixel,
    scaler: Option<(ScalerKey, ScalerContext)>,
    pending: VecDeque<VideoFrame>,
    input_done: bool,
    drained: bool,
}

/// Source geometry a scaler was built for.
#[derive(Clone, Copy, PartialEq, Eq)]
struct ScalerKey {
    format: Pixel,
    width: u32,
    height: u32,
}

impl VideoDecoder {
    /**
        Open a file and prepare to decode its best video stream.

        Fails if the file cannot be opened, has no video stream, or the
        stream's codec is not available.
    */
    pub fn open(path: impl AsRef<Path>, config: VideoDecoderConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let output_pixel = packed_pixel_to_ffmpeg(config.output_format)?;

        ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

        let input = format::input(&path).map_err(|e| open_error(&path, e))?;

        let (stream_index, time_base, frame_rate, parameters) = {
            let stream = input.streams().best(media::Type::Video).ok_or_else(|| {
                Error::invalid_data(format!("{} has no video stream", path.display()))
            })?;

            let time_base = rational_from_ffmpeg(stream.time_base()).unwrap_or(Rational::new(1, 1));
            let frame_rate = rational_from_ffmpeg(stream.avg_frame_rate())
                .or_else(|| rational_from_ffmpeg(stream.rate()))
                .unwrap_or_else(|| {
                    let (num, den) = DEFAULT_FRAME_RATE;
                    tracing::warn!(
                        path = %path.display(),
                        "stream declares no frame rate, assuming {num}/{den}"
                    );
                    Rational::new(num, den)
                });

            (stream.index(), time_base, frame_rate, stream.parameters())
        };

        let decoder_ctx = codec::context::Context::from_parameters(parameters)
            .map_err(|e| Error::codec(e.to_string()))?;

        let decoder = decoder_ctx
            .decoder()
            .video()
            .map_err(|e| Error::codec(e.to_string()))?;

        let info = VideoStreamInfo {
            width: decoder.width(),
            height: decoder.height(),
            frame_rate,
            time_base,
            format: config.output_format,
        };

        tracing::debug!(
            path = %path.display(),
            stream = stream_index,
            width = info.width,
            height = info.height,
            frame_rate = %info.frame_rate,
            source_format = ?decoder.format(),
            "opened video decoder"
        );

        Ok(Self {
            path,
            input,
            decoder,
            stream_index,
            info,
            output_pixel,
            scaler: None,
            pending: VecDeque::new(),
            input_done: false,
            drained: false,
        })
    }

    /**
        Get the declared properties of the decoded stream.
    */
    pub fn info(&self) -> &VideoStreamInfo {
        &self.info
    }

    /**
        Decode until at least one frame is pending or the stream is drained.
    */
    fn fill_pending(&mut self) -> Result<()> {
        while self.pending.is_empty() && !self.drained {
            if self.input_done {
                self.decoder
                    .send_eof()
                    .map_err(|e| Error::codec(e.to_string()))?;
                self.drained = true;
            } else {
                let mut packet = ffmpeg_next::Packet::empty();
                match packet.read(&mut self.input) {
                    Ok(()) => {
                        if packet.stream() != self.stream_index {
                            continue;
                        }
                        self.decoder
                            .send_packet(&packet)
                            .map_err(|e| Error::codec(e.to_string()))?;
                    }
                    Err(ffmpeg_next::Error::Eof) => {
                        self.input_done = true;
                        continue;
                    }
                    Err(e) => {
                        return Err(Error::codec(format!(
                            "failed to read from {}: {e}",
                            self.path.display()
                        )));
                    }
                }
            }

            self.receive_frames()?;
        }

        Ok(())
    }

    /**
        Receive all available frames from the decoder.
    */
    fn receive_frames(&mut self) -> Result<()> {
        let mut decoded_frame = VideoFrameFFmpeg::empty();

        loop {
            match self.decoder.receive_frame(&mut decoded_frame) {
                Ok(()) => {
                    let frame = self.convert_frame(&decoded_frame)?;
                    self.pending.push_back(frame);
                }
                Err(ffmpeg_next::Error::Other { errno })
                    if errno == ffmpeg_next::util::error::EAGAIN =>
                {
                    break;
                }
                Err(ffmpeg_next::Error::Eof) => {
                    break;
                }
                Err(e) => {
                    return Err(Error::codec(e.to_string()));
                }
            }
        }

        Ok(())
    }

    /**
        Convert an FFmpeg video frame to a packed VideoFrame.
    */
    fn convert_frame(&mut self, decoded: &VideoFrameFFmpeg) -> Result<VideoFrame> {
        let width = decoded.width();
        let height = decoded.height();
        let pts = decoded.timestamp().or_else(|| decoded.pts()).map(Pts);

        let scaler = self.scaler_for(ScalerKey {
            format: decoded.format(),
            width,
            height,
        })?;

        let mut packed = VideoFrameFFmpeg::empty();
        scaler
            .run(decoded, &mut packed)
            .map_err(|e| Error::codec(format!("pixel conversion failed: {e}")))?;

        let row_bytes = width as usize * bytes_per_pixel(self.info.format)?;
        let data = copy_packed_rows(packed.data(0), packed.stride(0), row_bytes, height as usize);

        Ok(VideoFrame::new(
            data,
            width,
            height,
            self.info.format,
            pts,
            self.info.time_base,
        ))
    }

    /**
        Get a scaler for the given source geometry, rebuilding it if the
        geometry changed since the last frame.
    */
    fn scaler_for(&mut self, key: ScalerKey) -> Result<&mut ScalerContext> {
        let stale = !matches!(&self.scaler, Some((current, _)) if *current == key);
        if stale {
            let scaler = ScalerContext::get(
                key.format,
                key.width,
                key.height,
                self.output_pixel,
                key.width,
                key.height,
                ScalerFlags::BILINEAR,
            )
            .map_err(|e| Error::codec(format!("failed to create scaler: {e}")))?;
            self.scaler = Some((key, scaler));
        }

        match self.scaler.as_mut() {
            Some((_, scaler)) => Ok(scaler),
            None => Err(Error::codec("scaler unavailable")),
        }
    }
}

impl FrameSource for VideoDecoder {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        self.fill_pending()?;
        Ok(self.pending.pop_front())
    }
}

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("path", &self.path)
            .field("stream_index", &self.stream_index)
            .field("info", &self.info)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

fn bytes_per_pixel(format: PixelFormat) -> Result<usize> {
    format
        .bytes_per_pixel()
        .ok_or_else(|| Error::unsupported_format(format!("{format} is not a packed format")))
}

/**
    Map a failure to open the input to an I/O error where FFmpeg reports
    an OS error code, and to a codec error otherwise.
*/
fn open_error(path: &Path, e: ffmpeg_next::Error) -> Error {
    match e {
        ffmpeg_next::Error::Other { errno } => Error::Io(io::Error::new(
            io::Error::from_raw_os_error(errno).kind(),
            format!("failed to open {}: {e}", path.display()),
        )),
        other => Error::codec(format!("failed to open {}: {other}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fails_to_open() {
        let err = VideoDecoder::open(
            "/nonexistent/stereo-decode-test.mp4",
            VideoDecoderConfig::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io(_) | Error::Codec { .. }));
        assert!(!err.is_config_error());
    }

    #[test]
    fn planar_output_is_rejected_before_opening() {
        let config = VideoDecoderConfig::new().with_output_format(PixelFormat::Yuv420p);
        let err = VideoDecoder::open("/nonexistent/input.mp4", config).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }
}
