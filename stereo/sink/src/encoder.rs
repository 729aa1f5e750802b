/*!
    Video encoder and muxer.
*/

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    Dictionary,
    codec::{self, encoder::video::Encoder as VideoEncoderFFmpeg},
    format::{self, Pixel},
    software::scaling::{Context as ScalerContext, Flags as ScalerFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use stereo_decode::packed_pixel_to_ffmpeg;
use stereo_transform::FrameSink;
use stereo_types::{Error, Rational, Result, VideoFrame, VideoStreamInfo};

use crate::config::{ContainerFormat, EncoderConfig};

/**
    Video encoder writing a single video stream into a container file.

    Frames are restamped by index at the stream's frame rate, so the
    output has exactly one frame per written input frame. Call
    [`FrameSink::finish`] to flush the codec and write the trailer. If the
    encoder is dropped without finishing (for example after an error part
    way through a stream) it finalizes the file on a best-effort basis,
    leaving a playable partial output.
*/
pub struct VideoEncoder {
    path: PathBuf,
    output: format::context::Output,
    encoder: VideoEncoderFFmpeg,
    scaler: ScalerContext,
    source_pixel: Pixel,
    stream_index: usize,
    encoder_time_base: ffmpeg_next::Rational,
    stream_time_base: ffmpeg_next::Rational,
    info: VideoStreamInfo,
    frames_written: i64,
    finished: bool,
}

impl VideoEncoder {
    /**
        Create the output file and open an encoder for frames described by
        `info` (size, frame rate and packed pixel format).

        The container header is written before this returns.
    */
    pub fn create(
        path: impl AsRef<Path>,
        info: &VideoStreamInfo,
        config: EncoderConfig,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let source_pixel = packed_pixel_to_ffmpeg(info.format)?;
        info.dimensions()?;
        if Rational::positive(info.frame_rate.num, info.frame_rate.den).is_none() {
            return Err(Error::invalid_data(format!(
                "frame rate must be positive, got {}",
                info.frame_rate
            )));
        }

        ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

        let encoder_name = config.encoder_name();
        let codec = ffmpeg_next::encoder::find_by_name(&encoder_name).ok_or_else(|| {
            Error::unsupported_format(format!("encoder not available: {encoder_name}"))
        })?;

        let container = config
            .container
            .or_else(|| ContainerFormat::from_path(&path));
        let mut output = match config.container {
            Some(container) => format::output_as(&path, container.ffmpeg_format_name()),
            None => format::output(&path),
        }
        .map_err(|e| {
            Error::codec(format!("failed to create {}: {e}", path.display()))
        })?;

        let encoder_pixel = codec
            .video()
            .ok()
            .and_then(|video| video.formats())
            .and_then(|mut formats| formats.next())
            .unwrap_or(Pixel::YUV420P);

        let frame_rate = rational_to_ffmpeg(info.frame_rate);
        let encoder_time_base = rational_to_ffmpeg(info.frame_rate.invert());
        let global_header = output
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER);

        let mut encoder = codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .map_err(|e| Error::codec(e.to_string()))?;
        encoder.set_width(info.width);
        encoder.set_height(info.height);
        encoder.set_format(encoder_pixel);
        encoder.set_frame_rate(Some(frame_rate));
        encoder.set_time_base(encoder_time_base);
        if global_header {
            encoder.set_flags(codec::Flags::GLOBAL_HEADER);
        }

        let encoder = encoder.open_as(codec).map_err(|e| {
            Error::codec(format!(
                "failed to open {encoder_name} encoder at {}x{}: {e}",
                info.width, info.height
            ))
        })?;

        let stream_index = {
            let mut stream = output
                .add_stream(codec)
                .map_err(|e| Error::codec(e.to_string()))?;
            stream.set_parameters(&encoder);
            stream.set_time_base(encoder_time_base);
            stream.set_avg_frame_rate(frame_rate);
            stream.index()
        };

        let mut options = Dictionary::new();
        if config.fast_start && container.is_some_and(|c| c.supports_fast_start()) {
            options.set("movflags", "faststart");
        }
        output
            .write_header_with(options)
            .map_err(|e| Error::codec(format!("failed to write header: {e}")))?;

        // The muxer may pick its own stream time base while writing the header.
        let stream_time_base = output
            .stream(stream_index)
            .map(|stream| stream.time_base())
            .ok_or_else(|| Error::codec("output stream disappeared after header"))?;

        let scaler = ScalerContext::get(
            source_pixel,
            info.width,
            info.height,
            encoder_pixel,
            info.width,
            info.height,
            ScalerFlags::BILINEAR,
        )
        .map_err(|e| Error::codec(format!("failed to create scaler: {e}")))?;

        tracing::debug!(
            path = %path.display(),
            encoder = %encoder_name,
            width = info.width,
            height = info.height,
            frame_rate = %info.frame_rate,
            pixel_format = ?encoder_pixel,
            "opened video encoder"
        );

        Ok(Self {
            path,
            output,
            encoder,
            scaler,
            source_pixel,
            stream_index,
            encoder_time_base,
            stream_time_base,
            info: *info,
            frames_written: 0,
            finished: false,
        })
    }

    /**
        Number of frames sent to the encoder so far.
    */
    pub fn frames_written(&self) -> u64 {
        self.frames_written as u64
    }

    /**
        Receive all available packets from the encoder and mux them.
    */
    fn drain_packets(&mut self) -> Result<()> {
        let mut packet = ffmpeg_next::Packet::empty();

        loop {
            match self.encoder.receive_packet(&mut packet) {
                Ok(()) => {
                    packet.set_stream(self.stream_index);
                    packet.rescale_ts(self.encoder_time_base, self.stream_time_base);
                    packet
                        .write_interleaved(&mut self.output)
                        .map_err(|e| Error::codec(format!("failed to write packet: {e}")))?;
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
        Signal end of stream to the codec and mux the packets it still holds.
    */
    fn flush_codec(&mut self) -> Result<()> {
        self.encoder
            .send_eof()
            .map_err(|e| Error::codec(e.to_string()))?;
        self.drain_packets()
    }

    fn write_trailer(&mut self) -> Result<()> {
        self.output
            .write_trailer()
            .map_err(|e| Error::codec(format!("failed to write trailer: {e}")))
    }

    /**
        Copy a packed frame into a newly allocated FFmpeg frame.
    */
    fn stage_frame(&self, frame: &VideoFrame) -> Result<VideoFrameFFmpeg> {
        let row_bytes = frame.check_packed()?;
        let mut staged = VideoFrameFFmpeg::new(self.source_pixel, frame.width, frame.height);

        let stride = staged.stride(0);
        let plane = staged.data_mut(0);
        for (y, row) in frame.data.chunks_exact(row_bytes).enumerate() {
            let start = y * stride;
            plane[start..start + row_bytes].copy_from_slice(row);
        }

        Ok(staged)
    }
}

impl FrameSink for VideoEncoder {
    fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        if self.finished {
            return Err(Error::codec("encoder already finished"));
        }
        if frame.width != self.info.width
            || frame.height != self.info.height
            || frame.format != self.info.format
        {
            return Err(Error::invalid_data(format!(
                "encoder expects {}x{} {}, got {}x{} {}",
                self.info.width,
                self.info.height,
                self.info.format,
                frame.width,
                frame.height,
                frame.format
            )));
        }

        let staged = self.stage_frame(frame)?;
        let mut converted = VideoFrameFFmpeg::empty();
        self.scaler
            .run(&staged, &mut converted)
            .map_err(|e| Error::codec(format!("pixel conversion failed: {e}")))?;
        converted.set_pts(Some(self.frames_written));

        self.encoder
            .send_frame(&converted)
            .map_err(|e| Error::codec(e.to_string()))?;
        self.frames_written += 1;

        self.drain_packets()
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        // Never retried, even if flushing fails below.
        self.finished = true;

        flush_then_close(self, Self::flush_codec, Self::write_trailer)?;

        tracing::debug!(
            path = %self.path.display(),
            frames = self.frames_written,
            "finalized output"
        );
        Ok(())
    }
}

impl Drop for VideoEncoder {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.finish() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to finalize partial output"
            );
        }
    }
}

impl std::fmt::Debug for VideoEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoEncoder")
            .field("path", &self.path)
            .field("info", &self.info)
            .field("frames_written", &self.frames_written)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

fn rational_to_ffmpeg(value: Rational) -> ffmpeg_next::Rational {
    ffmpeg_next::Rational::new(value.num, value.den)
}

/**
    Run `flush`, then `close` regardless of how the flush went, so the
    container is closed over whatever was muxed. The first error wins.
*/
fn flush_then_close<T>(
    target: &mut T,
    flush: impl FnOnce(&mut T) -> Result<()>,
    close: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let flushed = flush(target);
    let closed = close(target);
    flushed.and(closed)
}
