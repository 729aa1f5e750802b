/*!
    Encoder configuration types.
*/

use std::path::Path;
use std::str::FromStr;

use stereo_types::Error;

/**
    Encoder used when none is requested.
*/
pub const DEFAULT_CODEC: &str = "mpeg4";

/**
    Container format for output.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerFormat {
    /// MP4 container (most compatible).
    Mp4,
    /// Matroska container (most flexible).
    Mkv,
    /// AVI container.
    Avi,
    /// QuickTime container.
    Mov,
    /// MPEG transport stream.
    MpegTs,
}

impl ContainerFormat {
    /**
        Get the FFmpeg muxer name for this container.
    */
    pub fn ffmpeg_format_name(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mkv => "matroska",
            Self::Avi => "avi",
            Self::Mov => "mov",
            Self::MpegTs => "mpegts",
        }
    }

    /**
        Guess the container from a file extension.
    */
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /**
        Returns true if the muxer supports moving the index to the front.
    */
    pub fn supports_fast_start(&self) -> bool {
        matches!(self, Self::Mp4 | Self::Mov)
    }
}

impl FromStr for ContainerFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp4" | "m4v" => Ok(Self::Mp4),
            "mkv" | "matroska" => Ok(Self::Mkv),
            "avi" => Ok(Self::Avi),
            "mov" => Ok(Self::Mov),
            "ts" | "mpegts" => Ok(Self::MpegTs),
            other => Err(Error::unsupported_format(format!(
                "unknown container: {other}"
            ))),
        }
    }
}

/**
    Map FourCC-style codec names to FFmpeg encoder names.

    Names that are not a known alias are passed through unchanged.
*/
pub fn resolve_codec_name(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    match lower.as_str() {
        "mp4v" | "xvid" | "divx" | "fmp4" => "mpeg4".to_string(),
        "mjpg" => "mjpeg".to_string(),
        "avc1" | "h264" | "x264" => "libx264".to_string(),
        "hev1" | "hvc1" | "h265" | "hevc" | "x265" => "libx265".to_string(),
        _ => lower,
    }
}

/**
    Configuration for the video encoder.
*/
#[derive(Clone, Debug)]
pub struct EncoderConfig {
    /// FFmpeg encoder name (aliases are resolved on creation).
    pub codec: String,
    /// Container format to use (None = guess from the output path).
    pub container: Option<ContainerFormat>,
    /// Enable "fast start" for MP4/MOV (moves moov atom to beginning).
    pub fast_start: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CODEC)
    }
}

impl EncoderConfig {
    /**
        Create a new encoder configuration for the given codec.
    */
    pub fn new(codec: impl Into<String>) -> Self {
        Self {
            codec: codec.into(),
            container: None,
            fast_start: true,
        }
    }

    /**
        Force a container format instead of guessing from the path.
    */
    pub fn with_container(mut self, container: ContainerFormat) -> Self {
        self.container = Some(container);
        self
    }

    /**
        Enable or disable fast start for MP4.
    */
    pub fn with_fast_start(mut self, enabled: bool) -> Self {
        self.fast_start = enabled;
        self
    }

    /**
        The FFmpeg encoder name after alias resolution.
    */
    pub fn encoder_name(&self) -> String {
        resolve_codec_name(&self.codec)
    }
}
