/*!
    Error types for the stereoscopic layout converter.
*/

use std::io;

use thiserror::Error;

use crate::Layout;

/**
    Frame axis named by a geometry error.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/**
    Error type for the stereoscopic layout converter.

    Configuration mistakes (bad layout, odd dimensions, identical layouts)
    and environment failures (I/O, codec, malformed data) are separate
    variants, see [`Error::is_config_error`].
*/
#[derive(Debug, Error)]
pub enum Error {
    /// Frame dimensions cannot be split according to the declared layout.
    #[error("invalid {layout} geometry: {dimension} must be even (got {value})")]
    InvalidGeometry {
        dimension: Dimension,
        value: u32,
        layout: Layout,
    },
    /// Input and output layouts are the same.
    #[error("no conversion needed: input and output are both {layout}")]
    NoConversionNeeded { layout: Layout },
    /// A layout name outside of `sbs` / `tab`.
    #[error("unsupported layout: {value:?} (expected sbs or tab)")]
    UnsupportedLayout { value: String },
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Codec error (decode/encode/mux failure)
    #[error("codec error: {message}")]
    Codec { message: String },
    /// Invalid data (malformed frame or stream)
    #[error("invalid data: {message}")]
    InvalidData { message: String },
    /// Unsupported format (valid but not handled)
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },
}

impl Error {
    /**
        Create a geometry error for an odd dimension.
    */
    pub fn odd_dimension(dimension: Dimension, value: u32, layout: Layout) -> Self {
        Self::InvalidGeometry {
            dimension,
            value,
            layout,
        }
    }

    /**
        Create a codec error with the given message.
    */
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /**
        Create an invalid data error with the given message.
    */
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /**
        Create an unsupported format error with the given message.
    */
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /**
        Returns true if this error comes from the requested conversion itself
        rather than from the environment it runs in.

        Configuration errors are detected before any frame is processed.
    */
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidGeometry { .. }
                | Self::NoConversionNeeded { .. }
                | Self::UnsupportedLayout { .. }
        )
    }
}

/**
    Result type alias for the stereoscopic layout converter.
*/
pub type Result<T> = std::result::Result<T, Error>;
