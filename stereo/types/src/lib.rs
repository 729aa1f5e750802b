/*!
    Shared types for the stereoscopic layout converter.

    This crate defines the vocabulary of the workspace, the types that cross
    crate boundaries. It has no dependency on FFmpeg, so the layout transform
    and its tests can be built without FFmpeg bindings.

    # Layout Types

    - [`Layout`] - Side-by-side or top-and-bottom packing
    - [`FrameDimensions`] and [`EyeResolution`] - Frame and per-eye sizes
    - [`ConversionRequest`] - Input layout, output layout and dimensions

    # Frame Types

    - [`VideoFrame`] - Decoded, tightly packed frame data
    - [`PixelFormat`] - Video pixel formats
    - [`Rational`] and [`Pts`] - Frame rates, time bases and timestamps
    - [`VideoStreamInfo`] - Declared stream properties

    # Error Handling

    - [`Error`] and [`Result`] - Common error types
*/

mod error;
mod format;
mod frame;
mod layout;
mod rational;
mod stream;
mod timestamp;

pub use error::{Dimension, Error, Result};
pub use format::PixelFormat;
pub use frame::VideoFrame;
pub use layout::{ConversionRequest, EyeResolution, FrameDimensions, Layout};
pub use rational::Rational;
pub use stream::VideoStreamInfo;
pub use timestamp::Pts;
