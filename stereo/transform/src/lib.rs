/*!
    Stereoscopic frame layout transformation.

    This crate repacks stereoscopic frames between the two common layouts:

    - **Side-by-side (SBS)**: left and right eye images next to each other
    - **Top-and-bottom (TAB)**: left eye image above the right one

    Converting never resamples. Each eye image is moved as a block of
    pixels, so SBS → TAB → SBS gives back the exact input frame.

    # Geometry

    Geometry is checked once per video, before any frame is decoded:

    ```ignore
    use stereo_transform::{compute_output_dimensions, validate_resolution};
    use stereo_types::Layout;

    let eye = validate_resolution(3840, 1080, Layout::SideBySide)?;
    // eye = 1920x1080

    let out = compute_output_dimensions(3840, 1080, Layout::SideBySide, Layout::TopAndBottom)?;
    // out = 1920x2160, open the encoder with this size
    ```

    # Converting a Stream

    ```ignore
    use stereo_transform::{LayoutTransform, convert_stream};
    use stereo_types::{ConversionRequest, Layout};

    let request = ConversionRequest::new(Layout::SideBySide, Layout::TopAndBottom, dims)?;
    let transform = LayoutTransform::new(request)?;

    let stats = convert_stream(&transform, &mut decoder, &mut encoder)?;
    ```

    The decoder and encoder plug in through the [`FrameSource`] and
    [`FrameSink`] traits. The loop is sequential: frames are written in the
    order they are decoded.

    # Stateless

    Frame transformation is stateless: each frame transforms independently
    and the input frame is never modified.
*/

pub use stereo_types::{
    ConversionRequest, Error, EyeResolution, FrameDimensions, Layout, PixelFormat, Result,
    VideoFrame,
};

mod geometry;
mod layout;
mod stream;

pub use geometry::{compute_output_dimensions, ensure_conversion, validate_resolution};
pub use layout::{LayoutTransform, convert_frame, sbs_to_tab, tab_to_sbs};
pub use stream::{ConversionStats, FrameSink, FrameSource, convert_stream};
