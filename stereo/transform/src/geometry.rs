/*!
    Frame geometry checks and output size arithmetic.

    Everything here is pure and runs once per video, before the first
    frame is decoded.
*/

use stereo_types::{Dimension, Error, EyeResolution, FrameDimensions, Layout, Result};

/**
    Validate that a frame of the given size can be split into two equal
    eye images according to `layout`, and return the size of one eye.

    Side-by-side frames need an even width, top-and-bottom frames an even
    height.
*/
pub fn validate_resolution(width: u32, height: u32, layout: Layout) -> Result<EyeResolution> {
    let axis = layout.split_axis();
    let value = match axis {
        Dimension::Width => width,
        Dimension::Height => height,
    };
    if value % 2 != 0 {
        return Err(Error::odd_dimension(axis, value, layout));
    }

    Ok(match axis {
        Dimension::Width => EyeResolution {
            eye_width: width / 2,
            eye_height: height,
        },
        Dimension::Height => EyeResolution {
            eye_width: width,
            eye_height: height / 2,
        },
    })
}

/**
    Reject a conversion between identical layouts.
*/
pub fn ensure_conversion(input_layout: Layout, output_layout: Layout) -> Result<()> {
    if input_layout == output_layout {
        return Err(Error::NoConversionNeeded {
            layout: input_layout,
        });
    }
    Ok(())
}

/**
    Compute the frame size the encoder must be opened with.

    The two layouts pack the eyes along different axes, so converting
    halves the input's split axis and doubles the other one:

    - side-by-side to top-and-bottom: `(W, H) -> (W / 2, H * 2)`
    - top-and-bottom to side-by-side: `(W, H) -> (W * 2, H / 2)`

    The split axis is re-validated here, so a frame that was never passed
    through [`validate_resolution`] is rejected rather than truncated.
*/
pub fn compute_output_dimensions(
    input_width: u32,
    input_height: u32,
    input_layout: Layout,
    output_layout: Layout,
) -> Result<FrameDimensions> {
    ensure_conversion(input_layout, output_layout)?;
    let eye = validate_resolution(input_width, input_height, input_layout)?;

    let (width, height) = match input_layout {
        Layout::SideBySide => (Some(eye.eye_width), eye.eye_height.checked_mul(2)),
        Layout::TopAndBottom => (eye.eye_width.checked_mul(2), Some(eye.eye_height)),
    };

    match (width, height) {
        (Some(width), Some(height)) => FrameDimensions::new(width, height),
        _ => Err(Error::invalid_data(format!(
            "{input_width}x{input_height} {input_layout} frame is too large to convert to {output_layout}"
        ))),
    }
}
