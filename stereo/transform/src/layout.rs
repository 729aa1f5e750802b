/*!
    Per-frame layout rearrangement.
*/

use stereo_types::{
    ConversionRequest, Error, EyeResolution, FrameDimensions, Layout, Result, VideoFrame,
};

use crate::geometry::{compute_output_dimensions, ensure_conversion, validate_resolution};

/**
    Repack a side-by-side frame as top-and-bottom.

    The frame is split at its horizontal midpoint. The left half becomes
    the top of the output and the right half the bottom, each keeping its
    original row order. The output is half as wide and twice as tall.

    With an odd width the split point is rounded down and the last column
    is dropped; callers validate the width with
    [`validate_resolution`](crate::validate_resolution) first.
*/
pub fn sbs_to_tab(frame: &VideoFrame) -> Result<VideoFrame> {
    let row_bytes = frame.check_packed()?;

    let out_width = frame.width / 2;
    let out_height = frame
        .height
        .checked_mul(2)
        .ok_or_else(|| Error::invalid_data("frame is too tall to stack"))?;
    if out_width == 0 {
        return Err(Error::invalid_data(format!(
            "{}x{} frame is too narrow to split side-by-side",
            frame.width, frame.height
        )));
    }

    let bpp = row_bytes / frame.width as usize;
    let half_bytes = out_width as usize * bpp;
    let mut data = Vec::with_capacity(half_bytes * out_height as usize);
    for y in 0..frame.height {
        data.extend_from_slice(&frame.row(y, row_bytes)[..half_bytes]);
    }
    for y in 0..frame.height {
        data.extend_from_slice(&frame.row(y, row_bytes)[half_bytes..half_bytes * 2]);
    }

    Ok(VideoFrame::new(
        data,
        out_width,
        out_height,
        frame.format,
        frame.pts,
        frame.time_base,
    ))
}

/**
    Repack a top-and-bottom frame as side-by-side.

    The frame is split at its vertical midpoint. Each output row is the
    matching top row followed by the matching bottom row. The output is
    twice as wide and half as tall.

    With an odd height the split point is rounded down and the last row
    is dropped.
*/
pub fn tab_to_sbs(frame: &VideoFrame) -> Result<VideoFrame> {
    let row_bytes = frame.check_packed()?;

    let out_height = frame.height / 2;
    let out_width = frame
        .width
        .checked_mul(2)
        .ok_or_else(|| Error::invalid_data("frame is too wide to place side by side"))?;
    if out_height == 0 {
        return Err(Error::invalid_data(format!(
            "{}x{} frame is too short to split top-and-bottom",
            frame.width, frame.height
        )));
    }

    let mut data = Vec::with_capacity(row_bytes * 2 * out_height as usize);
    for y in 0..out_height {
        data.extend_from_slice(frame.row(y, row_bytes));
        data.extend_from_slice(frame.row(y + out_height, row_bytes));
    }

    Ok(VideoFrame::new(
        data,
        out_width,
        out_height,
        frame.format,
        frame.pts,
        frame.time_base,
    ))
}

/**
    Repack a frame from one layout to the other.
*/
pub fn convert_frame(frame: &VideoFrame, from: Layout, to: Layout) -> Result<VideoFrame> {
    ensure_conversion(from, to)?;
    match from {
        Layout::SideBySide => sbs_to_tab(frame),
        Layout::TopAndBottom => tab_to_sbs(frame),
    }
}

/**
    A validated layout conversion for one video stream.

    Construction performs all geometry checks, so every frame that matches
    the declared dimensions can be transformed without further validation.
*/
#[derive(Clone, Copy, Debug)]
pub struct LayoutTransform {
    request: ConversionRequest,
    eye: EyeResolution,
    output: FrameDimensions,
}

impl LayoutTransform {
    /**
        Validate a conversion request and prepare the transform.
    */
    pub fn new(request: ConversionRequest) -> Result<Self> {
        let FrameDimensions { width, height } = request.dimensions;
        let eye = validate_resolution(width, height, request.input_layout)?;
        let output =
            compute_output_dimensions(width, height, request.input_layout, request.output_layout)?;

        tracing::debug!(
            input = %request.dimensions,
            eye = %eye,
            output = %output,
            from = %request.input_layout,
            to = %request.output_layout,
            "validated layout conversion"
        );

        Ok(Self {
            request,
            eye,
            output,
        })
    }

    pub fn input_layout(&self) -> Layout {
        self.request.input_layout
    }

    pub fn output_layout(&self) -> Layout {
        self.request.output_layout
    }

    pub fn input_dimensions(&self) -> FrameDimensions {
        self.request.dimensions
    }

    /**
        Size of one eye image, identical in both layouts.
    */
    pub fn eye_resolution(&self) -> EyeResolution {
        self.eye
    }

    /**
        Size of every frame this transform produces.
    */
    pub fn output_dimensions(&self) -> FrameDimensions {
        self.output
    }

    /**
        Repack one frame.

        Fails if the frame's size differs from the stream's declared size.
    */
    pub fn transform(&self, frame: &VideoFrame) -> Result<VideoFrame> {
        let declared = self.request.dimensions;
        if frame.width != declared.width || frame.height != declared.height {
            return Err(Error::invalid_data(format!(
                "frame is {}x{} but the stream declared {declared}",
                frame.width, frame.height
            )));
        }
        convert_frame(frame, self.request.input_layout, self.request.output_layout)
    }
}
