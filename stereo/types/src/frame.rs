/*!
    Decoded frame type.
*/

use crate::{Error, FrameDimensions, PixelFormat, Pts, Rational, Result};

/**
    A decoded video frame.

    Pixel data is row-major and tightly packed: row `y` starts at byte
    `y * row_bytes()` with no padding between rows. Frames that come out of
    the decoder always use a packed format; see [`PixelFormat::bytes_per_pixel`].
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    /// Raw pixel data.
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format of the data.
    pub format: PixelFormat,
    /// Presentation timestamp (None for frames without timing).
    pub pts: Option<Pts>,
    /// Time base for interpreting the PTS.
    pub time_base: Rational,
}

impl VideoFrame {
    /**
        Create a new video frame.
    */
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
        pts: Option<Pts>,
        time_base: Rational,
    ) -> Self {
        Self {
            data,
            width,
            height,
            format,
            pts,
            time_base,
        }
    }

    /**
        Returns the frame's width and height.
    */
    pub fn dimensions(&self) -> Result<FrameDimensions> {
        FrameDimensions::new(self.width, self.height)
    }

    /**
        Returns the number of bytes in one row of pixels.

        Fails for planar formats, which have no single row size.
    */
    pub fn row_bytes(&self) -> Result<usize> {
        let bpp = self.format.bytes_per_pixel().ok_or_else(|| {
            Error::unsupported_format(format!(
                "{} is planar, a packed pixel format is required",
                self.format
            ))
        })?;
        Ok(self.width as usize * bpp)
    }

    /**
        Returns the expected data length in bytes for a packed frame.
    */
    pub fn expected_data_len(&self) -> Result<usize> {
        Ok(self.row_bytes()? * self.height as usize)
    }

    /**
        Check that the frame is packed and that its buffer holds exactly
        `width * height` pixels. Returns the row size in bytes.
    */
    pub fn check_packed(&self) -> Result<usize> {
        let row_bytes = self.row_bytes()?;
        let expected = row_bytes * self.height as usize;
        if self.data.len() != expected {
            return Err(Error::invalid_data(format!(
                "{}x{} {} frame needs {expected} bytes, buffer has {}",
                self.width,
                self.height,
                self.format,
                self.data.len()
            )));
        }
        Ok(row_bytes)
    }

    /**
        Returns row `y` of a packed frame.

        The frame must have passed [`VideoFrame::check_packed`].
    */
    pub fn row(&self, y: u32, row_bytes: usize) -> &[u8] {
        let start = y as usize * row_bytes;
        &self.data[start..start + row_bytes]
    }
}

// Ensure frames are Send + Sync
static_assertions::assert_impl_all!(VideoFrame: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    const TB_1_1000: Rational = Rational { num: 1, den: 1000 };

    #[test]
    fn video_frame_construction() {
        let frame = VideoFrame::new(
            vec![0u8; 100 * 50 * 3],
            100,
            50,
            PixelFormat::Bgr24,
            Some(Pts(1000)),
            TB_1_1000,
        );

        assert_eq!(frame.width, 100);
        assert_eq!(frame.height, 50);
        assert_eq!(frame.format, PixelFormat::Bgr24);
        assert_eq!(frame.row_bytes().unwrap(), 300);
        assert_eq!(frame.expected_data_len().unwrap(), 100 * 50 * 3);
        assert_eq!(frame.check_packed().unwrap(), 300);
    }

    #[test]
    fn check_packed_rejects_short_buffer() {
        let frame = VideoFrame::new(vec![0; 10], 4, 4, PixelFormat::Gray8, None, TB_1_1000);
        assert!(matches!(
            frame.check_packed(),
            Err(Error::InvalidData { .. })
        ));
    }

    #[test]
    fn check_packed_rejects_planar() {
        let frame = VideoFrame::new(vec![0; 24], 4, 4, PixelFormat::Yuv420p, None, TB_1_1000);
        assert!(matches!(
            frame.check_packed(),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn rows_are_contiguous() {
        let data: Vec<u8> = (0..12).collect();
        let frame = VideoFrame::new(data, 2, 2, PixelFormat::Rgb24, None, TB_1_1000);
        let row_bytes = frame.check_packed().unwrap();

        assert_eq!(frame.row(0, row_bytes), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(frame.row(1, row_bytes), &[6, 7, 8, 9, 10, 11]);
    }
}
