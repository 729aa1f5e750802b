/*!
    The decode → transform → encode loop.
*/

use stereo_types::{Result, VideoFrame};

use crate::LayoutTransform;

const PROGRESS_INTERVAL: u64 = 250;

/**
    Something that produces decoded frames in stream order.
*/
pub trait FrameSource {
    /**
        Returns the next frame, or `None` at end of stream.
    */
    fn next_frame(&mut self) -> Result<Option<VideoFrame>>;
}

/**
    Something that consumes transformed frames in stream order.
*/
pub trait FrameSink {
    /**
        Write one frame. Frames arrive in the order they were decoded.
    */
    fn write_frame(&mut self, frame: &VideoFrame) -> Result<()>;

    /**
        Flush buffered output and finalize. Called once, after the last
        frame of a successful run.
    */
    fn finish(&mut self) -> Result<()>;
}

impl<T: FrameSource + ?Sized> FrameSource for &mut T {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        (**self).next_frame()
    }
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        (**self).write_frame(frame)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/**
    Counters for a completed conversion.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Frames pulled from the source.
    pub frames_read: u64,
    /// Frames handed to the sink.
    pub frames_written: u64,
}

/**
    Run a conversion over a whole stream.

    Frames are processed strictly one at a time in decode order, so output
    frame `k` is always the transform of input frame `k`. The first error
    from the source, the transform or the sink ends the run and is returned
    as-is; frames written before it stay written and the sink is not
    finished. An empty source produces an empty, finished output.
*/
pub fn convert_stream<S, K>(
    transform: &LayoutTransform,
    mut source: S,
    mut sink: K,
) -> Result<ConversionStats>
where
    S: FrameSource,
    K: FrameSink,
{
    let mut stats = ConversionStats::default();

    while let Some(frame) = source.next_frame()? {
        stats.frames_read += 1;

        let converted = transform.transform(&frame)?;
        sink.write_frame(&converted)?;
        stats.frames_written += 1;

        if stats.frames_written % PROGRESS_INTERVAL == 0 {
            tracing::debug!(frames = stats.frames_written, "converting");
        }
    }

    sink.finish()?;
    tracing::debug!(
        frames_read = stats.frames_read,
        frames_written = stats.frames_written,
        "stream converted"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use stereo_types::{
        ConversionRequest, Error, FrameDimensions, Layout, PixelFormat, Pts, Rational,
    };

    use super::*;
    use crate::{sbs_to_tab, tab_to_sbs};

    const TB: Rational = Rational { num: 1, den: 30 };

    /// Yields queued results in order, then end of stream.
    struct QueueSource {
        items: VecDeque<Result<VideoFrame>>,
        polls: usize,
    }

    impl QueueSource {
        fn frames(frames: Vec<VideoFrame>) -> Self {
            Self {
                items: frames.into_iter().map(Ok).collect(),
                polls: 0,
            }
        }

        fn failing_after(frames: Vec<VideoFrame>) -> Self {
            let mut source = Self::frames(frames);
            source
                .items
                .push_back(Err(Error::codec("corrupt packet")));
            source
        }
    }

    impl FrameSource for QueueSource {
        fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
            self.polls += 1;
            self.items.pop_front().transpose()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<VideoFrame>,
        finished: usize,
        fail_at: Option<usize>,
    }

    impl FrameSink for RecordingSink {
        fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
            if self.fail_at == Some(self.frames.len()) {
                return Err(Error::Io(std::io::Error::other("disk full")));
            }
            self.frames.push(frame.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished += 1;
            Ok(())
        }
    }

    fn transform(width: u32, height: u32, from: Layout) -> LayoutTransform {
        let dims = FrameDimensions::new(width, height).unwrap();
        let request = ConversionRequest::new(from, from.opposite(), dims).unwrap();
        LayoutTransform::new(request).unwrap()
    }

    /// A 4x2 gray frame filled with the frame index, tagged with it as PTS.
    fn indexed_frame(index: u8) -> VideoFrame {
        let data = (0..8).map(|i| index.wrapping_mul(16).wrapping_add(i)).collect();
        VideoFrame::new(
            data,
            4,
            2,
            PixelFormat::Gray8,
            Some(Pts(index as i64)),
            TB,
        )
    }

    #[test]
    fn empty_stream_produces_empty_output() {
        let transform = transform(4, 2, Layout::SideBySide);
        let mut source = QueueSource::frames(vec![]);
        let mut sink = RecordingSink::default();

        let stats = convert_stream(&transform, &mut source, &mut sink).unwrap();

        assert_eq!(stats, ConversionStats::default());
        assert!(sink.frames.is_empty());
        assert_eq!(sink.finished, 1);
    }

    #[test]
    fn frame_count_and_order_are_preserved() {
        let inputs: Vec<VideoFrame> = (0..5).map(indexed_frame).collect();
        let transform = transform(4, 2, Layout::SideBySide);
        let mut sink = RecordingSink::default();

        let stats =
            convert_stream(&transform, QueueSource::frames(inputs.clone()), &mut sink).unwrap();

        assert_eq!(stats.frames_read, 5);
        assert_eq!(stats.frames_written, 5);
        assert_eq!(sink.frames.len(), inputs.len());
        for (k, (input, output)) in inputs.iter().zip(&sink.frames).enumerate() {
            assert_eq!(output, &sbs_to_tab(input).unwrap(), "frame {k}");
            assert_eq!(output.pts, Some(Pts(k as i64)));
        }
        assert_eq!(sink.finished, 1);
    }

    #[test]
    fn tab_stream_is_converted_back_to_sbs() {
        let inputs: Vec<VideoFrame> = (0..3).map(indexed_frame).collect();
        let stacked: Vec<VideoFrame> = inputs.iter().map(|f| sbs_to_tab(f).unwrap()).collect();
        let transform = transform(2, 4, Layout::TopAndBottom);
        let mut sink = RecordingSink::default();

        convert_stream(&transform, QueueSource::frames(stacked.clone()), &mut sink).unwrap();

        for (stacked, output) in stacked.iter().zip(&sink.frames) {
            assert_eq!(output, &tab_to_sbs(stacked).unwrap());
        }
        assert_eq!(sink.frames, inputs);
    }

    #[test]
    fn source_error_aborts_without_finishing() {
        let inputs: Vec<VideoFrame> = (0..3).map(indexed_frame).collect();
        let transform = transform(4, 2, Layout::SideBySide);
        let mut source = QueueSource::failing_after(inputs);
        let mut sink = RecordingSink::default();

        let err = convert_stream(&transform, &mut source, &mut sink).unwrap_err();

        assert!(matches!(err, Error::Codec { .. }));
        assert_eq!(sink.frames.len(), 3);
        assert_eq!(sink.finished, 0);
    }

    #[test]
    fn sink_error_stops_pulling_frames() {
        let inputs: Vec<VideoFrame> = (0..5).map(indexed_frame).collect();
        let transform = transform(4, 2, Layout::SideBySide);
        let mut source = QueueSource::frames(inputs);
        let mut sink = RecordingSink {
            fail_at: Some(2),
            ..Default::default()
        };

        let err = convert_stream(&transform, &mut source, &mut sink).unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert_eq!(sink.frames.len(), 2);
        assert_eq!(source.polls, 3);
        assert_eq!(sink.finished, 0);
    }

    #[test]
    fn mid_stream_size_change_is_rejected() {
        let mut inputs: Vec<VideoFrame> = (0..2).map(indexed_frame).collect();
        inputs.push(VideoFrame::new(vec![0; 12], 6, 2, PixelFormat::Gray8, None, TB));
        let transform = transform(4, 2, Layout::SideBySide);
        let mut sink = RecordingSink::default();

        let err =
            convert_stream(&transform, QueueSource::frames(inputs), &mut sink).unwrap_err();

        assert!(matches!(err, Error::InvalidData { .. }));
        assert_eq!(sink.frames.len(), 2);
    }
}
