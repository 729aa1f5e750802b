/*!
    One conversion run: checks, decoder, transform, encoder.
*/

use std::path::PathBuf;

use anyhow::Context;

use stereo_decode::{VideoDecoder, VideoDecoderConfig};
use stereo_sink::{ContainerFormat, EncoderConfig, VideoEncoder};
use stereo_transform::{ConversionStats, LayoutTransform, convert_stream, ensure_conversion};
use stereo_types::{ConversionRequest, Error, Layout, PixelFormat};

use crate::paths;

/**
    Everything needed to convert one file.
*/
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_layout: Layout,
    pub output_layout: Layout,
    pub codec: String,
    pub container: Option<ContainerFormat>,
    pub pixel_format: PixelFormat,
}

/**
    Convert `options.input` into `options.output`.

    Filesystem and layout checks happen before anything is decoded. The
    decoder and encoder are dropped on every return path; an encoder dropped
    after a failure finalizes whatever it already wrote.
*/
pub fn run(options: &ConvertOptions) -> anyhow::Result<ConversionStats> {
    paths::check_input(&options.input)?;
    paths::prepare_output_dir(&options.output)?;
    ensure_conversion(options.input_layout, options.output_layout)?;

    let decoder_config = VideoDecoderConfig::new().with_output_format(options.pixel_format);
    let mut decoder = VideoDecoder::open(&options.input, decoder_config)
        .with_context(|| format!("failed to open input {}", options.input.display()))?;
    let info = *decoder.info();

    let dimensions = info
        .dimensions()
        .with_context(|| format!("{} declares no frame size", options.input.display()))?;
    let request = ConversionRequest::new(options.input_layout, options.output_layout, dimensions)?;
    let transform = LayoutTransform::new(request)?;

    tracing::info!(
        input = %options.input.display(),
        frame_rate = %info.frame_rate,
        "converting {} {} -> {} {} (eye {})",
        transform.input_layout(),
        transform.input_dimensions(),
        transform.output_layout(),
        transform.output_dimensions(),
        transform.eye_resolution(),
    );

    let mut encoder_config = EncoderConfig::new(options.codec.as_str());
    if let Some(container) = options.container {
        encoder_config = encoder_config.with_container(container);
    }
    let mut encoder = VideoEncoder::create(
        &options.output,
        &info.with_dimensions(transform.output_dimensions()),
        encoder_config,
    )
    .with_context(|| format!("failed to create output {}", options.output.display()))?;

    let stats = convert_stream(&transform, &mut decoder, &mut encoder).with_context(|| {
        format!(
            "conversion failed after {} frames",
            encoder.frames_written()
        )
    })?;

    Ok(stats)
}

/**
    Returns true if the run failed because the requested conversion makes
    no sense for the input (identical layouts, a frame that cannot be
    split, an unknown layout) rather than because of the environment.
*/
pub fn is_config_error(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .any(Error::is_config_error)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;
    use std::path::Path;

    use stereo_transform::{FrameSink, FrameSource};
    use stereo_types::{Pts, Rational, VideoFrame, VideoStreamInfo};

    use super::*;

    const WIDTH: u32 = 48;
    const HEIGHT: u32 = 16;
    const FRAME_RATE: Rational = Rational { num: 25, den: 1 };

    fn options(input: PathBuf, output: PathBuf, from: Layout, to: Layout) -> ConvertOptions {
        ConvertOptions {
            input,
            output,
            input_layout: from,
            output_layout: to,
            codec: "mp4v".to_string(),
            container: None,
            pixel_format: PixelFormat::Bgr24,
        }
    }

    fn write_clip(path: &Path, frames: u32) {
        let info = VideoStreamInfo {
            width: WIDTH,
            height: HEIGHT,
            frame_rate: FRAME_RATE,
            time_base: FRAME_RATE.invert(),
            format: PixelFormat::Bgr24,
        };
        let mut encoder = VideoEncoder::create(path, &info, EncoderConfig::new("mp4v")).unwrap();
        for i in 0..frames {
            let data = vec![(i * 16) as u8; (WIDTH * HEIGHT * 3) as usize];
            let frame = VideoFrame::new(
                data,
                WIDTH,
                HEIGHT,
                PixelFormat::Bgr24,
                Some(Pts(i as i64)),
                FRAME_RATE.invert(),
            );
            encoder.write_frame(&frame).unwrap();
        }
        encoder.finish().unwrap();
    }

    fn root_cause(err: &anyhow::Error) -> &Error {
        err.downcast_ref::<Error>()
            .or_else(|| err.chain().find_map(|e| e.downcast_ref::<Error>()))
            .expect("error chain should contain a conversion error")
    }

    #[test]
    fn missing_input_fails_before_touching_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out/movie_tab.avi");
        let opts = options(
            dir.path().join("missing.avi"),
            output.clone(),
            Layout::SideBySide,
            Layout::TopAndBottom,
        );

        let err = run(&opts).unwrap_err();

        assert!(matches!(root_cause(&err), Error::Io(e) if e.kind() == io::ErrorKind::NotFound));
        assert!(!is_config_error(&err));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn identical_layouts_are_rejected_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garbage.avi");
        fs::write(&input, b"this is not a video").unwrap();
        let output = dir.path().join("nested/out.avi");
        let opts = options(input, output.clone(), Layout::TopAndBottom, Layout::TopAndBottom);

        let err = run(&opts).unwrap_err();

        assert!(matches!(
            root_cause(&err),
            Error::NoConversionNeeded {
                layout: Layout::TopAndBottom
            }
        ));
        assert!(is_config_error(&err));
        // The output directory is prepared before the layout check.
        assert!(dir.path().join("nested").is_dir());
        assert!(!output.exists());
    }

    #[test]
    fn unreadable_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.avi");
        fs::write(&input, b"").unwrap();
        let opts = options(
            input,
            dir.path().join("out.avi"),
            Layout::SideBySide,
            Layout::TopAndBottom,
        );

        let err = run(&opts).unwrap_err();
        assert!(format!("{err:#}").contains("failed to open input"));
        assert!(!is_config_error(&err));
    }

    #[test]
    fn sbs_clip_converts_to_tab() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("movie_sbs.avi");
        let output = dir.path().join("converted/movie_tab.avi");
        write_clip(&input, 4);

        let stats = run(&options(
            input,
            output.clone(),
            Layout::SideBySide,
            Layout::TopAndBottom,
        ))
        .unwrap();
        assert_eq!(stats.frames_read, 4);
        assert_eq!(stats.frames_written, 4);

        let mut decoder = VideoDecoder::open(&output, VideoDecoderConfig::new()).unwrap();
        let info = *decoder.info();
        assert_eq!((info.width, info.height), (WIDTH / 2, HEIGHT * 2));
        assert_eq!(info.frame_rate, FRAME_RATE);

        let mut frames = 0;
        while decoder.next_frame().unwrap().is_some() {
            frames += 1;
        }
        assert_eq!(frames, 4);
    }

    #[test]
    fn forced_container_and_tab_to_sbs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("movie_tab.avi");
        // Extension says nothing about the container.
        let output = dir.path().join("movie_sbs.bin");
        write_clip(&input, 2);

        let mut opts = options(
            input,
            output.clone(),
            Layout::TopAndBottom,
            Layout::SideBySide,
        );
        opts.container = Some(ContainerFormat::Mkv);
        opts.codec = "mpeg4".to_string();

        let stats = run(&opts).unwrap();
        assert_eq!(stats.frames_written, 2);

        let decoder = VideoDecoder::open(&output, VideoDecoderConfig::new()).unwrap();
        assert_eq!(
            (decoder.info().width, decoder.info().height),
            (WIDTH * 2, HEIGHT / 2)
        );
    }

    #[test]
    fn wrapped_geometry_errors_are_configuration_errors() {
        let odd = Error::odd_dimension(stereo_types::Dimension::Width, 47, Layout::SideBySide);
        let err = anyhow::Error::new(odd).context("failed to prepare conversion");
        assert!(is_config_error(&err));

        let codec = anyhow::Error::new(Error::codec("encoder rejected frame"))
            .context("conversion failed after 3 frames");
        assert!(!is_config_error(&codec));
    }
}
