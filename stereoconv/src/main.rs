use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stereo_sink::ContainerFormat;
use stereo_types::{Layout, PixelFormat};

mod convert;
mod logging;
mod paths;

use convert::ConvertOptions;

#[derive(Parser, Debug)]
#[command(name = "stereoconv")]
#[command(about = "Convert stereoscopic 3D video between side-by-side and top-and-bottom layouts")]
struct Args {
    /// Input video file
    input: PathBuf,

    /// Output video file
    output: PathBuf,

    /// Layout of the input video (sbs or tab)
    #[arg(short = 'i', long)]
    input_format: Layout,

    /// Layout to write (sbs or tab)
    #[arg(short = 'o', long)]
    output_format: Layout,

    /// Encoder name, FourCC aliases such as mp4v or mjpg are accepted
    #[arg(long, default_value = "mp4v")]
    codec: String,

    /// Container format (mp4, mkv, avi, mov, ts), guessed from the output extension if omitted
    #[arg(long)]
    format: Option<ContainerFormat>,

    /// Packed pixel format frames are decoded to before rearranging
    #[arg(long, default_value = "bgr24")]
    pixel_format: PixelFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for ConvertOptions {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            output: args.output,
            input_layout: args.input_format,
            output_layout: args.output_format,
            codec: args.codec,
            container: args.format,
            pixel_format: args.pixel_format,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let options = ConvertOptions::from(args);
    match convert::run(&options) {
        Ok(stats) => {
            tracing::info!(
                frames = stats.frames_written,
                "conversion complete: {}",
                options.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            if convert::is_config_error(&e) {
                eprintln!(
                    "hint: check --input-format and --output-format against the input's layout and resolution"
                );
            }
            ExitCode::FAILURE
        }
    }
}
