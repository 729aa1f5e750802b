use tracing_subscriber::EnvFilter;

/**
    Install the global log subscriber.

    `RUST_LOG` takes precedence, otherwise `--verbose` selects debug output
    for the conversion crates.
*/
pub fn init(verbose: bool) {
    let default_directives = if verbose {
        "stereoconv=debug,stereo_decode=debug,stereo_sink=debug,stereo_transform=debug,info"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
