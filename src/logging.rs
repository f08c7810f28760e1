use tracing_subscriber::EnvFilter;

/// Initialise logging. Debug builds default to `debug`, release builds to
/// `info`. With `verbose` enabled the `RUST_LOG` environment variable may
/// raise or lower the level.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        // Ignore `RUST_LOG` so a stray environment variable cannot flood the
        // console output of a normal run.
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
