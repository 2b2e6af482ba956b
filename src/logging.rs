use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber for the binaries.
///
/// `RUST_LOG` wins when set; otherwise `verbose` switches between `debug` and
/// `warn` for this crate. Stdout is left alone for command output and the
/// JSON-RPC stream.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "pokedex_browser=debug"
    } else {
        "pokedex_browser=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
