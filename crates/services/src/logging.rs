use tracing_subscriber::EnvFilter;

/// Install a console subscriber for quiz events.
///
/// `RUST_LOG` takes precedence; otherwise `debug` selects the `debug` level and
/// the default is `info`. Returns `false` if a global subscriber already exists.
pub fn init(debug: bool) -> bool {
    let fallback = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
