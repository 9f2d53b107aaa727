use tracing_subscriber::{EnvFilter, fmt};

/// Installs the stderr subscriber. Verbosity comes from `RUST_LOG`; stdout
/// is reserved for reports, so diagnostics go to the other stream.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // Ignore the error if a subscriber is already set (e.g. in tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
}
