use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the tracing subscriber for the CLI binaries.
///
/// Logs go to stderr so stdout carries only command output. `RUST_LOG`
/// overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fredseries=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
