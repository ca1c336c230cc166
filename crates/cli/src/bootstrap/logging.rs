use tracing::info;
use tracing_subscriber::EnvFilter;
use ztnet_dns_domain::Config;

/// Install the global tracing subscriber.
///
/// RUST_LOG, when set, wins over the configured filter; a malformed
/// directive string degrades to plain INFO rather than failing startup.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(true)
        .init();

    info!(filter = %config.logging.filter, "Logging initialized");
}
