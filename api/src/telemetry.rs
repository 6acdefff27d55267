/// Initializes `tracing` output for the service.
///
/// Verbosity follows `RUST_LOG`, e.g. `RUST_LOG=cafe_api=debug`. Without it
/// only `info` and above are printed.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
