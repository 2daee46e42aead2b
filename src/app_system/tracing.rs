/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (from configuration)
/// applies. Output goes to stderr so it never interleaves with the shell on
/// stdout.
///
/// ```bash
/// RUST_LOG=debug inventix                       # everything
/// RUST_LOG=inventix::sale_builder=debug inventix # just the sale service
/// ```
pub fn setup_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
