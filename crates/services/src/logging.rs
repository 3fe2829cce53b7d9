use tracing_subscriber::EnvFilter;

/// Filter used when none is configured.
pub const DEFAULT_FILTER: &str = "services=info,storage=info";

/// Install a compact stdout subscriber.
///
/// `filter` uses `EnvFilter` directive syntax; `None` falls back to
/// `DEFAULT_FILTER`. Returns false if a global subscriber was already set,
/// which makes repeated calls harmless.
pub fn init_tracing(filter: Option<&str>) -> bool {
    let filter = filter
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
