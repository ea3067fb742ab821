// Observability infrastructure using tracing crate
// Structured logging for the feed without drowning out CLI output

use anyhow::Result;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize the observability system
/// RUST_LOG takes precedence; --verbose lowers the default level to debug
pub fn init(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "vital_feed=debug,vitalfeed=debug"
    } else {
        "vital_feed=info,vitalfeed=info"
    };

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    Ok(())
}
