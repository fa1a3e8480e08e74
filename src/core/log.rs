use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const APP_DIRECTIVE: &str = "satoshi_dalasi=debug";

/// `--verbose` turns on debug output for this crate; `RUST_LOG` directives
/// apply on their own and are added on top. With neither, logging is off.
pub fn log_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    let env_directives = env_directives.map(str::trim).filter(|d| !d.is_empty());
    match (verbose, env_directives) {
        (true, Some(directives)) => EnvFilter::new(format!("{APP_DIRECTIVE},{directives}")),
        (true, None) => EnvFilter::new(APP_DIRECTIVE),
        (false, Some(directives)) => EnvFilter::new(directives),
        (false, None) => EnvFilter::new("off"),
    }
}

pub fn build_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(filter)
}

pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_subscriber(log_filter(verbose, env_directives.as_deref())).init();
}
