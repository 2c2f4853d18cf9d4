//! Tracing subscriber setup for the `archivo` binary.
//!
//! Logs go to stderr so tables printed on stdout stay pipeable. `RUST_LOG`
//! takes precedence over the verbosity flag.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "archivo=debug" } else { "archivo=warn" }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(default_directive(true), "archivo=debug");
        assert_eq!(default_directive(false), "archivo=warn");
    }

    #[test]
    fn second_init_does_not_panic() {
        init_tracing(false, LogFormat::Pretty);
        init_tracing(true, LogFormat::Json);
    }
}
