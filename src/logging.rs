//! Structured logging setup.
//!
//! The provider logs through the `tracing` ecosystem. All output goes to
//! **stderr** so stdout stays free for whatever host process embeds the
//! provider. Filtering follows the `RUST_LOG` environment variable, e.g.:
//!
//! ```bash
//! RUST_LOG=info            # default level
//! RUST_LOG=imply_provider=debug
//! RUST_LOG=warn,imply_provider=debug
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
}

/// Initialize the global logging subscriber.
///
/// Respects `RUST_LOG`, defaulting to `info` when unset.
///
/// # Panics
///
/// Panics if a global subscriber has already been set; use
/// [`try_init_logging`] when that is a possibility.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(stderr_layer())
        .init();
}

/// Try to initialize logging, returning `false` when a subscriber was
/// already installed. Useful in tests where initialization may race.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so the
    // init paths are exercised indirectly; here we only check the filter
    // syntax we document.
    #[test]
    fn documented_filter_directives_parse() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("imply_provider=debug").is_ok());
        assert!(EnvFilter::try_new("warn,imply_provider=debug").is_ok());
    }
}
