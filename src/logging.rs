//! Tracing subscriber installation.

use std::{str::FromStr, sync::Once};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::SubscriberInitExt};

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

static TRACING_INSTALLED: Once = Once::new();

/// Parses a level name, falling back to `info` for anything unrecognised.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level).unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Installs a formatted subscriber at `level` (idempotent).
///
/// `RUST_LOG` directives take precedence over `level`. Only the first call has any effect.
pub fn init(level: &str) {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(parse_level(level).into())
            .from_env_lossy();

        let result = tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_filter(filter))
            .try_init();

        if result.is_err() {
            eprintln!("Waypoint tracing subscriber failed to initialize");
        }
    });
}
