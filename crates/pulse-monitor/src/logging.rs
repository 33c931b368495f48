//! Logging setup.

use std::str::FromStr;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Dependencies that are only interesting at warn and above.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "sqlx", "h2", "rustls"];

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// The CLI flag wins over the configured format.
    pub fn resolve(json_flag: bool, configured: &str) -> Self {
        if json_flag {
            LogFormat::Json
        } else {
            configured.parse().unwrap_or(LogFormat::Pretty)
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

fn directives(level: &str) -> String {
    let mut directives = vec![level.to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|t| format!("{}=warn", t)));
    directives.join(",")
}

/// `RUST_LOG` when set, otherwise `level` with noisy dependencies capped.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Setup logging with the given level.
///
/// Fails if a global subscriber is already installed.
pub fn setup_logging(level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let filter = build_filter(level);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_resolution() {
        assert_eq!(LogFormat::resolve(true, "pretty"), LogFormat::Json);
        assert_eq!(LogFormat::resolve(false, "json"), LogFormat::Json);
        assert_eq!(LogFormat::resolve(false, "JSON"), LogFormat::Json);
        assert_eq!(LogFormat::resolve(false, "pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::resolve(false, "bogus"), LogFormat::Pretty);
    }

    #[test]
    fn test_directives_cap_dependencies() {
        let d = directives("debug");
        assert!(d.starts_with("debug,"));
        assert!(d.contains("sqlx=warn"));
        assert!(d.contains("hyper=warn"));
    }
}
