//! Tracing setup.
//!
//! The terminal UI owns the screen, so interactive runs only log when
//! `--log-file` is given. Headless commands may log to stderr instead.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Args;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{AppError, Result};

/// Target name of this crate's events
const CRATE_TARGET: &str = "valentine";

/// Logging controls shared by every command
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Write logs to FILE
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level for this crate (error|warn|info|debug|trace); overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Compute the filter directive with precedence:
/// - `--log-level` (scoped to this crate)
/// - `RUST_LOG`
/// - `info` for this crate
pub fn filter_directive(log_level: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(level) = log_level {
        return format!("{}={}", CRATE_TARGET, level.trim().to_ascii_lowercase());
    }
    match rust_log.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_string(),
        _ => format!("{}=info", CRATE_TARGET),
    }
}

/// Install the global subscriber.
///
/// Without a log file, events go to stderr when `stderr_fallback` is set and
/// are dropped otherwise.
pub fn init(args: &LogArgs, stderr_fallback: bool) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(args.log_level.as_deref(), rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| AppError::Logging(format!("invalid filter '{directive}': {e}")))?;

    let installed = match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| AppError::Logging(format!("{}: {e}", path.display())))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
        }
        None if stderr_fallback => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().without_time().with_writer(std::io::stderr))
            .try_init(),
        None => return Ok(()),
    };

    installed.map_err(|e| AppError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_flag_wins() {
        assert_eq!(filter_directive(Some("DEBUG"), Some("warn")), "valentine=debug");
    }

    #[test]
    fn test_rust_log_used_when_no_flag() {
        assert_eq!(filter_directive(None, Some("valentine=trace")), "valentine=trace");
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(filter_directive(None, None), "valentine=info");
        assert_eq!(filter_directive(None, Some("  ")), "valentine=info");
    }

    #[test]
    fn test_filter_directives_parse() {
        for directive in [filter_directive(Some("trace"), None), filter_directive(None, None)] {
            assert!(EnvFilter::try_new(&directive).is_ok());
        }
    }
}
