//! Tracing setup.
//!
//! The configured level applies to swatch's own crates; everything else stays
//! at `warn`. `RUST_LOG` directives win for any target they name, and a bare
//! level in `RUST_LOG` replaces the `warn` default for other crates.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{runtime_dir, LogLevel};

static INIT: OnceLock<()> = OnceLock::new();

/// Targets the configured level applies to.
const OWN_TARGETS: [&str; 3] = ["swatch", "swatch_theme", "swatch_storage"];

const LOG_FILE_PREFIX: &str = "swatch";
const MAX_LOG_FILES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Daily-rolling file in the runtime directory; errors are echoed to
    /// stderr as well.
    File,
    Stderr,
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

pub fn init(level: LogLevel, mode: LogMode, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let Some(level) = cli_override.unwrap_or(level).as_tracing_level() else {
            return;
        };
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let directives = filter_directives(level, env.as_deref());

        guard = match mode {
            LogMode::File => init_file_logging(&directives),
            LogMode::Stderr => {
                init_stderr_logging(&directives);
                None
            }
        };
    });

    LogGuard { _guard: guard }
}

/// Builds the filter directive string for `level`, merged with `env`
/// (the value of `RUST_LOG`, if any).
pub fn filter_directives(level: Level, env: Option<&str>) -> String {
    let env_directives: Vec<&str> = env
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();

    let named = |target: &str| {
        env_directives.iter().any(|d| {
            d.split_once('=')
                .is_some_and(|(t, _)| t.split('[').next() == Some(target))
        })
    };
    let has_global = env_directives.iter().any(|d| !d.contains('='));

    let mut directives = Vec::new();
    if !has_global {
        directives.push("warn".to_string());
    }
    for target in OWN_TARGETS {
        if !named(target) {
            directives.push(format!("{}={}", target, level.as_str().to_lowercase()));
        }
    }
    directives.extend(env_directives.iter().map(|d| d.to_string()));
    directives.join(",")
}

fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn init_file_logging(directives: &str) -> Option<WorkerGuard> {
    let dir = log_dir();

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: Failed to create log directory {:?}: {}", dir, e);
        init_stderr_logging(directives);
        return None;
    }

    let file_appender = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(&dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Warning: Failed to open log file in {:?}: {}", dir, e);
            init_stderr_logging(directives);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(build_filter(directives));

    let error_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(error_layer)
        .init();

    Some(guard)
}

fn init_stderr_logging(directives: &str) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_filter(directives))
        .with(stderr_layer)
        .init();
}

pub fn log_dir() -> PathBuf {
    runtime_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level_applies_to_own_crates() {
        assert_eq!(
            filter_directives(Level::DEBUG, None),
            "warn,swatch=debug,swatch_theme=debug,swatch_storage=debug"
        );
    }

    #[test]
    fn test_env_target_replaces_own_directive() {
        assert_eq!(
            filter_directives(Level::INFO, Some("swatch_storage=trace, regex=debug")),
            "warn,swatch=info,swatch_theme=info,swatch_storage=trace,regex=debug"
        );
    }

    #[test]
    fn test_env_global_level_replaces_default() {
        assert_eq!(
            filter_directives(Level::WARN, Some("info")),
            "swatch=warn,swatch_theme=warn,swatch_storage=warn,info"
        );
    }

    #[test]
    fn test_directives_parse() {
        let filter = build_filter(&filter_directives(Level::DEBUG, Some("swatch_storage=trace")));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
