//! Logging setup: human-readable events on stderr, JSONL events in a log file.
//!
//! Stderr defaults to warnings only so the report line stays the only thing a
//! plain run prints; `-v`/`-vv`/`-vvv` raise it. The file layer follows
//! `RUST_LOG`, then the CLI flags, then `log_level` from config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Explicit log file path.
const ENV_LOG_PATH: &str = "WORDPROB_LOG_PATH";
/// Log directory (daily rotated files).
const ENV_LOG_DIR: &str = "WORDPROB_LOG_DIR";

const LOG_FILE_NAME: &str = "wordprob.jsonl";

/// Where log files go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact file to append to. Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily rotated `wordprob.jsonl` files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read the environment, letting `config_log_dir` stand in for an unset
    /// `WORDPROB_LOG_DIR`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::from_values(
            std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn from_values(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_dir = env_dir.or(config_dir).or_else(default_log_dir);
        Self {
            log_path: env_path,
            log_dir,
        }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    wordprob_core::config::user_data_local_dir().map(|dir| dir.join("logs").into_std_path_buf())
}

/// Filter for the log file layer.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => config_level,
                1 => "debug",
                _ => "trace",
            }
        };
        EnvFilter::new(level)
    })
}

/// Level for the stderr layer.
pub const fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
///
/// Returns the file writer's guard; keep it alive until exit so buffered
/// events are flushed. No guard is returned when no log location is usable.
pub fn init_observability(
    config: &ObservabilityConfig,
    file_filter: EnvFilter,
    stderr_filter: LevelFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(stderr_filter);

    let (file_layer, guard) = match file_appender(config) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

/// Open the configured log destination, skipping file logging if it cannot
/// be created.
fn file_appender(config: &ObservabilityConfig) -> Option<RollingFileAppender> {
    if let Some(ref path) = config.log_path {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file = path.file_name()?;
        ensure_dir(dir)?;
        return Some(tracing_appender::rolling::never(dir, file));
    }

    let dir = config.log_dir.as_deref()?;
    ensure_dir(dir)?;
    Some(tracing_appender::rolling::daily(dir, LOG_FILE_NAME))
}

fn ensure_dir(dir: &Path) -> Option<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Some(()),
        Err(e) => {
            eprintln!("warning: logging to file disabled: {}: {e}", dir.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_dir_beats_config_dir() {
        let config = ObservabilityConfig::from_values(
            None,
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/config")),
        );
        assert_eq!(config.log_dir, Some(PathBuf::from("/env")));
    }

    #[test]
    fn config_dir_used_when_env_unset() {
        let config =
            ObservabilityConfig::from_values(None, None, Some(PathBuf::from("/config")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/config")));
        assert!(config.log_path.is_none());
    }

    #[test]
    fn explicit_path_is_kept() {
        let config =
            ObservabilityConfig::from_values(Some(PathBuf::from("/tmp/x.jsonl")), None, None);
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/x.jsonl")));
    }

    #[test]
    fn stderr_levels() {
        assert_eq!(stderr_level(true, 3), LevelFilter::ERROR);
        assert_eq!(stderr_level(false, 0), LevelFilter::WARN);
        assert_eq!(stderr_level(false, 1), LevelFilter::INFO);
        assert_eq!(stderr_level(false, 9), LevelFilter::TRACE);
    }

    #[test]
    fn appender_creates_missing_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let config = ObservabilityConfig {
            log_path: None,
            log_dir: Some(dir.clone()),
        };
        assert!(file_appender(&config).is_some());
        assert!(dir.is_dir());
    }
}
