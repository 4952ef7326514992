//! Rolling file logs for resolver diagnostics.
//!
//! # Responsibility
//! - Start one `flexi_logger` backend per process for hosts that want the
//!   `event=... module=...` lines resolvers emit through `log`.
//!
//! # Invariants
//! - A second start with the same level and directory is a no-op.
//! - A second start with another level or directory is an error, never a
//!   silent reconfiguration.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "extkind";
const ROTATE_AT_BYTES: u64 = 2 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 3;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Logging bootstrap errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnknownLevel(String),
    RelativeDirectory(PathBuf),
    Io { dir: PathBuf, message: String },
    Backend(String),
    AlreadyStarted { level: LevelFilter, dir: PathBuf },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(value) => write!(
                f,
                "unknown log level `{value}` (use off, error, warn, info, debug or trace)"
            ),
            Self::RelativeDirectory(dir) => {
                write!(f, "log directory must be absolute: {}", dir.display())
            }
            Self::Io { dir, message } => {
                write!(f, "cannot prepare log directory {}: {message}", dir.display())
            }
            Self::Backend(message) => write!(f, "logger backend failed: {message}"),
            Self::AlreadyStarted { level, dir } => write!(
                f,
                "logging already runs at {level} in {}",
                dir.display()
            ),
        }
    }
}

impl Error for LoggingError {}

/// Parses a level name case-insensitively; `warning` is accepted for `warn`.
pub fn parse_log_level(value: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = value.trim();
    let name = if trimmed.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        trimmed
    };
    name.parse::<LevelFilter>()
        .map_err(|_| LoggingError::UnknownLevel(trimmed.to_string()))
}

/// `Debug` in debug builds, `Info` in release builds.
pub fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Active level and directory, if logging was started.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.level, active.dir.clone()))
}

/// Starts rolling file logs at `level` inside the absolute directory `dir`.
pub fn init_logging(level: LevelFilter, dir: &Path) -> Result<(), LoggingError> {
    if !dir.is_absolute() {
        return Err(LoggingError::RelativeDirectory(dir.to_path_buf()));
    }

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_backend(level, dir))?;
    if active.level != level || active.dir != dir {
        return Err(LoggingError::AlreadyStarted {
            level: active.level,
            dir: active.dir.clone(),
        });
    }
    Ok(())
}

fn start_backend(level: LevelFilter, dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|err| LoggingError::Io {
        dir: dir.to_path_buf(),
        message: err.to_string(),
    })?;

    let handle = Logger::with(level)
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .write_mode(WriteMode::Direct)
        .format_for_files(flexi_logger::with_thread)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    info!(
        "event=logging_started module=core status=ok level={} dir={} version={}",
        level,
        dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, parse_log_level, LoggingError};
    use log::LevelFilter;
    use std::path::Path;

    #[test]
    fn parses_level_names_and_warning_alias() {
        assert_eq!(parse_log_level(" TRACE ").expect("trace"), LevelFilter::Trace);
        assert_eq!(parse_log_level("warning").expect("warning"), LevelFilter::Warn);
        assert_eq!(parse_log_level("off").expect("off"), LevelFilter::Off);
        assert_eq!(
            parse_log_level("loud").expect_err("unknown level"),
            LoggingError::UnknownLevel("loud".to_string())
        );
    }

    #[test]
    fn relative_directory_is_rejected_before_start() {
        let err = init_logging(LevelFilter::Info, Path::new("logs/dev"))
            .expect_err("relative directory");
        assert!(matches!(err, LoggingError::RelativeDirectory(_)));
    }

    #[test]
    fn second_start_must_match_first() {
        let dir = tempfile::tempdir().expect("temp log dir");
        let other = tempfile::tempdir().expect("second temp dir");

        init_logging(LevelFilter::Info, dir.path()).expect("first start");
        init_logging(LevelFilter::Info, dir.path()).expect("same config is a no-op");

        let err = init_logging(LevelFilter::Trace, dir.path()).expect_err("level change");
        assert!(matches!(err, LoggingError::AlreadyStarted { .. }));
        let err = init_logging(LevelFilter::Info, other.path()).expect_err("dir change");
        assert!(matches!(err, LoggingError::AlreadyStarted { .. }));

        let (level, active_dir) = logging_status().expect("logging active");
        assert_eq!(level, LevelFilter::Info);
        assert_eq!(active_dir, dir.path());
    }
}
