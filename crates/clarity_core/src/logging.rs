//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start the rolling file logger once per process.
//! - Capture panics as sanitized `panic_captured` events.
//!
//! # Invariants
//! - Init is idempotent for the same level and directory.
//! - Re-init with a different level or directory is rejected.
//! - Init never panics.
//! - Events carry ids, keys and counts only, never user-entered text.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, Level};
use once_cell::sync::OnceCell;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "clarity";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    status: LoggingStatus,
    _logger: LoggerHandle,
}

/// Active logger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingStatus {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

/// Initializes file logging at `level` under the absolute directory `log_dir`.
///
/// # Errors
/// - Unsupported `level`, or blank / relative `log_dir`.
/// - Directory creation or logger backend failure.
/// - A previous init used a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LoggingStatus {
        level: parse_level(level)?,
        log_dir: absolute_log_dir(log_dir)?,
    };

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(&requested))?;
    ensure_same_config(&state.status, &requested)
}

/// Returns the active configuration, or `None` before init.
pub fn logging_status() -> Option<LoggingStatus> {
    LOGGING_STATE.get().map(|state| state.status.clone())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Parses a level name (case-insensitive, `warning` accepted) into the
/// lowercase form flexi_logger expects.
pub(crate) fn parse_level(raw: &str) -> Result<&'static str, String> {
    let raw = raw.trim();
    let parsed = if raw.eq_ignore_ascii_case("warning") {
        Ok(Level::Warn)
    } else {
        raw.parse::<Level>()
    };
    parsed
        .map(level_name)
        .map_err(|_| format!("unknown log level `{raw}`; use trace, debug, info, warn or error"))
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

fn absolute_log_dir(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw.trim());
    if path.as_os_str().is_empty() {
        return Err("log directory is empty".to_string());
    }
    if path.is_relative() {
        return Err(format!("log directory `{}` is not absolute", path.display()));
    }
    Ok(path)
}

fn ensure_same_config(active: &LoggingStatus, requested: &LoggingStatus) -> Result<(), String> {
    if active.log_dir != requested.log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.log_dir.display(),
            requested.log_dir.display()
        ));
    }
    if active.level != requested.level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.level, requested.level
        ));
    }
    Ok(())
}

fn start_logger(requested: &LoggingStatus) -> Result<LoggingState, String> {
    let dir = requested.log_dir.as_path();
    std::fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create log directory `{}`: {err}", dir.display()))?;

    let logger = Logger::try_with_str(requested.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", requested.level))?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();

    info!(
        "event=core_init module=logging status=ok platform={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        requested.level,
        dir.display()
    );

    Ok(LoggingState {
        status: requested.clone(),
        _logger: logger,
    })
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_summary(panic_info);
        error!("event=panic_captured module=logging status=error location={location} payload={payload}");
        previous_hook(panic_info);
    }));
}

fn panic_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    first_line(message, MAX_PANIC_PAYLOAD_CHARS)
}

/// First line of `message`, cut to `max_chars` characters.
fn first_line(message: &str, max_chars: usize) -> String {
    let line = message.lines().next().unwrap_or_default();
    match line.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}
