use std::path::{Path, PathBuf};

use crate::constants::LOG_FILE_NAME;
use crate::error::{AppError, Result};

/// Simplifies file paths by extracting relevant parts from cargo registry paths
///
/// # Arguments
/// * `file_path` - The file path to simplify
///
/// # Returns
/// A simplified version of the file path
fn simplify_file_path(file_path: &str) -> String {
    if file_path.contains("wup-web") {
        if let Some(pos) = file_path.rfind("/src/") {
            return file_path[(pos + 1)..].to_string();
        }
    }

    if let Some((_, suffix)) = file_path.split_once(".cargo/registry/src/") {
        if let Some(first_slash) = suffix.find('/') {
            suffix[(first_slash + 1)..].to_string()
        } else {
            suffix.to_string()
        }
    } else {
        file_path.to_string()
    }
}

// Our own records, plus anything from other crates at or above `level`
fn is_relevant(metadata: &log::Metadata, level: log::LevelFilter) -> bool {
    metadata.target().contains("wup_web") || metadata.level() < level
}

/// Formats log messages for console output with a simplified format
///
/// # Features
/// * Simplified time format (HH:MM:SS)
/// * Level colours
pub fn console_log_formatter(
    out: fern::FormatCallback,
    message: &std::fmt::Arguments,
    record: &log::Record,
) {
    let level = record.level();
    let level_color = match level {
        log::Level::Error => "\x1B[31m", // red
        log::Level::Warn => "\x1B[33m",  // yellow
        log::Level::Info => "\x1B[32m",  // green
        log::Level::Debug => "\x1B[0m",  // normal
        log::Level::Trace => "\x1B[35m", // purple
    };
    let reset = "\x1B[0m";

    out.finish(format_args!(
        "{}{}[{}] {}:{} {}{}",
        level_color,
        chrono::Local::now().format("%H:%M:%S.%3f "),
        get_level(level),
        simplify_file_path(record.file().unwrap_or("")),
        record.line().unwrap_or(0),
        message,
        reset,
    ))
}

/// Formats log messages for file output with the full date
pub fn file_log_formatter(
    out: fern::FormatCallback,
    message: &std::fmt::Arguments,
    record: &log::Record,
) {
    out.finish(format_args!(
        "{}[{}] {}:{} {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        get_level(record.level()),
        simplify_file_path(record.file().unwrap_or("")),
        record.line().unwrap_or(0),
        message
    ))
}

/// Sets up the application logger with console and file outputs
///
/// # Arguments
/// * `log_dir` - Directory receiving `wup-web.log`, created when missing
///
/// # Returns
/// The path of the log file
pub fn setup_logger(log_dir: &Path) -> Result<PathBuf> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);
    std::fs::create_dir_all(log_dir).map_err(|e| AppError::Logger {
        message: format!("Failed to create log directory {:?}: {}", log_dir, e),
    })?;
    let log_file = fern::log_file(&log_file_path).map_err(|e| AppError::Logger {
        message: format!("Failed to open log file {:?}: {}", log_file_path, e),
    })?;

    let stdout_dispatcher = fern::Dispatch::new()
        .level(log::LevelFilter::Debug)
        .filter(|metadata| is_relevant(metadata, log::LevelFilter::Debug))
        .format(console_log_formatter)
        .chain(std::io::stdout());

    let file_dispatcher = fern::Dispatch::new()
        .level(log::LevelFilter::Info)
        .filter(|metadata| is_relevant(metadata, log::LevelFilter::Info))
        .format(file_log_formatter)
        .chain(log_file);

    fern::Dispatch::new()
        .level(log::LevelFilter::Debug)
        .chain(stdout_dispatcher)
        .chain(file_dispatcher)
        .apply()
        .map_err(|e| AppError::Logger {
            message: format!("Failed to initialize logger: {}", e),
        })?;

    log::debug!(
        "Logger initialized successfully, log file path: {:?}",
        log_file_path
    );
    Ok(log_file_path)
}

fn get_level(level: log::Level) -> String {
    match level {
        log::Level::Error => "E",
        log::Level::Warn => "W",
        log::Level::Info => "I",
        log::Level::Debug => "D",
        log::Level::Trace => "T",
    }
    .to_string()
}

#[cfg(test)]
use log::SetLoggerError;

#[cfg(test)]
lazy_static::lazy_static! {
    // every formatted line the test logger wrote, with its level
    static ref CAPTURED_LOGS: parking_lot::Mutex<Vec<(log::Level, String)>> =
        parking_lot::Mutex::new(Vec::new());
}

/// Lines written by the test logger so far
#[cfg(test)]
pub fn captured_logs() -> Vec<(log::Level, String)> {
    CAPTURED_LOGS.lock().clone()
}

/// Sets up the logger for tests
///
/// Console only, simplified format. Lines are also kept in memory, see
/// [`captured_logs`].
#[cfg(test)]
pub fn setup_test_logger() -> std::result::Result<(), SetLoggerError> {
    if log::logger().enabled(&log::Metadata::builder().level(log::Level::Debug).build()) {
        return Ok(());
    }

    fern::Dispatch::new()
        .format(console_log_formatter)
        .level(log::LevelFilter::Debug)
        .filter(|metadata| is_relevant(metadata, log::LevelFilter::Debug))
        .chain(std::io::stdout())
        .chain(fern::Output::call(|record| {
            CAPTURED_LOGS
                .lock()
                .push((record.level(), record.args().to_string()));
        }))
        .apply()
        .map_err(|e| {
            log::error!("Failed to initialize logger: {:?}", e);
            e
        })?;

    log::debug!("Test logger initialized successfully");
    Ok(())
}
