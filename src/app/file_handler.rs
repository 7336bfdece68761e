//! File system helpers for the application: validating the trail file and
//! writing the finished report.

use std::fs::OpenOptions;
use std::io::{BufWriter, Error as IoError, Write};
use std::path::Path;

use super::error::AppError;
use super::verbose_eprintln;

/// Validates the trail file path and returns it as a string slice.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the path does not exist, is not a
/// file, or is not valid UTF-8.
pub fn validate_trail_file<'p>(
    trail_file_path: &'p Path,
    quiet_mode: bool,
) -> Result<&'p str, AppError> {
    if !trail_file_path.exists() {
        let error_msg = format!("File not found: {}", trail_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidArgument(error_msg));
    }
    if !trail_file_path.is_file() {
        let error_msg = format!("Path is not a file: {}", trail_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidArgument(error_msg));
    }

    trail_file_path.to_str().ok_or_else(|| {
        let error_msg = format!("Path is not valid UTF-8: {}", trail_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        AppError::InvalidArgument(error_msg)
    })
}

/// Writes string content to a file, creating or truncating it.
///
/// # Errors
/// Returns an `IoError` if opening, writing or flushing fails.
pub fn write_content_to_file(file_path: &Path, content: &str) -> Result<(), IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}
