//! File system helpers: reading edge-list files and writing generated output.
//!
//! Uses the `verbose_eprintln!` macro from the parent `app` module so that
//! input problems also land in the verbose log.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Error as IoError, Write};
use std::path::Path;

use super::error::AppError;
use super::verbose_eprintln;

/// Reads an edge list from `edge_file_path` after checking it names a file.
///
/// # Errors
/// Returns `AppError::InvalidPath` if the path does not exist or is not a
/// regular file, and `AppError::Io` if reading fails.
pub fn read_edge_list(edge_file_path: &Path, quiet_mode: bool) -> Result<String, AppError> {
    if !edge_file_path.exists() {
        let error_msg = format!("File not found: {}", edge_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    if !edge_file_path.is_file() {
        let error_msg = format!("Path is not a file: {}", edge_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    Ok(fs::read_to_string(edge_file_path)?)
}

/// Writes `content` to `file_path`, creating or truncating it.
///
/// The `BufWriter` is flushed before returning so the caller sees the whole
/// file once this succeeds.
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
