//! Input validation helpers
//!
//! The storage key never contains anything user-controlled except the file
//! extension, so these checks guard presentation and metadata fields, not
//! path safety.

use std::path::{Component, Path};

use crate::error::AppError;

/// Default cap for an original filename's length.
pub const DEFAULT_MAX_FILENAME_LENGTH: usize = 255;

/// Check an original filename before intake: reject empty names, oversized
/// names, and path-traversal components. Returns the bare filename with any
/// directory part stripped.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    sanitize_filename_with_limit(filename, DEFAULT_MAX_FILENAME_LENGTH)
}

/// Same as [`sanitize_filename`] with a configurable length cap.
pub fn sanitize_filename_with_limit(
    filename: &str,
    max_length: usize,
) -> Result<String, AppError> {
    let path = Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    // `..` only counts as traversal when it is a whole path component;
    // names like `report..v2.pdf` are legitimate.
    if Path::new(filename_only)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(AppError::InvalidInput(
            "Filename contains path traversal component".to_string(),
        ));
    }

    if filename_only.is_empty() {
        return Err(AppError::InvalidInput("Filename is empty".to_string()));
    }

    if filename_only.len() > max_length {
        return Err(AppError::InvalidInput(format!(
            "Filename exceeds maximum length of {} characters",
            max_length
        )));
    }

    Ok(filename_only.to_string())
}
