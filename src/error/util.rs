//! Utility functions for error handling
//!
//! Thin wrappers over `std::fs` that attach the path and a hint about the
//! failure to every I/O error, so callers can surface them directly.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Result, StoreError};

fn describe(e: io::Error, purpose: &str) -> io::Error {
    let hint = match e.kind() {
        io::ErrorKind::PermissionDenied => "permission denied - check file permissions",
        io::ErrorKind::NotFound => "not found",
        io::ErrorKind::InvalidData => "file contains invalid UTF-8 data - cannot read as text",
        _ => "operation failed",
    };
    io::Error::new(e.kind(), format!("{purpose}: {hint} ({e})"))
}

/// Read a file to string with rich error information
///
/// # Arguments
/// * `path` - The file to read
/// * `purpose` - Why the file is being read (for error context)
pub fn read_to_string(path: &Path, purpose: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| StoreError::io(path, describe(e, purpose)))
}

/// Read a file to string, treating a missing file as `None`
pub fn read_optional(path: &Path, purpose: &str) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, describe(e, purpose))),
    }
}

/// Make sure a directory exists, creating it and its parents if needed
pub fn ensure_dir(path: &Path, purpose: &str) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(StoreError::io(
            path,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{purpose}: path exists but is not a directory"),
            ),
        ));
    }
    fs::create_dir_all(path).map_err(|e| StoreError::io(path, describe(e, purpose)))
}

/// Overwrite `path` with `content` in place
///
/// A crash mid-write leaves a truncated file behind.
pub fn write_in_place(path: &Path, content: &[u8], purpose: &str) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| StoreError::io(path, describe(e, purpose)))?;
    file.write_all(content)
        .and_then(|()| file.flush())
        .map_err(|e| StoreError::io(path, describe(e, purpose)))
}

/// Replace `path` with `content` through a sibling temporary file and a rename
///
/// Readers observe either the old or the new content, never a partial write.
pub fn write_atomic(path: &Path, content: &[u8], purpose: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file =
            fs::File::create(&tmp).map_err(|e| StoreError::io(&tmp, describe(e, purpose)))?;
        file.write_all(content)
            .and_then(|()| file.sync_all())
            .map_err(|e| StoreError::io(&tmp, describe(e, purpose)))?;
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(path, describe(e, purpose))
    })
}

/// Copy a file, mapping failures to path-bound errors
pub fn copy_file(from: &Path, to: &Path, purpose: &str) -> Result<u64> {
    fs::copy(from, to).map_err(|e| StoreError::io(from, describe(e, purpose)))
}
