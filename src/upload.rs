// src/upload.rs
use std::fmt;
use std::path::{Path, PathBuf};

pub const MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;
pub const SPREADSHEET_EXTENSION: &str = ".xlsx";

/// Why a selected file was turned away before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRejection {
    NotSelected,
    WrongExtension,
    TooLarge,
}

impl fmt::Display for FileRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FileRejection::NotSelected => "Please select a file",
            FileRejection::WrongExtension => "Only .xlsx files are allowed",
            FileRejection::TooLarge => "File size must be less than 2MB",
        };
        f.write_str(message)
    }
}

/// Client-side acceptance check, applied to drops and picks alike before the
/// file goes anywhere near the network. The size ceiling is strict: a file of
/// exactly 2 MiB passes.
pub fn validate_selection(path: &Path, size: u64) -> Result<(), FileRejection> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(FileRejection::NotSelected)?;
    if !name.ends_with(SPREADSHEET_EXTENSION) {
        return Err(FileRejection::WrongExtension);
    }
    if size > MAX_FILE_BYTES {
        return Err(FileRejection::TooLarge);
    }
    Ok(())
}

pub async fn pick_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Excel workbook", &["xlsx"])
        .pick_file()
}
