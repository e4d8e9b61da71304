//! Pipeline coordination for photo processing.

use crate::config::OutputFormat;
use crate::constants::{IMAGE_EXTENSIONS, output_extensions};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of checking whether a file should be processed.
#[derive(Debug)]
pub enum ProcessCheck {
    /// File should be processed.
    Process,
    /// Skip - output already exists.
    SkipExists,
}

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Get output file path for a given format.
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    // Use to_string_lossy() to handle non-UTF-8 filenames gracefully
    let stem = input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );

    let extension = match format {
        OutputFormat::Csv => output_extensions::CSV,
        OutputFormat::Json => output_extensions::JSON,
    };

    output_dir.join(format!("{stem}{extension}"))
}

/// Check if a file should be processed.
pub fn should_process(
    input: &Path,
    output_dir: &Path,
    formats: &[OutputFormat],
    force: bool,
) -> ProcessCheck {
    // Console-only runs have no outputs to skip on
    if !force && !formats.is_empty() {
        let all_exist = formats
            .iter()
            .all(|fmt| output_path_for(input, output_dir, *fmt).exists());
        if all_exist {
            return ProcessCheck::SkipExists;
        }
    }

    ProcessCheck::Process
}

/// Collect input files from paths (files and directories).
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_image_file(path) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            collect_image_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

/// Recursively collect image files from a directory.
fn collect_image_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_image_files_recursive(&path, files)?;
        } else if is_image_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file is a supported image format.
fn is_image_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        // Compare extension directly as OsStr to handle non-UTF-8 filenames
        IMAGE_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(OsStr::new(supported)))
    })
}
