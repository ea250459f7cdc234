//! Generated report storage
//!
//! Artifacts are written under deterministic names so a repeated request for
//! the same variant overwrites the previous file with identical content.

use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes report artifacts into one output directory
#[derive(Debug, Clone)]
pub struct ReportStore {
    output_dir: PathBuf,
}

impl ReportStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path an artifact named `file_name` is written to
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(sanitize_file_name(file_name))
    }

    /// Writes `bytes`, creating the output directory if needed
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the directory or file cannot be written.
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ReportError::Io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let path = self.path_for(file_name);
        fs::write(&path, bytes).map_err(|e| {
            ReportError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Report written");
        Ok(path)
    }
}

/// File name for a variant report
pub fn report_file_name(variant: &str) -> String {
    sanitize_file_name(&format!("{variant}_report.pdf"))
}

/// File name for a variant list report
pub fn variant_list_file_name(effect: &str) -> String {
    sanitize_file_name(&format!("{effect}_variants_report.pdf"))
}

/// Replaces every character other than ASCII alphanumerics, `-`, `_` and `.`
/// with `_`
///
/// Variant identifiers such as `1_12345_A/G` would otherwise escape the
/// output directory.
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // "." and ".." are not file names
    if sanitized.chars().all(|c| c == '.') {
        sanitized.replace('.', "_")
    } else {
        sanitized
    }
}
