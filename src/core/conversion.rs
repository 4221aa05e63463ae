// Conversion jobs shared by the image and audio pathways

use crate::core::AppPaths;
use crate::error::{ConvertorError, Result};
use std::path::{Path, PathBuf};

/// One conversion request, consumed once by its pathway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// File name as typed by the user, relative to the install directory
    pub input: String,
    pub target_format: String,
    /// Tool-specific options, in order
    pub options: Vec<String>,
}

impl ConversionJob {
    pub fn new<S: Into<String>>(input: S, target_format: &str, options: &[&str]) -> Self {
        Self {
            input: input.into(),
            target_format: target_format.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Existing input file inside the install directory
    pub fn resolve_input(&self, paths: &AppPaths) -> Result<PathBuf> {
        let name = self.input.trim();
        let path = paths.input_path(name);

        if name.is_empty() || !path.is_file() {
            return Err(ConvertorError::FileNotFound(self.input.clone()));
        }

        Ok(path)
    }

    pub fn output_path(&self, input: &Path) -> PathBuf {
        replace_extension(input, &self.target_format)
    }
}

/// `photo.png` + `jpg` -> `photo.jpg`; a name without extension gains one
pub fn replace_extension(path: &Path, extension: &str) -> PathBuf {
    path.with_extension(extension)
}

/// Final component of a path, for user-facing messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
