//! Discovery of files offered for conversion
//!
//! Lists the regular files directly inside a directory, skipping reserved
//! names (the tool itself and its bundled binaries). Listing is purely
//! informational: nothing here checks that a file suits a given conversion.
//!
//! # Examples
//!
//! ```no_run
//! use convertor::core::file_scanner::list_convertible_files;
//! use std::path::Path;
//!
//! let denylist = vec!["ffmpeg.exe".to_string()];
//! for entry in list_convertible_files(Path::new("."), &denylist)? {
//!     println!("{}: {} bytes", entry.name, entry.size);
//! }
//! # Ok::<(), convertor::ConvertorError>(())
//! ```

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A file that can be picked for conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ScanEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Regular files directly inside `dir` whose names are not in `denylist`,
/// sorted case-insensitively. Fails only when `dir` itself cannot be read.
pub fn list_convertible_files(dir: &Path, denylist: &[String]) -> Result<Vec<ScanEntry>> {
    log::debug!("Scanning {:?} for convertible files", dir);

    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)?.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();

        if denylist.iter().any(|denied| denied == &name) {
            continue;
        }

        // Follows symlinks, so a link to a regular file is listed
        let Ok(metadata) = fs::metadata(entry.path()) else {
            continue;
        };

        if metadata.is_file() {
            entries.push(ScanEntry {
                name,
                path: entry.path(),
                size: metadata.len(),
            });
        }
    }

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(entries)
}
