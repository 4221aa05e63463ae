use crate::core::Config;
use crate::error::{ConvertorError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder (inside the install directory) receiving downloaded media
pub const DOWNLOADS_DIR_NAME: &str = "Downloads";

/// Bundled binaries that are never offered as conversion candidates
pub const BUNDLED_BINARIES: &[&str] = &["ffmpeg", "ffplay", "ffprobe", "yt-dlp"];

const TRANSCODER_NAME: &str = "ffmpeg";
const ENGINE_NAME: &str = "yt-dlp";

/// Filesystem locations computed once at startup
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub install_dir: PathBuf,
    pub downloads_dir: PathBuf,
    pub transcoder_path: PathBuf,
    pub engine_path: PathBuf,
    /// File name of the running executable, excluded from listings
    pub executable_name: Option<String>,
    /// Why `downloads_dir` fell back to `install_dir`, if it did
    pub downloads_error: Option<String>,
}

impl AppPaths {
    /// Resolve every path from the configuration and the running executable
    pub fn resolve(config: &Config) -> Result<Self> {
        let install_dir = match &config.install_dir {
            Some(dir) => dir.clone(),
            None => Self::executable_dir()?,
        };

        let executable_name = env::current_exe()
            .ok()
            .and_then(|exe| exe.file_name().map(|n| n.to_string_lossy().to_string()));

        Ok(Self::at(install_dir, config, executable_name))
    }

    /// Build the layout rooted at `install_dir`, creating the downloads folder
    pub fn at(install_dir: PathBuf, config: &Config, executable_name: Option<String>) -> Self {
        let (downloads_dir, downloads_error) = Self::ensure_downloads_dir(&install_dir);

        let transcoder_path = Self::locate_tool(config.get_ffmpeg_path(), &install_dir, TRANSCODER_NAME)
            .unwrap_or_else(|| install_dir.join(bundled_name(TRANSCODER_NAME)));

        let engine_path = Self::locate_tool(config.get_yt_dlp_path(), &install_dir, ENGINE_NAME)
            .unwrap_or_else(|| PathBuf::from(ENGINE_NAME));

        log::debug!("Install dir: {:?}", install_dir);
        log::debug!("Downloads dir: {:?}", downloads_dir);
        log::debug!("Transcoder: {:?}", transcoder_path);
        log::debug!("Engine: {:?}", engine_path);

        Self {
            install_dir,
            downloads_dir,
            transcoder_path,
            engine_path,
            executable_name,
            downloads_error,
        }
    }

    /// Whether the transcoder binary exists at the resolved path
    pub fn transcoder_available(&self) -> bool {
        self.transcoder_path.is_file()
    }

    /// Full path of a file named by the user, relative to the install directory
    pub fn input_path(&self, file_name: &str) -> PathBuf {
        self.install_dir.join(file_name)
    }

    /// Names never offered as conversion candidates
    pub fn denylist(&self) -> Vec<String> {
        let mut names: Vec<String> = BUNDLED_BINARIES
            .iter()
            .flat_map(|name| [name.to_string(), format!("{}.exe", name)])
            .collect();

        if let Some(exe) = &self.executable_name {
            if !names.contains(exe) {
                names.push(exe.clone());
            }
        }

        names
    }

    fn executable_dir() -> Result<PathBuf> {
        let exe = env::current_exe().map_err(|e| {
            ConvertorError::config(format!("Could not locate the running executable: {}", e))
        })?;

        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ConvertorError::config("Executable has no parent directory"))
    }

    fn ensure_downloads_dir(install_dir: &Path) -> (PathBuf, Option<String>) {
        let downloads_dir = install_dir.join(DOWNLOADS_DIR_NAME);

        match fs::create_dir_all(&downloads_dir) {
            Ok(()) => (downloads_dir, None),
            Err(e) => {
                log::error!("Failed to create {:?}: {}", downloads_dir, e);
                (install_dir.to_path_buf(), Some(e.to_string()))
            }
        }
    }

    /// Explicit path first, then the bundled binary, then PATH
    fn locate_tool(explicit: Option<&PathBuf>, install_dir: &Path, name: &str) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.clone());
        }

        let bundled = install_dir.join(bundled_name(name));
        if bundled.is_file() {
            return Some(bundled);
        }

        which::which(name).ok()
    }
}

fn bundled_name(name: &str) -> String {
    format!("{}{}", name, env::consts::EXE_SUFFIX)
}
