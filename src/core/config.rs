use crate::error::{ConvertorError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the install directory
pub const ENV_HOME: &str = "CONVERTOR_HOME";
/// Environment variable overriding the transcoder binary
pub const ENV_FFMPEG: &str = "CONVERTOR_FFMPEG";
/// Environment variable overriding the download engine binary
pub const ENV_YT_DLP: &str = "CONVERTOR_YT_DLP";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the tool, its bundled binaries and the files to convert
    #[serde(default)]
    pub install_dir: Option<PathBuf>,
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
    #[serde(default)]
    pub yt_dlp_path: Option<PathBuf>,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Self {
        let mut config = match Self::get_config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Config::default(),
        };
        config.apply_env();
        config
    }

    /// [`Config::load_from`], with an unreadable file costing only a warning
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            log::warn!("{}; using defaults", e);
            Config::default()
        })
    }

    /// Read a JSON config file. A missing or empty file yields the defaults;
    /// a corrupted one is ignored with a warning.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let data = fs::read(path).map_err(|e| {
            ConvertorError::config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Config::default());
        }

        match serde_json::from_slice(&data) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            Err(e) => {
                log::warn!("Ignoring corrupted config file {:?}: {}", path, e);
                Ok(Config::default())
            }
        }
    }

    /// Environment variables win over the config file
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var_os(key));
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        if let Some(home) = non_empty(ENV_HOME) {
            self.install_dir = Some(home);
        }
        if let Some(ffmpeg) = non_empty(ENV_FFMPEG) {
            self.ffmpeg_path = Some(ffmpeg);
        }
        if let Some(yt_dlp) = non_empty(ENV_YT_DLP) {
            self.yt_dlp_path = Some(yt_dlp);
        }
    }

    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("convertor").join("config.json"))
    }

    pub fn set_install_dir(&mut self, path: PathBuf) {
        self.install_dir = Some(path);
    }

    pub fn get_ffmpeg_path(&self) -> Option<&PathBuf> {
        self.ffmpeg_path.as_ref()
    }

    pub fn get_yt_dlp_path(&self) -> Option<&PathBuf> {
        self.yt_dlp_path.as_ref()
    }
}
