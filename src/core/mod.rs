// Core business logic module

pub mod audio_converter;
pub mod config;
pub mod conversion;
pub mod downloader;
pub mod engine;
pub mod ffmpeg_manager;
pub mod file_scanner;
pub mod image_converter;
pub mod paths;
pub mod validation;
pub mod yt_dlp_manager;

// Re-export commonly used items
pub use config::Config;
pub use conversion::ConversionJob;
pub use downloader::{DownloadOutcome, DownloadRequest, Downloader, MediaKind, Platform};
pub use engine::{MediaEngine, MediaEntry, MediaInfo, ProgressEvent, ProgressSink, ProgressStatus};
pub use ffmpeg_manager::{FFmpegManager, ProcessOutput, ProcessRunner, SystemRunner};
pub use file_scanner::{list_convertible_files, ScanEntry};
pub use image_converter::{ImageCodec, ImageCrateCodec};
pub use paths::AppPaths;
pub use yt_dlp_manager::YtDlpManager;
