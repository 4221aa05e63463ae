use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the convertor application
#[derive(Error, Debug)]
pub enum ConvertorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File '{0}' not found")]
    FileNotFound(String),

    #[error("transcoder not found at {}: audio export requires the transcoder", .0.display())]
    TranscoderMissing(PathBuf),

    #[error("{0}")]
    Download(String),

    #[error("{0}")]
    Transcode(String),

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Interrupted")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the convertor application
pub type Result<T> = std::result::Result<T, ConvertorError>;

impl ConvertorError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ConvertorError::Config(msg.into())
    }

    /// Create a download error
    pub fn download<S: Into<String>>(msg: S) -> Self {
        ConvertorError::Download(msg.into())
    }

    /// Create a transcoding error
    pub fn transcode<S: Into<String>>(msg: S) -> Self {
        ConvertorError::Transcode(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ConvertorError::InvalidInput(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ConvertorError::Other(msg.into())
    }

    /// Headline shown in the error panel; `Display` carries the details.
    pub fn summary(&self) -> String {
        match self {
            ConvertorError::Io(_) => "Input/output failure.".to_string(),
            ConvertorError::Config(_) => "Configuration problem.".to_string(),
            ConvertorError::FileNotFound(name) => format!("File '{}' not found.", name),
            ConvertorError::TranscoderMissing(_) => "'ffmpeg' not found.".to_string(),
            ConvertorError::Download(_) => "Could not download media.".to_string(),
            ConvertorError::Transcode(_) => "Error during conversion.".to_string(),
            ConvertorError::Image(_) => "Error during image conversion.".to_string(),
            ConvertorError::InvalidInput(_) => "Invalid input.".to_string(),
            ConvertorError::Interrupted => "Interrupted.".to_string(),
            ConvertorError::Other(_) => "Unexpected error.".to_string(),
        }
    }

    /// Detail text for the error panel, empty when the summary says it all
    pub fn details(&self) -> String {
        match self {
            ConvertorError::FileNotFound(_) | ConvertorError::Interrupted => String::new(),
            ConvertorError::TranscoderMissing(path) => format!(
                "Audio export (MP3) requires the transcoder, expected at {}",
                path.display()
            ),
            other => other.to_string(),
        }
    }

    pub fn is_interrupted(&self) -> bool {
        match self {
            ConvertorError::Interrupted => true,
            ConvertorError::Io(e) => e.kind() == io::ErrorKind::Interrupted,
            _ => false,
        }
    }
}
