//! File icon utilities
//!
//! Icons shown next to candidate files in the conversion listing.

use std::path::Path;

/// Returns an appropriate icon for a given filename based on its extension
///
/// # Examples
///
/// ```
/// use convertor::utils::icons::get_file_icon;
///
/// assert_eq!(get_file_icon("cover.png"), "🖼️");
/// assert_eq!(get_file_icon("track.wav"), "🎵");
/// ```
pub fn get_file_icon(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        // Images
        Some("jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "webp") => "🖼️",
        Some("ico") => "🎯",
        // Audio
        Some("mp3" | "wav" | "flac" | "ogg" | "aac" | "m4a" | "opus") => "🎵",
        // Video
        Some("mp4" | "avi" | "mkv" | "mov" | "wmv" | "webm") => "🎬",
        // Partial downloads
        Some("part" | "ytdl" | "tmp") => "📋",
        _ => "📄",
    }
}
