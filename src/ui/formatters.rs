use humansize::{format_size as human_format_size, DECIMAL};

/// Format file size in human-readable format (B, kB, MB, GB)
pub fn format_size(size: u64) -> String {
    human_format_size(size, DECIMAL)
}

/// Human-readable list of icon frame sizes, e.g. "16x16, 32x32"
pub fn format_resolutions(sizes: &[(u32, u32)]) -> String {
    sizes
        .iter()
        .map(|(w, h)| format!("{}x{}", w, h))
        .collect::<Vec<_>>()
        .join(", ")
}
