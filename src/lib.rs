// Convertor Library - Public API

// Re-export error types
pub mod error;
pub use error::{ConvertorError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use crate::core::config::Config;
pub use crate::core::paths::AppPaths;

/// Initialize logging. The menu owns the terminal, so only warnings show
/// unless `verbose` is set; `RUST_LOG` still wins when present.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .parse_default_env()
        .init();
}
