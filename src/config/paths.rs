//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\english-tool\
//!   macOS:   ~/Library/Application Support/english-tool/
//!   Linux:   ~/.config/english-tool/
//!
//! Export dir (CSV downloads), unless overridden in `settings.toml`:
//!   the platform Downloads folder, or the current directory.

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Default destination for exported CSV files.
    pub export_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "english-tool";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let export_dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));

        let settings_file = config_dir.join("settings.toml");

        Self {
            config_dir,
            settings_file,
            export_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_non_empty() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths.export_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths.config_dir.ends_with("english-tool"));
    }
}
