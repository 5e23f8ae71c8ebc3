//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every section is `#[serde(default)]`, so a hand-written `settings.toml`
//! only needs the keys it wants to override.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable that overrides `llm.api_key`.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the Gemini model call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the Gemini REST API (no trailing slash).
    pub base_url: String,
    /// Model identifier (e.g. `"gemini-1.5-flash"`).
    pub model: String,
    /// Optional API key used to pre-fill the masked credential field.
    ///
    /// Leaving this unset is recommended; `GEMINI_API_KEY` or the sidebar
    /// field can supply the key instead.
    pub api_key: Option<String>,
    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,
    /// Maximum seconds to wait for a model response before timing out.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-1.5-flash".into(),
            api_key: None,
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// egui window appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial inner window size `(width, height)` in logical pixels.
    pub window_size: (f32, f32),
    /// Text pre-filled into both input areas.
    pub default_input: String,
    /// Font file with Thai glyphs.  `None` probes a list of common system
    /// fonts; egui's bundled fonts cannot render Thai.
    pub font_path: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (960.0, 640.0),
            default_input: "Your text here".into(),
            font_path: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Where CSV downloads are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Destination directory; `None` means the platform Downloads folder.
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    /// The directory CSV files should be written to.
    pub fn resolve_dir(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| AppPaths::new().export_dir)
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use english_tool::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// println!("model = {}", config.llm.model);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model call settings.
    pub llm: LlmConfig,
    /// Window settings.
    pub ui: UiConfig,
    /// CSV export settings.
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The credential to pre-fill at startup: `GEMINI_API_KEY` first, then
    /// `llm.api_key`.  Blank values count as absent.
    pub fn initial_api_key(&self) -> Option<String> {
        pick_api_key(std::env::var(API_KEY_ENV).ok(), self.llm.api_key.as_deref())
    }
}

fn pick_api_key(from_env: Option<String>, configured: Option<&str>) -> Option<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|k| !k.trim().is_empty())
                .map(str::to_string)
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
