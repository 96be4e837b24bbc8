//! Application configuration

use crate::asset::ThumbnailSize;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub library: LibraryConfig,
    pub viewer: ViewerConfig,
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            library: LibraryConfig::default(),
            viewer: ViewerConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: String,
    /// Used when `RUST_LOG` is not set
    pub log_level: String,
    pub log_retention_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            log_level: "info".to_string(),
            log_retention_days: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub root: PathBuf,
    pub recursive: bool,
    pub show_hidden: bool,
    /// Extensions accepted on top of the built-in image formats
    pub extra_extensions: Vec<String>,
    /// Send committed images to the recycle bin instead of removing them
    pub use_recycle_bin: bool,
    pub watch_debounce_ms: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: default_library_root(),
            recursive: false,
            show_hidden: false,
            extra_extensions: Vec::new(),
            use_recycle_bin: true,
            watch_debounce_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub thumbnail_cache_entries: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let size = ThumbnailSize::default();
        Self {
            thumbnail_width: size.width,
            thumbnail_height: size.height,
            thumbnail_cache_entries: 32,
        }
    }
}

impl ViewerConfig {
    pub fn thumbnail_size(&self) -> ThumbnailSize {
        ThumbnailSize::new(self.thumbnail_width.max(1), self.thumbnail_height.max(1))
    }
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from file, defaults when it does not exist
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "PhotoSweep", "PhotoSweep")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn default_library_root() -> PathBuf {
    dirs_next::picture_dir()
        .or_else(dirs_next::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();

    kb.insert("nav.next_item".into(), vec!["Enter".into(), "Right".into(), "l".into(), "n".into(), "Space".into()]);
    kb.insert("file.delete".into(), vec!["Delete".into(), "d".into(), "x".into()]);
    kb.insert("file.empty_trash".into(), vec!["e".into()]);
    kb.insert("app.reload".into(), vec!["F5".into(), "r".into()]);
    kb.insert("app.quit".into(), vec!["Escape".into(), "q".into()]);

    kb
}
