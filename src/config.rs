//! Application configuration, stored as YAML.
//!
//! Looked up at `$CVVIEWER_CONFIG`, else `~/.cvviewer/config.yaml`. A missing
//! file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_scheme::{ColorScheme, Palette};
use crate::data::export::ExportFormat;
use crate::error::ViewerError;

pub const CONFIG_ENV_VAR: &str = "CVVIEWER_CONFIG";

/// Size and default format of exported figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            format: ExportFormat::Png,
        }
    }
}

impl ExportConfig {
    pub fn size(&self) -> (u32, u32) {
        (self.width.max(1), self.height.max(1))
    }
}

/// Top-level configuration for the viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Native window title.
    pub title: String,
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
    pub color_scheme: ColorScheme,
    /// Palette used for automatic trace colors.
    pub palette: Palette,
    /// Electrode area (cm²) proposed by the upload form.
    pub default_area: f64,
    /// Reference potential (V vs S.H.E.) proposed by the upload form.
    pub default_vref: f64,
    /// Start new plots with every cycle of every experiment.
    pub populate_new_plots: bool,
    /// File name proposed when saving a session.
    pub session_file_stem: String,
    pub export: ExportConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Cyclic voltammetry viewer".to_string(),
            window_size: [1400.0, 900.0],
            color_scheme: ColorScheme::default(),
            palette: Palette::default(),
            default_area: 1.0,
            default_vref: 0.0,
            populate_new_plots: true,
            session_file_stem: "my_analysis".to_string(),
            export: ExportConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// `$CVVIEWER_CONFIG` if set, else `~/.cvviewer/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(p));
        }
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".cvviewer").join("config.yaml"))
    }

    pub fn from_yaml(s: &str) -> Result<Self, ViewerError> {
        serde_yaml::from_str(s).map_err(|e| ViewerError::Config(format!("Deserialization error: {e}")))
    }

    pub fn to_yaml(&self) -> Result<String, ViewerError> {
        serde_yaml::to_string(self).map_err(|e| ViewerError::Config(format!("Serialization error: {e}")))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ViewerError> {
        let s = fs::read_to_string(path)
            .map_err(|e| ViewerError::Config(format!("Failed to read {path:?}: {e}")))?;
        Self::from_yaml(&s)
    }

    /// Load from the default path; defaults if there is no file.
    pub fn load() -> Result<Self, ViewerError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("loading config from {:?}", path);
                Self::load_from_path(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ViewerError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| ViewerError::Config(format!("Failed to create dir {dir:?}: {e}")))?;
        }
        fs::write(path, self.to_yaml()?)
            .map_err(|e| ViewerError::Config(format!("Failed to write file {path:?}: {e}")))
    }

    pub fn save(&self) -> Result<(), ViewerError> {
        let path = Self::default_path()
            .ok_or_else(|| ViewerError::Config("HOME env var not set".to_string()))?;
        self.save_to_path(&path)
    }
}
