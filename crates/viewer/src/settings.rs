//! Viewer settings

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Autonomous orbit parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Start with autonomous rotation enabled
    pub auto_rotate: bool,
    /// Degrees per second
    pub rotation_speed_deg: f32,
    pub base_radius: f32,
    pub base_height: f32,
    pub radial_amplitude: f32,
    pub radial_frequency: f32,
    pub vertical_amplitude: f32,
    pub vertical_frequency: f32,
    pub look_at: [f32; 3],
    /// Quiet period after manual control before autonomous motion resumes (seconds)
    pub resume_delay: f64,
    /// Duration of the reset-view flight (seconds)
    pub reset_duration: f64,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            rotation_speed_deg: 10.0,
            base_radius: 8.0,
            base_height: 3.0,
            radial_amplitude: 0.5,
            radial_frequency: 0.5,
            vertical_amplitude: 0.3,
            vertical_frequency: 0.3,
            look_at: [0.0, 0.9, 0.0],
            resume_delay: 2.0,
            reset_duration: 1.0,
            min_distance: 2.0,
            max_distance: 30.0,
        }
    }
}

/// Hover and selection feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub hover_scale: f32,
    /// Seconds
    pub hover_duration: f64,
    pub select_scale: f32,
    /// Seconds
    pub select_duration: f64,
    pub pulse_amplitude: f32,
    /// Phase advance per frame (radians)
    pub pulse_step: f32,
    pub emissive_base: f32,
    pub emissive_amplitude: f32,
    pub emissive_frequency: f32,
    pub hover_color: [f32; 3],
    pub selection_color: [f32; 3],
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hover_scale: 1.05,
            hover_duration: 0.2,
            select_scale: 1.10,
            select_duration: 0.3,
            pulse_amplitude: 0.02,
            pulse_step: 0.1,
            emissive_base: 0.1,
            emissive_amplitude: 0.05,
            emissive_frequency: 3.0,
            hover_color: [0.35, 0.65, 1.0],
            selection_color: [1.0, 0.65, 0.2],
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    pub show_grid: bool,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            show_grid: true,
            fov_deg: 45.0,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub orbit: OrbitSettings,
    pub interaction: InteractionSettings,
    pub viewport: ViewportSettings,
    pub ui: UiSettings,
}

impl ViewerSettings {
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        serde_json::from_str(json).map_err(|e| ViewerError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ViewerError> {
        serde_json::to_string_pretty(self).map_err(|e| ViewerError::Parse(e.to_string()))
    }

    /// Load settings from the platform config dir, or return defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the platform config dir
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), ViewerError> {
        let path = Self::config_path()
            .ok_or_else(|| ViewerError::Io("no config directory".to_string()))?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "chair-viewer", "chair-viewer")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}
