//! Editor configuration for the seatmap layout engine
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Grid snapping
//! - Interaction thresholds (corner zones, polygon closing, angle step)
//! - Default geometry and style for newly created objects
//! - History depth
//! - Bulk generation spacing
//! - Render colours

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Grid snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Snap placement and drags to the grid
    pub enabled: bool,
    /// Grid cell size in canvas units
    pub cell_size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_size: 5.0,
        }
    }
}

impl GridSettings {
    /// Cell size to snap with, or `None` while snapping is disabled
    pub fn effective_cell(&self) -> Option<f64> {
        self.enabled.then_some(self.cell_size)
    }
}

/// Pointer interaction thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionSettings {
    /// Corner hot-zone size in canvas units
    pub corner_zone_size: f64,
    /// Distance to the first vertex that closes a polygon
    pub polygon_close_distance: f64,
    /// Smallest width/height a resize may produce
    pub min_object_size: f64,
    /// Angle-snap increment in degrees (must divide 360)
    pub snap_step_degrees: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            corner_zone_size: 20.0,
            polygon_close_distance: 10.0,
            min_object_size: 4.0,
            snap_step_degrees: 45.0,
        }
    }
}

/// Default visual style for new objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub corner_radius: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            fill: "#4a90d9".to_string(),
            stroke: "#1f3b5c".to_string(),
            stroke_width: 1.0,
            opacity: 1.0,
            corner_radius: 4.0,
        }
    }
}

/// Default geometry for objects created by a single click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDefaults {
    pub rect_width: f64,
    pub rect_height: f64,
    pub circle_radius: f64,
    pub text_content: String,
    pub font_size: f64,
    pub style: StyleSettings,
}

impl Default for ObjectDefaults {
    fn default() -> Self {
        Self {
            rect_width: 40.0,
            rect_height: 40.0,
            circle_radius: 20.0,
            text_content: "A".to_string(),
            font_size: 16.0,
            style: StyleSettings::default(),
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum number of snapshots retained
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 200 }
    }
}

/// Auto-spacing strategy for bulk generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpacingMode {
    /// Flat multiplier; adjacent objects never overlap
    #[default]
    Simple,
    /// Size-dependent multiplier plus padding
    Smart,
}

impl std::fmt::Display for SpacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Smart => write!(f, "smart"),
        }
    }
}

impl std::str::FromStr for SpacingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "smart" => Ok(Self::Smart),
            other => Err(ConfigError::ValueOutOfRange {
                key: "bulk.spacing_mode".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Bulk generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSettings {
    pub spacing_mode: SpacingMode,
    pub simple_multiplier: f64,
    pub smart_min_multiplier: f64,
    pub smart_max_multiplier: f64,
    /// Footprint at which the smart multiplier sits halfway between min and max
    pub smart_reference_size: f64,
    pub smart_padding: f64,
    /// Largest batch a single generation may produce
    pub max_objects: usize,
}

impl Default for BulkSettings {
    fn default() -> Self {
        Self {
            spacing_mode: SpacingMode::Simple,
            simple_multiplier: 1.5,
            smart_min_multiplier: 1.1,
            smart_max_multiplier: 1.3,
            smart_reference_size: 40.0,
            smart_padding: 4.0,
            max_objects: 5000,
        }
    }
}

/// Render colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub background: String,
    pub hover_color: String,
    pub selection_color: String,
    pub lock_color: String,
    pub preview_color: String,
    pub ghost_opacity: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            hover_color: "#ff9800".to_string(),
            selection_color: "#2979ff".to_string(),
            lock_color: "#9e9e9e".to_string(),
            preview_color: "#e91e63".to_string(),
            ghost_opacity: 0.5,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections fall back to their defaults when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub grid: GridSettings,
    pub interaction: InteractionSettings,
    pub defaults: ObjectDefaults,
    pub history: HistorySettings,
    pub bulk: BulkSettings,
    pub render: RenderSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Load the config at [`default_config_path`], or defaults if it does not exist
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        positive("grid.cell_size", self.grid.cell_size)?;

        let interaction = &self.interaction;
        positive("interaction.corner_zone_size", interaction.corner_zone_size)?;
        positive(
            "interaction.polygon_close_distance",
            interaction.polygon_close_distance,
        )?;
        positive("interaction.min_object_size", interaction.min_object_size)?;
        positive("interaction.snap_step_degrees", interaction.snap_step_degrees)?;
        let steps = 360.0 / interaction.snap_step_degrees;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(SettingsError::invalid(
                "interaction.snap_step_degrees",
                "must divide 360",
            ));
        }

        let defaults = &self.defaults;
        positive("defaults.rect_width", defaults.rect_width)?;
        positive("defaults.rect_height", defaults.rect_height)?;
        positive("defaults.circle_radius", defaults.circle_radius)?;
        positive("defaults.font_size", defaults.font_size)?;
        if defaults.text_content.is_empty() {
            return Err(SettingsError::invalid(
                "defaults.text_content",
                "must not be empty",
            ));
        }
        unit_interval("defaults.style.opacity", defaults.style.opacity)?;
        if defaults.style.stroke_width < 0.0 || defaults.style.corner_radius < 0.0 {
            return Err(SettingsError::invalid(
                "defaults.style",
                "stroke width and corner radius must be >= 0",
            ));
        }
        color("defaults.style.fill", &defaults.style.fill)?;
        color("defaults.style.stroke", &defaults.style.stroke)?;

        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid("history.max_depth", "must be > 0"));
        }

        let bulk = &self.bulk;
        multiplier("bulk.simple_multiplier", bulk.simple_multiplier)?;
        multiplier("bulk.smart_min_multiplier", bulk.smart_min_multiplier)?;
        multiplier("bulk.smart_max_multiplier", bulk.smart_max_multiplier)?;
        if bulk.smart_max_multiplier < bulk.smart_min_multiplier {
            return Err(SettingsError::invalid(
                "bulk.smart_max_multiplier",
                "must be >= smart_min_multiplier",
            ));
        }
        positive("bulk.smart_reference_size", bulk.smart_reference_size)?;
        if bulk.smart_padding < 0.0 {
            return Err(SettingsError::invalid("bulk.smart_padding", "must be >= 0"));
        }
        if bulk.max_objects == 0 {
            return Err(SettingsError::invalid("bulk.max_objects", "must be > 0"));
        }

        let render = &self.render;
        unit_interval("render.ghost_opacity", render.ghost_opacity)?;
        color("render.background", &render.background)?;
        color("render.hover_color", &render.hover_color)?;
        color("render.selection_color", &render.selection_color)?;
        color("render.lock_color", &render.lock_color)?;
        color("render.preview_color", &render.preview_color)?;

        Ok(())
    }
}

/// Path of the user's editor config file
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))?;
    path.push("seatmap");
    path.push("editor.toml");
    Ok(path)
}

/// Check a `#rrggbb` or `#rrggbbaa` colour string
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into()),
        }
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, "must be > 0"))
    }
}

fn multiplier(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value >= 1.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, "must be >= 1.0"))
    }
}

fn unit_interval(key: &str, value: f64) -> SettingsResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into())
    }
}

fn color(key: &str, value: &str) -> SettingsResult<()> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("'{value}' is not a hex colour")))
    }
}
