use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::EditorResult;
use crate::tools::ToolOptions;

/// Upper bound for a configured intensity range
pub const MAX_INTENSITY: u32 = 500;

/// Tunables of the region editor.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// A drawn region must exceed this on both axes (image pixels) to be kept
    pub min_shape_size: f32,
    /// Half-width of the square hit zone around each corner handle (image pixels)
    pub handle_hit_tolerance: f32,
    /// Edge length of the drawn corner handles (screen points)
    pub handle_size: f32,
    pub intensity_min: u32,
    pub intensity_max: u32,
    pub outline_width: f32,
    pub outline_dash: f32,
    pub outline_gap: f32,
    /// Tool options used when nothing was remembered from a previous run
    pub default_tool: ToolOptions,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_shape_size: 5.0,
            handle_hit_tolerance: 10.0,
            handle_size: 8.0,
            intensity_min: 2,
            intensity_max: 50,
            outline_width: 2.0,
            outline_dash: 5.0,
            outline_gap: 5.0,
            default_tool: ToolOptions::default(),
            export_file_name: "blurred-image.png".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn load(path: &Path) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn intensity_range(&self) -> RangeInclusive<u32> {
        self.intensity_min..=self.intensity_max
    }

    /// Keep ranges ordered and the default intensity inside them
    fn sanitized(mut self) -> Self {
        if self.intensity_min > self.intensity_max {
            std::mem::swap(&mut self.intensity_min, &mut self.intensity_max);
        }
        self.intensity_min = self.intensity_min.clamp(1, MAX_INTENSITY);
        self.intensity_max = self.intensity_max.clamp(self.intensity_min, MAX_INTENSITY);
        self.default_tool.intensity = self
            .default_tool
            .intensity
            .clamp(self.intensity_min, self.intensity_max);
        self.min_shape_size = self.min_shape_size.max(0.0);
        self.handle_hit_tolerance = self.handle_hit_tolerance.max(0.0);
        self
    }
}
