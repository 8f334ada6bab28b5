use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::tools::ToolOptions;

/// What survives a restart. Only preferences are kept; the image and its
/// shapes belong to one session and are never written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    pub tool: ToolOptions,
    /// Version of the application when the snapshot was taken
    pub version: String,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            tool: ToolOptions::default(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl SettingsSnapshot {
    pub fn new(tool: ToolOptions) -> Self {
        Self {
            tool,
            ..Self::default()
        }
    }

    /// Fold the remembered options into `config`, clamping the intensity to
    /// the configured range.
    pub fn apply_to(&self, config: &mut EditorConfig) {
        if self.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Settings from version {} differ from current version {}",
                self.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        let range = config.intensity_range();
        config.default_tool = ToolOptions {
            intensity: self.tool.intensity.clamp(*range.start(), *range.end()),
            ..self.tool
        };
    }
}
