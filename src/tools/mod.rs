use egui::{CursorIcon, Pos2};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::shape::{Effect, Shape, ShapeId, ShapeKind};

mod region_tool;
pub use region_tool::{RegionState, RegionTool};

/// Settings used for the next drawn shape, mirrored from the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolOptions {
    pub kind: ShapeKind,
    pub effect: Effect,
    pub intensity: u32,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Rectangle,
            effect: Effect::Mosaic,
            intensity: 10,
        }
    }
}

/// A single edit coming from the tool-options panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOption {
    Kind(ShapeKind),
    Effect(Effect),
    Intensity(u32),
}

impl ToolOptions {
    pub fn set(&mut self, option: ToolOption) {
        match option {
            ToolOption::Kind(kind) => self.kind = kind,
            ToolOption::Effect(effect) => self.effect = effect,
            ToolOption::Intensity(intensity) => self.intensity = intensity,
        }
    }
}

/// Everything a tool may read or mutate while handling one pointer event
pub struct ToolContext<'a> {
    pub document: &'a mut Document,
    pub selected: &'a mut Option<ShapeId>,
    pub options: &'a mut ToolOptions,
    pub config: &'a EditorConfig,
}

impl ToolContext<'_> {
    /// Select `id` and pull its effect and intensity into the tool options,
    /// so the slider edits the shape the user just picked.
    pub fn on_shape_selected(&mut self, id: ShapeId) {
        *self.selected = Some(id);
        if let Some(shape) = self.document.get(id) {
            self.options.effect = shape.effect;
            self.options.intensity = shape.intensity;
        }
    }

    pub fn deselect(&mut self) {
        *self.selected = None;
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.document.get(id))
    }
}

/// Read-only view of the editor for hover feedback
#[derive(Clone, Copy)]
pub struct ToolView<'a> {
    pub document: &'a Document,
    pub selected: Option<ShapeId>,
    pub config: &'a EditorConfig,
}

impl ToolView<'_> {
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.document.get(id))
    }
}

/// Tool trait defines the interface for pointer-driven canvas tools.
///
/// Positions are always in source-image pixels. Tools mutate the document
/// directly while a gesture runs; the command returned on pointer-up
/// describes the finished change for the undo history and has already
/// been applied.
pub trait Tool {
    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    /// Cursor to show while hovering `pos` with no gesture running
    fn hover_cursor(&self, _pos: Pos2, _view: ToolView<'_>) -> CursorIcon {
        CursorIcon::Default
    }
}
