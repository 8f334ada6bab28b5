//! One editing session over a single loaded image.
//!
//! The session owns the source image, the shape list, the selection, the
//! tool options and the region tool's gesture state. Pointer events arrive
//! already converted to image pixels and are routed through the region
//! tool:
//!
//! ```text
//!                      handle of selection
//!              ┌──────────────────────────────► Resizing ──┐
//!              │                                           │
//! ┌──────┐ down│       topmost shape under pointer         │ up
//! │ Idle ├─────┼──────────────────────────────► Moving ────┼──────► Idle
//! └──────┘     │                                           │
//!              │       empty canvas                        │
//!              └──────────────────────────────► Drawing ───┘
//! ```
//!
//! Anything that changes pixels of the composite marks the session dirty;
//! the renderer recomposes on the next frame and clears the flag.

use egui::{CursorIcon, Pos2, Vec2};
use image::RgbaImage;
use log::{debug, info};

use crate::command::{Command, CommandContext, CommandHistory};
use crate::compositor;
use crate::config::EditorConfig;
use crate::document::{Document, ShapeUpdate};
use crate::error::{EditorError, EditorResult};
use crate::file_handler;
use crate::shape::{Shape, ShapeId};
use crate::tools::{RegionTool, Tool, ToolContext, ToolOption, ToolOptions, ToolView};

#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    source: Option<RgbaImage>,
    document: Document,
    selected: Option<ShapeId>,
    options: ToolOptions,
    tool: RegionTool,
    history: CommandHistory,
    dirty: bool,
    notice: Option<String>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let options = config.default_tool;
        Self {
            config,
            source: None,
            document: Document::new(),
            selected: None,
            options,
            tool: RegionTool::new(),
            history: CommandHistory::new(),
            dirty: false,
            notice: None,
        }
    }

    // --- image lifecycle ---

    /// Start over on a freshly decoded image. Shapes never outlive the image
    /// they were drawn on.
    pub fn load_image(&mut self, image: RgbaImage) {
        info!("Loaded image {}x{}", image.width(), image.height());
        self.source = Some(image);
        self.discard_edits();
    }

    /// Unload the image and return to the empty drop zone
    pub fn clear_image(&mut self) {
        if self.source.take().is_some() {
            info!("Image cleared");
        }
        self.discard_edits();
    }

    fn discard_edits(&mut self) {
        self.document.clear();
        self.selected = None;
        self.tool.reset();
        self.history.clear();
        self.notice = None;
        self.mark_dirty();
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    /// Natural size of the loaded image in pixels
    pub fn image_size(&self) -> Option<Vec2> {
        self.source
            .as_ref()
            .map(|img| Vec2::new(img.width() as f32, img.height() as f32))
    }

    // --- accessors ---

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn shapes(&self) -> &[Shape] {
        self.document.list()
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.document.get(id))
    }

    pub fn options(&self) -> &ToolOptions {
        &self.options
    }

    pub fn tool(&self) -> &RegionTool {
        &self.tool
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    // --- pointer input, image coordinates ---

    fn tool_context(&mut self) -> (&mut RegionTool, ToolContext<'_>) {
        (
            &mut self.tool,
            ToolContext {
                document: &mut self.document,
                selected: &mut self.selected,
                options: &mut self.options,
                config: &self.config,
            },
        )
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        if !self.has_image() {
            return;
        }
        let (tool, mut ctx) = self.tool_context();
        let command = tool.on_pointer_down(pos, &mut ctx);
        self.finish_tool_event(command);
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        if self.tool.is_idle() {
            return;
        }
        let (tool, mut ctx) = self.tool_context();
        let command = tool.on_pointer_move(pos, &mut ctx);
        // Drawing only changes the outline; moves and resizes change pixels
        if self.tool.provisional().is_none() {
            self.mark_dirty();
        }
        self.finish_tool_event(command);
    }

    /// Ends the running gesture. Pointer-leave is routed here too.
    pub fn pointer_up(&mut self, pos: Pos2) {
        if self.tool.is_idle() {
            return;
        }
        let (tool, mut ctx) = self.tool_context();
        let command = tool.on_pointer_up(pos, &mut ctx);
        self.finish_tool_event(command);
    }

    fn finish_tool_event(&mut self, command: Option<Command>) {
        if let Some(command) = command {
            self.history.record(command);
            self.mark_dirty();
        }
    }

    pub fn hover_cursor(&self, pos: Pos2) -> CursorIcon {
        let view = ToolView {
            document: &self.document,
            selected: self.selected,
            config: &self.config,
        };
        self.tool.hover_cursor(pos, view)
    }

    // --- selection and tool options ---

    /// Select a shape and mirror its effect and intensity into the tool options
    pub fn on_shape_selected(&mut self, id: ShapeId) {
        let (_, mut ctx) = self.tool_context();
        ctx.on_shape_selected(id);
    }

    pub fn deselect(&mut self) {
        if self.tool.is_idle() {
            self.selected = None;
        }
    }

    /// Edit a tool option. The new value becomes the default for new shapes
    /// and, when a shape is selected, is written into that shape as well.
    pub fn on_tool_option_changed(&mut self, option: ToolOption) {
        let option = match option {
            ToolOption::Intensity(value) => {
                let range = self.config.intensity_range();
                ToolOption::Intensity(value.clamp(*range.start(), *range.end()))
            }
            other => other,
        };
        self.options.set(option);

        let Some(id) = self.selected else {
            return;
        };
        let Some(before) = self.document.get(id).cloned() else {
            return;
        };
        let update = match option {
            ToolOption::Kind(kind) => ShapeUpdate {
                kind: Some(kind),
                ..Default::default()
            },
            ToolOption::Effect(effect) => ShapeUpdate {
                effect: Some(effect),
                ..Default::default()
            },
            ToolOption::Intensity(intensity) => ShapeUpdate {
                intensity: Some(intensity),
                ..Default::default()
            },
        };
        self.document.update(id, update);
        if let Some(after) = self.document.get(id).cloned() {
            if after != before {
                debug!("Tool option {:?} applied to shape {}", option, id);
                self.history
                    .record_coalescing(Command::UpdateShape { id, before, after });
                self.mark_dirty();
            }
        }
    }

    // --- shape list edits ---

    pub fn delete_selected(&mut self) -> bool {
        if !self.tool.is_idle() {
            return false;
        }
        let Some(id) = self.selected.take() else {
            return false;
        };
        let Some(index) = self.document.index_of(id) else {
            return false;
        };
        let Some(shape) = self.document.remove(id) else {
            return false;
        };
        info!("Deleted shape {}", id);
        self.history.record(Command::RemoveShape { index, shape });
        self.mark_dirty();
        true
    }

    /// Remove every shape, keeping the image
    pub fn reset(&mut self) {
        self.tool.reset();
        self.selected = None;
        if self.document.is_empty() {
            return;
        }
        let shapes = self.document.clear();
        info!("Reset {} shapes", shapes.len());
        self.history.record(Command::ClearShapes { shapes });
        self.mark_dirty();
    }

    pub fn can_undo(&self) -> bool {
        self.tool.is_idle() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.tool.is_idle() && self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        if !self.tool.is_idle() {
            return false;
        }
        let mut ctx = CommandContext::new(&mut self.document, &mut self.selected);
        let undone = self.history.undo(&mut ctx).is_ok();
        if undone {
            self.mark_dirty();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        if !self.tool.is_idle() {
            return false;
        }
        let mut ctx = CommandContext::new(&mut self.document, &mut self.selected);
        let redone = self.history.redo(&mut ctx).is_ok();
        if redone {
            self.mark_dirty();
        }
        redone
    }

    // --- redraw and export ---

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether a recompose is due and clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The image with every shape's effect baked in and no selection chrome
    pub fn compose(&self) -> EditorResult<RgbaImage> {
        let source = self.source.as_ref().ok_or(EditorError::NoImage)?;
        Ok(compositor::compose(source, self.document.list()))
    }

    /// Flattened composite encoded as PNG, rebuilt from scratch
    pub fn export_png(&self) -> EditorResult<Vec<u8>> {
        let composite = self.compose()?;
        let bytes = file_handler::encode_png(&composite)?;
        info!("Exported {} shapes ({} bytes)", self.document.len(), bytes.len());
        Ok(bytes)
    }

    // --- user-visible notices ---

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
