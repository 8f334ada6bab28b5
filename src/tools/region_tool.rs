use egui::{CursorIcon, Pos2};
use log::debug;

use super::{Tool, ToolContext, ToolView};
use crate::command::Command;
use crate::geometry::hit_testing::{handle_at, shape_at};
use crate::id_generator::generate_id;
use crate::shape::{Bounds, Shape, ShapeId};
use crate::widgets::Corner;

/// Gesture state of the region tool. One gesture runs at a time, from
/// pointer-down to pointer-up.
#[derive(Debug, Clone, Default)]
pub enum RegionState {
    #[default]
    Idle,
    /// Dragging out a new shape that is not in the document yet
    Drawing {
        origin: Pos2,
        provisional: Shape,
    },
    /// Dragging a selected shape; `last` is the previous pointer position
    Moving {
        id: ShapeId,
        last: Pos2,
        before: Shape,
    },
    Resizing {
        id: ShapeId,
        corner: Corner,
        before: Shape,
    },
}

/// Draws, selects, moves and resizes effect regions
#[derive(Debug, Clone, Default)]
pub struct RegionTool {
    state: RegionState,
}

impl RegionTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RegionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, RegionState::Idle)
    }

    pub fn current_state_name(&self) -> &'static str {
        match self.state {
            RegionState::Idle => "Idle",
            RegionState::Drawing { .. } => "Drawing",
            RegionState::Moving { .. } => "Moving",
            RegionState::Resizing { .. } => "Resizing",
        }
    }

    /// Shape being dragged out, if a draw gesture is running
    pub fn provisional(&self) -> Option<&Shape> {
        match &self.state {
            RegionState::Drawing { provisional, .. } => Some(provisional),
            _ => None,
        }
    }

    /// Drop any running gesture without committing it.
    /// Used when the image or the shape list is replaced underneath the tool.
    pub fn reset(&mut self) {
        self.state = RegionState::Idle;
    }

    /// Command for a finished move or resize, or None if nothing changed
    fn finish_edit(id: ShapeId, before: Shape, ctx: &ToolContext<'_>) -> Option<Command> {
        let after = ctx.document.get(id)?.clone();
        if after == before {
            return None;
        }
        Some(Command::UpdateShape { id, before, after })
    }
}

impl Tool for RegionTool {
    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        if !self.is_idle() {
            return None;
        }

        // 1. A corner handle of the current selection
        if let Some(selected) = ctx.selected_shape() {
            if let Some(corner) = handle_at(pos, &selected.bounds, ctx.config.handle_hit_tolerance) {
                debug!("Resizing shape {} from {}", selected.id, corner.as_str());
                self.state = RegionState::Resizing {
                    id: selected.id,
                    corner,
                    before: selected.clone(),
                };
                return None;
            }
        }

        // 2. The topmost shape under the pointer
        if let Some(hit) = shape_at(pos, ctx.document.list()).cloned() {
            debug!("Selected shape {} for moving", hit.id);
            ctx.on_shape_selected(hit.id);
            self.state = RegionState::Moving {
                id: hit.id,
                last: pos,
                before: hit,
            };
            return None;
        }

        // 3. Empty canvas: start a new region with the current tool options
        ctx.deselect();
        let provisional = Shape::new(
            generate_id(),
            ctx.options.kind,
            Bounds::at(pos),
            ctx.options.effect,
            ctx.options.intensity,
        );
        debug!("Drawing new {:?} at {:?}", provisional.kind, pos);
        self.state = RegionState::Drawing {
            origin: pos,
            provisional,
        };
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match &mut self.state {
            RegionState::Idle => {}
            RegionState::Drawing {
                origin,
                provisional,
            } => {
                provisional.bounds.width = pos.x - origin.x;
                provisional.bounds.height = pos.y - origin.y;
            }
            RegionState::Moving { id, last, .. } => {
                let delta = pos - *last;
                if let Some(shape) = ctx.document.get_mut(*id) {
                    shape.bounds.translate(delta);
                }
                *last = pos;
            }
            RegionState::Resizing { id, corner, .. } => {
                if let Some(shape) = ctx.document.get_mut(*id) {
                    shape.bounds = corner.resize(&shape.bounds, pos);
                }
            }
        }
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match std::mem::take(&mut self.state) {
            RegionState::Idle => None,
            RegionState::Drawing { provisional, .. } => {
                let min = ctx.config.min_shape_size;
                let b = provisional.bounds;
                if b.width.abs() > min && b.height.abs() > min {
                    let mut shape = provisional;
                    shape.bounds = b.normalized();
                    debug!("Committed shape {} at {:?}", shape.id, shape.bounds);
                    ctx.document.add(shape.clone());
                    *ctx.selected = Some(shape.id);
                    Some(Command::AddShape { shape })
                } else {
                    debug!("Discarded provisional shape of {}x{}", b.width, b.height);
                    None
                }
            }
            RegionState::Moving { id, before, .. } => Self::finish_edit(id, before, ctx),
            RegionState::Resizing { id, before, .. } => {
                if let Some(shape) = ctx.document.get_mut(id) {
                    let bounds = shape.bounds.normalized();
                    if bounds.width > 0.0 && bounds.height > 0.0 {
                        shape.bounds = bounds;
                    } else {
                        debug!("Dropped collapsed resize of shape {}", id);
                        shape.bounds = before.bounds;
                    }
                }
                Self::finish_edit(id, before, ctx)
            }
        }
    }

    fn hover_cursor(&self, pos: Pos2, view: ToolView<'_>) -> CursorIcon {
        match &self.state {
            RegionState::Idle => {}
            RegionState::Drawing { .. } => return CursorIcon::Crosshair,
            RegionState::Moving { .. } => return CursorIcon::Grabbing,
            RegionState::Resizing { corner, .. } => return corner.cursor_icon(),
        }
        if let Some(selected) = view.selected_shape() {
            if let Some(corner) = handle_at(pos, &selected.bounds, view.config.handle_hit_tolerance) {
                return corner.cursor_icon();
            }
        }
        if shape_at(pos, view.document.list()).is_some() {
            CursorIcon::Move
        } else {
            CursorIcon::Crosshair
        }
    }
}
