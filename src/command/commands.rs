use super::{CommandContext, CommandError, CommandResult};
use crate::shape::{Shape, ShapeId};

/// Undoable edits to the shape list
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A newly drawn shape, appended on top
    AddShape { shape: Shape },

    /// A shape deleted from position `index`
    RemoveShape { index: usize, shape: Shape },

    /// Any in-place change: move, resize, effect or intensity edits
    UpdateShape {
        id: ShapeId,
        before: Shape,
        after: Shape,
    },

    /// Every shape removed at once
    ClearShapes { shapes: Vec<Shape> },
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddShape { .. } => "Add Shape",
            Command::RemoveShape { .. } => "Delete Shape",
            Command::UpdateShape { .. } => "Edit Shape",
            Command::ClearShapes { .. } => "Reset",
        }
    }

    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        match self {
            Command::AddShape { shape } => {
                ctx.document.add(shape.clone());
                *ctx.selected = Some(shape.id);
            }
            Command::RemoveShape { shape, .. } => {
                ctx.document
                    .remove(shape.id)
                    .ok_or(CommandError::ShapeNotFound(shape.id))?;
                ctx.prune_selection();
            }
            Command::UpdateShape { id, after, .. } => {
                if !ctx.document.replace(after.clone()) {
                    return Err(CommandError::ShapeNotFound(*id));
                }
            }
            Command::ClearShapes { .. } => {
                ctx.document.clear();
                *ctx.selected = None;
            }
        }
        Ok(())
    }

    pub fn undo(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        match self {
            Command::AddShape { shape } => {
                ctx.document
                    .remove(shape.id)
                    .ok_or(CommandError::ShapeNotFound(shape.id))?;
                ctx.prune_selection();
            }
            Command::RemoveShape { index, shape } => {
                ctx.document.insert_at(*index, shape.clone());
                *ctx.selected = Some(shape.id);
            }
            Command::UpdateShape { id, before, .. } => {
                if !ctx.document.replace(before.clone()) {
                    return Err(CommandError::ShapeNotFound(*id));
                }
            }
            Command::ClearShapes { shapes } => {
                ctx.document.clear();
                for shape in shapes {
                    ctx.document.add(shape.clone());
                }
            }
        }
        Ok(())
    }
}
