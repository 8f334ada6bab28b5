mod commands;
mod context;
mod history;

use thiserror::Error;

use crate::shape::ShapeId;

pub use commands::Command;
pub use context::CommandContext;
pub use history::CommandHistory;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    /// The command refers to a shape that is not in the document
    #[error("Shape {0} not found")]
    ShapeNotFound(ShapeId),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
}
