use super::{Command, CommandContext, CommandError, CommandResult};

/// Manages the history of executed commands for undo/redo functionality
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command and add it to the history if successful
    pub fn execute(&mut self, command: Command, ctx: &mut CommandContext<'_>) -> CommandResult {
        command.execute(ctx)?;
        self.record(command);
        Ok(())
    }

    /// Push a command whose effect is already in the document
    pub fn record(&mut self, command: Command) {
        log::debug!("Recorded command: {}", command.label());
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Like [`record`](Self::record), but folds an option edit of the same
    /// shape into the previous option edit so a slider drag is one undo step.
    /// Edits that moved or resized the shape are never merged.
    pub fn record_coalescing(&mut self, command: Command) {
        if let (
            Some(Command::UpdateShape {
                id: top_id,
                before: top_before,
                after: top_after,
            }),
            Command::UpdateShape { id, before, after },
        ) = (self.undo_stack.last_mut(), &command)
        {
            let options_only = top_before.bounds == top_after.bounds && before.bounds == after.bounds;
            if *top_id == *id && options_only && self.redo_stack.is_empty() {
                *top_after = after.clone();
                return;
            }
        }
        self.record(command);
    }

    /// Undo the last executed command
    pub fn undo(&mut self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let command = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        if let Err(err) = command.undo(ctx) {
            // An entry that no longer matches the document is dropped
            log::warn!("Failed to undo {}: {}", command.label(), err);
            return Err(err);
        }
        self.redo_stack.push(command);
        Ok(())
    }

    /// Redo the last undone command
    pub fn redo(&mut self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let command = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        if let Err(err) = command.execute(ctx) {
            log::warn!("Failed to redo {}: {}", command.label(), err);
            return Err(err);
        }
        self.undo_stack.push(command);
        Ok(())
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
