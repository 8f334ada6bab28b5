use crate::document::Document;
use crate::shape::ShapeId;

/// What a command may touch when it runs: the shape list and the selection.
pub struct CommandContext<'a> {
    /// The shapes being edited
    pub document: &'a mut Document,
    /// The currently selected shape, kept pointing at a live shape
    pub selected: &'a mut Option<ShapeId>,
}

impl<'a> CommandContext<'a> {
    pub fn new(document: &'a mut Document, selected: &'a mut Option<ShapeId>) -> Self {
        Self { document, selected }
    }

    /// Drop the selection if its shape is gone
    pub fn prune_selection(&mut self) {
        if let Some(id) = *self.selected {
            if self.document.get(id).is_none() {
                *self.selected = None;
            }
        }
    }
}
