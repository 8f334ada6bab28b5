use egui::{Context, Key, KeyboardShortcut, Modifiers, Pos2, Rect, Vec2};

use crate::geometry::screen_to_image;

/// Pointer and keyboard input for the canvas, already mapped into
/// source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the image
    PointerDown { pos: Pos2 },
    /// Pointer moved while a gesture is running
    PointerMove { pos: Pos2 },
    /// Primary button released
    PointerUp { pos: Pos2 },
    /// Pointer left the image mid-gesture; handled exactly like a release
    PointerLeave { last_known: Pos2 },
    Shortcut(Shortcut),
}

/// Keyboard actions available on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    DeleteSelected,
    Deselect,
    Undo,
    Redo,
}

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// Raw pointer facts for one frame, in screen points
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerFrame {
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
}

/// Turns egui's per-frame pointer state into gesture events.
///
/// Tracks whether a gesture started on the image so that moves and the
/// final release are delivered even when egui reports them elsewhere.
#[derive(Debug, Default)]
pub struct CanvasInput {
    gesture_active: bool,
    last_pos: Option<Pos2>,
}

impl CanvasInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Gather this frame's events for an image displayed in `display_rect`
    pub fn process_input(&mut self, ctx: &Context, display_rect: Rect, natural_size: Vec2) -> Vec<InputEvent> {
        let frame = ctx.input(|i| PointerFrame {
            pos: i.pointer.latest_pos(),
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
        });
        let mut events = self.translate(frame, display_rect, natural_size);
        events.extend(read_shortcuts(ctx).into_iter().map(InputEvent::Shortcut));
        events
    }

    /// Map one frame of pointer facts to events
    pub fn translate(&mut self, frame: PointerFrame, display_rect: Rect, natural_size: Vec2) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_image = |p: Pos2| screen_to_image(p, display_rect, natural_size);
        let inside = frame.pos.is_some_and(|p| display_rect.contains(p));

        if !self.gesture_active {
            if let (true, true, Some(pos)) = (frame.pressed, inside, frame.pos) {
                self.gesture_active = true;
                self.last_pos = Some(pos);
                events.push(InputEvent::PointerDown { pos: to_image(pos) });
                // Press and release can land in the same frame on a fast click
                if frame.released {
                    self.end_gesture();
                    events.push(InputEvent::PointerUp { pos: to_image(pos) });
                }
            }
            return events;
        }

        if !inside {
            let last = frame.pos.or(self.last_pos).unwrap_or(display_rect.min);
            self.end_gesture();
            events.push(InputEvent::PointerLeave {
                last_known: to_image(last),
            });
            return events;
        }

        if let Some(pos) = frame.pos {
            if Some(pos) != self.last_pos {
                self.last_pos = Some(pos);
                events.push(InputEvent::PointerMove { pos: to_image(pos) });
            }
            if frame.released {
                self.end_gesture();
                events.push(InputEvent::PointerUp { pos: to_image(pos) });
            }
        }
        events
    }

    fn end_gesture(&mut self) {
        self.gesture_active = false;
        self.last_pos = None;
    }
}

/// Consume canvas shortcuts unless a text field has keyboard focus
pub fn read_shortcuts(ctx: &Context) -> Vec<Shortcut> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input_mut(|i| {
        let mut shortcuts = Vec::new();
        // Shift variant first: the plain shortcut would also match it
        if i.consume_shortcut(&REDO) || i.consume_shortcut(&REDO_ALT) {
            shortcuts.push(Shortcut::Redo);
        } else if i.consume_shortcut(&UNDO) {
            shortcuts.push(Shortcut::Undo);
        }
        if i.consume_key(Modifiers::NONE, Key::Delete) || i.consume_key(Modifiers::NONE, Key::Backspace) {
            shortcuts.push(Shortcut::DeleteSelected);
        }
        if i.consume_key(Modifiers::NONE, Key::Escape) {
            shortcuts.push(Shortcut::Deselect);
        }
        shortcuts
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> Rect {
        Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(200.0, 100.0))
    }

    // Displayed at half size
    const NATURAL: Vec2 = Vec2::new(400.0, 200.0);

    fn frame(x: f32, y: f32, pressed: bool, released: bool) -> PointerFrame {
        PointerFrame {
            pos: Some(Pos2::new(x, y)),
            pressed,
            released,
        }
    }

    #[test]
    fn test_press_outside_image_is_ignored() {
        let mut input = CanvasInput::new();
        assert!(input.translate(frame(50.0, 50.0, true, false), display(), NATURAL).is_empty());
        assert!(!input.gesture_active());
    }

    #[test]
    fn test_full_gesture_in_image_pixels() {
        let mut input = CanvasInput::new();
        let down = input.translate(frame(110.0, 120.0, true, false), display(), NATURAL);
        assert_eq!(down, vec![InputEvent::PointerDown { pos: Pos2::new(20.0, 40.0) }]);

        let moved = input.translate(frame(150.0, 150.0, false, false), display(), NATURAL);
        assert_eq!(moved, vec![InputEvent::PointerMove { pos: Pos2::new(100.0, 100.0) }]);

        // No movement, no event
        assert!(input.translate(frame(150.0, 150.0, false, false), display(), NATURAL).is_empty());

        let up = input.translate(frame(150.0, 150.0, false, true), display(), NATURAL);
        assert_eq!(up, vec![InputEvent::PointerUp { pos: Pos2::new(100.0, 100.0) }]);
        assert!(!input.gesture_active());
    }

    #[test]
    fn test_leaving_image_ends_gesture() {
        let mut input = CanvasInput::new();
        input.translate(frame(110.0, 110.0, true, false), display(), NATURAL);
        let events = input.translate(frame(350.0, 110.0, false, false), display(), NATURAL);
        assert_eq!(
            events,
            vec![InputEvent::PointerLeave { last_known: Pos2::new(500.0, 20.0) }]
        );
        assert!(!input.gesture_active());
        // A later release outside produces nothing
        assert!(input.translate(frame(350.0, 110.0, false, true), display(), NATURAL).is_empty());
    }

    #[test]
    fn test_pointer_lost_uses_last_position() {
        let mut input = CanvasInput::new();
        input.translate(frame(120.0, 120.0, true, false), display(), NATURAL);
        let events = input.translate(PointerFrame::default(), display(), NATURAL);
        assert_eq!(
            events,
            vec![InputEvent::PointerLeave { last_known: Pos2::new(40.0, 40.0) }]
        );
    }
}
