use egui::Pos2;
use image::{Rgba, RgbaImage};
use region_blur::command::{Command, CommandContext, CommandError, CommandHistory};
use region_blur::id_generator::generate_id;
use region_blur::{Bounds, Document, Effect, EditorSession, Shape, ShapeKind, ToolOption};

fn shape_at(x: f32, y: f32) -> Shape {
    Shape::new(
        generate_id(),
        ShapeKind::Rectangle,
        Bounds::new(x, y, 20.0, 20.0),
        Effect::Mosaic,
        10,
    )
}

// Helper to create a session with one committed shape
fn session_with_shape() -> EditorSession {
    let mut session = EditorSession::default();
    session.load_image(RgbaImage::from_pixel(120, 120, Rgba([200, 10, 10, 255])));
    session.pointer_down(Pos2::new(10.0, 10.0));
    session.pointer_move(Pos2::new(50.0, 50.0));
    session.pointer_up(Pos2::new(50.0, 50.0));
    session
}

#[test]
fn test_add_command_undo_redo() {
    let mut document = Document::new();
    let mut selected = None;
    let mut history = CommandHistory::new();
    let shape = shape_at(0.0, 0.0);

    {
        let mut ctx = CommandContext::new(&mut document, &mut selected);
        history
            .execute(Command::AddShape { shape: shape.clone() }, &mut ctx)
            .unwrap();
    }
    assert_eq!(document.len(), 1);
    assert_eq!(selected, Some(shape.id));

    {
        let mut ctx = CommandContext::new(&mut document, &mut selected);
        history.undo(&mut ctx).unwrap();
    }
    assert!(document.is_empty());
    assert_eq!(selected, None);

    let mut ctx = CommandContext::new(&mut document, &mut selected);
    history.redo(&mut ctx).unwrap();
    assert_eq!(ctx.document.get(shape.id), Some(&shape));
}

#[test]
fn test_undo_remove_restores_position_in_list() {
    let mut document = Document::new();
    let shapes: Vec<Shape> = (0..3).map(|i| shape_at(i as f32 * 30.0, 0.0)).collect();
    for shape in &shapes {
        document.add(shape.clone());
    }
    let mut selected = None;
    let removed = document.remove(shapes[1].id).unwrap();
    let mut history = CommandHistory::new();
    history.record(Command::RemoveShape { index: 1, shape: removed });

    let mut ctx = CommandContext::new(&mut document, &mut selected);
    history.undo(&mut ctx).unwrap();
    let ids: Vec<_> = document.list().iter().map(|s| s.id).collect();
    assert_eq!(ids, shapes.iter().map(|s| s.id).collect::<Vec<_>>());
    assert_eq!(selected, Some(shapes[1].id));
}

#[test]
fn test_empty_history_reports_errors() {
    let mut document = Document::new();
    let mut selected = None;
    let mut history = CommandHistory::new();
    let mut ctx = CommandContext::new(&mut document, &mut selected);
    assert_eq!(history.undo(&mut ctx), Err(CommandError::NothingToUndo));
    assert_eq!(history.redo(&mut ctx), Err(CommandError::NothingToRedo));
}

#[test]
fn test_update_of_missing_shape_fails() {
    let mut document = Document::new();
    let mut selected = None;
    let shape = shape_at(0.0, 0.0);
    let command = Command::UpdateShape {
        id: shape.id,
        before: shape.clone(),
        after: shape.clone(),
    };
    let mut ctx = CommandContext::new(&mut document, &mut selected);
    assert_eq!(command.execute(&mut ctx), Err(CommandError::ShapeNotFound(shape.id)));
}

#[test]
fn test_session_undo_move() {
    let mut session = session_with_shape();
    let original = session.shapes()[0].bounds;

    session.pointer_down(Pos2::new(30.0, 30.0));
    session.pointer_move(Pos2::new(60.0, 45.0));
    session.pointer_up(Pos2::new(60.0, 45.0));
    assert_eq!(session.shapes()[0].bounds.x, original.x + 30.0);

    assert!(session.undo());
    assert_eq!(session.shapes()[0].bounds, original);
    assert!(session.redo());
    assert_eq!(session.shapes()[0].bounds.y, original.y + 15.0);
}

#[test]
fn test_click_without_drag_records_nothing() {
    let mut session = session_with_shape();
    let before = session.history().undo_stack().len();
    session.pointer_down(Pos2::new(30.0, 30.0));
    session.pointer_up(Pos2::new(30.0, 30.0));
    assert_eq!(session.history().undo_stack().len(), before);
}

#[test]
fn test_slider_drag_is_one_undo_step() {
    let mut session = session_with_shape();
    let base = session.history().undo_stack().len();

    for value in [12, 14, 16, 18] {
        session.on_tool_option_changed(ToolOption::Intensity(value));
    }
    assert_eq!(session.history().undo_stack().len(), base + 1);
    assert_eq!(session.shapes()[0].intensity, 18);

    assert!(session.undo());
    assert_eq!(session.shapes()[0].intensity, 10);
}

#[test]
fn test_option_edit_after_move_is_separate_step() {
    let mut session = session_with_shape();
    session.pointer_down(Pos2::new(30.0, 30.0));
    session.pointer_move(Pos2::new(35.0, 30.0));
    session.pointer_up(Pos2::new(35.0, 30.0));
    let after_move = session.history().undo_stack().len();

    session.on_tool_option_changed(ToolOption::Effect(Effect::Blur));
    assert_eq!(session.history().undo_stack().len(), after_move + 1);

    assert!(session.undo());
    assert_eq!(session.shapes()[0].effect, Effect::Mosaic);
    assert_eq!(session.shapes()[0].bounds.x, 15.0);
}

#[test]
fn test_reset_can_be_undone() {
    let mut session = session_with_shape();
    session.reset();
    assert!(session.shapes().is_empty());
    assert!(session.undo());
    assert_eq!(session.shapes().len(), 1);
}

#[test]
fn test_delete_undo_reselects() {
    let mut session = session_with_shape();
    let id = session.shapes()[0].id;
    assert!(session.delete_selected());
    assert!(session.selected().is_none());
    assert!(session.undo());
    assert_eq!(session.selected(), Some(id));
}

#[test]
fn test_undo_refused_mid_gesture() {
    let mut session = session_with_shape();
    session.pointer_down(Pos2::new(100.0, 100.0));
    assert!(!session.can_undo());
    assert!(!session.undo());
    session.pointer_up(Pos2::new(100.0, 100.0));
    assert!(session.can_undo());
}
