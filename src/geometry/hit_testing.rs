use egui::Pos2;

use crate::shape::{Bounds, Shape};
use crate::widgets::Corner;

/// Corner handle of `bounds` under `pos`, if any.
///
/// The hit zone is a square of half-width `tolerance` around each corner.
/// Corners are checked in a fixed order and the first hit wins, which only
/// matters for boxes smaller than the tolerance.
pub fn handle_at(pos: Pos2, bounds: &Bounds, tolerance: f32) -> Option<Corner> {
    Corner::ALL.into_iter().find(|corner| {
        let handle = corner.position(bounds);
        (pos.x - handle.x).abs() <= tolerance && (pos.y - handle.y).abs() <= tolerance
    })
}

/// Topmost shape containing `pos`; the list is scanned from the last drawn
pub fn shape_at(pos: Pos2, shapes: &[Shape]) -> Option<&Shape> {
    shapes.iter().rev().find(|shape| shape.contains(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::generate_id;
    use crate::shape::{Effect, ShapeKind};

    #[test]
    fn test_handle_hit_uses_square_tolerance() {
        let bounds = Bounds::new(100.0, 100.0, 50.0, 40.0);
        assert_eq!(handle_at(Pos2::new(108.0, 92.0), &bounds, 10.0), Some(Corner::TopLeft));
        assert_eq!(handle_at(Pos2::new(159.0, 149.0), &bounds, 10.0), Some(Corner::BottomRight));
        assert_eq!(handle_at(Pos2::new(111.0, 100.0), &bounds, 10.0), None);
    }

    #[test]
    fn test_first_corner_wins_on_tiny_boxes() {
        let bounds = Bounds::new(0.0, 0.0, 4.0, 4.0);
        assert_eq!(handle_at(Pos2::new(2.0, 2.0), &bounds, 10.0), Some(Corner::TopLeft));
    }

    #[test]
    fn test_shape_at_prefers_topmost() {
        let below = Shape::new(generate_id(), ShapeKind::Rectangle, Bounds::new(0.0, 0.0, 50.0, 50.0), Effect::Blur, 4);
        let above = Shape::new(generate_id(), ShapeKind::Rectangle, Bounds::new(20.0, 20.0, 50.0, 50.0), Effect::Mosaic, 8);
        let shapes = vec![below.clone(), above.clone()];
        assert_eq!(shape_at(Pos2::new(30.0, 30.0), &shapes).map(|s| s.id), Some(above.id));
        assert_eq!(shape_at(Pos2::new(5.0, 5.0), &shapes).map(|s| s.id), Some(below.id));
        assert!(shape_at(Pos2::new(100.0, 5.0), &shapes).is_none());
    }
}
