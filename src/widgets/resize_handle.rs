use egui::{Color32, CursorIcon, Painter, Pos2, Rect, Vec2};

use crate::shape::Bounds;

/// Represents a corner of a shape's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Hit-test order
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomLeft => "bottom_left",
            Corner::BottomRight => "bottom_right",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft => CursorIcon::ResizeNwSe,
            Corner::TopRight => CursorIcon::ResizeNeSw,
            Corner::BottomLeft => CursorIcon::ResizeNeSw,
            Corner::BottomRight => CursorIcon::ResizeNwSe,
        }
    }

    fn moves_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    fn moves_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// Where this corner's handle sits on `bounds` (unnormalized)
    pub fn position(&self, bounds: &Bounds) -> Pos2 {
        match self {
            Corner::TopLeft => bounds.left_top(),
            Corner::TopRight => bounds.right_top(),
            Corner::BottomLeft => bounds.left_bottom(),
            Corner::BottomRight => bounds.right_bottom(),
        }
    }

    /// Drag this corner to `pointer`, keeping the opposite corner fixed.
    ///
    /// Left/top edges move the origin and grow or shrink the extent by the
    /// inverse amount; right/bottom edges only change the extent. The result
    /// may have a negative extent if the pointer crossed the opposite edge.
    pub fn resize(&self, bounds: &Bounds, pointer: Pos2) -> Bounds {
        let mut out = *bounds;
        if self.moves_left() {
            out.width += out.x - pointer.x;
            out.x = pointer.x;
        } else {
            out.width = pointer.x - out.x;
        }
        if self.moves_top() {
            out.height += out.y - pointer.y;
            out.y = pointer.y;
        } else {
            out.height = pointer.y - out.y;
        }
        out
    }
}

/// Visual for a corner handle, drawn in screen space
pub struct ResizeHandle {
    position: Pos2,
    size: f32,
}

impl ResizeHandle {
    pub fn new(position: Pos2, size: f32) -> Self {
        Self {
            position,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }

    pub fn paint(&self, painter: &Painter, color: Color32) {
        painter.rect_filled(self.rect(), 0.0, color);
    }
}
