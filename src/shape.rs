use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a shape for its whole lifetime in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(uuid::Uuid);

impl ShapeId {
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The short form is enough to tell shapes apart in logs
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Circle",
        }
    }
}

/// Pixel effect applied inside a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Effect {
    Blur,
    #[default]
    Mosaic,
}

impl Effect {
    pub fn label(&self) -> &'static str {
        match self {
            Effect::Blur => "Blur",
            Effect::Mosaic => "Mosaic",
        }
    }

    /// What the intensity slider means for this effect
    pub fn intensity_label(&self) -> &'static str {
        match self {
            Effect::Blur => "Blur intensity",
            Effect::Mosaic => "Mosaic size",
        }
    }
}

/// Axis-aligned box in source-image pixel coordinates.
///
/// Width and height are signed: a drag that goes up or left produces a
/// negative extent until the box is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-sized box anchored at `origin`
    pub fn at(origin: Pos2) -> Self {
        Self::new(origin.x, origin.y, 0.0, 0.0)
    }

    /// Same region with non-negative width and height
    pub fn normalized(&self) -> Self {
        let mut out = *self;
        if out.width < 0.0 {
            out.x += out.width;
            out.width = -out.width;
        }
        if out.height < 0.0 {
            out.y += out.height;
            out.height = -out.height;
        }
        out
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn center(&self) -> Pos2 {
        Pos2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn radii(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).abs(), (self.height / 2.0).abs())
    }

    pub fn left_top(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn right_top(&self) -> Pos2 {
        Pos2::new(self.x + self.width, self.y)
    }

    pub fn left_bottom(&self) -> Pos2 {
        Pos2::new(self.x, self.y + self.height)
    }

    pub fn right_bottom(&self) -> Pos2 {
        Pos2::new(self.x + self.width, self.y + self.height)
    }
}

/// A user-drawn region with the effect baked into it on export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub bounds: Bounds,
    pub effect: Effect,
    pub intensity: u32,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind, bounds: Bounds, effect: Effect, intensity: u32) -> Self {
        Self {
            id,
            kind,
            bounds,
            effect,
            intensity,
        }
    }

    /// Geometric containment in image coordinates.
    ///
    /// Rectangles include their edges. Ellipses use the box's semi-axes, so a
    /// degenerate ellipse contains nothing.
    pub fn contains(&self, pos: Pos2) -> bool {
        match self.kind {
            ShapeKind::Rectangle => {
                let b = self.bounds.normalized();
                pos.x >= b.x && pos.x <= b.x + b.width && pos.y >= b.y && pos.y <= b.y + b.height
            }
            ShapeKind::Ellipse => {
                let radii = self.bounds.radii();
                if radii.x <= 0.0 || radii.y <= 0.0 {
                    return false;
                }
                let center = self.bounds.center();
                let nx = (pos.x - center.x) / radii.x;
                let ny = (pos.y - center.y) / radii.y;
                nx * nx + ny * ny <= 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::generate_id;

    fn shape(kind: ShapeKind, bounds: Bounds) -> Shape {
        Shape::new(generate_id(), kind, bounds, Effect::Mosaic, 10)
    }

    #[test]
    fn test_rectangle_containment() {
        let rect = shape(ShapeKind::Rectangle, Bounds::new(10.0, 10.0, 20.0, 20.0));
        assert!(rect.contains(Pos2::new(15.0, 15.0)));
        assert!(rect.contains(Pos2::new(30.0, 30.0)));
        assert!(!rect.contains(Pos2::new(5.0, 5.0)));
    }

    #[test]
    fn test_ellipse_containment() {
        let ellipse = shape(ShapeKind::Ellipse, Bounds::new(10.0, 10.0, 20.0, 20.0));
        assert!(ellipse.contains(Pos2::new(20.0, 20.0)));
        assert!(!ellipse.contains(Pos2::new(10.0, 10.0)));
        assert!(ellipse.contains(Pos2::new(10.0, 20.0)));
    }

    #[test]
    fn test_degenerate_ellipse_contains_nothing() {
        let ellipse = shape(ShapeKind::Ellipse, Bounds::new(10.0, 10.0, 0.0, 20.0));
        assert!(!ellipse.contains(Pos2::new(10.0, 20.0)));
    }

    #[test]
    fn test_normalize_negative_extent() {
        let b = Bounds::new(50.0, 40.0, -20.0, -10.0).normalized();
        assert_eq!(b, Bounds::new(30.0, 30.0, 20.0, 10.0));
    }
}
