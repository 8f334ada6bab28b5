use crate::shape::{Bounds, Effect, Shape, ShapeId, ShapeKind};

/// Partial field set for [`Document::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeUpdate {
    pub kind: Option<ShapeKind>,
    pub bounds: Option<Bounds>,
    pub effect: Option<Effect>,
    pub intensity: Option<u32>,
}

impl ShapeUpdate {
    pub fn bounds(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Default::default()
        }
    }

    fn apply_to(&self, shape: &mut Shape) {
        if let Some(kind) = self.kind {
            shape.kind = kind;
        }
        if let Some(bounds) = self.bounds {
            shape.bounds = bounds;
        }
        if let Some(effect) = self.effect {
            shape.effect = effect;
        }
        if let Some(intensity) = self.intensity {
            shape.intensity = intensity;
        }
    }
}

/// Ordered list of shapes. List order is compositing order: later shapes
/// are applied after (visually above) earlier ones.
///
/// The document never rejects a write; size and placement rules belong to
/// whoever drives the gesture.
#[derive(Debug, Clone, Default)]
pub struct Document {
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Insert at `index`, clamped to the end of the list
    pub fn insert_at(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    /// Returns false if no shape has this id
    pub fn update(&mut self, id: ShapeId, update: ShapeUpdate) -> bool {
        match self.get_mut(id) {
            Some(shape) => {
                update.apply_to(shape);
                true
            }
            None => false,
        }
    }

    /// Overwrite a stored shape wholesale, keyed by its id
    pub fn replace(&mut self, shape: Shape) -> bool {
        match self.get_mut(shape.id) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    pub fn clear(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.shapes)
    }

    pub fn list(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
