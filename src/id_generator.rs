use crate::shape::ShapeId;

/// Fresh random id for a new shape
pub fn generate_id() -> ShapeId {
    ShapeId::from_uuid(uuid::Uuid::new_v4())
}
