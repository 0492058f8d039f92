//! Scene: the ordered list of committed shapes.

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};

/// The committed drawing, as an ordered sequence of shapes.
///
/// Shapes draw in painter's-algorithm order: later shapes on top. Each
/// completed gesture appends exactly one shape; committed shapes are never
/// mutated in place — edits replace the whole scene through a new snapshot.
///
/// Serializes as a plain JSON array of tagged shape records, the format the
/// host persists and reloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from an existing shape list (the load path).
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Append a committed shape on top of the scene.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Shapes in draw order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Iterate shapes in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
