//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle anchored at the drag origin.
///
/// Width and height are signed: dragging up or left of the origin stores
/// negative extents. Rendering normalizes the extents; the stored values
/// preserve the drag direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Drag origin (not necessarily the top-left corner).
    #[serde(flatten)]
    pub origin: Point,
    /// Signed width.
    pub width: f64,
    /// Signed height.
    pub height: f64,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle with signed extents.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create from a drag gesture, preserving the drag direction.
    pub fn from_drag(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: start,
            width: end.x - start.x,
            height: end.y - start.y,
            style,
        }
    }

    /// Get the normalized (positive-extent) rectangle.
    pub fn normalized(&self) -> Rect {
        Rect::from_points(
            self.origin,
            Point::new(self.origin.x + self.width, self.origin.y + self.height),
        )
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.normalized()
    }

    fn to_path(&self) -> BezPath {
        self.normalized().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_drag_keeps_sign() {
        let rect = Rectangle::from_drag(
            Point::new(0.0, 0.0),
            Point::new(40.0, -20.0),
            ShapeStyle::default(),
        );
        assert!((rect.origin.x).abs() < f64::EPSILON);
        assert!((rect.origin.y).abs() < f64::EPSILON);
        assert!((rect.width - 40.0).abs() < f64::EPSILON);
        assert!((rect.height + 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalized() {
        let rect = Rectangle::new(Point::new(10.0, 10.0), -10.0, 30.0);
        let norm = rect.normalized();
        assert!((norm.x0).abs() < f64::EPSILON);
        assert!((norm.y0 - 10.0).abs() < f64::EPSILON);
        assert!((norm.x1 - 10.0).abs() < f64::EPSILON);
        assert!((norm.y1 - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_area_is_valid() {
        let rect = Rectangle::from_drag(
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            ShapeStyle::default(),
        );
        assert!((rect.width).abs() < f64::EPSILON);
        assert!((rect.height).abs() < f64::EPSILON);
        assert!(rect.normalized().is_zero_area());
    }
}
