//! Text label shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest font size a text label will render at, in world units.
const MIN_FONT_SIZE: f64 = 8.0;

/// Font size per unit of stroke thickness.
const FONT_SIZE_PER_THICKNESS: f64 = 6.0;

/// A single-line text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Anchor position (top-left of the text box).
    #[serde(flatten)]
    pub anchor: Point,
    /// The text content.
    #[serde(rename = "text")]
    pub content: String,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Text {
    /// Create a new text label.
    pub fn new(anchor: Point, content: String, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            content,
            style,
        }
    }

    /// Font size in world units, derived from the stroke thickness.
    pub fn font_size(&self) -> f64 {
        (self.style.thickness * FONT_SIZE_PER_THICKNESS).max(MIN_FONT_SIZE)
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    /// Approximate bounds from the glyph count; the renderer lays out the
    /// real glyphs, this only needs to be in the right ballpark.
    fn bounds(&self) -> Rect {
        let font_size = self.font_size();
        let width = self.content.chars().count() as f64 * font_size * 0.6;
        let height = font_size * 1.2;
        Rect::new(
            self.anchor.x,
            self.anchor.y,
            self.anchor.x + width,
            self.anchor.y + height,
        )
    }

    fn to_path(&self) -> BezPath {
        self.bounds().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_from_thickness() {
        let mut text = Text::new(Point::ZERO, "hi".to_string(), ShapeStyle::default());
        text.style.thickness = 4.0;
        assert!((text.font_size() - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_font_size_floor() {
        let mut text = Text::new(Point::ZERO, "hi".to_string(), ShapeStyle::default());
        text.style.thickness = 1.0;
        assert!((text.font_size() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_grow_with_content() {
        let short = Text::new(Point::ZERO, "a".to_string(), ShapeStyle::default());
        let long = Text::new(Point::ZERO, "a longer label".to_string(), ShapeStyle::default());
        assert!(long.bounds().width() > short.bounds().width());
    }
}
