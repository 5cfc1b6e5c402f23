use lyon::math::{point, Box2D};
use lyon::path::{Path, Winding};
use serde::{Deserialize, Serialize};

use super::{Point, ShapeGeometry, ShapeKind, Size, Style};

/// Average glyph advance as a fraction of the font size
const CHAR_WIDTH_FACTOR: f64 = 0.6;
/// Line height as a fraction of the font size
const LINE_HEIGHT_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub text: String,
    pub font_size: f64,
}

impl TextShape {
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }

    /// Estimated bounding box from character count and font size
    pub fn estimated_size(&self) -> Size {
        let chars = self.text.chars().count().max(1) as f64;
        Size::new(
            chars * self.font_size * CHAR_WIDTH_FACTOR,
            self.font_size * LINE_HEIGHT_FACTOR,
        )
    }
}

impl ShapeGeometry for TextShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn local_size(&self) -> Size {
        self.estimated_size()
    }

    fn contains_local(&self, p: Point) -> bool {
        let size = self.estimated_size();
        p.x >= 0.0 && p.x <= size.width && p.y >= 0.0 && p.y <= size.height
    }

    // Text scales through its font size; the box height drives it.
    fn resize_to(&mut self, size: Size) {
        self.font_size = size.height / LINE_HEIGHT_FACTOR;
    }

    fn outline(&self, _style: &Style) -> Path {
        let size = self.estimated_size();
        let mut builder = Path::builder();
        builder.add_rectangle(
            &Box2D::new(point(0.0, 0.0), point(size.width as f32, size.height as f32)),
            Winding::Positive,
        );
        builder.build()
    }
}
