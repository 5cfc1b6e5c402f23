use lyon::math::{point, Box2D};
use lyon::path::builder::BorderRadii;
use lyon::path::{Path, Winding};
use serde::{Deserialize, Serialize};

use super::{Point, ShapeGeometry, ShapeKind, Size, Style};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    pub width: f64,
    pub height: f64,
}

impl RectangleShape {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Corner radius clamped to half the shorter side
    pub fn effective_corner_radius(&self, style: &Style) -> f64 {
        style
            .corner_radius
            .clamp(0.0, self.width.min(self.height) / 2.0)
    }
}

impl ShapeGeometry for RectangleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn local_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn contains_local(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    fn resize_to(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }

    fn outline(&self, style: &Style) -> Path {
        let mut builder = Path::builder();
        let rect = Box2D::new(point(0.0, 0.0), point(self.width as f32, self.height as f32));

        let radius = self.effective_corner_radius(style);
        if radius > 0.0 {
            builder.add_rounded_rectangle(&rect, &BorderRadii::new(radius as f32), Winding::Positive);
        } else {
            builder.add_rectangle(&rect, Winding::Positive);
        }
        builder.build()
    }
}
