use lyon::math::point;
use lyon::path::{Path, Winding};
use serde::{Deserialize, Serialize};

use super::{Point, ShapeGeometry, ShapeKind, Size, Style};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub radius: f64,
}

impl CircleShape {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }
}

impl ShapeGeometry for CircleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn local_size(&self) -> Size {
        Size::new(self.diameter(), self.diameter())
    }

    fn contains_local(&self, p: Point) -> bool {
        p.distance_to(&Point::new(self.radius, self.radius)) <= self.radius
    }

    // Circles stay round; the shorter side wins.
    fn resize_to(&mut self, size: Size) {
        self.radius = size.width.min(size.height) / 2.0;
    }

    fn outline(&self, _style: &Style) -> Path {
        let mut builder = Path::builder();
        let r = self.radius as f32;
        builder.add_circle(point(r, r), r, Winding::Positive);
        builder.build()
    }
}
