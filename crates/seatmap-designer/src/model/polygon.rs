use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use seatmap_core::LayoutError;

use super::{Point, ShapeGeometry, ShapeKind, Size, Style};

/// Closed polygon with vertices relative to the object position.
///
/// Vertices are normalised so the smallest x and y are zero; the object
/// position is then the bounding-box top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    pub vertices: Vec<Point>,
}

impl PolygonShape {
    pub const MIN_VERTICES: usize = 3;

    /// Build from world-space vertices, returning the shape and its position
    pub fn from_world(vertices: &[Point]) -> Result<(Self, Point), LayoutError> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(LayoutError::InvalidPolygon {
                vertices: vertices.len(),
            });
        }

        let min = vertices.iter().fold(
            Point::new(f64::INFINITY, f64::INFINITY),
            |acc, v| Point::new(acc.x.min(v.x), acc.y.min(v.y)),
        );
        let vertices = vertices.iter().map(|v| *v - min).collect();
        Ok((Self { vertices }, min))
    }

    fn extent(&self) -> Size {
        let (w, h) = self
            .vertices
            .iter()
            .fold((0.0f64, 0.0f64), |(w, h), v| (w.max(v.x), h.max(v.y)));
        Size::new(w, h)
    }
}

impl ShapeGeometry for PolygonShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn local_size(&self) -> Size {
        self.extent()
    }

    // Even-odd ray casting.
    fn contains_local(&self, p: Point) -> bool {
        let n = self.vertices.len();
        if n < Self::MIN_VERTICES {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    fn resize_to(&mut self, size: Size) {
        let current = self.extent();
        let sx = if current.width > 0.0 {
            size.width / current.width
        } else {
            1.0
        };
        let sy = if current.height > 0.0 {
            size.height / current.height
        } else {
            1.0
        };
        for v in &mut self.vertices {
            v.x *= sx;
            v.y *= sy;
        }
    }

    fn outline(&self, _style: &Style) -> Path {
        let mut builder = Path::builder();
        let mut iter = self.vertices.iter();
        if let Some(first) = iter.next() {
            builder.begin(point(first.x as f32, first.y as f32));
            for v in iter {
                builder.line_to(point(v.x as f32, v.y as f32));
            }
            builder.close();
        }
        builder.build()
    }
}
