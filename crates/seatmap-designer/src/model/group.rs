use lyon::path::Path;
use serde::{Deserialize, Serialize};

use crate::geometry::{self, Bounds};

use super::{PlacedObject, Point, ShapeGeometry, ShapeKind, Size, Style};

/// Ordered children laid out in the group's local frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupShape {
    pub children: Vec<PlacedObject>,
}

impl GroupShape {
    pub fn new(children: Vec<PlacedObject>) -> Self {
        Self { children }
    }

    /// Build from world-space objects, returning the group and its position.
    ///
    /// Children are translated so the union of their bounds starts at the
    /// local origin.
    pub fn from_world(children: Vec<PlacedObject>) -> (Self, Point) {
        let origin = children
            .iter()
            .map(geometry::world_bounds)
            .reduce(|a, b| a.union(&b))
            .map(|b| Point::new(b.min_x, b.min_y))
            .unwrap_or_default();

        let children = children
            .into_iter()
            .map(|mut child| {
                child.position = child.position - origin;
                child
            })
            .collect();
        (Self { children }, origin)
    }

    fn bounds(&self) -> Option<Bounds> {
        self.children
            .iter()
            .map(geometry::world_bounds)
            .reduce(|a, b| a.union(&b))
    }
}

impl ShapeGeometry for GroupShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Group
    }

    fn local_size(&self) -> Size {
        self.bounds()
            .map(|b| Size::new(b.max_x.max(0.0), b.max_y.max(0.0)))
            .unwrap_or_default()
    }

    fn contains_local(&self, p: Point) -> bool {
        self.children.iter().any(|child| geometry::hit_test(p, child))
    }

    fn resize_to(&mut self, size: Size) {
        let current = self.local_size();
        if current.width <= 0.0 || current.height <= 0.0 {
            return;
        }
        let sx = size.width / current.width;
        let sy = size.height / current.height;

        for child in &mut self.children {
            let center = child.center();
            let child_size = child.local_size();
            child
                .shape
                .resize_to(Size::new(child_size.width * sx, child_size.height * sy));
            child.set_center(Point::new(center.x * sx, center.y * sy));
        }
    }

    fn outline(&self, _style: &Style) -> Path {
        let mut builder = Path::builder();
        for child in &self.children {
            let path = child.shape.outline(&child.style);
            geometry::append_transformed(&mut builder, &path, &geometry::local_to_parent(child));
        }
        builder.build()
    }
}

/// Children of `group` re-expressed in world coordinates
pub fn release_children(group: &PlacedObject) -> Vec<PlacedObject> {
    group
        .children()
        .iter()
        .map(|child| {
            let mut released = child.clone();
            released.rotation = geometry::normalize_degrees(child.rotation + group.rotation);
            released.set_center(geometry::to_world(child.center(), group));
            released
        })
        .collect()
}
