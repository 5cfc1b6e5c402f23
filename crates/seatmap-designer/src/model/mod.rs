//! Object model for seat layouts.
//!
//! A [`PlacedObject`] is plain data: an id, one [`Shape`] variant, a position,
//! a rotation and a style. Geometry per kind is provided by the
//! [`ShapeGeometry`] trait, dispatched over the closed [`Shape`] enum.

use lyon::path::Path;
use serde::{Deserialize, Serialize};
use seatmap_settings::StyleSettings;
use std::ops::{Add, Mul, Sub};

mod circle;
mod group;
mod polygon;
mod rectangle;
mod text;

pub use circle::CircleShape;
pub use group::{release_children, GroupShape};
pub use polygon::PolygonShape;
pub use rectangle::RectangleShape;
pub use text::TextShape;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Length of the vector from the origin
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Vector to the centre of a box of this size
    pub fn half(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Stable identifier of a placed object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Text,
    Polygon,
    Group,
}

impl ShapeKind {
    /// Prefix used when allocating ids for this kind
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::Circle => "circle",
            Self::Text => "text",
            Self::Polygon => "poly",
            Self::Group => "group",
        }
    }

    pub const ALL: [ShapeKind; 5] = [
        Self::Rectangle,
        Self::Circle,
        Self::Text,
        Self::Polygon,
        Self::Group,
    ];
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::Circle => write!(f, "circle"),
            Self::Text => write!(f, "text"),
            Self::Polygon => write!(f, "polygon"),
            Self::Group => write!(f, "group"),
        }
    }
}

/// Visual style of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f64,
    /// Rounded corners, only honoured by rectangles
    pub corner_radius: f64,
}

impl From<&StyleSettings> for Style {
    fn from(s: &StyleSettings) -> Self {
        Self {
            fill: s.fill.clone(),
            stroke: s.stroke.clone(),
            stroke_width: s.stroke_width,
            opacity: s.opacity.clamp(0.0, 1.0),
            corner_radius: s.corner_radius,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::from(&StyleSettings::default())
    }
}

/// Per-kind geometry in the object's unrotated local frame.
///
/// The local frame spans `[0, width] x [0, height]` with the origin at the
/// unrotated bounding-box top-left.
pub trait ShapeGeometry {
    fn kind(&self) -> ShapeKind;
    fn local_size(&self) -> Size;
    fn contains_local(&self, p: Point) -> bool;
    fn resize_to(&mut self, size: Size);
    /// Outline path in the local frame.
    fn outline(&self, style: &Style) -> Path;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Shape {
    Rectangle(RectangleShape),
    Circle(CircleShape),
    Text(TextShape),
    Polygon(PolygonShape),
    Group(GroupShape),
}

impl ShapeGeometry for Shape {
    fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(s) => s.kind(),
            Shape::Circle(s) => s.kind(),
            Shape::Text(s) => s.kind(),
            Shape::Polygon(s) => s.kind(),
            Shape::Group(s) => s.kind(),
        }
    }

    fn local_size(&self) -> Size {
        match self {
            Shape::Rectangle(s) => s.local_size(),
            Shape::Circle(s) => s.local_size(),
            Shape::Text(s) => s.local_size(),
            Shape::Polygon(s) => s.local_size(),
            Shape::Group(s) => s.local_size(),
        }
    }

    fn contains_local(&self, p: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.contains_local(p),
            Shape::Circle(s) => s.contains_local(p),
            Shape::Text(s) => s.contains_local(p),
            Shape::Polygon(s) => s.contains_local(p),
            Shape::Group(s) => s.contains_local(p),
        }
    }

    fn resize_to(&mut self, size: Size) {
        match self {
            Shape::Rectangle(s) => s.resize_to(size),
            Shape::Circle(s) => s.resize_to(size),
            Shape::Text(s) => s.resize_to(size),
            Shape::Polygon(s) => s.resize_to(size),
            Shape::Group(s) => s.resize_to(size),
        }
    }

    fn outline(&self, style: &Style) -> Path {
        match self {
            Shape::Rectangle(s) => s.outline(style),
            Shape::Circle(s) => s.outline(style),
            Shape::Text(s) => s.outline(style),
            Shape::Polygon(s) => s.outline(style),
            Shape::Group(s) => s.outline(style),
        }
    }
}

/// The unit of layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub shape: Shape,
    /// Top-left of the unrotated bounding box, except for circles where it is
    /// the centre.
    pub position: Point,
    /// Degrees about the object's own centre, clockwise on screen
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub locked: bool,
}

impl PlacedObject {
    pub fn new(id: impl Into<ObjectId>, shape: Shape, position: Point) -> Self {
        Self {
            id: id.into(),
            shape,
            position,
            rotation: 0.0,
            style: Style::default(),
            label: None,
            locked: false,
        }
    }

    pub fn rectangle(id: impl Into<ObjectId>, position: Point, width: f64, height: f64) -> Self {
        Self::new(id, Shape::Rectangle(RectangleShape::new(width, height)), position)
    }

    pub fn circle(id: impl Into<ObjectId>, center: Point, radius: f64) -> Self {
        Self::new(id, Shape::Circle(CircleShape::new(radius)), center)
    }

    pub fn text(
        id: impl Into<ObjectId>,
        position: Point,
        text: impl Into<String>,
        font_size: f64,
    ) -> Self {
        Self::new(id, Shape::Text(TextShape::new(text, font_size)), position)
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn local_size(&self) -> Size {
        self.shape.local_size()
    }

    /// World position of the unrotated bounding-box top-left
    pub fn local_origin(&self) -> Point {
        match &self.shape {
            Shape::Circle(c) => self.position - Point::new(c.radius, c.radius),
            _ => self.position,
        }
    }

    /// Rotation pivot
    pub fn center(&self) -> Point {
        self.local_origin() + self.local_size().half()
    }

    /// Move the object so its centre lands on `center`, keeping its size
    pub fn set_center(&mut self, center: Point) {
        let origin = center - self.local_size().half();
        self.position = match &self.shape {
            Shape::Circle(c) => origin + Point::new(c.radius, c.radius),
            _ => origin,
        };
    }

    /// Rotation in radians
    pub fn rotation_radians(&self) -> f64 {
        self.rotation.to_radians()
    }

    /// Children of a group, empty for every other kind
    pub fn children(&self) -> &[PlacedObject] {
        match &self.shape {
            Shape::Group(g) => &g.children,
            _ => &[],
        }
    }

    /// Ids of every descendant, depth first, excluding this object
    pub fn descendant_ids(&self) -> Vec<ObjectId> {
        let mut ids = Vec::new();
        for child in self.children() {
            ids.push(child.id.clone());
            ids.extend(child.descendant_ids());
        }
        ids
    }

    /// True if this object or any descendant carries `id`
    pub fn contains_id(&self, id: &ObjectId) -> bool {
        self.id == *id || self.children().iter().any(|c| c.contains_id(id))
    }

    /// Deep copy with fresh ids for the object and each descendant
    pub fn deep_copy(&self, next_id: &mut dyn FnMut(ShapeKind) -> ObjectId) -> PlacedObject {
        let mut copy = self.clone();
        copy.id = next_id(self.kind());
        if let Shape::Group(group) = &mut copy.shape {
            group.children = group
                .children
                .iter()
                .map(|child| child.deep_copy(next_id))
                .collect();
        }
        copy
    }

    /// Apply a patch without checking the lock
    pub fn apply_patch(&mut self, patch: &ObjectPatch) {
        if let Some(size) = patch.size {
            self.shape.resize_to(size);
        }
        if let Some(text) = &patch.text {
            if let Shape::Text(t) = &mut self.shape {
                t.text = text.clone();
            }
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(style) = &patch.style {
            self.style = style.clone();
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
    }
}

/// Partial update of a placed object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub rotation: Option<f64>,
    pub style: Option<Style>,
    pub label: Option<Option<String>>,
    pub text: Option<String>,
}

impl ObjectPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    pub fn style(style: Style) -> Self {
        Self {
            style: Some(style),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// True if the patch changes position, size, rotation or text extent
    pub fn touches_geometry(&self) -> bool {
        self.position.is_some() || self.size.is_some() || self.rotation.is_some() || self.text.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
