//! Raster adapter using tiny-skia for anti-aliased output.
//!
//! The viewport is fitted into the pixmap keeping the aspect ratio. Text is
//! drawn as its estimated bounding box.

use lyon::path::{Event, Path as LyonPath};
use seatmap_core::{Error, Result};
use seatmap_settings::RenderSettings;
use tiny_skia::{
    Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

use super::{ObjectVisualState, RenderTarget};
use crate::geometry::{self, Bounds};
use crate::model::{PlacedObject, Point, Shape, ShapeGeometry};

const DECORATION_WIDTH: f32 = 2.0;

fn fallback_fill() -> Color {
    Color::from_rgba8(74, 144, 217, 255)
}

fn fallback_stroke() -> Color {
    Color::from_rgba8(31, 59, 92, 255)
}

/// Renders a scene into a `width` x `height` pixmap
#[derive(Debug)]
pub struct RasterRenderer {
    width: u32,
    height: u32,
    settings: RenderSettings,
    pixmap: Option<Pixmap>,
    base: Transform,
}

impl RasterRenderer {
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> Self {
        Self {
            width,
            height,
            settings,
            pixmap: None,
            base: Transform::identity(),
        }
    }

    /// World to pixel transform of the current frame
    pub fn base_transform(&self) -> Transform {
        self.base
    }

    fn draw_with(&mut self, object: &PlacedObject, state: ObjectVisualState, parent: Transform) {
        let transform = parent.pre_concat(to_skia(&geometry::local_to_parent(object)));
        let opacity = if state.ghost {
            self.settings.ghost_opacity as f32
        } else {
            1.0
        };

        if let Shape::Group(group) = &object.shape {
            for child in &group.children {
                let child_state = ObjectVisualState {
                    locked: child.locked,
                    ghost: state.ghost,
                    ..Default::default()
                };
                self.draw_with(child, child_state, transform);
            }
        } else if let Some(path) = to_skia_path(&object.shape.outline(&object.style)) {
            let style = &object.style;
            let fill = self.color(&style.fill, fallback_fill(), style.opacity as f32 * opacity);
            let stroke = self.color(&style.stroke, fallback_stroke(), opacity);
            if let Some(pixmap) = self.pixmap.as_mut() {
                pixmap.fill_path(&path, &paint(fill), FillRule::Winding, transform, None);
                if style.stroke_width > 0.0 {
                    let s = Stroke {
                        width: style.stroke_width as f32,
                        ..Default::default()
                    };
                    pixmap.stroke_path(&path, &paint(stroke), &s, transform, None);
                }
            }
        }

        let decoration = if state.selected {
            Some((self.settings.selection_color.clone(), None))
        } else if state.hovered {
            Some((self.settings.hover_color.clone(), None))
        } else if state.locked {
            Some((self.settings.lock_color.clone(), StrokeDash::new(vec![4.0, 3.0], 0.0)))
        } else {
            None
        };
        let Some((color, dash)) = decoration else {
            return;
        };
        let size = object.local_size();
        let Some(rect) = Rect::from_xywh(0.0, 0.0, size.width as f32, size.height as f32) else {
            return;
        };
        let color = self.color(&color, fallback_stroke(), opacity);
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width: DECORATION_WIDTH,
            dash,
            ..Default::default()
        };
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.stroke_path(&path, &paint(color), &stroke, transform, None);
        }
    }

    fn color(&self, hex: &str, fallback: Color, opacity: f32) -> Color {
        let mut color = parse_hex_color(hex).unwrap_or(fallback);
        color.apply_opacity(opacity);
        color
    }
}

impl RenderTarget for RasterRenderer {
    type Output = Pixmap;

    fn begin(&mut self, viewport: Bounds) -> Result<()> {
        let mut pixmap = Pixmap::new(self.width, self.height).ok_or_else(|| {
            Error::other(format!("invalid pixmap size {}x{}", self.width, self.height))
        })?;
        pixmap.fill(parse_hex_color(&self.settings.background).unwrap_or(Color::WHITE));

        let scale = (self.width as f64 / viewport.width().max(f64::EPSILON))
            .min(self.height as f64 / viewport.height().max(f64::EPSILON)) as f32;
        self.base = Transform::from_scale(scale, scale)
            .pre_translate(-viewport.min_x as f32, -viewport.min_y as f32);
        self.pixmap = Some(pixmap);
        Ok(())
    }

    fn draw_object(&mut self, object: &PlacedObject, state: ObjectVisualState) {
        self.draw_with(object, state, self.base);
    }

    fn draw_polygon_preview(&mut self, vertices: &[Point], cursor: Option<Point>) {
        let mut pb = PathBuilder::new();
        for (i, p) in vertices.iter().chain(cursor.as_ref()).enumerate() {
            if i == 0 {
                pb.move_to(p.x as f32, p.y as f32);
            } else {
                pb.line_to(p.x as f32, p.y as f32);
            }
        }
        let Some(path) = pb.finish() else {
            return;
        };
        let color = self.color(&self.settings.preview_color, fallback_stroke(), 1.0);
        let stroke = Stroke {
            width: DECORATION_WIDTH,
            dash: StrokeDash::new(vec![6.0, 4.0], 0.0),
            ..Default::default()
        };
        let base = self.base;
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.stroke_path(&path, &paint(color), &stroke, base, None);
        }
    }

    fn finish(&mut self) -> Result<Pixmap> {
        self.pixmap
            .take()
            .ok_or_else(|| Error::other("raster frame finished before it began"))
    }
}

/// PNG bytes of a rendered pixmap
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| Error::other(format!("PNG encoding failed: {}", e)))
}

/// Parse `#rrggbb` or `#rrggbbaa`
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
    Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, alpha))
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn to_skia(t: &lyon::math::Transform) -> Transform {
    Transform::from_row(t.m11, t.m12, t.m21, t.m22, t.m31, t.m32)
}

fn to_skia_path(path: &LyonPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for event in path.iter() {
        match event {
            Event::Begin { at } => pb.move_to(at.x, at.y),
            Event::Line { to, .. } => pb.line_to(to.x, to.y),
            Event::Quadratic { ctrl, to, .. } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            Event::End { close, .. } => {
                if close {
                    pb.close();
                }
            }
        }
    }
    pb.finish()
}
