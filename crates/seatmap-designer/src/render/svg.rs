//! SVG adapter.
//!
//! Each object becomes a `<g>` whose transform maps its local frame into the
//! parent frame, so group children nest naturally.

use lyon::path::{Event, Path};
use seatmap_core::Result;
use seatmap_settings::RenderSettings;

use super::{ObjectVisualState, RenderTarget};
use crate::geometry::Bounds;
use crate::model::{PlacedObject, Point, Shape, ShapeGeometry};

const DECORATION_WIDTH: f64 = 2.0;
const LOCK_DASH: &str = "4 3";
const PREVIEW_DASH: &str = "6 4";

/// Renders a scene to an SVG document string
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    settings: RenderSettings,
    buffer: String,
}

impl SvgRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            buffer: String::new(),
        }
    }

    fn write_object(&mut self, object: &PlacedObject, state: ObjectVisualState, depth: usize) {
        let size = object.local_size();
        let half = size.half();
        let center = object.center();
        let indent = "  ".repeat(depth + 1);

        let mut attrs = format!(
            "data-id=\"{}\" transform=\"translate({} {}) rotate({}) translate({} {})\"",
            escape(object.id.as_str()),
            num(center.x),
            num(center.y),
            num(object.rotation),
            num(-half.x),
            num(-half.y)
        );
        if state.ghost {
            attrs.push_str(&format!(" opacity=\"{}\"", num(self.settings.ghost_opacity)));
        }
        self.buffer.push_str(&format!("{}<g {}>\n", indent, attrs));

        let style = &object.style;
        match &object.shape {
            Shape::Group(group) => {
                for child in &group.children {
                    let child_state = ObjectVisualState {
                        locked: child.locked,
                        ..Default::default()
                    };
                    self.write_object(child, child_state, depth + 1);
                }
            }
            shape => {
                self.buffer.push_str(&format!(
                    "{}  <path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill-opacity=\"{}\"/>\n",
                    indent,
                    path_data(&shape.outline(style)),
                    escape(&style.fill),
                    escape(&style.stroke),
                    num(style.stroke_width),
                    num(style.opacity)
                ));
                if let Shape::Text(text) = shape {
                    self.buffer.push_str(&format!(
                        "{}  <text x=\"0\" y=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
                        indent,
                        num(text.font_size),
                        num(text.font_size),
                        escape(&style.stroke),
                        escape(&text.text)
                    ));
                }
            }
        }

        if let Some(label) = &object.label {
            self.buffer.push_str(&format!(
                "{}  <title>{}</title>\n",
                indent,
                escape(label)
            ));
        }

        let decoration = if state.selected {
            Some((&self.settings.selection_color, None))
        } else if state.hovered {
            Some((&self.settings.hover_color, None))
        } else if state.locked {
            Some((&self.settings.lock_color, Some(LOCK_DASH)))
        } else {
            None
        };
        if let Some((color, dash)) = decoration {
            let dash = dash
                .map(|d| format!(" stroke-dasharray=\"{}\"", d))
                .unwrap_or_default();
            self.buffer.push_str(&format!(
                "{}  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{}/>\n",
                indent,
                num(size.width),
                num(size.height),
                escape(color),
                num(DECORATION_WIDTH),
                dash
            ));
        }

        self.buffer.push_str(&format!("{}</g>\n", indent));
    }
}

impl RenderTarget for SvgRenderer {
    type Output = String;

    fn begin(&mut self, viewport: Bounds) -> Result<()> {
        self.buffer.clear();
        self.buffer.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\">\n",
            num(viewport.min_x),
            num(viewport.min_y),
            num(viewport.width()),
            num(viewport.height()),
            num(viewport.width()),
            num(viewport.height())
        ));
        self.buffer.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            num(viewport.min_x),
            num(viewport.min_y),
            num(viewport.width()),
            num(viewport.height()),
            escape(&self.settings.background)
        ));
        Ok(())
    }

    fn draw_object(&mut self, object: &PlacedObject, state: ObjectVisualState) {
        self.write_object(object, state, 0);
    }

    fn draw_polygon_preview(&mut self, vertices: &[Point], cursor: Option<Point>) {
        let points: Vec<String> = vertices
            .iter()
            .chain(cursor.as_ref())
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect();
        if points.is_empty() {
            return;
        }
        self.buffer.push_str(&format!(
            "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"{}\"/>\n",
            points.join(" "),
            escape(&self.settings.preview_color),
            num(DECORATION_WIDTH),
            PREVIEW_DASH
        ));
    }

    fn finish(&mut self) -> Result<String> {
        self.buffer.push_str("</svg>\n");
        Ok(std::mem::take(&mut self.buffer))
    }
}

/// SVG path data for a lyon path
pub(crate) fn path_data(path: &Path) -> String {
    let mut d = Vec::new();
    for event in path.iter() {
        match event {
            Event::Begin { at } => d.push(format!("M {} {}", numf(at.x), numf(at.y))),
            Event::Line { to, .. } => d.push(format!("L {} {}", numf(to.x), numf(to.y))),
            Event::Quadratic { ctrl, to, .. } => d.push(format!(
                "Q {} {} {} {}",
                numf(ctrl.x),
                numf(ctrl.y),
                numf(to.x),
                numf(to.y)
            )),
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => d.push(format!(
                "C {} {} {} {} {} {}",
                numf(ctrl1.x),
                numf(ctrl1.y),
                numf(ctrl2.x),
                numf(ctrl2.y),
                numf(to.x),
                numf(to.y)
            )),
            Event::End { close, .. } => {
                if close {
                    d.push("Z".to_string());
                }
            }
        }
    }
    d.join(" ")
}

/// Number with at most three decimals and no trailing zeros
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn numf(v: f32) -> String {
    num(v as f64)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
