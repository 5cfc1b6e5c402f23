//! # Bulk Pattern Generator
//!
//! Produces many copies of one template object in grid, radial and linear
//! patterns.
//!
//! Supports:
//! - Grid patterns (rows x columns with per-axis spacing)
//! - Radial patterns (evenly spaced around a centre)
//! - Linear patterns (a row of copies along an angle)
//! - Auto-spacing from the template footprint, in simple or smart mode
//!
//! Generation is pure: the caller appends the result to the document as one
//! operation. Configurations are checked with [`PlacementConfig::validate`]
//! before they reach the generator.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use seatmap_core::LayoutError;
use seatmap_settings::{BulkSettings, SpacingMode};

use crate::geometry;
use crate::model::{ObjectId, PlacedObject, Point, ShapeKind, Size};

/// Parameters for grid patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    pub rows: u32,
    pub cols: u32,
    /// Horizontal distance between neighbouring anchors
    pub spacing_x: f64,
    /// Vertical distance between neighbouring anchors
    pub spacing_y: f64,
    /// Anchor of the object at row 0, column 0
    pub origin: Point,
}

impl GridParams {
    pub fn new(rows: u32, cols: u32, spacing_x: f64, spacing_y: f64, origin: Point) -> Self {
        Self {
            rows,
            cols,
            spacing_x,
            spacing_y,
            origin,
        }
    }

    /// Anchor of the object at `(row, col)`
    pub fn offset(&self, row: u32, col: u32) -> Option<Point> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(Point::new(
            self.origin.x + col as f64 * self.spacing_x,
            self.origin.y + row as f64 * self.spacing_y,
        ))
    }
}

/// Parameters for radial patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialParams {
    pub center: Point,
    pub radius: f64,
    pub count: u32,
    /// Angle of the first copy in degrees
    #[serde(default)]
    pub start_angle: f64,
}

impl RadialParams {
    pub fn new(center: Point, radius: f64, count: u32) -> Self {
        Self {
            center,
            radius,
            count,
            start_angle: 0.0,
        }
    }

    /// Angle step between copies in degrees
    pub fn angle_step(&self) -> f64 {
        360.0 / self.count.max(1) as f64
    }
}

/// Parameters for linear patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub origin: Point,
    /// Direction in degrees
    pub angle: f64,
    pub spacing: f64,
    pub count: u32,
}

impl LinearParams {
    pub fn new(origin: Point, angle: f64, spacing: f64, count: u32) -> Self {
        Self {
            origin,
            angle,
            spacing,
            count,
        }
    }
}

/// How to lay out one generated batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "lowercase")]
pub enum PlacementConfig {
    Grid(GridParams),
    Radial(RadialParams),
    Linear(LinearParams),
}

impl PlacementConfig {
    /// Number of objects the configuration produces
    pub fn total_count(&self) -> u64 {
        match self {
            PlacementConfig::Grid(g) => g.rows as u64 * g.cols as u64,
            PlacementConfig::Radial(r) => r.count as u64,
            PlacementConfig::Linear(l) => l.count as u64,
        }
    }

    /// Reject configurations the generator must never see
    pub fn validate(&self, max_objects: usize) -> Result<(), LayoutError> {
        match self {
            PlacementConfig::Grid(g) => {
                if g.rows == 0 || g.cols == 0 {
                    return Err(LayoutError::placement("rows and cols must be > 0"));
                }
                positive("spacing_x", g.spacing_x)?;
                positive("spacing_y", g.spacing_y)?;
                finite_point("origin", g.origin)?;
            }
            PlacementConfig::Radial(r) => {
                if r.count == 0 {
                    return Err(LayoutError::placement("count must be > 0"));
                }
                positive("radius", r.radius)?;
                finite_point("center", r.center)?;
                if !r.start_angle.is_finite() {
                    return Err(LayoutError::placement("start_angle must be finite"));
                }
            }
            PlacementConfig::Linear(l) => {
                if l.count == 0 {
                    return Err(LayoutError::placement("count must be > 0"));
                }
                positive("spacing", l.spacing)?;
                finite_point("origin", l.origin)?;
                if !l.angle.is_finite() {
                    return Err(LayoutError::placement("angle must be finite"));
                }
            }
        }

        let total = self.total_count();
        if total > max_objects as u64 {
            return Err(LayoutError::placement(format!(
                "{} objects requested, at most {} allowed",
                total, max_objects
            )));
        }
        Ok(())
    }

    /// Anchor positions of every generated object, in generation order
    pub fn positions(&self) -> Vec<Point> {
        match self {
            PlacementConfig::Grid(g) => (0..g.rows)
                .flat_map(|row| (0..g.cols).filter_map(move |col| g.offset(row, col)))
                .collect(),
            PlacementConfig::Radial(r) => {
                let start = r.start_angle.to_radians();
                let step = TAU / r.count as f64;
                (0..r.count)
                    .map(|i| {
                        let angle = start + i as f64 * step;
                        r.center + Point::new(angle.cos(), angle.sin()) * r.radius
                    })
                    .collect()
            }
            PlacementConfig::Linear(l) => {
                let angle = l.angle.to_radians();
                let direction = Point::new(angle.cos(), angle.sin());
                (0..l.count)
                    .map(|i| l.origin + direction * (i as f64 * l.spacing))
                    .collect()
            }
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::placement(format!("{} must be a positive finite number", name)))
    }
}

fn finite_point(name: &str, p: Point) -> Result<(), LayoutError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::placement(format!("{} must be finite", name)))
    }
}

/// Spacing multipliers taken from the bulk settings
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingRules {
    pub simple_multiplier: f64,
    pub smart_min_multiplier: f64,
    pub smart_max_multiplier: f64,
    pub smart_reference_size: f64,
    pub smart_padding: f64,
}

impl Default for SpacingRules {
    fn default() -> Self {
        Self::from(&BulkSettings::default())
    }
}

impl From<&BulkSettings> for SpacingRules {
    fn from(s: &BulkSettings) -> Self {
        Self {
            simple_multiplier: s.simple_multiplier,
            smart_min_multiplier: s.smart_min_multiplier,
            smart_max_multiplier: s.smart_max_multiplier,
            smart_reference_size: s.smart_reference_size,
            smart_padding: s.smart_padding,
        }
    }
}

impl SpacingRules {
    /// Smart-mode multiplier; shrinks from max towards min as `extent` grows
    pub fn smart_multiplier(&self, extent: f64) -> f64 {
        let range = self.smart_max_multiplier - self.smart_min_multiplier;
        self.smart_min_multiplier
            + range * self.smart_reference_size / (self.smart_reference_size + extent.max(0.0))
    }

    /// Anchor-to-anchor distance for objects `extent` wide along the axis
    pub fn spacing_for(&self, extent: f64, mode: SpacingMode) -> f64 {
        let extent = extent.max(0.0);
        match mode {
            SpacingMode::Simple => extent * self.simple_multiplier,
            SpacingMode::Smart => extent * self.smart_multiplier(extent) + self.smart_padding,
        }
    }
}

/// Rotation-aware footprint of a template
pub fn footprint(template: &PlacedObject) -> Size {
    let b = geometry::world_bounds(template);
    Size::new(b.width(), b.height())
}

/// Recompute spacing (grid), radius (radial) or spacing (linear) from the
/// template footprint. Counts, origins and angles are left unchanged.
pub fn auto_space(
    config: &PlacementConfig,
    template: &PlacedObject,
    mode: SpacingMode,
    rules: &SpacingRules,
) -> PlacementConfig {
    let size = footprint(template);
    match config {
        PlacementConfig::Grid(g) => PlacementConfig::Grid(GridParams {
            spacing_x: rules.spacing_for(size.width, mode),
            spacing_y: rules.spacing_for(size.height, mode),
            ..g.clone()
        }),
        PlacementConfig::Radial(r) => {
            let spacing = rules.spacing_for(size.width.max(size.height), mode);
            // Chord between neighbours equals the spacing.
            let radius = if r.count >= 2 {
                spacing / (2.0 * (PI / r.count as f64).sin())
            } else {
                r.radius
            };
            PlacementConfig::Radial(RadialParams { radius, ..r.clone() })
        }
        PlacementConfig::Linear(l) => {
            let (sin, cos) = l.angle.to_radians().sin_cos();
            let extent = (size.width * cos).abs() + (size.height * sin).abs();
            PlacementConfig::Linear(LinearParams {
                spacing: rules.spacing_for(extent, mode),
                ..l.clone()
            })
        }
    }
}

/// Bulk object generator
pub struct PatternGenerator;

impl PatternGenerator {
    /// Copy `template` to every position of `config`.
    ///
    /// Each copy (and each group descendant) gets an id from `next_id`.
    /// `config` is assumed to be validated.
    pub fn generate(
        template: &PlacedObject,
        config: &PlacementConfig,
        next_id: &mut dyn FnMut(ShapeKind) -> ObjectId,
    ) -> Vec<PlacedObject> {
        let objects: Vec<PlacedObject> = config
            .positions()
            .into_iter()
            .map(|position| {
                let mut copy = template.deep_copy(next_id);
                copy.position = position;
                copy
            })
            .collect();
        tracing::debug!(
            "Generated {} {} objects",
            objects.len(),
            template.kind()
        );
        objects
    }
}
