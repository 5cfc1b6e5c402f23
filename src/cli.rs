//! Headless layout operations behind the `seatmap` binary.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::Path;

use seatmap_designer::geometry::world_bounds;
use seatmap_designer::{
    encode_png, render_scene, Bounds, BulkRequest, BulkSpacing, LayoutEditor, LayoutFile, PlacedObject,
    PlacementConfig, Point, RasterRenderer, RenderScene, ShapeKind, Style, SvgRenderer,
};
use seatmap_settings::{Config, SpacingMode};

/// Output format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            _ => bail!("Unsupported output format for {} (use .svg or .png)", path.display()),
        }
    }
}

/// Config from `path`, or the user config when none is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load_or_default().context("Failed to load user config"),
    }
}

/// Render a layout file to SVG or PNG.
///
/// `size` is the pixmap size for PNG output and is ignored for SVG.
pub fn render_layout(input: &Path, output: &Path, config: &Config, size: (u32, u32)) -> Result<()> {
    let format = OutputFormat::from_path(output)?;
    let file = LayoutFile::load_from_file(input)?;
    let document = file.to_document()?;
    let scene = RenderScene::document_only(&document);

    let bytes = match format {
        OutputFormat::Svg => {
            let mut target = SvgRenderer::new(config.render.clone());
            render_scene(&scene, &mut target)?.into_bytes()
        }
        OutputFormat::Png => {
            let mut target = RasterRenderer::new(size.0, size.1, config.render.clone());
            let pixmap = render_scene(&scene, &mut target)?;
            encode_png(&pixmap)?
        }
    };

    std::fs::write(output, bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        "Rendered '{}' ({} objects) to {}",
        file.metadata.name,
        document.len(),
        output.display()
    );
    Ok(())
}

/// Seat template built from the configured defaults
pub fn default_template(kind: ShapeKind, config: &Config) -> Result<PlacedObject> {
    let defaults = &config.defaults;
    let origin = Point::new(0.0, 0.0);
    let template = match kind {
        ShapeKind::Rectangle => {
            PlacedObject::rectangle("seat", origin, defaults.rect_width, defaults.rect_height)
        }
        ShapeKind::Circle => PlacedObject::circle("seat", origin, defaults.circle_radius),
        ShapeKind::Text => PlacedObject::text(
            "seat",
            origin,
            defaults.text_content.clone(),
            defaults.font_size,
        ),
        ShapeKind::Polygon | ShapeKind::Group => bail!("{} cannot be used as a seat template", kind),
    };
    Ok(template.with_style(Style::from(&defaults.style)))
}

/// Spacing source for `--auto-space`: absent keeps the given spacing, a bare
/// flag uses `bulk.spacing_mode` from the config.
pub fn bulk_spacing(auto_space: Option<Option<SpacingMode>>) -> BulkSpacing {
    match auto_space {
        None => BulkSpacing::Given,
        Some(None) => BulkSpacing::Configured,
        Some(Some(mode)) => BulkSpacing::Auto(mode),
    }
}

/// Generate a layout as one bulk operation and return it as a layout file
pub fn generate_layout(
    name: &str,
    template: PlacedObject,
    placement: PlacementConfig,
    spacing: BulkSpacing,
    config: Config,
) -> Result<LayoutFile> {
    let mut editor = LayoutEditor::new(config);
    let mut request = BulkRequest::new(template, placement);
    request.spacing = spacing;
    let created = editor.generate_bulk(&request)?;
    tracing::info!("Generated {} objects for '{}'", created.len(), name);

    Ok(LayoutFile::new(name).with_objects(editor.objects().to_vec()))
}

/// Object counts and extent of a layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    pub name: String,
    pub version: String,
    pub counts: Vec<(ShapeKind, usize)>,
    pub total: usize,
    pub bounds: Option<Bounds>,
}

impl LayoutSummary {
    pub fn from_file(file: &LayoutFile) -> Result<Self> {
        let document = file.to_document()?;
        let counts = [
            ShapeKind::Rectangle,
            ShapeKind::Circle,
            ShapeKind::Text,
            ShapeKind::Polygon,
            ShapeKind::Group,
        ]
        .into_iter()
        .map(|kind| (kind, document.count_by_kind(kind)))
        .collect();
        let bounds = document
            .objects()
            .iter()
            .map(world_bounds)
            .reduce(|a, b| a.union(&b));

        Ok(Self {
            name: file.metadata.name.clone(),
            version: file.version.clone(),
            counts,
            total: document.len(),
            bounds,
        })
    }
}

impl fmt::Display for LayoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Layout:  {} (format {})", self.name, self.version)?;
        writeln!(f, "Objects: {}", self.total)?;
        for (kind, count) in self.counts.iter().filter(|(_, n)| *n > 0) {
            writeln!(f, "  {:<10} {}", kind.to_string(), count)?;
        }
        match &self.bounds {
            Some(b) => write!(
                f,
                "Bounds:  ({:.1}, {:.1}) - ({:.1}, {:.1}), {:.1} x {:.1}",
                b.min_x,
                b.min_y,
                b.max_x,
                b.max_y,
                b.width(),
                b.height()
            ),
            None => write!(f, "Bounds:  empty"),
        }
    }
}

/// Load a layout file and summarise it
pub fn describe_layout(path: &Path) -> Result<LayoutSummary> {
    let file = LayoutFile::load_from_file(path)?;
    LayoutSummary::from_file(&file)
}
