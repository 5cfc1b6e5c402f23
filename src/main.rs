//! Seatmap CLI
//!
//! Usage:
//!   seatmap render <LAYOUT> <OUTPUT> [--config <FILE>] [--width N --height N]
//!   seatmap generate <grid|radial|linear> <ARGS> --out <LAYOUT> [--auto-space [simple|smart]]
//!   seatmap info <LAYOUT>

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use seatmap::cli;
use seatmap::designer::{GridParams, LinearParams, PlacementConfig, RadialParams};
use seatmap::{init_logging, Point, ShapeKind};
use seatmap_settings::SpacingMode;

#[derive(Parser)]
#[command(name = "seatmap")]
#[command(about = "Seat-layout editing engine", version)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Cli {
    /// Editor config (JSON or TOML); defaults to the user config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Render a layout file to SVG or PNG
    Render {
        layout: PathBuf,
        /// Output file; the extension picks the format
        output: PathBuf,
        /// PNG width in pixels
        #[arg(long, default_value_t = 1024)]
        width: u32,
        /// PNG height in pixels
        #[arg(long, default_value_t = 768)]
        height: u32,
    },
    /// Generate a layout from a seat template
    #[command(subcommand)]
    Generate(Pattern),
    /// Print object counts and bounds of a layout file
    Info { layout: PathBuf },
}

#[derive(Subcommand)]
enum Pattern {
    /// Rows and columns
    Grid(GridArgs),
    /// Evenly spaced around a circle
    Radial(RadialArgs),
    /// Along a straight line
    Linear(LinearArgs),
}

#[derive(Args)]
struct GridArgs {
    rows: u32,
    cols: u32,
    #[arg(long, default_value_t = 50.0)]
    spacing_x: f64,
    #[arg(long, default_value_t = 50.0)]
    spacing_y: f64,
    #[command(flatten)]
    origin: OriginArgs,
    #[command(flatten)]
    options: GenerateOptions,
}

#[derive(Args)]
struct RadialArgs {
    count: u32,
    radius: f64,
    /// Angle of the first copy in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    start_angle: f64,
    /// Centre of the circle
    #[command(flatten)]
    origin: OriginArgs,
    #[command(flatten)]
    options: GenerateOptions,
}

#[derive(Args)]
struct LinearArgs {
    count: u32,
    #[arg(long, default_value_t = 50.0)]
    spacing: f64,
    /// Direction in degrees, clockwise from +x
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    angle: f64,
    #[command(flatten)]
    origin: OriginArgs,
    #[command(flatten)]
    options: GenerateOptions,
}

#[derive(Args)]
struct OriginArgs {
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,
}

impl OriginArgs {
    fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Args)]
struct GenerateOptions {
    /// Output layout file
    #[arg(short, long)]
    out: PathBuf,
    /// Layout name stored in the file
    #[arg(long, default_value = "Generated layout")]
    name: String,
    /// Template shape
    #[arg(long, value_enum, default_value_t = TemplateKind::Rect)]
    kind: TemplateKind,
    /// Replace the given spacing with an automatic one; without a value the
    /// config's `bulk.spacing_mode` is used
    #[arg(long, value_enum, num_args = 0..=1)]
    auto_space: Option<Option<AutoSpace>>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateKind {
    Rect,
    Circle,
    Text,
}

impl From<TemplateKind> for ShapeKind {
    fn from(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Rect => ShapeKind::Rectangle,
            TemplateKind::Circle => ShapeKind::Circle,
            TemplateKind::Text => ShapeKind::Text,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AutoSpace {
    Simple,
    Smart,
}

impl From<AutoSpace> for SpacingMode {
    fn from(mode: AutoSpace) -> Self {
        match mode {
            AutoSpace::Simple => SpacingMode::Simple,
            AutoSpace::Smart => SpacingMode::Smart,
        }
    }
}

impl Pattern {
    fn split(self) -> (PlacementConfig, GenerateOptions) {
        match self {
            Pattern::Grid(a) => (
                PlacementConfig::Grid(GridParams::new(
                    a.rows,
                    a.cols,
                    a.spacing_x,
                    a.spacing_y,
                    a.origin.point(),
                )),
                a.options,
            ),
            Pattern::Radial(a) => {
                let mut params = RadialParams::new(a.origin.point(), a.radius, a.count);
                params.start_angle = a.start_angle;
                (PlacementConfig::Radial(params), a.options)
            }
            Pattern::Linear(a) => (
                PlacementConfig::Linear(LinearParams::new(
                    a.origin.point(),
                    a.angle,
                    a.spacing,
                    a.count,
                )),
                a.options,
            ),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging()?;

    let config = cli::load_config(args.config.as_deref())?;

    match args.command {
        CliCommand::Render {
            layout,
            output,
            width,
            height,
        } => cli::render_layout(&layout, &output, &config, (width, height))?,
        CliCommand::Generate(pattern) => {
            let (placement, options) = pattern.split();
            let template = cli::default_template(options.kind.into(), &config)?;
            let file = cli::generate_layout(
                &options.name,
                template,
                placement,
                cli::bulk_spacing(options.auto_space.map(|mode| mode.map(SpacingMode::from))),
                config,
            )?;
            file.save_to_file(&options.out)?;
            println!("Wrote {} objects to {}", file.objects.len(), options.out.display());
        }
        CliCommand::Info { layout } => {
            println!("{}", cli::describe_layout(&layout)?);
        }
    }

    Ok(())
}
