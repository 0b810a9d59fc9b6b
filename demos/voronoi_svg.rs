use std::path::PathBuf;

use clap::Parser;
use svg::Document;

use beachline::{
    frames::{Animation, Timeline},
    generators::random_sites,
    Bounds, Edge, Point, Sweeper,
};

/// Draws the Voronoi diagram of some random sites.
#[derive(Parser)]
struct Cli {
    /// Number of sites.
    #[arg(long, default_value_t = 10)]
    points: usize,

    /// Seed for the site generator. Random if not given.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 500)]
    width: u32,

    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Length of the sweep animation, in seconds.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Also draw the sites.
    #[arg(long)]
    display_points: bool,

    #[arg(long, default_value = "voronoi.svg")]
    output: PathBuf,
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Cli::parse();

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    tracing::info!(seed, points = args.points, "generating sites");

    let sites = random_sites(args.points, args.width, args.height, seed);
    let bounds = Bounds::new((0.0, 0.0), args.width as f64, args.height as f64);
    let mut sweeper = Sweeper::new(sites.iter().copied(), bounds)?;
    let edges = sweeper.run()?;

    let timeline = Timeline::from_duration(&bounds, args.duration, args.fps);
    for e in &edges {
        match timeline.animate(e) {
            Animation::Grow {
                start_frame,
                end_frame,
            } => tracing::debug!(
                start = ?e.start,
                end = ?e.end,
                start_frame,
                end_frame,
                "grow"
            ),
            Animation::Pop { frame } => {
                tracing::debug!(start = ?e.start, end = ?e.end, frame, "pop")
            }
        }
    }
    tracing::info!(
        edges = edges.len(),
        last_frame = timeline.last_frame(&edges),
        frames = timeline.frames(),
        "swept"
    );

    let sites = args.display_points.then_some(sites.as_slice());
    let document = draw(&bounds, &edges, sites);
    svg::save(&args.output, &document)?;

    Ok(())
}

fn draw(bounds: &Bounds, edges: &[Edge], sites: Option<&[Point]>) -> Document {
    let stroke_width = bounds.width().max(bounds.height()) / 500.0;
    let mut document = Document::new().set(
        "viewBox",
        (
            bounds.min_x(),
            bounds.min_y(),
            bounds.width(),
            bounds.height(),
        ),
    );

    document = document.add(
        svg::node::element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("stroke", "black")
            .set("stroke-width", 5.0 * stroke_width)
            .set("fill", "none"),
    );

    for e in edges {
        let line = svg::node::element::Line::new()
            .set("x1", e.start.x)
            .set("y1", e.start.y)
            .set("x2", e.end.x)
            .set("y2", e.end.y)
            .set("stroke", "blue")
            .set("stroke-width", stroke_width)
            .set("stroke-linecap", "round");
        document = document.add(line);
    }

    for p in sites.into_iter().flatten() {
        let dot = svg::node::element::Circle::new()
            .set("cx", p.x)
            .set("cy", p.y)
            .set("r", 2.0 * stroke_width)
            .set("fill", "black");
        document = document.add(dot);
    }

    document
}
