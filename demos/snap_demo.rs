//! Snap demo: a small drawing with a wall outline and two reference lines.
//!
//! Usage:
//! ```text
//! cargo run --example snap_demo                      # default cursor positions
//! cargo run --example snap_demo -- 0.31 0.02         # snap one view-space cursor
//! RUST_LOG=linesnap=trace cargo run --example snap_demo
//! ```

use linesnap::geometry::{LineGeometry, VertexCommand};
use linesnap::math::Point3;
use linesnap::scene::{LineScene, LineSource, SourceCategory};
use linesnap::snap::{snap_cursor_2d, snap_view_center_to_lines, GridSnap};
use linesnap::view::{SnapSettings, ViewState};
use linesnap::SnapError;
use nalgebra::Rotation3;

/// Grid with a fixed spacing in view units.
struct ViewGrid {
    spacing: f64,
}

impl GridSnap for ViewGrid {
    fn snap_2d(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x / self.spacing).round() * self.spacing,
            (y / self.spacing).round() * self.spacing,
        )
    }
}

fn build_scene() -> LineScene {
    let mut scene = LineScene::new();

    let p = Point3::new;
    scene.add_source(LineSource::new(
        "wall.s",
        SourceCategory::Database,
        LineGeometry::Commands(vec![
            VertexCommand::Move(p(-30.0, -20.0, 0.0)),
            VertexCommand::Draw(p(30.0, -20.0, 0.0)),
            VertexCommand::Draw(p(30.0, 20.0, 0.0)),
            VertexCommand::Draw(p(-30.0, 20.0, 0.0)),
            VertexCommand::Draw(p(-30.0, -20.0, 0.0)),
        ]),
    ));
    scene.add_source(
        LineSource::new(
            "guides",
            SourceCategory::Reference,
            LineGeometry::Pairs(vec![
                p(-40.0, 0.0, 0.0),
                p(40.0, 0.0, 0.0),
                p(15.0, -40.0, 0.0),
                p(15.0, 40.0, 0.0),
            ]),
        )
        .with_line_width(2.0),
    );
    scene
}

fn main() -> Result<(), SnapError> {
    // Default: WARN for everything, INFO for linesnap.
    // Override with RUST_LOG env var (e.g. RUST_LOG=linesnap=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("linesnap=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let scene = build_scene();
    let settings = SnapSettings::new(8.0)?.with_objects(["wall.s"]);
    let mut view = ViewState::orthographic(Point3::origin(), &Rotation3::identity(), 100.0, 1280, 720)?
        .with_settings(settings);
    let grid = ViewGrid { spacing: 0.05 };

    let args: Vec<f64> = std::env::args().skip(1).filter_map(|a| a.parse().ok()).collect();
    let cursors = match args.as_slice() {
        [x, y, ..] => vec![(*x, *y)],
        _ => vec![(0.31, 0.02), (0.6, -0.39), (-0.11, 0.23), (0.29, 0.41)],
    };

    for (x, y) in cursors {
        let (sx, sy) = snap_cursor_2d(&view, &scene, x, y, Some(&grid));
        println!("cursor ({x:.3}, {y:.3}) -> ({sx:.3}, {sy:.3})");
    }

    if snap_view_center_to_lines(&mut view, &scene) {
        let c = view.center();
        println!("view center snapped to ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
    } else {
        println!("view center left in place");
    }

    Ok(())
}
