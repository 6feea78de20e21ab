use tracing::{debug, trace, warn};

use crate::math::Point3;
use crate::scene::{LineScene, LineSource, SourceCategory};
use crate::view::ViewState;

use super::intersection::prefer_intersection;
use super::scan::scan_source;
use super::tracker::{CandidateTracker, Rank};

/// Snaps a model-space point onto the nearest displayed line.
///
/// Every source admitted by the view's settings is scanned with its own
/// tolerance. When two lines are within tolerance their crossing point is
/// preferred if it also stays within tolerance of `point`. Returns `None`
/// when snapping is disabled or no line is close enough.
#[must_use]
pub fn snap_to_lines_3d(view: &ViewState, scene: &LineScene, point: &Point3) -> Option<Point3> {
    let settings = view.settings();
    if !settings.enabled() {
        return None;
    }
    if !view.has_pixel_size() {
        warn!(
            width = view.pixel_width(),
            height = view.pixel_height(),
            "view has a zero pixel dimension, using fallback snap tolerance"
        );
    }

    let mut tracker = CandidateTracker::new();
    let mut rank = Rank::Rejected;
    for (id, source) in scene.iter() {
        if !participates(view, source) {
            trace!(?id, name = %source.name, "line source filtered out");
            continue;
        }
        let width = source
            .line_width
            .unwrap_or_else(|| settings.default_line_width());
        let tol_sq = view.line_tolerance_sq(width);
        rank = rank.merge(scan_source(&mut tracker, id, source, point, tol_sq));
    }

    let closest = tracker.closest()?;
    let snapped = prefer_intersection(&tracker, scene, point).unwrap_or(closest.point);
    debug!(?point, ?snapped, ?rank, "snapped to lines");
    Some(snapped)
}

/// Snaps a view-space position `(x, y)` onto the nearest displayed line.
///
/// The position is taken at view depth zero, snapped in model space, and
/// the result is projected back into view space.
#[must_use]
pub fn snap_to_lines_2d(view: &ViewState, scene: &LineScene, x: f64, y: f64) -> Option<(f64, f64)> {
    let model = view.view_point_to_model(&Point3::new(x, y, 0.0));
    let snapped = snap_to_lines_3d(view, scene, &model)?;
    let v = view.model_point_to_view(&snapped);
    Some((v.x, v.y))
}

/// Snaps the view center onto the nearest line and pans the view there.
///
/// The center is snapped in view space, so the view only pans within its
/// plane and keeps its depth. Returns whether the view moved.
pub fn snap_view_center_to_lines(view: &mut ViewState, scene: &LineScene) -> bool {
    let center = view.model_point_to_view(&view.center());
    let Some((x, y)) = snap_to_lines_2d(view, scene, center.x, center.y) else {
        return false;
    };
    let target = view.view_point_to_model(&Point3::new(x, y, 0.0));
    view.recenter(&target);
    debug!(?target, "recentered view on line");
    true
}

/// Grid snapping supplied by the caller.
pub trait GridSnap {
    /// Snaps a view-space position onto the grid.
    fn snap_2d(&self, x: f64, y: f64) -> (f64, f64);
}

/// Snaps a cursor position the way interactive tools do: lines first,
/// then the grid, otherwise the position is returned unchanged.
#[must_use]
pub fn snap_cursor_2d(
    view: &ViewState,
    scene: &LineScene,
    x: f64,
    y: f64,
    grid: Option<&dyn GridSnap>,
) -> (f64, f64) {
    if let Some(snapped) = snap_to_lines_2d(view, scene, x, y) {
        return snapped;
    }
    match grid {
        Some(grid) => grid.snap_2d(x, y),
        None => (x, y),
    }
}

fn participates(view: &ViewState, source: &LineSource) -> bool {
    let settings = view.settings();
    if !settings.filter().contains(source.category) {
        return false;
    }
    source.category != SourceCategory::Database || settings.admits_object(&source.name)
}
