use tracing::debug;

use crate::geometry::{Segment, SegmentSource};
use crate::math::Point3;
use crate::scene::LineScene;

use super::tracker::{Candidate, CandidateTracker};

/// Returns the crossing point of the two best candidates when it makes a
/// better snap target than either line alone.
///
/// The closest approach between the two candidate segments must be within
/// tolerance, and each of its two endpoints must also be within tolerance
/// of `query`; the endpoint nearer `query` is returned. The tolerance is
/// the tighter of the two candidates' source tolerances.
#[must_use]
pub fn prefer_intersection(
    tracker: &CandidateTracker,
    scene: &LineScene,
    query: &Point3,
) -> Option<Point3> {
    let (closest, second) = tracker.pair()?;
    let first_seg = lookup(scene, closest)?;
    let second_seg = lookup(scene, second)?;

    let tol_sq = closest.tol_sq.min(second.tol_sq);
    let approach = first_seg.closest_points(&second_seg);
    if approach.dist_sq > tol_sq {
        return None;
    }

    let d1 = (approach.on_first - query).norm_squared();
    let d2 = (approach.on_second - query).norm_squared();
    if d1 > tol_sq || d2 > tol_sq {
        return None;
    }

    let point = if d1 <= d2 {
        approach.on_first
    } else {
        approach.on_second
    };
    debug!(?point, gap_sq = approach.dist_sq, "preferring line intersection");
    Some(point)
}

fn lookup(scene: &LineScene, candidate: &Candidate) -> Option<Segment> {
    scene.source(candidate.source).ok()?.segment(candidate.segment)
}
