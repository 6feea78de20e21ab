use tracing::trace;

use crate::geometry::SegmentSource;
use crate::math::distance_3d::dist_sq_point_segment;
use crate::math::Point3;
use crate::scene::SourceId;

use super::tracker::{CandidateTracker, Rank};

/// Offers every segment of `segments` to `tracker` as a candidate for
/// `query`, returning the highest rank any segment reached.
///
/// A non-positive tolerance disables the source and nothing is offered.
pub fn scan_source<S>(
    tracker: &mut CandidateTracker,
    source: SourceId,
    segments: &S,
    query: &Point3,
    tol_sq: f64,
) -> Rank
where
    S: SegmentSource + ?Sized,
{
    if tol_sq.is_nan() || tol_sq <= 0.0 {
        return Rank::Rejected;
    }

    let mut rank = Rank::Rejected;
    let mut count = 0_usize;
    for (index, segment) in segments.segments().enumerate() {
        let nearest = dist_sq_point_segment(query, &segment.start, &segment.end);
        rank = rank.merge(tracker.offer(nearest.point, nearest.dist_sq, source, index, tol_sq));
        count += 1;
    }

    trace!(?source, segments = count, ?rank, "scanned line source");
    rank
}
