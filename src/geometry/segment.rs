use crate::math::distance_3d::{
    dist_sq_point_segment, dist_sq_segment_segment, PointSegmentDistance, SegmentSegmentDistance,
};
use crate::math::{Point3, Vector3};

/// A finite line segment between two 3D points.
///
/// Zero-length segments are valid and behave as a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Returns the vector from `start` to `end`.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        self.end - self.start
    }

    /// Returns whether both endpoints coincide exactly.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Closest point on this segment to `point`.
    #[must_use]
    pub fn closest_point(&self, point: &Point3) -> PointSegmentDistance {
        dist_sq_point_segment(point, &self.start, &self.end)
    }

    /// Closest pair of points between this segment and `other`.
    ///
    /// `on_first` lies on `self`, `on_second` on `other`.
    #[must_use]
    pub fn closest_points(&self, other: &Segment) -> SegmentSegmentDistance {
        dist_sq_segment_segment(&self.start, &self.end, &other.start, &other.end)
    }
}
