//! Snapping a cursor onto displayed line geometry.
//!
//! A query scans every admitted [`LineSource`](crate::scene::LineSource)
//! with a [`CandidateTracker`], keeping the two nearest segments. If both
//! are within tolerance and their crossing stays near the cursor, the
//! crossing wins over either line's nearest point.

pub mod intersection;
pub mod lines;
pub mod scan;
pub mod tracker;

pub use intersection::prefer_intersection;
pub use lines::{
    snap_cursor_2d, snap_to_lines_2d, snap_to_lines_3d, snap_view_center_to_lines, GridSnap,
};
pub use scan::scan_source;
pub use tracker::{Candidate, CandidateTracker, Rank};
