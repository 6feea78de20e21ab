pub mod line_geometry;
pub mod segment;

pub use line_geometry::{
    CommandSegments, LineGeometry, LineSegments, PairSegments, SegmentSource, VertexCommand,
};
pub use segment::Segment;
