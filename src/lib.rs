pub mod error;
pub mod geometry;
pub mod math;
pub mod scene;
pub mod snap;
pub mod view;

pub use error::{Result, SnapError};
pub use math::distance_3d::{dist_sq_point_segment, dist_sq_segment_segment};
