use crate::geometry::{LineGeometry, Segment, SegmentSource};

slotmap::new_key_type! {
    /// Unique identifier for a line source in a [`LineScene`](super::LineScene).
    pub struct SourceId;
}

/// Which part of the application a line source belongs to.
///
/// Snapping can be enabled per category through
/// [`SnapFilter`](crate::view::SnapFilter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    /// Wireframe of objects drawn from the geometry database.
    Database,
    /// Transient overlays that exist only in the view.
    ViewOverlay,
    /// Reference lines entered by the user.
    Reference,
}

/// A displayed set of lines that the cursor can snap to.
#[derive(Debug, Clone)]
pub struct LineSource {
    /// Display name; database objects are filtered by it.
    pub name: String,
    pub category: SourceCategory,
    pub geometry: LineGeometry,
    /// On-screen line width in pixels. `None` uses the view's default.
    pub line_width: Option<f64>,
}

impl LineSource {
    /// Creates a line source with no line-width override.
    #[must_use]
    pub fn new(name: impl Into<String>, category: SourceCategory, geometry: LineGeometry) -> Self {
        Self {
            name: name.into(),
            category,
            geometry,
            line_width: None,
        }
    }

    /// Sets the on-screen line width in pixels.
    #[must_use]
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }
}

impl SegmentSource for LineSource {
    fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.geometry.segments()
    }

    fn segment(&self, index: usize) -> Option<Segment> {
        self.geometry.segment(index)
    }
}
