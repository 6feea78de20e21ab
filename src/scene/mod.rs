pub mod source;

pub use source::{LineSource, SourceCategory, SourceId};

use crate::error::SceneError;
use slotmap::SlotMap;

/// Arena of the line sources currently displayed in a view.
///
/// Sources are addressed by [`SourceId`]. Iteration follows slot order,
/// which is also the order snapping visits sources in.
#[derive(Debug, Default)]
pub struct LineScene {
    sources: SlotMap<SourceId, LineSource>,
}

impl LineScene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a source and returns its ID.
    pub fn add_source(&mut self, source: LineSource) -> SourceId {
        self.sources.insert(source)
    }

    /// Returns a reference to the source, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not in the scene.
    pub fn source(&self, id: SourceId) -> Result<&LineSource, SceneError> {
        self.sources.get(id).ok_or(SceneError::SourceNotFound)
    }

    /// Returns a mutable reference to the source, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not in the scene.
    pub fn source_mut(&mut self, id: SourceId) -> Result<&mut LineSource, SceneError> {
        self.sources.get_mut(id).ok_or(SceneError::SourceNotFound)
    }

    /// Removes a source from the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not in the scene.
    pub fn remove_source(&mut self, id: SourceId) -> Result<LineSource, SceneError> {
        self.sources.remove(id).ok_or(SceneError::SourceNotFound)
    }

    /// Iterates all sources in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &LineSource)> {
        self.sources.iter()
    }

    /// Returns the number of sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns whether the scene has no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
