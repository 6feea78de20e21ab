use crate::error::{ConfigError, Result};
use crate::scene::SourceCategory;

/// Default multiplier applied to a line's pixel footprint.
pub const DEFAULT_TOLERANCE_FACTOR: f64 = 10.0;

/// Default on-screen line width, in pixels, for sources without an override.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Bit mask selecting which [`SourceCategory`]s participate in snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapFilter {
    bits: u8,
}

impl SnapFilter {
    pub const DATABASE: u8 = 1 << 0;
    pub const VIEW_OVERLAY: u8 = 1 << 1;
    pub const REFERENCE: u8 = 1 << 2;

    pub const NONE: SnapFilter = SnapFilter { bits: 0 };
    pub const ALL: SnapFilter = SnapFilter {
        bits: Self::DATABASE | Self::VIEW_OVERLAY | Self::REFERENCE,
    };

    /// Creates a filter from raw bits.
    #[must_use]
    pub fn new(bits: u8) -> Self {
        Self { bits }
    }

    /// A filter admitting only `category`.
    #[must_use]
    pub fn only(category: SourceCategory) -> Self {
        Self {
            bits: Self::bit(category),
        }
    }

    fn bit(category: SourceCategory) -> u8 {
        match category {
            SourceCategory::Database => Self::DATABASE,
            SourceCategory::ViewOverlay => Self::VIEW_OVERLAY,
            SourceCategory::Reference => Self::REFERENCE,
        }
    }

    /// Returns whether `category` participates.
    #[must_use]
    pub fn contains(&self, category: SourceCategory) -> bool {
        self.bits & Self::bit(category) != 0
    }

    pub fn set(&mut self, category: SourceCategory, enabled: bool) {
        if enabled {
            self.bits |= Self::bit(category);
        } else {
            self.bits &= !Self::bit(category);
        }
    }
}

impl Default for SnapFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// Line-snapping configuration carried by a view.
#[derive(Debug, Clone)]
pub struct SnapSettings {
    enabled: bool,
    tolerance_factor: f64,
    default_line_width: f64,
    filter: SnapFilter,
    objects: Vec<String>,
}

impl SnapSettings {
    /// Creates enabled settings with the given tolerance factor.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance_factor` is negative or not finite.
    pub fn new(tolerance_factor: f64) -> Result<Self> {
        if !tolerance_factor.is_finite() || tolerance_factor < 0.0 {
            return Err(ConfigError::InvalidToleranceFactor(tolerance_factor).into());
        }
        Ok(Self {
            tolerance_factor,
            ..Self::default()
        })
    }

    /// Sets the line width used for sources without their own.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is negative or not finite.
    pub fn with_default_line_width(mut self, width: f64) -> Result<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(ConfigError::InvalidLineWidth(width).into());
        }
        self.default_line_width = width;
        Ok(self)
    }

    /// Replaces the category filter.
    #[must_use]
    pub fn with_filter(mut self, filter: SnapFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Restricts database sources to the named objects.
    ///
    /// An empty list admits every database source.
    #[must_use]
    pub fn with_objects<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objects = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn tolerance_factor(&self) -> f64 {
        self.tolerance_factor
    }

    #[must_use]
    pub fn default_line_width(&self) -> f64 {
        self.default_line_width
    }

    #[must_use]
    pub fn filter(&self) -> SnapFilter {
        self.filter
    }

    pub fn filter_mut(&mut self) -> &mut SnapFilter {
        &mut self.filter
    }

    #[must_use]
    pub fn objects(&self) -> &[String] {
        &self.objects
    }

    /// Returns whether a database object with `name` passes the allow list.
    #[must_use]
    pub fn admits_object(&self, name: &str) -> bool {
        self.objects.is_empty() || self.objects.iter().any(|o| o == name)
    }
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance_factor: DEFAULT_TOLERANCE_FACTOR,
            default_line_width: DEFAULT_LINE_WIDTH,
            filter: SnapFilter::ALL,
            objects: Vec::new(),
        }
    }
}
