pub mod settings;

pub use settings::{SnapFilter, SnapSettings, DEFAULT_LINE_WIDTH, DEFAULT_TOLERANCE_FACTOR};

use nalgebra::Rotation3;

use crate::error::{Result, ViewError};
use crate::math::{transform_point, Matrix4, Point3, Vector3};

/// Linear snap tolerance, in model units, used when the view has no pixel
/// dimensions to derive one from.
///
/// Without pixel dimensions there is no screen scale to measure a line
/// width against, so this is a fixed model-space distance that does not
/// follow the view size. It only guards against dividing by zero. Views
/// that need scale-aware snapping should be built with
/// [`ViewState::with_pixel_size`], which rejects zero dimensions.
pub const FALLBACK_TOLERANCE: f64 = 1.0;

/// The parts of a viewer's state that snapping reads.
///
/// View coordinates span `[-1, 1]` across the view; the model-to-view
/// transform and its inverse are kept together so both directions are
/// exact inverses of each other.
#[derive(Debug, Clone)]
pub struct ViewState {
    model2view: Matrix4,
    view2model: Matrix4,
    size: f64,
    width: u32,
    height: u32,
    settings: SnapSettings,
}

impl ViewState {
    /// Creates a view from its model-to-view transform.
    ///
    /// `size` is the model-space extent spanned by the view; `width` and
    /// `height` are its pixel dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the transform is singular or `size` is not a
    /// positive finite number.
    pub fn new(model2view: Matrix4, size: f64, width: u32, height: u32) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ViewError::InvalidSize(size).into());
        }
        let view2model = model2view
            .try_inverse()
            .ok_or(ViewError::SingularTransform)?;
        Ok(Self {
            model2view,
            view2model,
            size,
            width,
            height,
            settings: SnapSettings::default(),
        })
    }

    /// Creates an orthographic view looking at `center`.
    ///
    /// The model is translated so `center` lands on the view origin,
    /// rotated, and scaled so that `size` model units span the view.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is not a positive finite number.
    pub fn orthographic(
        center: Point3,
        rotation: &Rotation3<f64>,
        size: f64,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ViewError::InvalidSize(size).into());
        }
        let model2view = rotation.to_homogeneous()
            * Matrix4::new_scaling(2.0 / size)
            * Matrix4::new_translation(&-center.coords);
        Self::new(model2view, size, width, height)
    }

    /// Replaces the snap settings.
    #[must_use]
    pub fn with_settings(mut self, settings: SnapSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SnapSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SnapSettings {
        &mut self.settings
    }

    #[must_use]
    pub fn model_to_view(&self) -> &Matrix4 {
        &self.model2view
    }

    #[must_use]
    pub fn view_to_model(&self) -> &Matrix4 {
        &self.view2model
    }

    /// Model-space extent spanned by the view.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn pixel_height(&self) -> u32 {
        self.height
    }

    /// Updates the pixel dimensions after the display is resized.
    ///
    /// Zero dimensions are accepted; snapping then uses
    /// [`FALLBACK_TOLERANCE`].
    pub fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Replaces the pixel dimensions, rejecting a zero width or height.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ZeroPixelSize`] if either dimension is zero.
    pub fn with_pixel_size(mut self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ViewError::ZeroPixelSize { width, height }.into());
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Whether both pixel dimensions are non-zero.
    #[must_use]
    pub fn has_pixel_size(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    /// Maps a model-space point into view space.
    #[must_use]
    pub fn model_point_to_view(&self, point: &Point3) -> Point3 {
        transform_point(&self.model2view, point)
    }

    /// Maps a view-space point into model space.
    #[must_use]
    pub fn view_point_to_model(&self, point: &Point3) -> Point3 {
        transform_point(&self.view2model, point)
    }

    /// The model-space point at the view origin.
    #[must_use]
    pub fn center(&self) -> Point3 {
        self.view_point_to_model(&Point3::origin())
    }

    /// Pans the view so that `point` (model space) sits at the view origin.
    pub fn recenter(&mut self, point: &Point3) {
        let offset: Vector3 = self.model_point_to_view(point).coords;
        self.model2view = Matrix4::new_translation(&-offset) * self.model2view;
        self.view2model *= Matrix4::new_translation(&offset);
    }

    /// Squared snap tolerance, in model units, for a line drawn
    /// `line_width` pixels wide.
    ///
    /// The line's share of the average view dimension is scaled to model
    /// units and multiplied by the tolerance factor. Views without pixel
    /// dimensions use [`FALLBACK_TOLERANCE`]. A non-positive width yields
    /// zero, which disables snapping to that line.
    #[must_use]
    pub fn line_tolerance_sq(&self, line_width: f64) -> f64 {
        if line_width.is_nan() || line_width <= 0.0 {
            return 0.0;
        }
        let tol = if self.has_pixel_size() {
            let avg_pixels = (f64::from(self.width) + f64::from(self.height)) * 0.5;
            line_width / avg_pixels * self.size * self.settings.tolerance_factor()
        } else {
            FALLBACK_TOLERANCE
        };
        tol * tol
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn top_view(center: Point3) -> ViewState {
        ViewState::orthographic(center, &Rotation3::identity(), 100.0, 800, 600).unwrap()
    }

    #[test]
    fn orthographic_maps_center_to_origin() {
        let view = top_view(Point3::new(10.0, 20.0, 0.0));
        let v = view.model_point_to_view(&Point3::new(10.0, 20.0, 0.0));
        assert_relative_eq!(v, Point3::origin(), epsilon = 1e-12);

        // Half the view size away lands on the view edge.
        let edge = view.model_point_to_view(&Point3::new(60.0, 20.0, 0.0));
        assert_relative_eq!(edge.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn round_trip_through_view() {
        let rotation = Rotation3::from_euler_angles(0.3, -0.2, 1.1);
        let view =
            ViewState::orthographic(Point3::new(1.0, 2.0, 3.0), &rotation, 50.0, 640, 480).unwrap();
        let p = Point3::new(-4.0, 7.5, 2.0);
        let back = view.view_point_to_model(&view.model_point_to_view(&p));
        assert_relative_eq!(back, p, epsilon = 1e-9);
    }

    #[test]
    fn singular_transform_is_rejected() {
        let result = ViewState::new(Matrix4::zeros(), 10.0, 100, 100);
        assert!(matches!(
            result,
            Err(crate::error::SnapError::View(ViewError::SingularTransform))
        ));
    }

    #[test]
    fn zero_pixel_size_is_rejected_by_strict_constructor() {
        let result = top_view(Point3::origin()).with_pixel_size(0, 600);
        assert!(matches!(
            result,
            Err(crate::error::SnapError::View(ViewError::ZeroPixelSize {
                width: 0,
                height: 600
            }))
        ));
        assert!(top_view(Point3::origin()).with_pixel_size(640, 0).is_err());

        let view = top_view(Point3::origin()).with_pixel_size(640, 480).unwrap();
        assert_eq!((view.pixel_width(), view.pixel_height()), (640, 480));
        assert!(view.has_pixel_size());
    }

    #[test]
    fn invalid_size_is_rejected() {
        assert!(ViewState::new(Matrix4::identity(), 0.0, 100, 100).is_err());
        assert!(ViewState::orthographic(
            Point3::origin(),
            &Rotation3::identity(),
            f64::NAN,
            100,
            100
        )
        .is_err());
    }

    #[test]
    fn tolerance_formula() {
        // width 2px over an average of 700px, view size 100, factor 10.
        let view = top_view(Point3::origin());
        let expected = 2.0 / 700.0 * 100.0 * 10.0;
        assert_relative_eq!(view.line_tolerance_sq(2.0), expected * expected, epsilon = 1e-12);
    }

    #[test]
    fn tolerance_scales_with_factor() {
        let view = top_view(Point3::origin()).with_settings(SnapSettings::new(0.0).unwrap());
        assert_eq!(view.line_tolerance_sq(5.0), 0.0);
    }

    #[test]
    fn zero_width_line_disables_snapping() {
        let view = top_view(Point3::origin());
        assert_eq!(view.line_tolerance_sq(0.0), 0.0);
        assert_eq!(view.line_tolerance_sq(-1.0), 0.0);
    }

    #[test]
    fn zero_pixel_view_uses_fallback() {
        let mut view = top_view(Point3::origin());
        view.set_pixel_size(0, 600);
        assert_relative_eq!(
            view.line_tolerance_sq(1.0),
            FALLBACK_TOLERANCE * FALLBACK_TOLERANCE
        );
        assert!(view.line_tolerance_sq(1.0).is_finite());
        assert!(!view.has_pixel_size());
    }

    #[test]
    fn fallback_ignores_view_size_and_line_width() {
        let mut small =
            ViewState::orthographic(Point3::origin(), &Rotation3::identity(), 0.01, 0, 0).unwrap();
        let mut large =
            ViewState::orthographic(Point3::origin(), &Rotation3::identity(), 1e4, 0, 0).unwrap();
        let expected = FALLBACK_TOLERANCE * FALLBACK_TOLERANCE;
        assert_eq!(small.line_tolerance_sq(1.0), expected);
        assert_eq!(large.line_tolerance_sq(3.0), expected);

        // Restoring pixel dimensions brings back the scaled formula.
        small.set_pixel_size(100, 100);
        large.set_pixel_size(100, 100);
        assert!(small.line_tolerance_sq(1.0) < expected);
        assert!(large.line_tolerance_sq(1.0) > expected);
    }

    #[test]
    fn recenter_moves_point_to_origin() {
        let mut view = top_view(Point3::origin());
        let target = Point3::new(12.0, -3.0, 4.0);
        view.recenter(&target);
        assert_relative_eq!(view.center(), target, epsilon = 1e-9);
        assert_relative_eq!(view.model_point_to_view(&target), Point3::origin(), epsilon = 1e-12);
        let p = Point3::new(1.0, 1.0, 1.0);
        let back = view.view_point_to_model(&view.model_point_to_view(&p));
        assert_relative_eq!(back, p, epsilon = 1e-9);
    }
}
