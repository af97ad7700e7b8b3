// View transform for the Mandelbrot viewer

use glam::{Mat3, Vec2};

use crate::matrix::{log_matrix3, make_translation3x3, translate3x3};

/// Maps aspect-corrected screen coordinates onto the complex plane.
///
/// Screen space runs from -1 to 1 vertically. Pans are applied in screen
/// units on the local side of the transform, so the same key press covers
/// less of the plane the further in you zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    matrix: Mat3,
}

impl ViewTransform {
    /// Whole set in view: centred on -0.5, 1.5 units tall above and below.
    pub fn new() -> Self {
        Self::looking_at(Vec2::new(-0.5, 0.0), 1.5)
    }

    /// Centred on `center` with `half_height` plane units above and below.
    pub fn looking_at(center: Vec2, half_height: f32) -> Self {
        Self {
            matrix: make_translation3x3(center.x, center.y)
                * Mat3::from_scale(Vec2::splat(half_height)),
        }
    }

    pub fn matrix(&self) -> Mat3 {
        self.matrix
    }

    /// Point of the plane under the screen centre.
    pub fn center(&self) -> Vec2 {
        self.matrix.transform_point2(Vec2::ZERO)
    }

    /// Plane units between the screen centre and the top edge.
    pub fn half_height(&self) -> f32 {
        self.matrix.y_axis.truncate().length()
    }

    /// Moves the view by `(dx, dy)` screen units.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.matrix = translate3x3(self.matrix, dx, dy);
        log_matrix3(&self.matrix);
    }

    /// Returns to the whole-set view.
    pub fn reset(&mut self) {
        *self = Self::new();
        log_matrix3(&self.matrix);
    }

    /// Scales the visible region around the screen centre; `factor > 1` zooms in.
    pub fn zoom(&mut self, factor: f32) {
        self.matrix *= Mat3::from_scale(Vec2::splat(1.0 / factor));
        log_matrix3(&self.matrix);
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_view_is_centred_on_the_set() {
        let view = ViewTransform::new();
        assert_relative_eq!(view.center().x, -0.5);
        assert_relative_eq!(view.center().y, 0.0);
        assert_relative_eq!(view.half_height(), 1.5);
    }

    #[test]
    fn pan_distance_shrinks_with_zoom() {
        let mut view = ViewTransform::looking_at(Vec2::ZERO, 2.0);
        view.pan(0.5, 0.0);
        assert_relative_eq!(view.center().x, 1.0);

        view.zoom(4.0);
        assert_relative_eq!(view.half_height(), 0.5);
        view.pan(0.5, 0.0);
        assert_relative_eq!(view.center().x, 1.25);
    }

    #[test]
    fn reset_returns_to_the_default_view() {
        let mut view = ViewTransform::new();
        view.pan(0.3, -0.2);
        view.zoom(3.0);
        view.reset();
        assert_eq!(view, ViewTransform::new());
    }

    #[test]
    fn zoom_keeps_the_centre() {
        let mut view = ViewTransform::looking_at(Vec2::new(0.25, -0.75), 1.0);
        view.zoom(1.1);
        view.zoom(1.1);
        assert_relative_eq!(view.center().x, 0.25, epsilon = 1e-6);
        assert_relative_eq!(view.center().y, -0.75, epsilon = 1e-6);
        assert_relative_eq!(view.half_height(), 1.0 / 1.21, epsilon = 1e-6);
    }
}
