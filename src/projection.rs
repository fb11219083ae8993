use glam::{DMat3, DVec3};

use crate::view::ViewState;

/// Distance from the eye to the projection plane, added to the rotated depth.
pub const CAMERA_DISTANCE: f64 = 5.0;

/// Magnitude the perspective scale saturates to when a point lies on the eye plane.
pub const MAX_SCALE: f64 = 1e9;

/// A point projected to screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate, growing downward.
    pub y: i32,
    /// Perspective scale at the point's depth.
    pub scale: f64,
}

/// Perspective projection onto a screen of fixed size.
///
/// ```
/// # use psi_lens::{projection::Projector, view::ViewState};
/// # use glam::DVec3;
/// let projector = Projector::new(1300, 700);
/// let projection = projector.project(DVec3::ZERO, &ViewState::default());
///
/// assert_eq!((projection.x, projection.y), (650, 350));
/// assert_eq!(projection.scale, 10.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    width: u32,
    height: u32,
}

impl Projector {
    /// Creates a projector for a screen of `width` by `height` pixels.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Screen size in pixels.
    #[inline]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Rotation applied to world points: around `x` first, then around `y`.
    pub fn rotation(view: &ViewState) -> DMat3 {
        let (sin_y, cos_y) = view.angle_y.to_radians().sin_cos();
        let (sin_x, cos_x) = view.angle_x.to_radians().sin_cos();

        // Columns of the row-major matrices [[c, 0, -s], [0, 1, 0], [s, 0, c]] and
        // [[1, 0, 0], [0, c, -s], [0, s, c]].
        let rotation_y = DMat3::from_cols(
            DVec3::new(cos_y, 0.0, sin_y),
            DVec3::Y,
            DVec3::new(-sin_y, 0.0, cos_y),
        );
        let rotation_x = DMat3::from_cols(
            DVec3::X,
            DVec3::new(0.0, cos_x, sin_x),
            DVec3::new(0.0, -sin_x, cos_x),
        );

        rotation_y * rotation_x
    }

    /// Projects `point` with the given view.
    ///
    /// Points on the eye plane (`rotated.z == -5`) get a scale of [`MAX_SCALE`] with the sign of
    /// the zoom instead of dividing by zero. A zero zoom always gives a zero scale. Pixel
    /// coordinates saturate at the bounds of `i32`.
    #[inline]
    pub fn project(&self, point: DVec3, view: &ViewState) -> Projection {
        self.project_rotated(Self::rotation(view) * point, view.zoom)
    }

    /// Projects every point with the same view, computing the rotation once.
    pub fn project_all<'a, I>(
        &'a self,
        points: I,
        view: &ViewState,
    ) -> impl Iterator<Item = Projection> + 'a
    where
        I: IntoIterator<Item = DVec3>,
        I::IntoIter: 'a,
    {
        let rotation = Self::rotation(view);
        let zoom = view.zoom;

        points
            .into_iter()
            .map(move |point| self.project_rotated(rotation * point, zoom))
    }

    #[inline]
    fn project_rotated(&self, rotated: DVec3, zoom: f64) -> Projection {
        let depth = CAMERA_DISTANCE + rotated.z;
        let scale = if zoom == 0.0 {
            0.0
        } else if depth.abs() < f64::EPSILON {
            MAX_SCALE.copysign(zoom)
        } else {
            (zoom / depth).clamp(-MAX_SCALE, MAX_SCALE)
        };

        Projection {
            x: (self.width as f64 / 2.0 + scale * rotated.x) as i32,
            y: (self.height as f64 / 2.0 - scale * rotated.y) as i32,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn zero_angles_are_identity() {
        let rotation = Projector::rotation(&ViewState::default());
        let point = DVec3::new(1.5, -2.0, 0.25);

        assert_eq!(rotation * point, point);
    }

    #[test]
    fn rotation_about_y() {
        let view = ViewState {
            angle_y: 90.0,
            ..Default::default()
        };
        let rotation = Projector::rotation(&view);

        // Row-major [[c, 0, -s], [0, 1, 0], [s, 0, c]] with s = 1.
        assert_close(rotation * DVec3::X, DVec3::Z);
        assert_close(rotation * DVec3::Z, -DVec3::X);
    }

    #[test]
    fn rotation_about_x() {
        let view = ViewState {
            angle_x: 90.0,
            ..Default::default()
        };
        let rotation = Projector::rotation(&view);

        assert_close(rotation * DVec3::Y, DVec3::Z);
        assert_close(rotation * DVec3::Z, -DVec3::Y);
    }

    #[test]
    fn x_rotation_is_applied_first() {
        let view = ViewState {
            angle_x: 90.0,
            angle_y: 90.0,
            ..Default::default()
        };
        let rotation = Projector::rotation(&view);

        // Y -> Z under x, then Z -> -X under y.
        assert_close(rotation * DVec3::Y, -DVec3::X);
    }

    #[test]
    fn origin_projects_to_center() {
        let projector = Projector::new(1920, 1080);
        let projection = projector.project(DVec3::ZERO, &ViewState::default());

        assert_eq!(projection.scale, 10.0);
        assert_eq!((projection.x, projection.y), (960, 540));
    }

    #[test]
    fn screen_y_points_down() {
        let projector = Projector::new(100, 100);
        let projection = projector.project(DVec3::new(1.0, 1.0, 0.0), &ViewState::default());

        assert_eq!((projection.x, projection.y), (60, 40));
    }

    #[test]
    fn eye_plane_saturates() {
        let projector = Projector::new(100, 100);
        let point = DVec3::new(1.0, 0.0, -CAMERA_DISTANCE);

        let projection = projector.project(point, &ViewState::default());
        assert_eq!(projection.scale, MAX_SCALE);
        assert_eq!(projection.x, (50.0 + MAX_SCALE) as i32);

        let view = ViewState {
            zoom: -50.0,
            ..Default::default()
        };
        let projection = projector.project(point, &view);
        assert_eq!(projection.scale, -MAX_SCALE);
        assert_eq!(projection.x, (50.0 - MAX_SCALE) as i32);
    }

    #[test]
    fn zero_zoom_collapses_to_center() {
        let projector = Projector::new(100, 80);
        let view = ViewState {
            zoom: 0.0,
            ..Default::default()
        };

        for point in [DVec3::new(1.0, 0.0, -CAMERA_DISTANCE), DVec3::new(2.0, -1.0, 0.5)] {
            let projection = projector.project(point, &view);
            assert_eq!(projection.scale, 0.0);
            assert_eq!((projection.x, projection.y), (50, 40));
        }
    }

    #[test]
    fn project_all_matches_project() {
        let projector = Projector::new(640, 480);
        let view = ViewState {
            angle_x: 30.0,
            angle_y: -70.0,
            zoom: 125.0,
            ..Default::default()
        };
        let points = [DVec3::new(1.0, 2.0, -0.5), DVec3::new(-2.5, 0.1, 2.9)];

        let batch: Vec<_> = projector.project_all(points, &view).collect();
        let single: Vec<_> = points.iter().map(|&p| projector.project(p, &view)).collect();

        assert_eq!(batch, single);
    }
}
