use crate::config::ViewConfig;

/// Keys the presentation layer reports as held down during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    /// Rotate left around the vertical axis.
    pub left: bool,
    /// Rotate right around the vertical axis.
    pub right: bool,
    /// Tilt up around the horizontal axis.
    pub up: bool,
    /// Tilt down around the horizontal axis.
    pub down: bool,
    /// Zoom in.
    pub zoom_in: bool,
    /// Zoom out.
    pub zoom_out: bool,
}

/// Camera parameters read by the [`Projector`](crate::projection::Projector).
///
/// Angles are in degrees and are never wrapped, the trigonometric functions take care of it.
/// Zoom is never clamped either: a zero zoom collapses every particle onto the screen center and
/// a negative one mirrors the picture.
///
/// ```
/// # use psi_lens::view::{HeldKeys, ViewState};
/// let view = ViewState::default();
/// let keys = HeldKeys { right: true, zoom_in: true, ..Default::default() };
///
/// let view = view.apply(keys).apply(keys);
///
/// assert_eq!(view.angle_y, 20.0);
/// assert_eq!(view.zoom, 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Rotation around the horizontal axis, in degrees.
    pub angle_x: f64,
    /// Rotation around the vertical axis, in degrees.
    pub angle_y: f64,
    /// Numerator of the perspective scale.
    pub zoom: f64,
    /// Degrees applied per held arrow key.
    pub angle_step: f64,
    /// Zoom applied per held zoom key.
    pub zoom_step: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            zoom: 50.0,
            angle_step: 10.0,
            zoom_step: 25.0,
        }
    }
}

impl From<&ViewConfig> for ViewState {
    fn from(config: &ViewConfig) -> Self {
        Self {
            zoom: config.zoom,
            angle_step: config.angle_step,
            zoom_step: config.zoom_step,
            ..Default::default()
        }
    }
}

impl ViewState {
    /// Returns the view after one frame of held keys.
    ///
    /// Opposite keys cancel out.
    #[must_use]
    pub fn apply(self, keys: HeldKeys) -> Self {
        let step = |negative: bool, positive: bool| match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };

        Self {
            angle_x: self.angle_x + step(keys.up, keys.down) * self.angle_step,
            angle_y: self.angle_y + step(keys.left, keys.right) * self.angle_step,
            zoom: self.zoom + step(keys.zoom_out, keys.zoom_in) * self.zoom_step,
            ..self
        }
    }
}
