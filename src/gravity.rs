use glam::DVec3;

use crate::config::GravityConfig;

/// A fixed point mass pulling every particle toward it.
///
/// This is a toy model: inside the [Schwarzschild radius](MassiveObject::schwarzschild_radius)
/// the pull is switched off rather than computed from the Schwarzschild metric.
///
/// ```
/// # use psi_lens::gravity::MassiveObject;
/// # use glam::DVec3;
/// let object = MassiveObject::new(DVec3::ZERO, 0.1);
///
/// // Outside the cutoff: inverse-square pull toward the object.
/// let acceleration = object.acceleration_at(DVec3::new(2.0, 0.0, 0.0));
/// assert!((acceleration - DVec3::new(-0.025, 0.0, 0.0)).length() < 1e-15);
///
/// // Inside the cutoff: frozen.
/// assert_eq!(object.acceleration_at(DVec3::new(0.1, 0.0, 0.0)), DVec3::ZERO);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassiveObject {
    /// Position of the object.
    pub position: DVec3,
    /// Coupling constant `G` of the object.
    pub gravitational_constant: f64,
}

impl Default for MassiveObject {
    fn default() -> Self {
        Self::new(DVec3::ZERO, 0.1)
    }
}

impl From<&GravityConfig> for MassiveObject {
    fn from(config: &GravityConfig) -> Self {
        Self::new(DVec3::ZERO, config.gravitational_constant)
    }
}

impl MassiveObject {
    /// Creates a new massive object.
    #[inline]
    pub const fn new(position: DVec3, gravitational_constant: f64) -> Self {
        Self {
            position,
            gravitational_constant,
        }
    }

    /// Cutoff distance `2G` below which the object exerts no force.
    #[inline]
    pub fn schwarzschild_radius(&self) -> f64 {
        2.0 * self.gravitational_constant
    }

    /// Acceleration the object imparts on a particle at `position`.
    ///
    /// Returns `G / r²` along the direction from `position` to the object when `r` is greater than
    /// the [Schwarzschild radius](MassiveObject::schwarzschild_radius), and the zero vector
    /// otherwise. Distances too small to normalize also yield the zero vector.
    #[inline]
    pub fn acceleration_at(&self, position: DVec3) -> DVec3 {
        let dir = self.position - position;
        let r = dir.length();

        if r <= self.schwarzschild_radius() || r < f64::EPSILON {
            return DVec3::ZERO;
        }

        dir * (self.gravitational_constant / (r * r * r))
    }
}
