use glam::DVec3;

use crate::config::LatticeConfig;

/// Largest number of samples per axis; larger resolutions are clamped to it.
pub const MAX_RESOLUTION: usize = 1024;

/// A cubic grid of sample points spanning `[min, max]` on each axis.
///
/// Points are visited with `y` outermost, then `x`, then `z`. [`WavePacket::sample`] and
/// [`ParticleStore::new`] both walk this order, which keeps densities aligned with positions
/// index-for-index.
///
/// ```
/// # use psi_lens::lattice::Lattice;
/// # use glam::DVec3;
/// let lattice = Lattice::new(2, -1.0, 1.0);
/// let points: Vec<_> = lattice.points().collect();
///
/// assert_eq!(points.len(), 8);
/// assert_eq!(points[0], DVec3::new(-1.0, -1.0, -1.0));
/// assert_eq!(points[1], DVec3::new(-1.0, -1.0, 1.0));
/// assert_eq!(points[2], DVec3::new(1.0, -1.0, -1.0));
/// ```
///
/// [`WavePacket::sample`]: crate::field::WavePacket::sample
/// [`ParticleStore::new`]: crate::particle::ParticleStore::new
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
    resolution: usize,
    min: f64,
    max: f64,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new(30, -3.0, 3.0)
    }
}

impl From<&LatticeConfig> for Lattice {
    fn from(config: &LatticeConfig) -> Self {
        Self::new(config.resolution, config.min, config.max)
    }
}

impl Lattice {
    /// Creates a lattice with `resolution` samples per axis, at most [`MAX_RESOLUTION`].
    #[inline]
    pub const fn new(resolution: usize, min: f64, max: f64) -> Self {
        let resolution = if resolution > MAX_RESOLUTION {
            MAX_RESOLUTION
        } else {
            resolution
        };

        Self {
            resolution,
            min,
            max,
        }
    }

    /// Samples per axis.
    #[inline]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// Total number of points.
    #[inline]
    pub const fn len(&self) -> usize {
        // Cannot overflow: MAX_RESOLUTION³ fits in a 32-bit usize.
        match self.resolution.checked_pow(3) {
            Some(len) => len,
            None => usize::MAX,
        }
    }

    /// Returns true if the lattice has no points.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.resolution == 0
    }

    /// Evenly spaced coordinates of one axis, both bounds included.
    pub fn axis(&self) -> Vec<f64> {
        let n = self.resolution;
        match n {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = (self.max - self.min) / (n - 1) as f64;
                let mut axis: Vec<_> = (0..n).map(|i| self.min + i as f64 * step).collect();
                // Accumulated rounding must not move the upper bound.
                axis[n - 1] = self.max;
                axis
            }
        }
    }

    /// Iterates over every point of the lattice.
    pub fn points(&self) -> impl Iterator<Item = DVec3> {
        let axis = self.axis();
        let n = axis.len();

        (0..self.len()).map(move |index| {
            let (y, x, z) = (index / (n * n), (index / n) % n, index % n);
            DVec3::new(axis[x], axis[y], axis[z])
        })
    }
}
