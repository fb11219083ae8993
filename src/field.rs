use std::ops::Mul;

use glam::DVec3;

use crate::{config::FieldConfig, lattice::Lattice};

/// A complex amplitude.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Amplitude {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Amplitude {
    /// Creates an amplitude from its real and imaginary parts.
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Creates an amplitude of modulus `r` and argument `theta`.
    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(r * cos, r * sin)
    }

    /// Squared modulus `|z|²`.
    #[inline]
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

impl Mul for Amplitude {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// A gaussian wave packet travelling along `k`.
///
/// `ψ(r, t) = exp(-|r|² / 2σ²) · exp(-i(k·r - ωt))`
///
/// The probability density `|ψ|²` only drives the color and size of each particle; it is not
/// normalized.
///
/// ```
/// # use psi_lens::field::WavePacket;
/// # use glam::DVec3;
/// let packet = WavePacket::default();
///
/// assert_eq!(packet.density(DVec3::ZERO, 0.0), 1.0);
/// assert!(packet.density(DVec3::ONE, 0.0) < 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WavePacket {
    /// Width of the gaussian envelope.
    pub sigma: f64,
    /// Angular frequency.
    pub omega: f64,
    /// Wave vector.
    pub k: DVec3,
}

impl Default for WavePacket {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            omega: 1.0,
            k: DVec3::ONE,
        }
    }
}

impl From<&FieldConfig> for WavePacket {
    fn from(config: &FieldConfig) -> Self {
        Self {
            sigma: config.sigma,
            omega: config.omega,
            k: config.wave_vector(),
        }
    }
}

impl WavePacket {
    /// Evaluates `ψ` at `position` and time `t`.
    #[inline]
    pub fn amplitude(&self, position: DVec3, t: f64) -> Amplitude {
        let envelope = (-position.length_squared() / (2.0 * self.sigma * self.sigma)).exp();
        let phase = -(self.k.dot(position) - self.omega * t);

        Amplitude::new(envelope, 0.0) * Amplitude::from_polar(1.0, phase)
    }

    /// Evaluates `|ψ|²` at `position` and time `t`.
    #[inline]
    pub fn density(&self, position: DVec3, t: f64) -> f64 {
        self.amplitude(position, t).norm_sqr()
    }

    /// Evaluates `|ψ|²` at every point of the lattice, in the lattice's iteration order.
    pub fn sample(&self, lattice: &Lattice, t: f64) -> Vec<f64> {
        lattice.points().map(|p| self.density(p, t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitude_product() {
        let i = Amplitude::new(0.0, 1.0);
        assert_eq!(i * i, Amplitude::new(-1.0, 0.0));
    }

    #[test]
    fn phase_does_not_change_density() {
        let packet = WavePacket::default();
        let position = DVec3::new(0.3, -1.2, 2.0);

        let reference = (-position.length_squared()).exp();
        for t in [0.0, 0.5, 3.0, -7.25] {
            assert!((packet.density(position, t) - reference).abs() < 1e-12);
        }
    }

    #[test]
    fn amplitude_matches_closed_form() {
        let packet = WavePacket {
            sigma: 0.8,
            omega: 2.0,
            k: DVec3::new(1.0, -0.5, 2.0),
        };
        let position = DVec3::new(0.4, 0.1, -0.7);
        let t = 0.3;

        let envelope = (-position.length_squared() / (2.0 * 0.8 * 0.8)).exp();
        let phase = -(packet.k.dot(position) - 2.0 * t);
        let psi = packet.amplitude(position, t);

        assert!((psi.re - envelope * phase.cos()).abs() < 1e-12);
        assert!((psi.im - envelope * phase.sin()).abs() < 1e-12);
    }

    #[test]
    fn sampled_lattice_is_non_negative_and_exact() {
        let lattice = Lattice::default();
        let densities = WavePacket::default().sample(&lattice, 0.0);

        assert_eq!(densities.len(), lattice.len());
        for (density, point) in densities.iter().zip(lattice.points()) {
            assert!(*density >= 0.0);
            assert!((density - (-point.length_squared()).exp()).abs() < 1e-9);
        }
    }
}
