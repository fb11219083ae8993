use glam::DVec3;

use crate::{field::WavePacket, lattice::Lattice};

/// A point of the sampled field, moving under the pull of the central mass.
///
/// The intensity is fixed at construction: it is the probability density at the particle's
/// initial location. Position and velocity are only changed by an
/// [`Integrator`](crate::integrator::Integrator).
///
/// ```
/// # use psi_lens::particle::Particle;
/// # use glam::DVec3;
/// let particle = Particle::new(DVec3::X, 0.5);
///
/// assert_eq!(particle.intensity(), 0.5);
/// assert_eq!(particle.velocity, DVec3::ZERO);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in world space.
    pub position: DVec3,
    /// Displacement applied on the next step.
    pub velocity: DVec3,
    intensity: f64,
}

impl Particle {
    /// Creates a particle at rest.
    ///
    /// Negative intensities are clamped to zero.
    #[inline]
    pub fn new(position: DVec3, intensity: f64) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            intensity: intensity.max(0.0),
        }
    }

    /// Probability density the particle was created with.
    #[inline]
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }
}

/// The fixed set of particles of a simulation.
///
/// A store is built once and never grows or shrinks. It hands out slices so integrators can
/// update particles in place every frame.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Builds one particle per lattice point, pairing each point with its density.
    ///
    /// `densities` must be in lattice order, as returned by [`WavePacket::sample`]. Extra
    /// densities are ignored, and missing ones leave the remaining points out.
    pub fn new(lattice: &Lattice, densities: &[f64]) -> Self {
        let particles = lattice
            .points()
            .zip(densities)
            .map(|(position, &density)| Particle::new(position, density))
            .collect();

        Self { particles }
    }

    /// Samples `packet` over `lattice` at time `t` and builds the store from it.
    pub fn from_field(lattice: &Lattice, packet: &WavePacket, t: f64) -> Self {
        Self::new(lattice, &packet.sample(lattice, t))
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The particles, in lattice order.
    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// The particles, mutably. The slice cannot be resized.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Iterates over the particles.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Iterates mutably over the particles.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut ParticleStore {
    type Item = &'a mut Particle;
    type IntoIter = std::slice::IterMut<'a, Particle>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_intensity_is_clamped() {
        assert_eq!(Particle::new(DVec3::ZERO, -1.0).intensity(), 0.0);
    }

    #[test]
    fn store_follows_lattice_order() {
        let lattice = Lattice::default();
        let packet = WavePacket::default();
        let store = ParticleStore::from_field(&lattice, &packet, 0.0);

        assert_eq!(store.len(), 27_000);
        for (particle, point) in store.iter().zip(lattice.points()) {
            assert_eq!(particle.position, point);
            assert_eq!(particle.velocity, DVec3::ZERO);
            assert_eq!(particle.intensity(), packet.density(point, 0.0));
        }
    }

    #[test]
    fn densest_particle_is_nearest_the_origin() {
        let store = ParticleStore::from_field(&Lattice::default(), &WavePacket::default(), 0.0);

        let densest = store
            .iter()
            .max_by(|a, b| a.intensity().total_cmp(&b.intensity()))
            .unwrap();
        let nearest = store
            .iter()
            .min_by(|a, b| a.position.length().total_cmp(&b.position.length()))
            .unwrap();

        assert_eq!(densest.position.length(), nearest.position.length());
    }
}
