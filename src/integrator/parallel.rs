use crate::{gravity::MassiveObject, particle::Particle};

/// Explicit Euler [`Integrator`](super::Integrator) using multiple CPU threads with
/// [rayon](https://github.com/rayon-rs/rayon).
///
/// Particles do not interact with each other, so the result is identical to
/// [`sequential::Euler`](super::sequential::Euler).
#[derive(Clone, Copy, Default, Debug)]
pub struct Euler;

impl super::Integrator for Euler {
    #[inline]
    fn step(&mut self, particles: &mut [Particle], attractor: &MassiveObject) {
        use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

        particles.par_iter_mut().for_each(|particle| {
            super::euler_step(particle, attractor);
        });
    }
}
