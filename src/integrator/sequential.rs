use crate::{gravity::MassiveObject, particle::Particle};

/// Explicit Euler [`Integrator`](super::Integrator) using one CPU thread.
#[derive(Clone, Copy, Default, Debug)]
pub struct Euler;

impl super::Integrator for Euler {
    #[inline]
    fn step(&mut self, particles: &mut [Particle], attractor: &MassiveObject) {
        for particle in particles.iter_mut() {
            super::euler_step(particle, attractor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests;
    use super::*;

    #[test]
    fn first_step_from_rest() {
        tests::first_step_from_rest(Euler);
    }

    #[test]
    fn position_uses_previous_velocity() {
        tests::position_uses_previous_velocity(Euler);
    }
}
