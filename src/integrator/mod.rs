#[cfg(feature = "parallel")]
/// Integrators that use multiple CPU threads.
pub mod parallel;

/// Integrators that use one CPU thread.
pub mod sequential;

use glam::DVec3;

use crate::{gravity::MassiveObject, particle::Particle};

/// Trait for algorithms advancing [`Particles`](Particle) by one frame under the pull of a
/// [`MassiveObject`].
///
/// # Example
///
/// ```
/// # use psi_lens::prelude::*;
/// struct Still;
///
/// impl Integrator for Still {
///     fn step(&mut self, particles: &mut [Particle], attractor: &MassiveObject) {
///         // ...
///     }
/// }
/// ```
pub trait Integrator {
    /// Advances every particle by one frame, in place.
    fn step(&mut self, particles: &mut [Particle], attractor: &MassiveObject);
}

impl<I: Integrator + ?Sized> Integrator for &mut I {
    #[inline]
    fn step(&mut self, particles: &mut [Particle], attractor: &MassiveObject) {
        (**self).step(particles, attractor)
    }
}

impl<I: Integrator + ?Sized> Integrator for Box<I> {
    #[inline]
    fn step(&mut self, particles: &mut [Particle], attractor: &MassiveObject) {
        (**self).step(particles, attractor)
    }
}

/// Explicit Euler update of a single particle with a unit time step.
///
/// The position moves with the velocity of the previous frame, then the acceleration at the new
/// position is added to the velocity. Returns the applied acceleration.
#[inline]
pub fn euler_step(particle: &mut Particle, attractor: &MassiveObject) -> DVec3 {
    particle.position += particle.velocity;
    let acceleration = attractor.acceleration_at(particle.position);
    particle.velocity += acceleration;

    acceleration
}
