//! # psi-lens
//!
//! psi-lens animates the probability density of a gaussian wave packet falling into a point mass.
//!
//! ## Goals
//!
//! The crate is a small real-time toy: the field is sampled once on a cubic lattice, every sample
//! becomes a particle, and each frame the particles are pulled toward a central mass, projected
//! with a rotating perspective camera and drawn as discs whose size and color follow the sampled
//! density.
//!
//! The physics is deliberately simplified. The pull is a plain inverse-square law that switches
//! off inside a fixed cutoff radius (twice the coupling constant), and the field only provides
//! the intensity of each particle.
//!
//! Particles can be integrated in parallel on the CPU thanks to [rayon](https://github.com/rayon-rs/rayon).
//! Enable the "parallel" feature to access the available integrators.
//!
//! The "window" feature (enabled by default) builds the `psi-lens` binary, which opens a
//! [macroquad](https://github.com/not-fl3/macroquad) window.
//!
//! # Using psi-lens
//!
//! ## Building a simulation
//!
//! A [`Simulation`](simulation::Simulation) is built from a [`Config`](config::Config). The default
//! configuration samples a 30 × 30 × 30 lattice over [-3, 3]³:
//!
//! ```
//! # use psi_lens::prelude::*;
//! let simulation = Simulation::new(&Config::default());
//!
//! assert_eq!(simulation.particles().len(), 27_000);
//! ```
//!
//! The integrator can be chosen explicitly:
//!
//! ```
//! # use psi_lens::prelude::*;
//! let simulation = Simulation::with_integrator(&Config::default(), sequential::Euler);
//! ```
//!
//! ## Driving frames
//!
//! Each call to [`frame`](simulation::Simulation::frame) consumes the input of the presentation
//! layer and draws on any [`Canvas`](render::Canvas):
//!
//! ```
//! # use psi_lens::prelude::*;
//! # let mut simulation = Simulation::new(&Config::default());
//! let mut frame = FrameBuffer::new(640, 480);
//! let input = FrameInput {
//!     keys: HeldKeys { zoom_in: true, ..Default::default() },
//!     ..Default::default()
//! };
//!
//! simulation.frame(input, &mut frame);
//!
//! assert_eq!(simulation.view().zoom, 75.0);
//! ```
//!
//! A [`Backend`](simulation::Backend) can also run the whole loop until it reports a quit signal:
//!
//! ```
//! # use psi_lens::prelude::*;
//! # let mut simulation = Simulation::new(&Config::default());
//! let mut backend = Headless::new(640, 480, 2);
//! let frames = simulation.run(&mut backend, &mut FramePacer::unlimited());
//!
//! assert_eq!(frames, 2);
//! assert_eq!(simulation.state(), RunState::Terminated);
//! ```

#![warn(missing_docs)]

/// Run settings and their loading from TOML.
pub mod config;

/// Errors returned by this crate.
pub mod error;

/// The sampled wave packet.
pub mod field;

/// The fixed central mass and its force law.
pub mod gravity;

/// Trait for advancing particles and types implementing it for the user to choose from.
pub mod integrator;

/// Sample points of the field.
pub mod lattice;

/// Frame rate limiting.
pub mod pacing;

/// Particles and their storage.
pub mod particle;

/// Perspective projection to screen space.
pub mod projection;

/// Drawing primitives and surfaces.
pub mod render;

/// The frame loop.
pub mod simulation;

/// Camera state and keyboard input.
pub mod view;

pub use error::{Error, Result};

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::field::WavePacket;
    pub use crate::gravity::MassiveObject;
    pub use crate::integrator::*;
    pub use crate::lattice::Lattice;
    pub use crate::pacing::FramePacer;
    pub use crate::particle::{Particle, ParticleStore};
    pub use crate::projection::{Projection, Projector};
    pub use crate::render::{Canvas, Circle, Color, FrameBuffer};
    pub use crate::simulation::{Backend, FrameInput, Headless, RunState, Simulation};
    pub use crate::view::{HeldKeys, ViewState};
}
