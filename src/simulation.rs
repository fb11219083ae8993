use crate::{
    config::Config,
    field::WavePacket,
    gravity::MassiveObject,
    integrator::{sequential, Integrator},
    lattice::Lattice,
    pacing::FramePacer,
    particle::ParticleStore,
    projection::Projector,
    render::{Canvas, Circle, Color, FrameBuffer},
    view::{HeldKeys, ViewState},
};

/// State of the frame loop. The only transition is `Running` to `Terminated`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// Frames are being produced.
    #[default]
    Running,
    /// A quit signal was received; no further frames are produced.
    Terminated,
}

/// Input gathered by the presentation layer before a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// A quit signal was received since the last frame.
    pub quit: bool,
    /// Keys currently held down.
    pub keys: HeldKeys,
}

/// A presentation layer able to run the whole frame loop synchronously.
pub trait Backend: Canvas {
    /// Drains pending events and snapshots the held keys.
    fn poll(&mut self) -> FrameInput;

    /// Shows the frame drawn since the last clear.
    fn present(&mut self);
}

/// The simulation: particles, the central mass and the view, advanced one frame at a time.
///
/// ```
/// # use psi_lens::prelude::*;
/// let mut simulation = Simulation::new(&Config::default());
/// let mut frame = FrameBuffer::new(1300, 700);
///
/// let state = simulation.frame(FrameInput::default(), &mut frame);
///
/// assert_eq!(state, RunState::Running);
/// assert_eq!(frame.circles(), 27_000);
/// ```
#[derive(Clone, Debug)]
pub struct Simulation<I = sequential::Euler> {
    particles: ParticleStore,
    attractor: MassiveObject,
    view: ViewState,
    integrator: I,
    state: RunState,
    frames: u64,
}

impl Simulation {
    /// Builds a simulation integrated on one thread.
    pub fn new(config: &Config) -> Self {
        Self::with_integrator(config, sequential::Euler)
    }
}

impl<I: Integrator> Simulation<I> {
    /// Builds a simulation from `config`, advanced with `integrator`.
    ///
    /// The field is sampled once here; the particle count never changes afterwards.
    pub fn with_integrator(config: &Config, integrator: I) -> Self {
        let lattice = Lattice::from(&config.lattice);
        let packet = WavePacket::from(&config.field);
        let particles = ParticleStore::from_field(&lattice, &packet, config.field.time);
        let attractor = MassiveObject::from(&config.gravity);

        tracing::info!(
            particles = particles.len(),
            gravitational_constant = attractor.gravitational_constant,
            schwarzschild_radius = attractor.schwarzschild_radius(),
            "simulation created"
        );

        Self {
            particles,
            attractor,
            view: ViewState::from(&config.view),
            integrator,
            state: RunState::Running,
            frames: 0,
        }
    }

    /// The particles.
    #[inline]
    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// The central mass.
    #[inline]
    pub fn attractor(&self) -> &MassiveObject {
        &self.attractor
    }

    /// The current view.
    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current state of the loop.
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of frames drawn so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Produces one frame on `canvas`.
    ///
    /// A quit signal terminates the loop before anything is drawn. Otherwise the held keys update
    /// the view, the canvas is cleared, every particle is advanced one step, then projected and
    /// drawn. Presenting the canvas is left to the caller.
    pub fn frame<C: Canvas + ?Sized>(&mut self, input: FrameInput, canvas: &mut C) -> RunState {
        if self.state == RunState::Terminated {
            return self.state;
        }

        if input.quit {
            tracing::info!(frames = self.frames, "quit requested");
            self.state = RunState::Terminated;
            return self.state;
        }

        self.view = self.view.apply(input.keys);

        canvas.clear(Color::BLACK);

        self.integrator
            .step(self.particles.as_mut_slice(), &self.attractor);

        let (width, height) = canvas.size();
        let projector = Projector::new(width, height);
        let positions = self.particles.iter().map(|p| p.position);

        for (particle, projection) in self
            .particles
            .iter()
            .zip(projector.project_all(positions, &self.view))
        {
            canvas.fill_circle(Circle::for_particle(projection, particle.intensity()));
        }

        self.frames += 1;
        tracing::trace!(frame = self.frames, view = ?self.view, "frame drawn");

        self.state
    }

    /// Runs frames on `backend` until it reports a quit signal, pacing them with `pacer`.
    ///
    /// Returns the number of frames drawn by this call.
    pub fn run<B: Backend + ?Sized>(&mut self, backend: &mut B, pacer: &mut FramePacer) -> u64 {
        let start = self.frames;

        while self.state == RunState::Running {
            let input = backend.poll();
            if self.frame(input, backend) == RunState::Terminated {
                break;
            }

            backend.present();
            pacer.tick();
        }

        self.frames - start
    }
}

/// A [`Backend`] drawing into a [`FrameBuffer`] that quits after a fixed number of frames.
///
/// Every frame reports the same held keys.
#[derive(Clone, Debug)]
pub struct Headless {
    frame: FrameBuffer,
    keys: HeldKeys,
    remaining: u64,
    presented: u64,
}

impl Headless {
    /// Creates a headless backend of the given size that quits after `frames` frames.
    pub fn new(width: u32, height: u32, frames: u64) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            keys: HeldKeys::default(),
            remaining: frames,
            presented: 0,
        }
    }

    /// Holds `keys` down for every frame.
    #[must_use]
    pub fn holding(mut self, keys: HeldKeys) -> Self {
        self.keys = keys;
        self
    }

    /// The last drawn frame.
    #[inline]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Number of frames presented.
    #[inline]
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Canvas for Headless {
    #[inline]
    fn size(&self) -> (u32, u32) {
        self.frame.size()
    }

    #[inline]
    fn clear(&mut self, color: Color) {
        self.frame.clear(color)
    }

    #[inline]
    fn fill_circle(&mut self, circle: Circle) {
        self.frame.fill_circle(circle)
    }
}

impl Backend for Headless {
    fn poll(&mut self) -> FrameInput {
        FrameInput {
            quit: self.remaining == 0,
            keys: self.keys,
        }
    }

    fn present(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        self.presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.lattice.resolution = 6;
        config
    }

    #[test]
    fn particle_count_is_invariant() {
        let mut simulation = Simulation::new(&Config::default());
        let mut frame = FrameBuffer::new(320, 200);

        for _ in 0..3 {
            simulation.frame(FrameInput::default(), &mut frame);
            assert_eq!(simulation.particles().len(), 27_000);
            assert_eq!(frame.circles(), 27_000);
        }
    }

    #[test]
    fn quit_terminates_without_drawing() {
        let mut simulation = Simulation::new(&small_config());
        let mut frame = FrameBuffer::new(64, 64);
        let before = simulation.particles().clone();

        let state = simulation.frame(
            FrameInput {
                quit: true,
                keys: HeldKeys {
                    zoom_in: true,
                    ..Default::default()
                },
            },
            &mut frame,
        );

        assert_eq!(state, RunState::Terminated);
        assert_eq!(frame.circles(), 0);
        assert_eq!(simulation.frames(), 0);
        assert_eq!(simulation.view().zoom, 50.0);
        assert_eq!(simulation.particles().as_slice(), before.as_slice());

        // Terminated is final.
        let state = simulation.frame(FrameInput::default(), &mut frame);
        assert_eq!(state, RunState::Terminated);
        assert_eq!(frame.circles(), 0);
    }

    #[test]
    fn keys_update_view_before_drawing() {
        let mut simulation = Simulation::new(&small_config());
        let mut frame = FrameBuffer::new(64, 64);
        let input = FrameInput {
            quit: false,
            keys: HeldKeys {
                left: true,
                down: true,
                zoom_out: true,
                ..Default::default()
            },
        };

        simulation.frame(input, &mut frame);
        simulation.frame(input, &mut frame);

        let view = simulation.view();
        assert_eq!((view.angle_x, view.angle_y, view.zoom), (20.0, -20.0, 0.0));
    }

    #[test]
    fn first_frame_leaves_positions_in_place() {
        let mut simulation = Simulation::new(&small_config());
        let mut frame = FrameBuffer::new(64, 64);
        let before = simulation.particles().clone();

        simulation.frame(FrameInput::default(), &mut frame);

        let attractor = *simulation.attractor();
        for (before, after) in before.iter().zip(simulation.particles()) {
            assert_eq!(after.position, before.position);
            assert_eq!(after.velocity, attractor.acceleration_at(before.position));
        }
    }

    #[test]
    fn particles_fall_inward() {
        let mut simulation = Simulation::new(&small_config());
        let mut frame = FrameBuffer::new(64, 64);
        let far = simulation
            .particles()
            .iter()
            .position(|p| p.position.length() > 3.0)
            .unwrap();
        let distance = simulation.particles().as_slice()[far].position.length();

        for _ in 0..5 {
            simulation.frame(FrameInput::default(), &mut frame);
        }

        assert!(simulation.particles().as_slice()[far].position.length() < distance);
    }

    #[test]
    fn headless_run_stops_after_frames() {
        let mut simulation = Simulation::new(&small_config());
        let mut backend = Headless::new(64, 48, 4).holding(HeldKeys {
            zoom_in: true,
            ..Default::default()
        });

        let frames = simulation.run(&mut backend, &mut FramePacer::unlimited());

        assert_eq!(frames, 4);
        assert_eq!(backend.presented(), 4);
        assert_eq!(simulation.state(), RunState::Terminated);
        assert_eq!(simulation.view().zoom, 150.0);
        assert_eq!(backend.frame().circles(), 216);
        assert!(backend.frame().lit() > 0);
    }

    #[test]
    fn origin_particle_lands_on_center() {
        let mut config = small_config();
        config.lattice = crate::config::LatticeConfig {
            resolution: 1,
            min: 0.0,
            max: 0.0,
        };
        let mut simulation = Simulation::new(&config);
        let mut frame = FrameBuffer::new(100, 100);

        simulation.frame(FrameInput::default(), &mut frame);

        // Frozen at the origin with intensity 1: a white disc of radius 100 around the center.
        let particle = simulation.particles().as_slice()[0];
        assert_eq!(particle.position, DVec3::ZERO);
        assert_eq!(frame.pixel(50, 50), Some(Color::new(255, 255, 255)));
        assert_eq!(frame.lit(), 100 * 100);
    }
}
