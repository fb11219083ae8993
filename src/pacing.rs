use std::time::{Duration, Instant};

/// Blocking frame clock.
///
/// Each call to [`tick`](FramePacer::tick) sleeps until one frame interval has passed since the
/// previous call, then returns the time actually elapsed. Frames that overrun are not made up
/// for.
///
/// ```
/// # use psi_lens::pacing::FramePacer;
/// # use std::time::Duration;
/// let mut pacer = FramePacer::new(100);
/// assert_eq!(pacer.interval(), Duration::from_millis(10));
///
/// pacer.tick();
/// assert!(pacer.tick() >= Duration::from_millis(10));
/// ```
#[derive(Clone, Debug)]
pub struct FramePacer {
    interval: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    /// Creates a pacer targeting `fps` frames per second.
    ///
    /// A target of 0 never sleeps.
    pub fn new(fps: u32) -> Self {
        let interval = match fps {
            0 => Duration::ZERO,
            fps => Duration::from_secs(1) / fps,
        };

        Self {
            interval,
            last: None,
        }
    }

    /// Creates a pacer that never sleeps.
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// Target duration of a frame.
    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until the frame interval has elapsed since the previous tick.
    ///
    /// The first tick returns immediately.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let Some(last) = self.last else {
            self.last = Some(now);
            return Duration::ZERO;
        };

        let elapsed = now - last;
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }

        let now = Instant::now();
        self.last = Some(now);
        now - last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_interval() {
        assert_eq!(
            FramePacer::new(60).interval(),
            Duration::from_nanos(16_666_666)
        );
    }

    #[test]
    fn unlimited_does_not_sleep() {
        let mut pacer = FramePacer::unlimited();
        let start = Instant::now();

        for _ in 0..100 {
            pacer.tick();
        }

        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn ticks_are_spaced() {
        let mut pacer = FramePacer::new(200);
        let start = Instant::now();
        pacer.tick();

        for _ in 0..3 {
            assert!(pacer.tick() >= pacer.interval());
        }
        assert!(start.elapsed() >= pacer.interval() * 3);
    }
}
