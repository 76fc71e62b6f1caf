//! Frame scheduling: an explicit "run this step every tick until cancelled"
//! loop driven by an [`AnimationClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic millisecond clock with a way to wait for the next frame.
pub trait AnimationClock {
    /// Milliseconds since the clock's origin. Never decreases.
    fn now_ms(&self) -> f64;

    /// Block until `now_ms() >= deadline_ms`.
    fn wait_until(&mut self, deadline_ms: f64);
}

/// Wall clock backed by [`Instant`], starting at zero on construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl AnimationClock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn wait_until(&mut self, deadline_ms: f64) {
        let remaining = deadline_ms - self.now_ms();
        if remaining > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(remaining / 1000.0));
        }
    }
}

/// Clock that only moves when waited on. Used to drive the scene
/// deterministically.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn starting_at(now_ms: f64) -> Self {
        Self { now_ms }
    }
}

impl AnimationClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn wait_until(&mut self, deadline_ms: f64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }
}

/// Shared flag that stops a [`FrameScheduler`]. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Repeats a step once per frame interval until cancelled or the step fails.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    interval_ms: f64,
    cancel: CancelHandle,
}

impl FrameScheduler {
    /// Scheduler targeting `fps` frames per second (at least one).
    pub fn with_fps(fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / f64::from(fps.max(1)),
            cancel: CancelHandle::new(),
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Handle that stops this scheduler.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Run `step` with the frame timestamp on every tick.
    ///
    /// Cancellation is checked before each tick, so a scheduler cancelled
    /// before `run` runs no frames. Returns the number of frames run.
    pub fn run<C, E, F>(&self, clock: &mut C, mut step: F) -> Result<u64, E>
    where
        C: AnimationClock + ?Sized,
        F: FnMut(f64) -> Result<(), E>,
    {
        let mut frames = 0;
        let mut deadline = clock.now_ms();

        while !self.cancel.is_cancelled() {
            step(clock.now_ms())?;
            frames += 1;

            if self.cancel.is_cancelled() {
                break;
            }

            deadline += self.interval_ms;
            let now = clock.now_ms();
            // Fell behind; skip missed frames rather than bursting.
            if deadline < now {
                deadline = now;
            }
            clock.wait_until(deadline);
        }

        Ok(frames)
    }
}
