use std::time::{Duration, Instant};

use super::window::WindowBuffer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Running { next_tick: Instant },
}

/// Paces window advancement independent of the renderer's frame timing.
///
/// The scheduler holds no thread of its own; whoever owns it drives
/// [`poll`] from a single loop, which keeps ticks strictly sequential and
/// makes the owning loop's cadence the floor on tick spacing.
///
/// [`poll`]: UpdateScheduler::poll
pub struct UpdateScheduler {
    window: WindowBuffer,
    tick_delay: Duration,
    state: State,
}

impl UpdateScheduler {
    pub fn new(points_to_show: usize, tick_delay: Duration) -> Self {
        Self {
            window: WindowBuffer::new(points_to_show),
            tick_delay,
            state: State::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Begins ticking, with the first tick due immediately. Returns false
    /// and changes nothing when already running, so repeated starts never
    /// produce a second tick stream.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = State::Running { next_tick: now };
        true
    }

    /// Stops ticking and discards the pending deadline. A deadline
    /// discarded here can never fire. Idempotent.
    pub fn stop(&mut self) {
        self.state = State::Idle;
    }

    /// Empties the window and rewinds the cursor for a fresh sequence.
    pub fn reset_session(&mut self) {
        self.window.reset();
    }

    /// Runs at most one tick: advance the window over `samples`, hand the
    /// current window contents to `draw` synchronously, then arm the next
    /// deadline. Returns whether a tick fired.
    pub fn poll(&mut self, now: Instant, samples: &[f32], draw: &mut dyn FnMut(&[f32])) -> bool {
        let State::Running { next_tick } = self.state else {
            return false;
        };
        if now < next_tick {
            return false;
        }
        self.window.advance(samples);
        draw(&self.window.snapshot());
        self.state = State::Running {
            next_tick: now + self.tick_delay,
        };
        true
    }

    pub fn window(&self) -> &WindowBuffer {
        &self.window
    }
}
