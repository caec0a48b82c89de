//! Simulated time and edge-triggered delay gates.
//!
//! The clock advances with the fixed timestep instead of reading wall
//! time, so every gate below fires at the same tick on every replay.

/// Milliseconds elapsed since the start of the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameClock {
    elapsed_ms: f64,
}

impl GameClock {
    pub fn new() -> Self {
        Self { elapsed_ms: 0.0 }
    }

    /// Advance by one fixed step of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed_ms += f64::from(dt) * 1000.0;
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

/// Fires when strictly more than `threshold_ms` passed since `checkpoint`,
/// re-arming the checkpoint to `now_ms` on success.
#[inline]
pub fn time_elapsed(checkpoint: &mut f64, now_ms: f64, threshold_ms: f64) -> bool {
    if now_ms - *checkpoint > threshold_ms {
        *checkpoint = now_ms;
        return true;
    }
    false
}

/// A recurring delay: checkpoint paired with its threshold.
///
/// Polled every tick; returns true at most once per elapsed window.
#[derive(Debug, Clone, Copy)]
pub struct TimerGate {
    last_ms: f64,
    delay_ms: f64,
}

impl TimerGate {
    pub fn new(delay_ms: f64) -> Self {
        Self { last_ms: 0.0, delay_ms }
    }

    /// Poll the gate against the current clock.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        time_elapsed(&mut self.last_ms, now_ms, self.delay_ms)
    }

    /// Restart the window from `now_ms` without firing.
    pub fn rearm(&mut self, now_ms: f64) {
        self.last_ms = now_ms;
    }

    #[inline]
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }
}
