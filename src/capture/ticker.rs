use std::time::{Duration, Instant};

/// Source of elapsed-time ticks for a capture session.
pub trait Ticker {
    /// Wait for the next tick and return the time elapsed since the previous one.
    fn tick(&mut self) -> Duration;
}

/// Sleeps a fixed interval per tick and reports the measured wall-clock time.
#[derive(Debug)]
pub struct WallTicker {
    interval: Duration,
    last: Instant,
}

impl WallTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }
}

impl Ticker for WallTicker {
    fn tick(&mut self) -> Duration {
        std::thread::sleep(self.interval);
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt
    }
}

/// Reports a constant step without sleeping. Deterministic; used for offline capture.
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    step: Duration,
}

impl FixedTicker {
    pub fn new(step: Duration) -> Self {
        Self { step }
    }
}

impl Ticker for FixedTicker {
    fn tick(&mut self) -> Duration {
        self.step
    }
}
