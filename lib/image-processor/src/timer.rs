use std::time::{Duration, Instant};

/// Wall-clock time accumulated across runner calls.
///
/// Owned by the caller and passed by `&mut` to every run, so resetting and
/// reading it is explicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallTimer {
    elapsed: Duration,
}

impl WallTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn add(&mut self, duration: Duration) {
        self.elapsed += duration;
    }

    /// Runs `f` and adds its wall-clock duration.
    pub fn time<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.add(start.elapsed());
        result
    }

    /// Seconds per item over `count` items, rounded to 2 decimal places.
    pub fn average_secs(&self, count: usize) -> f64 {
        cutil::time::average_secs(self.elapsed, count)
    }
}
