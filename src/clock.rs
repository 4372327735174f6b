use std::time::{Duration, Instant};

/// Monotonic time source plus blocking sleep.
///
/// Injected into the components that wait or schedule, so tests can drive
/// the loop without real delays.
pub trait Clock {
    /// Monotonic time since an arbitrary per-process origin.
    fn now(&self) -> Duration;

    fn sleep(&self, duration: Duration);
}

/// Clock backed by `std::time::Instant`; esp-idf provides std, so this is
/// the one used both on the device and on the host.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
