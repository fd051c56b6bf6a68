//! Bounded readiness polling.

use crate::errors::AppResult;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Readiness {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Readiness {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Probe exactly once.
    pub fn once() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

/// Outcome of [`wait_until`]: the last probed value either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Waited<T> {
    Ready(T),
    TimedOut(T),
}

impl<T> Waited<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Waited::Ready(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Waited::Ready(v) | Waited::TimedOut(v) => v,
        }
    }
}

/// Probe until `ready` holds or `readiness.timeout` elapses.
///
/// Probe errors are returned immediately. The probe always runs at least once.
pub fn wait_until<T, F, P>(readiness: Readiness, mut probe: F, ready: P) -> AppResult<Waited<T>>
where
    F: FnMut() -> AppResult<T>,
    P: Fn(&T) -> bool,
{
    let start = Instant::now();

    loop {
        let value = probe()?;
        if ready(&value) {
            return Ok(Waited::Ready(value));
        }

        let elapsed = start.elapsed();
        if elapsed >= readiness.timeout {
            return Ok(Waited::TimedOut(value));
        }

        let remaining = readiness.timeout - elapsed;
        thread::sleep(readiness.interval.min(remaining));
    }
}
