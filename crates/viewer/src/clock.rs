//! Logical time sources.
//!
//! Controllers never sample the wall clock themselves: the session reads a
//! [`TimeSource`] once per event and passes `now` (seconds) down. Tests use
//! [`ManualClock`] to step time deterministically.

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic time in seconds since an arbitrary origin
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Wall-clock time measured from construction
#[cfg(not(target_arch = "wasm32"))]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TimeSource for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually stepped clock. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    time: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, t: f64) {
        self.time.set(t);
    }

    pub fn advance(&self, dt: f64) {
        self.time.set(self.time.get() + dt);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.time.get()
    }
}
