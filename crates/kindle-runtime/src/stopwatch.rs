//! Millisecond stopwatch with pause/resume

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond counter
pub trait TimeSource {
    fn ticks_ms(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn ticks_ms(&self) -> u64 {
        (**self).ticks_ms()
    }
}

/// Milliseconds since this clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeSource for MonotonicClock {
    fn ticks_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// A clock advanced by hand. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl TimeSource for ManualClock {
    fn ticks_ms(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Stopped,
    /// `carried` is time accumulated before the last resume
    Running { since: u64, carried: u64 },
    Paused { elapsed: u64 },
}

/// Measures elapsed milliseconds, excluding time spent paused
#[derive(Debug, Clone)]
pub struct Stopwatch<S = MonotonicClock> {
    source: S,
    state: State,
}

impl Default for Stopwatch<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}

impl<S: TimeSource> Stopwatch<S> {
    /// A stopped stopwatch reading from `source`
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: State::Stopped,
        }
    }

    /// Start from zero, discarding any previous reading
    pub fn start(&mut self) {
        self.state = State::Running {
            since: self.source.ticks_ms(),
            carried: 0,
        };
    }

    /// Stop and reset to zero
    pub fn stop(&mut self) {
        self.state = State::Stopped;
    }

    /// Freeze the reading. Only has an effect while running.
    pub fn pause(&mut self) {
        if let State::Running { .. } = self.state {
            self.state = State::Paused {
                elapsed: self.ticks(),
            };
        }
    }

    /// Continue from the frozen reading. Only has an effect while paused.
    pub fn resume(&mut self) {
        if let State::Paused { elapsed } = self.state {
            self.state = State::Running {
                since: self.source.ticks_ms(),
                carried: elapsed,
            };
        }
    }

    /// Milliseconds counted so far; 0 when not started
    pub fn ticks(&self) -> u64 {
        match self.state {
            State::Stopped => 0,
            State::Running { since, carried } => {
                carried.saturating_add(self.source.ticks_ms().saturating_sub(since))
            }
            State::Paused { elapsed } => elapsed,
        }
    }

    pub fn is_started(&self) -> bool {
        self.state != State::Stopped
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, State::Paused { .. })
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
