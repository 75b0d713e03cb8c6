//! Kindle Runtime - Frame timing
//!
//! - `Stopwatch` - millisecond timer with pause/resume
//! - `TimeSource` - where milliseconds come from (`MonotonicClock`, `ManualClock`)

mod stopwatch;

pub use stopwatch::{ManualClock, MonotonicClock, Stopwatch, TimeSource};
