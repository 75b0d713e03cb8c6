//! Kindle Core - Foundational types for the Kindle 2D helpers
//!
//! This crate provides the types that all other Kindle crates depend on:
//! - `Point`, `Vector2`, `Rect` - Integer and float 2D geometry
//! - `Color` - 8-bit RGBA colour
//! - Rounding helpers for snapping to grids
//! - Error types and Result alias

mod error;
mod math;
mod types;

pub use error::{KindleError, Result};
pub use math::{ceil_to, fast_ceil, fast_floor, floor_to, round_to};
pub use types::{Color, Point, Rect, Vector2};
