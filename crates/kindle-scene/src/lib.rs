//! Kindle Scene - ECS scenes and the scene stack
//!
//! - `Scene` - a hecs world, a camera, and update/draw/gui schedules
//! - `SceneStack` - push/pop/change; only the top scene runs
//! - `System` / `DrawSystem` - per-pass system traits, implemented by closures

mod scene;
mod stack;
mod system;

pub use scene::Scene;
pub use stack::SceneStack;
pub use system::{DrawSchedule, DrawSystem, Schedule, System};

pub use hecs;
