//! Kindle Render - Renderer seam and 2D camera
//!
//! This crate does not draw anything itself. It defines the `Canvas` trait
//! a 2D renderer implements, packed `PixelFormat`s, and the `Camera` that
//! owns a render target texture on that canvas. `RecordingCanvas` records
//! calls for tests and headless tools.

mod camera;
mod canvas;
mod recording;

pub use camera::Camera;
pub use canvas::{Canvas, PixelFormat};
pub use recording::{CanvasCall, RecordedTexture, RecordingCanvas};
