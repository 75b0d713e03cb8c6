//! The renderer seam and pixel formats

use kindle_core::{Color, Rect, Result};

/// 32-bit packed pixel layouts, named from the most significant byte down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    #[default]
    Rgba8888,
    Argb8888,
    Abgr8888,
    Bgra8888,
}

impl PixelFormat {
    /// Pack a colour into a 32-bit pixel in this layout
    pub fn pack(self, color: Color) -> u32 {
        let [a, b, c, d] = self.order(color);
        u32::from_be_bytes([a, b, c, d])
    }

    /// Unpack a 32-bit pixel in this layout into a colour
    pub fn unpack(self, pixel: u32) -> Color {
        let [p0, p1, p2, p3] = pixel.to_be_bytes();
        match self {
            PixelFormat::Rgba8888 => Color::rgba(p0, p1, p2, p3),
            PixelFormat::Argb8888 => Color::rgba(p1, p2, p3, p0),
            PixelFormat::Abgr8888 => Color::rgba(p3, p2, p1, p0),
            PixelFormat::Bgra8888 => Color::rgba(p2, p1, p0, p3),
        }
    }

    fn order(self, c: Color) -> [u8; 4] {
        match self {
            PixelFormat::Rgba8888 => [c.r, c.g, c.b, c.a],
            PixelFormat::Argb8888 => [c.a, c.r, c.g, c.b],
            PixelFormat::Abgr8888 => [c.a, c.b, c.g, c.r],
            PixelFormat::Bgra8888 => [c.b, c.g, c.r, c.a],
        }
    }
}

/// A 2D renderer that can draw into off-screen target textures.
///
/// Textures are released when dropped. All drawing state (target, colour,
/// viewport) is sticky until changed.
pub trait Canvas {
    type Texture;

    /// Create a texture that can be used as a render target
    fn create_target_texture(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<Self::Texture>;

    /// Direct drawing to `target`, or to the window when `None`
    fn set_render_target(&mut self, target: Option<&Self::Texture>) -> Result<()>;

    fn set_draw_color(&mut self, color: Color);

    /// Fill the current target with the draw colour, ignoring the viewport
    fn clear(&mut self) -> Result<()>;

    /// Restrict drawing to `viewport`, or to the whole target when `None`
    fn set_viewport(&mut self, viewport: Option<Rect>) -> Result<()>;

    /// Copy `src` of `texture` to `dst` of the current target, rotated
    /// clockwise by `angle` degrees around the centre of `dst`
    fn copy_rotated(&mut self, texture: &Self::Texture, src: Rect, dst: Rect, angle: f64)
        -> Result<()>;

    /// Show everything drawn to the window since the last present
    fn present(&mut self);
}
