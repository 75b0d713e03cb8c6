//! 2D camera: a view rectangle in the world plus the texture it renders into

use crate::canvas::{Canvas, PixelFormat};
use kindle_core::{KindleError, Point, Rect, Result};

/// A 2D camera.
///
/// The view rectangle lives in world coordinates; its size is also the size
/// of the render target texture. The viewport is the region of the window
/// the rendered view is stretched onto.
#[derive(Debug)]
pub struct Camera<T> {
    view: Rect,
    /// Rotation in degrees, clockwise
    rotation: f64,
    viewport: Rect,
    render_target: T,
    pixel_format: PixelFormat,
}

impl<T> Camera<T> {
    /// Create a camera at the world origin with a `width` x `height` view
    pub fn new<C>(
        canvas: &mut C,
        width: i32,
        height: i32,
        viewport: Rect,
        pixel_format: PixelFormat,
    ) -> Result<Self>
    where
        C: Canvas<Texture = T> + ?Sized,
    {
        let render_target = create_target(canvas, pixel_format, width, height)?;
        log::debug!("Camera created with a {width}x{height} view");

        Ok(Self {
            view: Rect::new(0, 0, width, height),
            rotation: 0.0,
            viewport,
            render_target,
            pixel_format,
        })
    }

    /// Move the view by an offset
    pub fn move_by(&mut self, offset: Point) {
        self.view.x += offset.x;
        self.view.y += offset.y;
    }

    /// Add `delta_degrees` to the rotation
    pub fn rotate(&mut self, delta_degrees: f64) {
        self.rotation += delta_degrees;
    }

    /// Center the view on a world position
    pub fn look_at(&mut self, position: Point) {
        self.view.x = position.x - self.view.w / 2;
        self.view.y = position.y - self.view.h / 2;
    }

    /// Place the top-left corner of the view at a world position
    pub fn set_position(&mut self, position: Point) {
        self.view.x = position.x;
        self.view.y = position.y;
    }

    pub fn set_x(&mut self, x: i32) {
        self.view.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.view.y = y;
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    /// Resize the view, recreating the render target.
    ///
    /// Does nothing when the size is unchanged. On failure the camera keeps
    /// its old size and texture. Must not be called while the canvas is
    /// drawing into this camera's target.
    pub fn set_size<C>(&mut self, canvas: &mut C, size: Point) -> Result<()>
    where
        C: Canvas<Texture = T> + ?Sized,
    {
        if self.view.size() == size {
            return Ok(());
        }

        self.render_target = create_target(canvas, self.pixel_format, size.x, size.y)?;
        self.view.w = size.x;
        self.view.h = size.y;
        log::debug!("Camera resized to {}x{}", size.x, size.y);
        Ok(())
    }

    pub fn set_width<C>(&mut self, canvas: &mut C, width: i32) -> Result<()>
    where
        C: Canvas<Texture = T> + ?Sized,
    {
        self.set_size(canvas, Point::new(width, self.view.h))
    }

    pub fn set_height<C>(&mut self, canvas: &mut C, height: i32) -> Result<()>
    where
        C: Canvas<Texture = T> + ?Sized,
    {
        self.set_size(canvas, Point::new(self.view.w, height))
    }

    /// Top-left corner of the view in the world
    pub fn position(&self) -> Point {
        self.view.position()
    }

    pub fn x(&self) -> i32 {
        self.view.x
    }

    pub fn y(&self) -> i32 {
        self.view.y
    }

    pub fn size(&self) -> Point {
        self.view.size()
    }

    pub fn width(&self) -> i32 {
        self.view.w
    }

    pub fn height(&self) -> i32 {
        self.view.h
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The view rectangle in world coordinates
    pub fn bounds(&self) -> Rect {
        self.view
    }

    /// The texture to draw world content into
    pub fn render_target(&self) -> &T {
        &self.render_target
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Convert a window position inside `viewport` to a world position
    pub fn screen_to_world(&self, screen: Point, viewport: Rect) -> Point {
        let sx = self.view.w as f32 / viewport.w as f32;
        let sy = self.view.h as f32 / viewport.h as f32;
        Point::new(
            ((screen.x - viewport.x) as f32 * sx) as i32 + self.view.x,
            ((screen.y - viewport.y) as f32 * sy) as i32 + self.view.y,
        )
    }

    /// Convert a world position to a window position inside `viewport`
    pub fn world_to_screen(&self, world: Point, viewport: Rect) -> Point {
        let sx = viewport.w as f32 / self.view.w as f32;
        let sy = viewport.h as f32 / self.view.h as f32;
        Point::new(
            ((world.x - self.view.x) as f32 * sx) as i32 + viewport.x,
            ((world.y - self.view.y) as f32 * sy) as i32 + viewport.y,
        )
    }
}

fn create_target<C: Canvas + ?Sized>(
    canvas: &mut C,
    format: PixelFormat,
    width: i32,
    height: i32,
) -> Result<C::Texture> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => canvas.create_target_texture(format, w, h),
        _ => Err(KindleError::RenderError(format!(
            "invalid camera size {width}x{height}"
        ))),
    }
}
