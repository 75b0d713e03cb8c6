//! A scene: world, camera and the three system passes

use crate::system::{DrawSchedule, Schedule};
use hecs::World;
use kindle_core::{Color, Rect, Result};
use kindle_render::{Camera, Canvas};

/// One screen of a game: an ECS world viewed through a camera.
///
/// `update` runs the update schedule. `draw` renders the draw schedule into
/// the camera's texture, stretches that texture onto the camera viewport of
/// the window, then runs the gui schedule on top in window coordinates.
pub struct Scene<C: Canvas + ?Sized> {
    world: World,
    camera: Camera<C::Texture>,
    update: Schedule,
    draw: DrawSchedule<C>,
    gui: DrawSchedule<C>,
    background: Color,
}

impl<C: Canvas + ?Sized> Scene<C> {
    /// Create a scene with empty schedules and an opaque black background
    pub fn new(world: World, camera: Camera<C::Texture>) -> Self {
        Self {
            world,
            camera,
            update: Schedule::new(),
            draw: DrawSchedule::new(),
            gui: DrawSchedule::new(),
            background: Color::BLACK,
        }
    }

    pub fn with_schedules(
        mut self,
        update: Schedule,
        draw: DrawSchedule<C>,
        gui: DrawSchedule<C>,
    ) -> Self {
        self.update = update;
        self.draw = draw;
        self.gui = gui;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn camera(&self) -> &Camera<C::Texture> {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera<C::Texture> {
        &mut self.camera
    }

    pub fn update_schedule(&mut self) -> &mut Schedule {
        &mut self.update
    }

    pub fn draw_schedule(&mut self) -> &mut DrawSchedule<C> {
        &mut self.draw
    }

    pub fn gui_schedule(&mut self) -> &mut DrawSchedule<C> {
        &mut self.gui
    }

    pub fn update(&mut self, delta: f32) -> Result<()> {
        self.update.run(&mut self.world, delta)
    }

    pub fn draw(&mut self, canvas: &mut C, delta: f32) -> Result<()> {
        let target = self.camera.render_target();
        canvas.set_render_target(Some(target))?;
        canvas.set_draw_color(self.background);
        canvas.clear()?;
        canvas.set_viewport(None)?;

        self.draw.run(&self.world, canvas, delta)?;

        let viewport = self.camera.viewport();
        canvas.set_render_target(None)?;
        canvas.set_draw_color(self.background);
        canvas.clear()?;
        canvas.set_viewport(Some(viewport))?;

        let size = self.camera.size();
        canvas.copy_rotated(
            self.camera.render_target(),
            Rect::new(0, 0, size.x, size.y),
            Rect::new(0, 0, viewport.w, viewport.h),
            self.camera.rotation(),
        )?;

        self.gui.run(&self.world, canvas, delta)?;

        canvas.present();
        Ok(())
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Background packed in the camera's pixel format
    pub fn background_packed(&self) -> u32 {
        self.camera.pixel_format().pack(self.background)
    }

    /// Set the background from a pixel in the camera's pixel format
    pub fn set_background_packed(&mut self, pixel: u32) {
        self.background = self.camera.pixel_format().unpack(pixel);
    }
}
