//! Scene stack: the top scene is the one updated and drawn

use crate::scene::Scene;
use kindle_core::Result;
use kindle_render::Canvas;

/// A stack of scenes. Pushing overlays a scene (e.g. a pause menu) and
/// popping returns to the one below.
pub struct SceneStack<C: Canvas + ?Sized> {
    scenes: Vec<Scene<C>>,
}

impl<C: Canvas + ?Sized> Default for SceneStack<C> {
    fn default() -> Self {
        Self { scenes: Vec::new() }
    }
}

impl<C: Canvas + ?Sized> SceneStack<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scene: Scene<C>) {
        self.scenes.push(scene);
        log::debug!("Scene pushed ({} on stack)", self.scenes.len());
    }

    /// Remove and return the top scene. `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<Scene<C>> {
        let scene = self.scenes.pop();
        if scene.is_some() {
            log::debug!("Scene popped ({} on stack)", self.scenes.len());
        }
        scene
    }

    /// Drop every scene, top first, then push `scene`
    pub fn change(&mut self, scene: Scene<C>) {
        while self.scenes.pop().is_some() {}
        self.push(scene);
    }

    pub fn current(&self) -> Option<&Scene<C>> {
        self.scenes.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut Scene<C>> {
        self.scenes.last_mut()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Update the current scene. No-op when empty.
    pub fn update(&mut self, delta: f32) -> Result<()> {
        match self.scenes.last_mut() {
            Some(scene) => scene.update(delta),
            None => Ok(()),
        }
    }

    /// Draw the current scene. No-op when empty.
    pub fn draw(&mut self, canvas: &mut C, delta: f32) -> Result<()> {
        match self.scenes.last_mut() {
            Some(scene) => scene.draw(canvas, delta),
            None => Ok(()),
        }
    }
}
