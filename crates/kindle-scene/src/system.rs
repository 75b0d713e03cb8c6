//! Scene systems and the schedules that run them

use hecs::World;
use kindle_core::{KindleError, Result};

/// A system run during a scene's update pass
pub trait System {
    fn run(&mut self, world: &mut World, delta: f32) -> Result<()>;
}

impl<F> System for F
where
    F: FnMut(&mut World, f32) -> Result<()>,
{
    fn run(&mut self, world: &mut World, delta: f32) -> Result<()> {
        self(world, delta)
    }
}

/// A system run during a scene's draw or gui pass.
///
/// Draw systems read the world and write to the canvas; they never mutate
/// components.
pub trait DrawSystem<C: ?Sized> {
    fn run(&mut self, world: &World, canvas: &mut C, delta: f32) -> Result<()>;
}

impl<C, F> DrawSystem<C> for F
where
    C: ?Sized,
    F: FnMut(&World, &mut C, f32) -> Result<()>,
{
    fn run(&mut self, world: &World, canvas: &mut C, delta: f32) -> Result<()> {
        self(world, canvas, delta)
    }
}

fn failed(system: &str, err: KindleError) -> KindleError {
    KindleError::SystemFailed {
        system: system.to_string(),
        message: err.to_string(),
    }
}

/// Update systems in registration order
#[derive(Default)]
pub struct Schedule {
    systems: Vec<(String, Box<dyn System>)>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closure system
    pub fn add<F>(&mut self, name: &str, system: F) -> &mut Self
    where
        F: FnMut(&mut World, f32) -> Result<()> + 'static,
    {
        self.add_system(name, system)
    }

    pub fn add_system(&mut self, name: &str, system: impl System + 'static) -> &mut Self {
        self.systems.push((name.to_string(), Box::new(system)));
        self
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|(name, _)| name.as_str())
    }

    /// Run every system once. Stops at the first failure.
    pub fn run(&mut self, world: &mut World, delta: f32) -> Result<()> {
        for (name, system) in &mut self.systems {
            system.run(world, delta).map_err(|e| failed(name, e))?;
        }
        Ok(())
    }
}

/// Draw or gui systems in registration order
pub struct DrawSchedule<C: ?Sized> {
    systems: Vec<(String, Box<dyn DrawSystem<C>>)>,
}

impl<C: ?Sized> Default for DrawSchedule<C> {
    fn default() -> Self {
        Self {
            systems: Vec::new(),
        }
    }
}

impl<C: ?Sized> DrawSchedule<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closure system
    pub fn add<F>(&mut self, name: &str, system: F) -> &mut Self
    where
        F: FnMut(&World, &mut C, f32) -> Result<()> + 'static,
    {
        self.add_system(name, system)
    }

    pub fn add_system(&mut self, name: &str, system: impl DrawSystem<C> + 'static) -> &mut Self {
        self.systems.push((name.to_string(), Box::new(system)));
        self
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|(name, _)| name.as_str())
    }

    /// Run every system once. Stops at the first failure.
    pub fn run(&mut self, world: &World, canvas: &mut C, delta: f32) -> Result<()> {
        for (name, system) in &mut self.systems {
            system.run(world, canvas, delta).map_err(|e| failed(name, e))?;
        }
        Ok(())
    }
}
