//! Frame-by-frame action edge reporting, independent of the window

use kindle_input::{DeviceEvent, InputBackend, InputManager};
use kindle_runtime::{Stopwatch, TimeSource};

/// Built-in bindings used when no `--config` is given
pub const DEFAULT_BINDINGS: &str = include_str!("../bindings.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

/// An action that changed state during one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEdge {
    pub action: String,
    pub edge: Edge,
    /// Session time in milliseconds, excluding paused time
    pub at_ms: u64,
}

/// Drives an input manager once per frame and reports action edges.
///
/// The `pause` action toggles the session stopwatch; `quit` requests exit.
pub struct Probe<S: TimeSource> {
    input: InputManager,
    actions: Vec<(String, usize)>,
    session: Stopwatch<S>,
    pause_id: Option<usize>,
    quit_id: Option<usize>,
}

impl<S: TimeSource> Probe<S> {
    pub fn new(input: InputManager, clock: S) -> Self {
        let actions = input
            .actions()
            .names()
            .into_iter()
            .map(|(name, id)| (name.to_string(), id))
            .collect();
        let pause_id = input.action_id("pause");
        let quit_id = input.action_id("quit");

        let mut session = Stopwatch::new(clock);
        session.start();

        Self {
            input,
            actions,
            session,
            pause_id,
            quit_id,
        }
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn session(&self) -> &Stopwatch<S> {
        &self.session
    }

    pub fn device_event<B: InputBackend + ?Sized>(&mut self, backend: &mut B, event: DeviceEvent) {
        self.input.handle_event(backend, event);
    }

    /// Poll once and collect the edges of every named action
    pub fn frame<B: InputBackend + ?Sized>(&mut self, backend: &B) -> Vec<ActionEdge> {
        self.input.update(backend);

        if self.pause_id.is_some_and(|id| self.input.action_check_pressed(id)) {
            if self.session.is_paused() {
                self.session.resume();
                log::info!("Session resumed at {} ms", self.session.ticks());
            } else {
                self.session.pause();
                log::info!("Session paused at {} ms", self.session.ticks());
            }
        }

        if self.input.mouse_moved() {
            let p = self.input.mouse_position();
            log::trace!("Cursor at ({}, {})", p.x, p.y);
        }

        let at_ms = self.session.ticks();
        let mut edges = Vec::new();
        for (name, id) in &self.actions {
            if self.input.action_check_pressed(*id) {
                edges.push(ActionEdge {
                    action: name.clone(),
                    edge: Edge::Pressed,
                    at_ms,
                });
            }
            if self.input.action_check_released(*id) {
                edges.push(ActionEdge {
                    action: name.clone(),
                    edge: Edge::Released,
                    at_ms,
                });
            }
        }
        edges
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_id
            .is_some_and(|id| self.input.action_check_pressed(id))
    }

    /// Release every gamepad and return the session length in milliseconds
    pub fn finish<B: InputBackend + ?Sized>(self, backend: &mut B) -> u64 {
        let elapsed = self.session.ticks();
        self.input.shutdown(backend);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindle_input::{GamepadButton, GamepadSample, InputConfig, KeyCode, ScriptedBackend};
    use kindle_runtime::ManualClock;

    fn probe() -> (ManualClock, Probe<ManualClock>) {
        let config = InputConfig::from_toml_str(DEFAULT_BINDINGS).unwrap();
        let input = InputManager::from_config(&config).unwrap();
        let clock = ManualClock::new();
        (clock.clone(), Probe::new(input, clock))
    }

    #[test]
    fn test_default_bindings_load() {
        let (_, probe) = probe();
        assert_eq!(probe.input().action_count(), 6);
        assert_eq!(probe.input().deadzone(), 6000);
        assert_eq!(probe.input().action_id("jump"), Some(2));
    }

    #[test]
    fn test_reports_press_and_release() {
        let (clock, mut probe) = probe();
        let mut backend = ScriptedBackend::new();

        clock.advance(120);
        backend.press_key(KeyCode::Space);
        assert_eq!(
            probe.frame(&backend),
            vec![ActionEdge {
                action: "jump".into(),
                edge: Edge::Pressed,
                at_ms: 120,
            }]
        );
        assert!(probe.frame(&backend).is_empty());

        backend.release_key(KeyCode::Space);
        let edges = probe.frame(&backend);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].edge, Edge::Released);
    }

    #[test]
    fn test_pause_action_toggles_session() {
        let (clock, mut probe) = probe();
        let mut backend = ScriptedBackend::new();

        clock.advance(50);
        backend.press_key(KeyCode::KeyP);
        probe.frame(&backend);
        assert!(probe.session().is_paused());

        clock.advance(1000);
        backend.release_key(KeyCode::KeyP);
        probe.frame(&backend);
        assert_eq!(probe.session().ticks(), 50);

        backend.press_key(KeyCode::KeyP);
        probe.frame(&backend);
        assert!(!probe.session().is_paused());
        clock.advance(10);
        assert_eq!(probe.finish(&mut backend), 60);
    }

    #[test]
    fn test_quit_from_first_gamepad_index() {
        let (_, mut probe) = probe();
        let mut backend = ScriptedBackend::new();
        backend.plug_gamepad(0, GamepadSample::new());
        probe.device_event(&mut backend, DeviceEvent::Added(0));

        probe.frame(&backend);
        assert!(!probe.quit_requested());

        backend.set_gamepad(0, GamepadSample::new().with_button(GamepadButton::Back));
        probe.frame(&backend);
        assert!(probe.quit_requested());
    }
}
