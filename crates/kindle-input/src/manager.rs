//! The input manager: polled device snapshots plus action dispatch

use crate::action::{ActionBinding, ActionTable, ButtonBinding};
use crate::backend::{DeviceEvent, InputBackend};
use crate::config::InputConfig;
use crate::edge::{Buffered, Trigger};
use crate::gamepad::{
    GamepadAxis, GamepadButton, GamepadSelector, GamepadSlot, DEFAULT_DEADZONE, MAX_GAMEPADS,
};
use crate::keyboard::KeyboardSnapshot;
use crate::mouse::{MouseButtons, MouseSnapshot};
use kindle_core::{Point, Result};
use winit::keyboard::KeyCode;

/// Polls keyboard, mouse and up to [`MAX_GAMEPADS`] gamepads once per frame
/// and answers level/edge queries about them and about bound actions.
///
/// Call [`update`](Self::update) exactly once per frame before any check.
/// Calling it twice in one frame makes presses from that frame invisible.
/// Invalid action ids, slots and gamepad indices never panic: binds are
/// ignored and checks report false.
#[derive(Debug)]
pub struct InputManager {
    keyboard: Buffered<KeyboardSnapshot>,
    mouse: Buffered<MouseSnapshot>,
    gamepads: [GamepadSlot; MAX_GAMEPADS],
    /// Active gamepad indices in connection order
    connected: Vec<usize>,
    deadzone: u16,
    actions: ActionTable,
}

impl InputManager {
    /// Create a manager with room for `action_count` actions.
    ///
    /// Fails only if the action table cannot be allocated. Pass 0 to skip
    /// the action API entirely.
    pub fn new(action_count: usize) -> Result<Self> {
        let actions = ActionTable::with_capacity(action_count)?;
        log::debug!("Input manager created with {action_count} actions");

        Ok(Self {
            keyboard: Buffered::default(),
            mouse: Buffered::default(),
            gamepads: Default::default(),
            connected: Vec::with_capacity(MAX_GAMEPADS),
            deadzone: DEFAULT_DEADZONE,
            actions,
        })
    }

    /// Create a manager sized and bound from a binding file.
    ///
    /// Action ids follow the order of `[[actions]]` entries.
    pub fn from_config(config: &InputConfig) -> Result<Self> {
        config.validate()?;
        let mut manager = Self::new(config.actions.len())?;
        if let Some(deadzone) = config.deadzone {
            manager.set_deadzone(deadzone);
        }

        for (id, action) in config.actions.iter().enumerate() {
            manager.actions.set_name(id, action.name.clone());
            for (slot, key) in action.keys.iter().enumerate() {
                manager.action_set_key(id, *key, slot);
            }
            for (slot, button) in action.buttons.iter().enumerate() {
                manager.action_set_button(id, button.button, button.selector(), slot);
            }
            if !action.mouse.is_empty() {
                manager.action_set_mouse(id, action.mouse_mask());
            }
        }

        Ok(manager)
    }

    /// Advance one frame: rotate every snapshot and read fresh state.
    pub fn update<B: InputBackend + ?Sized>(&mut self, backend: &B) {
        self.keyboard.advance(backend.keyboard());
        self.mouse.advance(backend.mouse());

        let deadzone = self.deadzone;
        for &index in &self.connected {
            let sample = backend.gamepad(index).unwrap_or_default();
            self.gamepads[index].poll(sample, deadzone);
        }
    }

    /// Apply a controller connect/disconnect notification
    pub fn handle_event<B: InputBackend + ?Sized>(&mut self, backend: &mut B, event: DeviceEvent) {
        match event {
            DeviceEvent::Added(index) => self.connect(backend, index),
            DeviceEvent::Removed(index) => self.disconnect(backend, index),
        }
    }

    /// Release every open controller. The action table is dropped with `self`.
    pub fn shutdown<B: InputBackend + ?Sized>(mut self, backend: &mut B) {
        for index in std::mem::take(&mut self.connected) {
            backend.close_gamepad(index);
        }
        log::debug!("Input manager shut down");
    }

    fn connect<B: InputBackend + ?Sized>(&mut self, backend: &mut B, index: usize) {
        if index >= MAX_GAMEPADS {
            log::warn!("Ignoring gamepad at index {index}: only {MAX_GAMEPADS} slots");
            return;
        }
        if !backend.open_gamepad(index) {
            log::warn!("Could not open gamepad at index {index}");
            return;
        }

        let sample = backend.gamepad(index).unwrap_or_default();
        self.gamepads[index] = GamepadSlot::connect(sample, self.deadzone);

        if self.connected.contains(&index) {
            log::debug!("Gamepad {index} reopened");
        } else {
            self.connected.push(index);
            log::info!(
                "Gamepad {index} connected ({} active)",
                self.connected.len()
            );
        }
    }

    fn disconnect<B: InputBackend + ?Sized>(&mut self, backend: &mut B, index: usize) {
        let Some(position) = self.connected.iter().position(|&i| i == index) else {
            log::warn!("Removal event for unknown gamepad {index}");
            return;
        };

        self.connected.remove(position);
        self.gamepads[index] = GamepadSlot::default();
        backend.close_gamepad(index);
        log::info!(
            "Gamepad {index} disconnected ({} active)",
            self.connected.len()
        );
    }

    // --- Keyboard ---

    /// Is a key currently held down?
    pub fn key_check(&self, key: KeyCode) -> bool {
        self.key_triggered(key, Trigger::Down)
    }

    /// Was a key pressed during the last update?
    pub fn key_check_pressed(&self, key: KeyCode) -> bool {
        self.key_triggered(key, Trigger::Pressed)
    }

    /// Was a key released during the last update?
    pub fn key_check_released(&self, key: KeyCode) -> bool {
        self.key_triggered(key, Trigger::Released)
    }

    fn key_triggered(&self, key: KeyCode, trigger: Trigger) -> bool {
        self.keyboard.test(trigger, |keys| keys.is_down(key))
    }

    // --- Mouse ---

    /// Are all buttons of `buttons` currently held?
    pub fn mouse_check(&self, buttons: MouseButtons) -> bool {
        self.mouse_triggered(buttons, Trigger::Down)
    }

    pub fn mouse_check_pressed(&self, buttons: MouseButtons) -> bool {
        self.mouse_triggered(buttons, Trigger::Pressed)
    }

    pub fn mouse_check_released(&self, buttons: MouseButtons) -> bool {
        self.mouse_triggered(buttons, Trigger::Released)
    }

    /// Did the cursor move during the last update?
    pub fn mouse_moved(&self) -> bool {
        self.mouse.current().position != self.mouse.previous().position
    }

    pub fn mouse_position(&self) -> Point {
        self.mouse.current().position
    }

    fn mouse_triggered(&self, buttons: MouseButtons, trigger: Trigger) -> bool {
        self.mouse
            .test(trigger, |mouse| mouse.buttons.contains(buttons))
    }

    // --- Gamepads ---

    pub fn gamepad_check(&self, button: GamepadButton, gamepad: GamepadSelector) -> bool {
        self.gamepad_triggered(button, gamepad, Trigger::Down)
    }

    pub fn gamepad_check_pressed(&self, button: GamepadButton, gamepad: GamepadSelector) -> bool {
        self.gamepad_triggered(button, gamepad, Trigger::Pressed)
    }

    pub fn gamepad_check_released(&self, button: GamepadButton, gamepad: GamepadSelector) -> bool {
        self.gamepad_triggered(button, gamepad, Trigger::Released)
    }

    /// Raw axis value from the last update, or 0 when the pad is absent
    pub fn gamepad_axis(&self, axis: GamepadAxis, gamepad: GamepadSelector) -> i16 {
        self.resolve(gamepad)
            .map(|slot| slot.axes[axis as usize])
            .unwrap_or(0)
    }

    /// Is a gamepad active at this selector?
    pub fn gamepad_connected(&self, gamepad: GamepadSelector) -> bool {
        self.resolve(gamepad).is_some()
    }

    /// Active gamepad indices, earliest connection first
    pub fn connected_gamepads(&self) -> &[usize] {
        &self.connected
    }

    /// Set the stick/trigger deadzone, clamped to `0..=i16::MAX`.
    /// Applies to every gamepad from the next poll on.
    pub fn set_deadzone(&mut self, deadzone: u16) {
        self.deadzone = deadzone.min(i16::MAX as u16);
    }

    pub fn deadzone(&self) -> u16 {
        self.deadzone
    }

    fn gamepad_triggered(
        &self,
        button: GamepadButton,
        gamepad: GamepadSelector,
        trigger: Trigger,
    ) -> bool {
        self.resolve(gamepad)
            .is_some_and(|slot| slot.test(button, trigger))
    }

    fn resolve(&self, gamepad: GamepadSelector) -> Option<&GamepadSlot> {
        let index = match gamepad {
            GamepadSelector::First => *self.connected.first()?,
            GamepadSelector::Index(index) => index,
        };
        self.gamepads.get(index).filter(|slot| slot.active)
    }

    // --- Actions ---

    /// Bind a key to slot 0 or 1 of an action.
    ///
    /// Out-of-range `action` or `slot` writes nothing and returns false.
    pub fn action_set_key(&mut self, action: usize, key: KeyCode, slot: usize) -> bool {
        let written = self.actions.set_key(action, key, slot);
        if !written {
            self.reject_bind("key", action, Some(slot));
        }
        written
    }

    /// Bind a gamepad button, read from `gamepad`, to slot 0 or 1 of an action
    pub fn action_set_button(
        &mut self,
        action: usize,
        button: GamepadButton,
        gamepad: GamepadSelector,
        slot: usize,
    ) -> bool {
        let written = self
            .actions
            .set_button(action, ButtonBinding::new(button, gamepad), slot);
        if !written {
            self.reject_bind("button", action, Some(slot));
        }
        written
    }

    /// Bind a mouse mask to an action. `MouseButtons::NONE` unbinds it.
    pub fn action_set_mouse(&mut self, action: usize, buttons: MouseButtons) -> bool {
        let written = self.actions.set_mouse(action, buttons);
        if !written {
            self.reject_bind("mouse", action, None);
        }
        written
    }

    /// Remove every binding of an action
    pub fn action_clear(&mut self, action: usize) -> bool {
        self.actions.clear(action)
    }

    /// Is any input bound to the action currently held?
    pub fn action_check(&self, action: usize) -> bool {
        self.action_triggered(action, Trigger::Down)
    }

    /// Was any input bound to the action pressed during the last update?
    pub fn action_check_pressed(&self, action: usize) -> bool {
        self.action_triggered(action, Trigger::Pressed)
    }

    /// Was any input bound to the action released during the last update?
    pub fn action_check_released(&self, action: usize) -> bool {
        self.action_triggered(action, Trigger::Released)
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Look up an action id by the name given in the binding file
    pub fn action_id(&self, name: &str) -> Option<usize> {
        self.actions.id(name)
    }

    pub fn action_binding(&self, action: usize) -> Option<&ActionBinding> {
        self.actions.get(action)
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    // Keys, then gamepad buttons, then the mouse mask; first hit wins.
    fn action_triggered(&self, action: usize, trigger: Trigger) -> bool {
        let Some(binding) = self.actions.get(action) else {
            return false;
        };

        binding
            .keys
            .iter()
            .flatten()
            .any(|&key| self.key_triggered(key, trigger))
            || binding
                .buttons
                .iter()
                .flatten()
                .any(|b| self.gamepad_triggered(b.button, b.gamepad, trigger))
            || (!binding.mouse.is_empty() && self.mouse_triggered(binding.mouse, trigger))
    }

    fn reject_bind(&self, kind: &str, action: usize, slot: Option<usize>) {
        log::warn!("{}", rejected_bind_message(kind, action, slot, self.actions.len()));
    }
}

/// Mouse bindings have no slot, so `slot` is `None` for them
fn rejected_bind_message(kind: &str, action: usize, slot: Option<usize>, count: usize) -> String {
    match slot {
        Some(slot) => format!(
            "Ignoring {kind} binding for action {action} slot {slot} ({count} actions configured)"
        ),
        None => format!("Ignoring {kind} binding for action {action} ({count} actions configured)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamepad::GamepadSample;
    use crate::scripted::ScriptedBackend;
    use proptest::prelude::*;

    const JUMP: usize = 0;
    const MOVE_LEFT: usize = 1;
    const FIRE: usize = 2;

    fn manager() -> InputManager {
        InputManager::new(3).unwrap()
    }

    #[test]
    fn test_checks_are_false_before_first_update() {
        let input = manager();
        assert!(!input.key_check(KeyCode::Space));
        assert!(!input.key_check_pressed(KeyCode::Space));
        assert!(!input.key_check_released(KeyCode::Space));
        assert!(!input.mouse_check_pressed(MouseButtons::LEFT));
        assert!(!input.mouse_moved());
        assert!(!input.gamepad_check(GamepadButton::A, GamepadSelector::First));
        assert!(!input.action_check(JUMP));
    }

    #[test]
    fn test_key_transitions() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();

        backend.press_key(KeyCode::KeyW);
        input.update(&backend);
        assert!(input.key_check(KeyCode::KeyW));
        assert!(input.key_check_pressed(KeyCode::KeyW));
        assert!(!input.key_check_released(KeyCode::KeyW));

        // Held across two frames: still down, no longer a press
        input.update(&backend);
        assert!(input.key_check(KeyCode::KeyW));
        assert!(!input.key_check_pressed(KeyCode::KeyW));

        backend.release_key(KeyCode::KeyW);
        input.update(&backend);
        assert!(!input.key_check(KeyCode::KeyW));
        assert!(input.key_check_released(KeyCode::KeyW));

        input.update(&backend);
        assert!(!input.key_check_released(KeyCode::KeyW));
    }

    #[test]
    fn test_double_update_hides_press() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();

        backend.press_key(KeyCode::Space);
        input.update(&backend);
        input.update(&backend);
        assert!(!input.key_check_pressed(KeyCode::Space));
    }

    #[test]
    fn test_mouse_mask_and_movement() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();

        backend.press_mouse(MouseButtons::LEFT);
        backend.move_mouse(Point::new(10, 20));
        input.update(&backend);
        assert!(input.mouse_check_pressed(MouseButtons::LEFT));
        assert!(!input.mouse_check(MouseButtons::LEFT | MouseButtons::RIGHT));
        assert!(input.mouse_moved());
        assert_eq!(input.mouse_position(), Point::new(10, 20));

        backend.press_mouse(MouseButtons::RIGHT);
        input.update(&backend);
        assert!(!input.mouse_moved());
        assert!(input.mouse_check_pressed(MouseButtons::LEFT | MouseButtons::RIGHT));
        assert!(!input.mouse_check_pressed(MouseButtons::LEFT));

        backend.release_mouse(MouseButtons::LEFT);
        input.update(&backend);
        assert!(input.mouse_check_released(MouseButtons::LEFT | MouseButtons::RIGHT));
        assert!(input.mouse_check_released(MouseButtons::LEFT));
        assert!(input.mouse_check(MouseButtons::RIGHT));
    }

    #[test]
    fn test_gamepad_first_selector_tracks_connection_order() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();

        backend.plug_gamepad(3, GamepadSample::new().with_button(GamepadButton::Y));
        backend.plug_gamepad(1, GamepadSample::new().with_button(GamepadButton::A));
        input.handle_event(&mut backend, DeviceEvent::Added(3));
        input.handle_event(&mut backend, DeviceEvent::Added(1));
        assert_eq!(input.connected_gamepads(), &[3, 1]);

        input.update(&backend);
        assert!(input.gamepad_check(GamepadButton::Y, GamepadSelector::First));
        assert!(!input.gamepad_check(GamepadButton::A, GamepadSelector::First));
        assert!(input.gamepad_check(GamepadButton::A, GamepadSelector::Index(1)));

        input.handle_event(&mut backend, DeviceEvent::Removed(3));
        assert_eq!(input.connected_gamepads(), &[1]);
        assert!(input.gamepad_check(GamepadButton::A, GamepadSelector::First));
        assert!(!input.gamepad_check(GamepadButton::Y, GamepadSelector::Index(3)));
    }

    #[test]
    fn test_gamepad_absent_or_out_of_range() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        input.update(&backend);
        assert!(!input.gamepad_check(GamepadButton::A, GamepadSelector::First));
        assert!(!input.gamepad_check(GamepadButton::A, GamepadSelector::Index(99)));
        assert_eq!(input.gamepad_axis(GamepadAxis::LeftX, GamepadSelector::First), 0);

        backend.plug_gamepad(20, GamepadSample::new());
        input.handle_event(&mut backend, DeviceEvent::Added(20));
        assert!(input.connected_gamepads().is_empty());

        // Nothing is plugged at 2, so the backend refuses to open it
        input.handle_event(&mut backend, DeviceEvent::Added(2));
        assert!(!input.gamepad_connected(GamepadSelector::Index(2)));
    }

    #[test]
    fn test_button_held_at_connect_is_not_a_press() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();

        backend.plug_gamepad(0, GamepadSample::new().with_button(GamepadButton::Start));
        input.handle_event(&mut backend, DeviceEvent::Added(0));
        assert!(input.gamepad_check(GamepadButton::Start, GamepadSelector::First));
        assert!(!input.gamepad_check_pressed(GamepadButton::Start, GamepadSelector::First));

        input.update(&backend);
        assert!(!input.gamepad_check_pressed(GamepadButton::Start, GamepadSelector::First));
    }

    #[test]
    fn test_reconnect_reflects_new_controller() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        let pad = GamepadSelector::Index(0);

        backend.plug_gamepad(0, GamepadSample::new().with_button(GamepadButton::X));
        input.handle_event(&mut backend, DeviceEvent::Added(0));
        input.update(&backend);
        assert!(input.gamepad_check(GamepadButton::X, pad));

        backend.unplug_gamepad(0);
        input.handle_event(&mut backend, DeviceEvent::Removed(0));
        assert!(!input.gamepad_check(GamepadButton::X, pad));

        backend.plug_gamepad(0, GamepadSample::new().with_button(GamepadButton::B));
        input.handle_event(&mut backend, DeviceEvent::Added(0));
        input.update(&backend);
        assert!(input.gamepad_check(GamepadButton::B, pad));
        assert!(!input.gamepad_check(GamepadButton::X, pad));
        assert!(!input.gamepad_check_released(GamepadButton::X, pad));
    }

    #[test]
    fn test_duplicate_add_does_not_duplicate_entry() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        backend.plug_gamepad(4, GamepadSample::new());
        input.handle_event(&mut backend, DeviceEvent::Added(4));
        input.handle_event(&mut backend, DeviceEvent::Added(4));
        assert_eq!(input.connected_gamepads(), &[4]);

        input.handle_event(&mut backend, DeviceEvent::Removed(4));
        assert!(input.connected_gamepads().is_empty());
        assert!(!input.gamepad_connected(GamepadSelector::Index(4)));
    }

    #[test]
    fn test_unknown_removal_is_ignored() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        backend.plug_gamepad(0, GamepadSample::new());
        input.handle_event(&mut backend, DeviceEvent::Added(0));
        input.handle_event(&mut backend, DeviceEvent::Removed(7));
        assert_eq!(input.connected_gamepads(), &[0]);
    }

    #[test]
    fn test_stick_synthesis_uses_deadzone() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        input.set_deadzone(8000);

        backend.plug_gamepad(0, GamepadSample::new());
        input.handle_event(&mut backend, DeviceEvent::Added(0));

        backend.set_gamepad(0, GamepadSample::new().with_axis(GamepadAxis::LeftX, -8000));
        input.update(&backend);
        assert!(!input.gamepad_check(GamepadButton::LeftStickLeft, GamepadSelector::First));
        assert_eq!(
            input.gamepad_axis(GamepadAxis::LeftX, GamepadSelector::First),
            -8000
        );

        backend.set_gamepad(0, GamepadSample::new().with_axis(GamepadAxis::LeftX, -8001));
        input.update(&backend);
        assert!(input.gamepad_check_pressed(GamepadButton::LeftStickLeft, GamepadSelector::First));
        assert!(!input.gamepad_check(GamepadButton::LeftStickRight, GamepadSelector::First));
    }

    #[test]
    fn test_deadzone_is_clamped() {
        let mut input = manager();
        assert_eq!(input.deadzone(), DEFAULT_DEADZONE);
        input.set_deadzone(u16::MAX);
        assert_eq!(input.deadzone(), 32767);
    }

    #[test]
    fn test_unplugged_pad_polls_empty_until_removed() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        backend.plug_gamepad(0, GamepadSample::new().with_button(GamepadButton::A));
        input.handle_event(&mut backend, DeviceEvent::Added(0));
        input.update(&backend);

        backend.unplug_gamepad(0);
        input.update(&backend);
        assert!(input.gamepad_check_released(GamepadButton::A, GamepadSelector::First));
    }

    #[test]
    fn test_action_ors_all_bindings() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        input.action_set_key(MOVE_LEFT, KeyCode::KeyA, 0);
        input.action_set_key(MOVE_LEFT, KeyCode::ArrowLeft, 1);
        input.action_set_button(MOVE_LEFT, GamepadButton::DPadLeft, GamepadSelector::First, 0);
        input.action_set_button(
            MOVE_LEFT,
            GamepadButton::LeftStickLeft,
            GamepadSelector::Index(2),
            1,
        );

        backend.plug_gamepad(2, GamepadSample::new());
        input.handle_event(&mut backend, DeviceEvent::Added(2));

        backend.press_key(KeyCode::ArrowLeft);
        input.update(&backend);
        assert!(input.action_check_pressed(MOVE_LEFT));

        backend.release_key(KeyCode::ArrowLeft);
        backend.set_gamepad(2, GamepadSample::new().with_axis(GamepadAxis::LeftX, -30000));
        input.update(&backend);
        // Arrow released while the stick went left: both edges visible
        assert!(input.action_check(MOVE_LEFT));
        assert!(input.action_check_pressed(MOVE_LEFT));
        assert!(input.action_check_released(MOVE_LEFT));

        backend.set_gamepad(2, GamepadSample::new().with_button(GamepadButton::DPadLeft));
        input.update(&backend);
        assert!(input.action_check(MOVE_LEFT));
    }

    #[test]
    fn test_action_mouse_binding() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        input.action_set_mouse(FIRE, MouseButtons::LEFT);

        backend.press_mouse(MouseButtons::LEFT);
        input.update(&backend);
        assert!(input.action_check_pressed(FIRE));

        input.action_set_mouse(FIRE, MouseButtons::NONE);
        assert!(!input.action_check(FIRE));
    }

    #[test]
    fn test_action_button_survives_reconnect() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        input.action_set_button(JUMP, GamepadButton::A, GamepadSelector::Index(5), 0);

        backend.plug_gamepad(5, GamepadSample::new().with_button(GamepadButton::A));
        input.handle_event(&mut backend, DeviceEvent::Added(5));
        assert!(input.action_check(JUMP));

        backend.unplug_gamepad(5);
        input.handle_event(&mut backend, DeviceEvent::Removed(5));
        assert!(!input.action_check(JUMP));
        assert!(!input.action_check_released(JUMP));
        input.update(&backend);
        assert!(!input.action_check(JUMP));

        backend.plug_gamepad(5, GamepadSample::new());
        input.handle_event(&mut backend, DeviceEvent::Added(5));
        backend.set_gamepad(5, GamepadSample::new().with_button(GamepadButton::A));
        input.update(&backend);
        assert!(input.action_check_pressed(JUMP));
    }

    #[test]
    fn test_out_of_range_action_and_slot() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        assert!(!input.action_set_key(3, KeyCode::Space, 0));
        assert!(!input.action_set_key(JUMP, KeyCode::Space, 2));
        assert!(!input.action_set_button(99, GamepadButton::A, GamepadSelector::First, 0));
        assert!(!input.action_set_mouse(usize::MAX, MouseButtons::LEFT));

        backend.press_key(KeyCode::Space);
        input.update(&backend);
        assert!(!input.action_check(JUMP));
        assert!(!input.action_check(3));
        assert!(!input.action_check_pressed(usize::MAX));
        assert!(!input.action_check_released(42));
    }

    #[test]
    fn test_rejected_bind_message() {
        assert_eq!(
            rejected_bind_message("key", 0, Some(2), 3),
            "Ignoring key binding for action 0 slot 2 (3 actions configured)"
        );
        let mouse = rejected_bind_message("mouse", 9, None, 3);
        assert_eq!(mouse, "Ignoring mouse binding for action 9 (3 actions configured)");
        assert!(!mouse.contains("slot"));
    }

    #[test]
    fn test_from_config_binds_by_position() {
        let config = InputConfig::from_toml_str(
            r#"
            deadzone = 1000

            [[actions]]
            name = "jump"
            keys = ["Space"]
            buttons = [{ button = "A" }]

            [[actions]]
            name = "fire"
            mouse = ["Left", "Right"]
            "#,
        )
        .unwrap();
        let mut backend = ScriptedBackend::new();
        let mut input = InputManager::from_config(&config).unwrap();
        assert_eq!(input.action_count(), 2);
        assert_eq!(input.deadzone(), 1000);
        assert_eq!(input.action_id("jump"), Some(0));
        assert_eq!(input.action_id("fire"), Some(1));

        backend.press_mouse(MouseButtons::LEFT | MouseButtons::RIGHT);
        backend.press_key(KeyCode::Space);
        input.update(&backend);
        assert!(input.action_check_pressed(0));
        assert!(input.action_check(1));
    }

    #[test]
    fn test_shutdown_closes_pads() {
        let mut backend = ScriptedBackend::new();
        let mut input = manager();
        backend.plug_gamepad(0, GamepadSample::new());
        backend.plug_gamepad(6, GamepadSample::new());
        input.handle_event(&mut backend, DeviceEvent::Added(0));
        input.handle_event(&mut backend, DeviceEvent::Added(6));
        assert!(backend.is_open(6));

        input.shutdown(&mut backend);
        assert!(!backend.is_open(0));
        assert!(!backend.is_open(6));
    }

    fn frames() -> impl Strategy<Value = Vec<bool>> {
        prop::collection::vec(any::<bool>(), 1..32)
    }

    proptest! {
        #[test]
        fn prop_key_edges_follow_frames(frames in frames()) {
            let mut backend = ScriptedBackend::new();
            let mut input = manager();
            let mut previous = false;
            for &down in &frames {
                backend.set_key(KeyCode::KeyK, down);
                input.update(&backend);
                prop_assert_eq!(input.key_check(KeyCode::KeyK), down);
                prop_assert_eq!(input.key_check_pressed(KeyCode::KeyK), down && !previous);
                prop_assert_eq!(input.key_check_released(KeyCode::KeyK), !down && previous);
                previous = down;
            }
        }

        #[test]
        fn prop_untouched_key_never_fires(frames in frames()) {
            let mut backend = ScriptedBackend::new();
            let mut input = manager();
            for &down in &frames {
                backend.set_key(KeyCode::KeyK, down);
                input.update(&backend);
                prop_assert!(!input.key_check(KeyCode::KeyJ));
                prop_assert!(!input.key_check_pressed(KeyCode::KeyJ));
                prop_assert!(!input.key_check_released(KeyCode::KeyJ));
            }
        }

        #[test]
        fn prop_single_key_action_matches_key(frames in frames()) {
            let mut backend = ScriptedBackend::new();
            let mut input = manager();
            input.action_set_key(JUMP, KeyCode::Space, 0);
            for &down in &frames {
                backend.set_key(KeyCode::Space, down);
                input.update(&backend);
                prop_assert_eq!(input.action_check(JUMP), input.key_check(KeyCode::Space));
                prop_assert_eq!(
                    input.action_check_pressed(JUMP),
                    input.key_check_pressed(KeyCode::Space)
                );
                prop_assert_eq!(
                    input.action_check_released(JUMP),
                    input.key_check_released(KeyCode::Space)
                );
            }
        }

        #[test]
        fn prop_two_key_action_pressed_is_either_edge(
            frames in prop::collection::vec((any::<bool>(), any::<bool>()), 1..32)
        ) {
            let mut backend = ScriptedBackend::new();
            let mut input = manager();
            input.action_set_key(MOVE_LEFT, KeyCode::KeyA, 0);
            input.action_set_key(MOVE_LEFT, KeyCode::ArrowLeft, 1);
            let mut prev = (false, false);
            for &(a, arrow) in &frames {
                backend.set_key(KeyCode::KeyA, a);
                backend.set_key(KeyCode::ArrowLeft, arrow);
                input.update(&backend);
                let expected = (a && !prev.0) || (arrow && !prev.1);
                prop_assert_eq!(input.action_check_pressed(MOVE_LEFT), expected);
                prev = (a, arrow);
            }
        }

        #[test]
        fn prop_unbound_action_is_always_false(
            frames in prop::collection::vec((any::<bool>(), any::<bool>()), 1..32)
        ) {
            let mut backend = ScriptedBackend::new();
            let mut input = manager();
            backend.plug_gamepad(0, GamepadSample::new());
            input.handle_event(&mut backend, DeviceEvent::Added(0));
            for &(key, pad) in &frames {
                backend.set_key(KeyCode::Space, key);
                let sample = if pad {
                    GamepadSample::new().with_button(GamepadButton::A)
                } else {
                    GamepadSample::new()
                };
                backend.set_gamepad(0, sample);
                backend.set_mouse_buttons(if key { MouseButtons::LEFT } else { MouseButtons::NONE });
                input.update(&backend);
                for action in [JUMP, MOVE_LEFT, FIRE] {
                    prop_assert!(!input.action_check(action));
                    prop_assert!(!input.action_check_pressed(action));
                    prop_assert!(!input.action_check_released(action));
                }
            }
        }

        #[test]
        fn prop_bind_out_of_range_never_writes(action in 3usize..1000, slot in 2usize..1000) {
            let mut input = manager();
            prop_assert!(!input.action_set_key(action, KeyCode::KeyQ, 0));
            prop_assert!(!input.action_set_key(JUMP, KeyCode::KeyQ, slot));
            prop_assert!(!input.action_set_button(action, GamepadButton::B, GamepadSelector::First, slot));
            for id in 0..input.action_count() {
                prop_assert!(input.action_binding(id).unwrap().is_unbound());
            }
        }

        #[test]
        fn prop_axis_boundary(deadzone in 0u16..=32767, offset in 0i32..2) {
            let mut backend = ScriptedBackend::new();
            let mut input = manager();
            input.set_deadzone(deadzone);
            backend.plug_gamepad(0, GamepadSample::new());
            input.handle_event(&mut backend, DeviceEvent::Added(0));

            let value = (i32::from(deadzone) + offset).min(i32::from(i16::MAX)) as i16;
            backend.set_gamepad(0, GamepadSample::new().with_axis(GamepadAxis::RightY, value));
            input.update(&backend);
            let down = input.gamepad_check(GamepadButton::RightStickDown, GamepadSelector::First);
            let up = input.gamepad_check(GamepadButton::RightStickUp, GamepadSelector::First);
            prop_assert_eq!(down, i32::from(value) > i32::from(deadzone));
            prop_assert!(!up);
        }
    }
}
