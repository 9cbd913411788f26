// Keyboard-to-controller mapping
//
// Translates winit key events into controller button snapshots. The window
// feeds key presses into a shared `KeyboardHandler`; a `KeyboardController`
// per player implements `ControllerInput` on top of it, including turbo A/B
// resampled every fourth frame.

use super::{Button, ButtonState, ControllerInput};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Which player's controller a mapping belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

/// Key bindings for one player
#[derive(Debug, Clone)]
pub struct KeyboardMapping {
    pub button_a: KeyCode,
    pub button_b: KeyCode,
    pub select: KeyCode,
    pub start: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    /// Held turbo keys fire A/B on every fourth frame
    pub turbo_a: Option<KeyCode>,
    pub turbo_b: Option<KeyCode>,
}

impl KeyboardMapping {
    /// Player 1 defaults: arrows + Z/X, Enter for Start, Right Shift for
    /// Select, S/A for turbo
    pub fn player1_default() -> Self {
        Self {
            button_a: KeyCode::KeyX,
            button_b: KeyCode::KeyZ,
            select: KeyCode::ShiftRight,
            start: KeyCode::Enter,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            turbo_a: Some(KeyCode::KeyS),
            turbo_b: Some(KeyCode::KeyA),
        }
    }

    /// Player 2 defaults: WASD layout with K/J for A/B
    pub fn player2_default() -> Self {
        Self {
            button_a: KeyCode::KeyK,
            button_b: KeyCode::KeyJ,
            select: KeyCode::KeyT,
            start: KeyCode::KeyY,
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            turbo_a: Some(KeyCode::KeyI),
            turbo_b: Some(KeyCode::KeyU),
        }
    }

    fn key_for(&self, button: Button) -> KeyCode {
        match button {
            Button::A => self.button_a,
            Button::B => self.button_b,
            Button::Select => self.select,
            Button::Start => self.start,
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
        }
    }
}

/// Tracks the set of held keys and resolves them to button snapshots
pub struct KeyboardHandler {
    player1: KeyboardMapping,
    player2: KeyboardMapping,
    pressed: HashSet<KeyCode>,
}

impl KeyboardHandler {
    pub fn new() -> Self {
        Self {
            player1: KeyboardMapping::player1_default(),
            player2: KeyboardMapping::player2_default(),
            pressed: HashSet::new(),
        }
    }

    /// Record a key press from the window event loop
    pub fn key_pressed(&mut self, key: PhysicalKey) {
        if let PhysicalKey::Code(code) = key {
            self.pressed.insert(code);
        }
    }

    /// Record a key release from the window event loop
    pub fn key_released(&mut self, key: PhysicalKey) {
        if let PhysicalKey::Code(code) = key {
            self.pressed.remove(&code);
        }
    }

    fn mapping(&self, player: Player) -> &KeyboardMapping {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }

    /// Snapshot the button state for one player
    ///
    /// Turbo keys OR their button in on every fourth frame, which is fast
    /// enough for games that poll input once per frame.
    pub fn buttons(&self, player: Player, frame_counter: u64) -> ButtonState {
        let mapping = self.mapping(player);
        let mut state = [false; 8];
        for button in [
            Button::A,
            Button::B,
            Button::Select,
            Button::Start,
            Button::Up,
            Button::Down,
            Button::Left,
            Button::Right,
        ] {
            state[button as usize] = self.pressed.contains(&mapping.key_for(button));
        }

        if frame_counter & 3 == 0 {
            if let Some(key) = mapping.turbo_a {
                state[Button::A as usize] |= self.pressed.contains(&key);
            }
            if let Some(key) = mapping.turbo_b {
                state[Button::B as usize] |= self.pressed.contains(&key);
            }
        }
        state
    }
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// `ControllerInput` adapter: one player's view of the shared keyboard
pub struct KeyboardController {
    handler: Rc<RefCell<KeyboardHandler>>,
    player: Player,
}

impl KeyboardController {
    pub fn new(handler: Rc<RefCell<KeyboardHandler>>, player: Player) -> Self {
        Self { handler, player }
    }
}

impl ControllerInput for KeyboardController {
    fn flush(&mut self, frame_counter: u64) -> ButtonState {
        self.handler.borrow().buttons(self.player, frame_counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_follow_pressed_keys() {
        let mut handler = KeyboardHandler::new();

        handler.key_pressed(PhysicalKey::Code(KeyCode::KeyX));
        handler.key_pressed(PhysicalKey::Code(KeyCode::ArrowLeft));

        let state = handler.buttons(Player::One, 1);
        assert!(state[Button::A as usize]);
        assert!(state[Button::Left as usize]);
        assert!(!state[Button::B as usize]);

        handler.key_released(PhysicalKey::Code(KeyCode::KeyX));
        let state = handler.buttons(Player::One, 1);
        assert!(!state[Button::A as usize]);
    }

    #[test]
    fn test_turbo_fires_every_fourth_frame() {
        let mut handler = KeyboardHandler::new();
        handler.key_pressed(PhysicalKey::Code(KeyCode::KeyS)); // turbo A

        assert!(handler.buttons(Player::One, 0)[Button::A as usize]);
        assert!(!handler.buttons(Player::One, 1)[Button::A as usize]);
        assert!(!handler.buttons(Player::One, 3)[Button::A as usize]);
        assert!(handler.buttons(Player::One, 4)[Button::A as usize]);
    }

    #[test]
    fn test_players_map_independently() {
        let mut handler = KeyboardHandler::new();
        handler.key_pressed(PhysicalKey::Code(KeyCode::KeyK));

        assert!(handler.buttons(Player::Two, 1)[Button::A as usize]);
        assert!(!handler.buttons(Player::One, 1)[Button::A as usize]);
    }

    #[test]
    fn test_keyboard_controller_flush() {
        let handler = Rc::new(RefCell::new(KeyboardHandler::new()));
        handler
            .borrow_mut()
            .key_pressed(PhysicalKey::Code(KeyCode::Enter));

        let mut ctrl = KeyboardController::new(handler.clone(), Player::One);
        let state = ctrl.flush(1);
        assert!(state[Button::Start as usize]);
    }
}
