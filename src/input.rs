use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Directional controls currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything the simulation needs from the player for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub controls: ControlState,
    /// Fire presses (released -> pressed edges) since the previous tick
    pub fire_presses: u32,
    pub quit: bool,
    pub toggle_pause: bool,
    pub restart: bool,
}

impl InputFrame {
    pub fn holding(controls: ControlState) -> Self {
        Self {
            controls,
            ..Self::default()
        }
    }

    pub fn fire() -> Self {
        Self {
            fire_presses: 1,
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

/// Source of one [`InputFrame`] per tick.
pub trait InputSource {
    fn poll(&mut self) -> color_eyre::Result<InputFrame>;
}

/// Reads crossterm key events and folds them into per-tick input frames.
///
/// With keyboard enhancement the terminal reports key releases, so held keys
/// stay held until released. Without it there are no releases, so a key only
/// counts as held on ticks where a press or auto-repeat arrives.
pub struct InputManager {
    controls: ControlState,
    fire_held: bool,
    reports_releases: bool,
    pending: InputFrame,
}

impl InputManager {
    pub fn new(reports_releases: bool) -> Self {
        Self {
            controls: ControlState::default(),
            fire_held: false,
            reports_releases,
            pending: InputFrame::default(),
        }
    }

    /// Processes a key event and updates held controls and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event),
            KeyEventKind::Repeat => {
                // Auto-repeat keeps movement going but never re-fires
                self.set_direction(key_event.code, true);
            }
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        // Quit keys work in any phase
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.pending.quit = true;
            return;
        }

        match key_event.code {
            KeyCode::Char('p') | KeyCode::Char('P') => self.pending.toggle_pause = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.pending.restart = true,
            KeyCode::Char(' ') => {
                if !self.fire_held {
                    self.pending.fire_presses += 1;
                }
                // Without release events every press is a fresh edge
                self.fire_held = self.reports_releases;
            }
            code => self.set_direction(code, true),
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        if code == KeyCode::Char(' ') {
            self.fire_held = false;
        } else {
            self.set_direction(code, false);
        }
    }

    fn set_direction(&mut self, code: KeyCode, held: bool) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => self.controls.up = held,
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => self.controls.down = held,
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => self.controls.left = held,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => self.controls.right = held,
            _ => {}
        }
    }

    /// Hands out the frame gathered since the last call and starts a new one
    pub fn take_frame(&mut self) -> InputFrame {
        let frame = InputFrame {
            controls: self.controls,
            ..std::mem::take(&mut self.pending)
        };
        if !self.reports_releases {
            self.controls = ControlState::default();
        }
        frame
    }
}

impl InputSource for InputManager {
    /// Drains every pending terminal event without blocking.
    fn poll(&mut self) -> color_eyre::Result<InputFrame> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event),
                Event::Resize(_, _) => {
                    // The renderer rescales from the frame area every tick
                }
                _ => {}
            }
        }
        Ok(self.take_frame())
    }
}

/// Replays a fixed list of frames, then keeps asking to quit.
///
/// Handy for driving the game loop headless.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: std::collections::VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> color_eyre::Result<InputFrame> {
        Ok(self.frames.pop_front().unwrap_or_else(InputFrame::quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
    }

    #[test]
    fn test_held_keys_persist_until_release() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Left));
        input.handle_key_event(press(KeyCode::Char('w')));

        let frame = input.take_frame();
        assert!(frame.controls.left && frame.controls.up);
        assert!(input.take_frame().controls.left);

        input.handle_key_event(release(KeyCode::Left));
        let frame = input.take_frame();
        assert!(!frame.controls.left);
        assert!(frame.controls.up);
    }

    #[test]
    fn test_opposite_keys_can_both_be_held() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Left));
        input.handle_key_event(press(KeyCode::Right));
        let frame = input.take_frame();
        assert!(frame.controls.left && frame.controls.right);
    }

    #[test]
    fn test_fire_counts_press_edges_only() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char(' ')));
        input.handle_key_event(repeat(KeyCode::Char(' ')));
        input.handle_key_event(press(KeyCode::Char(' ')));
        assert_eq!(input.take_frame().fire_presses, 1);

        // Still held, nothing new
        assert_eq!(input.take_frame().fire_presses, 0);

        input.handle_key_event(release(KeyCode::Char(' ')));
        input.handle_key_event(press(KeyCode::Char(' ')));
        input.handle_key_event(release(KeyCode::Char(' ')));
        input.handle_key_event(press(KeyCode::Char(' ')));
        assert_eq!(input.take_frame().fire_presses, 2);
    }

    #[test]
    fn test_without_releases_every_press_fires() {
        let mut input = InputManager::new(false);
        input.handle_key_event(press(KeyCode::Char(' ')));
        input.handle_key_event(press(KeyCode::Char(' ')));
        assert_eq!(input.take_frame().fire_presses, 2);
    }

    #[test]
    fn test_without_releases_held_space_fires_on_each_auto_repeat() {
        // Legacy terminals deliver auto-repeat of a held key as more presses
        let mut input = InputManager::new(false);
        for _ in 0..5 {
            input.handle_key_event(press(KeyCode::Char(' ')));
            assert_eq!(input.take_frame().fire_presses, 1);
        }
    }

    #[test]
    fn test_without_releases_movement_lasts_one_frame() {
        let mut input = InputManager::new(false);
        input.handle_key_event(press(KeyCode::Char('d')));
        assert!(input.take_frame().controls.right);
        assert!(!input.take_frame().controls.right);
    }

    #[test]
    fn test_one_shot_actions_reset_each_frame() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('p')));
        input.handle_key_event(press(KeyCode::Char('R')));
        let frame = input.take_frame();
        assert!(frame.toggle_pause);
        assert!(frame.restart);

        let frame = input.take_frame();
        assert!(!frame.toggle_pause);
        assert!(!frame.restart);
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut input = InputManager::new(true);
            input.handle_key_event(key);
            assert!(input.take_frame().quit, "{key:?} should quit");
        }
    }

    #[test]
    fn test_scripted_input_quits_when_exhausted() {
        let mut input = ScriptedInput::new([InputFrame::fire()]);
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.poll().unwrap().fire_presses, 1);
        assert!(input.poll().unwrap().quit);
    }
}
