use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::entities::GameState;
use crate::game::Steer;

/// Without release events a direction key counts as held for this long
/// after its last press or repeat. Longer than the usual 500-660ms delay
/// before a terminal's first auto-repeat.
pub const HOLD_WINDOW: Duration = Duration::from_millis(700);

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Steer(Steer),
    Fire,
    Restart,
    Quit,
}

/// Keys that can be held down for continuous movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
            _ => None,
        }
    }

    fn opposite(self) -> Self {
        match self {
            Key::Left => Key::Right,
            Key::Right => Key::Left,
        }
    }

    fn steer(self) -> Steer {
        match self {
            Key::Left => Steer::Left,
            Key::Right => Steer::Right,
        }
    }
}

/// Manages input polling and translates raw key events into game actions.
///
/// Direction keys live in an explicit held set. When one is released the
/// set decides what happens next: keep going the other way if that key is
/// still down, otherwise stop. Release order never matters.
pub struct InputManager {
    /// Held direction keys and when they were last seen pressed
    held: HashMap<Key, Instant>,
    /// Whether the terminal sends key release events
    reports_release: bool,
    actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashMap::new(),
            reports_release,
            actions: Vec::new(),
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    /// Direction of the most recently pressed key still held
    pub fn current_steer(&self) -> Steer {
        self.held
            .iter()
            .max_by_key(|(_, seen)| **seen)
            .map_or(Steer::Idle, |(key, _)| key.steer())
    }

    /// Waits up to `timeout` for input, then drains everything pending
    pub fn poll_events(&mut self, timeout: Duration, game_state: GameState) -> color_eyre::Result<()> {
        let mut wait = timeout;
        while event::poll(wait)? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state, Instant::now());
            }
            wait = Duration::ZERO;
        }
        Ok(())
    }

    /// Processes a key event and updates key state and pending actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state, now),
            KeyEventKind::Repeat => self.handle_key_repeat(key_event.code, now),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.actions.push(InputAction::Quit);
            return;
        }

        match key_event.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if game_state == GameState::GameOver {
                    self.actions.push(InputAction::Restart);
                }
            }
            KeyCode::Char(' ') => self.actions.push(InputAction::Fire),
            code => {
                if let Some(key) = Key::from_code(code) {
                    // Terminals without release events report holds as
                    // repeated presses
                    let fresh = self.held.insert(key, now).is_none();
                    if fresh || self.reports_release {
                        self.actions.push(InputAction::Steer(key.steer()));
                    }
                }
            }
        }
    }

    fn handle_key_repeat(&mut self, code: KeyCode, now: Instant) {
        if code == KeyCode::Char(' ') {
            self.actions.push(InputAction::Fire);
        } else if let Some(key) = Key::from_code(code)
            && let Some(seen) = self.held.get_mut(&key)
        {
            *seen = now;
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(key) = Key::from_code(code) {
            self.release(key);
        }
    }

    fn release(&mut self, key: Key) {
        if self.held.remove(&key).is_none() {
            return;
        }
        let steer = if self.is_held(key.opposite()) {
            key.opposite().steer()
        } else {
            Steer::Idle
        };
        self.actions.push(InputAction::Steer(steer));
    }

    /// Releases keys that went quiet, for terminals that never report releases
    pub fn expire_stale(&mut self, now: Instant) {
        if self.reports_release {
            return;
        }
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, seen)| now.saturating_duration_since(**seen) > HOLD_WINDOW)
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            self.release(key);
        }
    }

    /// Returns the actions gathered since the last call, oldest first
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.actions)
    }
}
