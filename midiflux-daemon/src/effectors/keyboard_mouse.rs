// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Keyboard and mouse effectors backed by `enigo`, grounded on
//! `midimon-daemon::action_executor::ActionExecutor`'s keystroke/mouse
//! handling but split across the `KeyboardEffector`/`MouseEffector` traits
//! and wrapped in a `Mutex` since `Enigo` itself isn't `Sync`.

use enigo::{Button, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use midiflux_core::effectors::{KeyCode, KeyboardEffector, ModifierKey, MouseButton, MouseEffector, ScrollDirection};
use midiflux_core::error::ActionError;
use parking_lot::Mutex;

fn to_enigo_key(code: KeyCode) -> Key {
    Key::Unicode(char::from_u32(code.0).unwrap_or('\u{0}'))
}

fn to_enigo_modifier(modifier: ModifierKey) -> Key {
    match modifier {
        ModifierKey::Shift => Key::Shift,
        ModifierKey::Control => Key::Control,
        ModifierKey::Alt => Key::Alt,
        ModifierKey::Meta => Key::Meta,
    }
}

fn to_enigo_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

/// Owns the single `Enigo` instance; `enigo::Enigo` requires `&mut self` for
/// every call, so all effector methods take the lock for the duration of
/// the synthesized event (spec §6: effectors are called from the dispatch
/// thread, one event at a time per action).
pub struct EnigoEffector {
    enigo: Mutex<Enigo>,
}

impl EnigoEffector {
    pub fn new() -> Result<Self, ActionError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| ActionError::EffectorUnavailable(format!("enigo init failed: {e}")))?;
        Ok(EnigoEffector { enigo: Mutex::new(enigo) })
    }
}

impl KeyboardEffector for EnigoEffector {
    fn key_down(&self, key: KeyCode) -> Result<(), ActionError> {
        self.enigo
            .lock()
            .key(to_enigo_key(key), Direction::Press)
            .map_err(|e| ActionError::new(format!("key_down({})", key.0), e))
    }

    fn key_up(&self, key: KeyCode) -> Result<(), ActionError> {
        self.enigo
            .lock()
            .key(to_enigo_key(key), Direction::Release)
            .map_err(|e| ActionError::new(format!("key_up({})", key.0), e))
    }

    fn modifier_down(&self, modifier: ModifierKey) -> Result<(), ActionError> {
        self.enigo
            .lock()
            .key(to_enigo_modifier(modifier), Direction::Press)
            .map_err(|e| ActionError::new(format!("modifier_down({modifier:?})"), e))
    }

    fn modifier_up(&self, modifier: ModifierKey) -> Result<(), ActionError> {
        self.enigo
            .lock()
            .key(to_enigo_modifier(modifier), Direction::Release)
            .map_err(|e| ActionError::new(format!("modifier_up({modifier:?})"), e))
    }
}

impl MouseEffector for EnigoEffector {
    fn click(&self, button: MouseButton) -> Result<(), ActionError> {
        self.enigo
            .lock()
            .button(to_enigo_button(button), Direction::Click)
            .map_err(|e| ActionError::new(format!("mouse click({button:?})"), e))
    }

    fn scroll(&self, direction: ScrollDirection, amount: i32) -> Result<(), ActionError> {
        let mut enigo = self.enigo.lock();
        let result = match direction {
            ScrollDirection::Up => enigo.scroll(-amount, enigo::Axis::Vertical),
            ScrollDirection::Down => enigo.scroll(amount, enigo::Axis::Vertical),
            ScrollDirection::Left => enigo.scroll(-amount, enigo::Axis::Horizontal),
            ScrollDirection::Right => enigo.scroll(amount, enigo::Axis::Horizontal),
        };
        result.map_err(|e| ActionError::new(format!("mouse scroll({direction:?}, {amount})"), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_code_maps_to_unicode() {
        assert_eq!(to_enigo_key(KeyCode('a' as u32)), Key::Unicode('a'));
    }

    #[test]
    fn modifier_maps_are_distinct() {
        assert_ne!(to_enigo_modifier(ModifierKey::Shift), to_enigo_modifier(ModifierKey::Control));
        assert_ne!(to_enigo_modifier(ModifierKey::Alt), to_enigo_modifier(ModifierKey::Meta));
    }

    #[test]
    fn button_maps_are_distinct() {
        assert_ne!(to_enigo_button(MouseButton::Left), to_enigo_button(MouseButton::Right));
    }
}
