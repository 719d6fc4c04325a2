// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Effector capability traits (spec §6 "Effector interfaces").
//!
//! An effector is an external capability — keyboard, mouse, gamepad,
//! MIDI-out, audio, process launcher — that actions drive. None of it is
//! implemented here: `midiflux-daemon` supplies concrete impls (`enigo`,
//! `vigem-client`, `rodio`, `std::process::Command`, `midir`) behind these
//! trait objects, the same division of labor the teacher keeps between
//! `conductor-core` (defines `Action`) and `conductor-daemon`
//! (`ActionExecutor` owns the real `enigo::Enigo`).

use crate::error::ActionError;

/// Platform-independent key identifier. The daemon's `enigo`-backed
/// keyboard effector does the translation to a real virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct KeyCode(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ModifierKey {
    Shift,
    Control,
    Alt,
    Meta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    LeftThumb,
    RightThumb,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

/// `key_down(vk)`, `key_up(vk)`, `tap(vk)`, `toggle(vk)` (spec §6).
pub trait KeyboardEffector: Send + Sync {
    fn key_down(&self, key: KeyCode) -> Result<(), ActionError>;
    fn key_up(&self, key: KeyCode) -> Result<(), ActionError>;
    fn tap(&self, key: KeyCode) -> Result<(), ActionError> {
        self.key_down(key)?;
        self.key_up(key)
    }
    fn modifier_down(&self, modifier: ModifierKey) -> Result<(), ActionError>;
    fn modifier_up(&self, modifier: ModifierKey) -> Result<(), ActionError>;
}

/// `click(button)`, `scroll(direction, amount)` (spec §6).
pub trait MouseEffector: Send + Sync {
    fn click(&self, button: MouseButton) -> Result<(), ActionError>;
    fn scroll(&self, direction: ScrollDirection, amount: i32) -> Result<(), ActionError>;
}

/// `button_down(idx, btn)`, `button_up(idx, btn)`, `set_axis(idx, axis, signed_value)`.
pub trait GamepadEffector: Send + Sync {
    fn button_down(&self, pad_index: u8, button: GamepadButton) -> Result<(), ActionError>;
    fn button_up(&self, pad_index: u8, button: GamepadButton) -> Result<(), ActionError>;
    fn set_axis(&self, pad_index: u8, axis: GamepadAxis, signed_value: i16) -> Result<(), ActionError>;
}

/// An opaque outbound MIDI message, constructed by the MIDI-out actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiOutputCommand {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    SysEx { bytes: Vec<u8> },
}

/// `send(device_id, MidiOutputCommand)`.
pub trait MidiOutputEffector: Send + Sync {
    fn send(&self, device_id: &str, command: MidiOutputCommand) -> Result<(), ActionError>;
}

/// `preload(path) -> asset_id`, `play(asset_id)`. Preloading happens at
/// profile load (spec §9 open question resolution, see DESIGN.md); `play`
/// itself must not decode.
pub trait AudioEffector: Send + Sync {
    fn preload(&self, path: &str) -> Result<String, ActionError>;
    fn play(&self, asset_id: &str) -> Result<(), ActionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Shell {
    PowerShell,
    Cmd,
    None,
}

/// `run(shell, command, hidden, wait_for_exit) -> exit_code?`.
pub trait ProcessEffector: Send + Sync {
    fn run(
        &self,
        shell: Shell,
        command: &str,
        hidden: bool,
        wait_for_exit: bool,
    ) -> Result<Option<i32>, ActionError>;
}

/// The full bundle of effector capabilities an action tree may reference,
/// held by capability reference only (spec §3 "Ownership").
pub struct EffectorSet {
    pub keyboard: std::sync::Arc<dyn KeyboardEffector>,
    pub mouse: std::sync::Arc<dyn MouseEffector>,
    pub gamepad: std::sync::Arc<dyn GamepadEffector>,
    pub midi_output: std::sync::Arc<dyn MidiOutputEffector>,
    pub audio: std::sync::Arc<dyn AudioEffector>,
    pub process: std::sync::Arc<dyn ProcessEffector>,
}
