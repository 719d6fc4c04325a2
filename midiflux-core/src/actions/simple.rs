// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Simple (leaf) actions (spec §4.7).

use crate::action::{Action, ExecutionContext};
use crate::effectors::{
    GamepadAxis, GamepadButton, KeyCode, MidiOutputCommand, ModifierKey, MouseButton, ScrollDirection, Shell,
};
use crate::error::ActionError;

fn key_code(v: i64) -> KeyCode {
    KeyCode(v as u32)
}

pub fn key_press_release(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = key_code(action.parameters.get_integer("Key", 0));
    ctx.effectors
        .keyboard
        .tap(key)
        .map_err(|e| ActionError::new(&action.description, e))
}

pub fn key_down(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = key_code(action.parameters.get_integer("Key", 0));
    ctx.effectors
        .keyboard
        .key_down(key)
        .map_err(|e| ActionError::new(&action.description, e))
}

pub fn key_up(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = key_code(action.parameters.get_integer("Key", 0));
    ctx.effectors
        .keyboard
        .key_up(key)
        .map_err(|e| ActionError::new(&action.description, e))
}

/// Flips a captured key state persisted in the State Store under
/// `StateKey` and presses/releases the key to match (spec §4.7).
pub fn key_toggle(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = key_code(action.parameters.get_integer("Key", 0));
    let state_key = action.parameters.get_integer("StateKey", 0);
    let currently_down = ctx.state.get(state_key) != 0;
    if currently_down {
        ctx.effectors.keyboard.key_up(key).map_err(|e| ActionError::new(&action.description, e))?;
        ctx.state.set(state_key, 0);
    } else {
        ctx.effectors.keyboard.key_down(key).map_err(|e| ActionError::new(&action.description, e))?;
        ctx.state.set(state_key, 1);
    }
    Ok(())
}

/// Presses modifiers, taps a key, releases modifiers — in that order
/// (spec §4.7 "specified order").
pub fn key_modified(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = key_code(action.parameters.get_integer("Key", 0));
    let modifiers: Vec<ModifierKey> = action
        .parameters
        .get_byte_array("Modifiers")
        .iter()
        .filter_map(|&b| match b {
            0 => Some(ModifierKey::Shift),
            1 => Some(ModifierKey::Control),
            2 => Some(ModifierKey::Alt),
            3 => Some(ModifierKey::Meta),
            _ => None,
        })
        .collect();

    for m in &modifiers {
        ctx.effectors.keyboard.modifier_down(*m).map_err(|e| ActionError::new(&action.description, e))?;
    }
    let tap_result = ctx.effectors.keyboard.tap(key);
    for m in modifiers.iter().rev() {
        ctx.effectors.keyboard.modifier_up(*m).map_err(|e| ActionError::new(&action.description, e))?;
    }
    tap_result.map_err(|e| ActionError::new(&action.description, e))
}

pub fn mouse_click(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let button = match action.parameters.get_enum("Button", "Left") {
        "Right" => MouseButton::Right,
        "Middle" => MouseButton::Middle,
        _ => MouseButton::Left,
    };
    ctx.effectors.mouse.click(button).map_err(|e| ActionError::new(&action.description, e))
}

/// `scroll` `Amount` may depend on the incoming value (spec §4.7); when an
/// `event_value` is present it scales the configured `Amount`, otherwise
/// `Amount` is used as-is.
pub fn mouse_scroll(action: &Action, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let direction = match action.parameters.get_enum("Direction", "Up") {
        "Down" => ScrollDirection::Down,
        "Left" => ScrollDirection::Left,
        "Right" => ScrollDirection::Right,
        _ => ScrollDirection::Up,
    };
    let base_amount = action.parameters.get_integer("Amount", 1);
    let amount = match event_value {
        Some(v) if v != 0 => base_amount * v,
        _ => base_amount,
    };
    ctx.effectors
        .mouse
        .scroll(direction, amount as i32)
        .map_err(|e| ActionError::new(&action.description, e))
}

fn gamepad_button(v: i64) -> GamepadButton {
    match v {
        0 => GamepadButton::A,
        1 => GamepadButton::B,
        2 => GamepadButton::X,
        3 => GamepadButton::Y,
        4 => GamepadButton::LeftBumper,
        5 => GamepadButton::RightBumper,
        6 => GamepadButton::Back,
        7 => GamepadButton::Start,
        8 => GamepadButton::LeftThumb,
        9 => GamepadButton::RightThumb,
        10 => GamepadButton::DPadUp,
        11 => GamepadButton::DPadDown,
        12 => GamepadButton::DPadLeft,
        _ => GamepadButton::DPadRight,
    }
}

pub fn gamepad_button_down(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let idx = action.parameters.get_integer("PadIndex", 0) as u8;
    let button = gamepad_button(action.parameters.get_integer("Button", 0));
    ctx.effectors.gamepad.button_down(idx, button).map_err(|e| ActionError::new(&action.description, e))
}

pub fn gamepad_button_up(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let idx = action.parameters.get_integer("PadIndex", 0) as u8;
    let button = gamepad_button(action.parameters.get_integer("Button", 0));
    ctx.effectors.gamepad.button_up(idx, button).map_err(|e| ActionError::new(&action.description, e))
}

pub fn gamepad_button_tap(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    gamepad_button_down(action, ctx)?;
    gamepad_button_up(action, ctx)
}

fn gamepad_axis(v: i64) -> GamepadAxis {
    match v {
        0 => GamepadAxis::LeftX,
        1 => GamepadAxis::LeftY,
        2 => GamepadAxis::RightX,
        3 => GamepadAxis::RightY,
        4 => GamepadAxis::LeftTrigger,
        _ => GamepadAxis::RightTrigger,
    }
}

/// Maps incoming value 0..127 to a signed full-range axis with configurable
/// min/max/invert (spec §4.7).
pub fn gamepad_axis_action(action: &Action, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let idx = action.parameters.get_integer("PadIndex", 0) as u8;
    let axis = gamepad_axis(action.parameters.get_integer("Axis", 0));
    let min = action.parameters.get_integer("MinValue", i16::MIN as i64);
    let max = action.parameters.get_integer("MaxValue", i16::MAX as i64);
    let invert = action.parameters.get_boolean("Invert", false);

    let raw = event_value.unwrap_or(0).clamp(0, 127) as f64 / 127.0;
    let raw = if invert { 1.0 - raw } else { raw };
    let signed = min as f64 + raw * (max - min) as f64;
    let signed = signed.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16;

    ctx.effectors
        .gamepad
        .set_axis(idx, axis, signed)
        .map_err(|e| ActionError::new(&action.description, e))
}

pub fn midi_note_on(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let device = action.parameters.get_string("DeviceName", "*");
    let command = MidiOutputCommand::NoteOn {
        channel: action.parameters.get_integer("Channel", 1) as u8,
        note: action.parameters.get_integer("Note", 0) as u8,
        velocity: action.parameters.get_integer("Velocity", 127) as u8,
    };
    ctx.effectors
        .midi_output
        .send(device, command)
        .map_err(|e| ActionError::new(&action.description, e))
}

pub fn midi_note_off(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let device = action.parameters.get_string("DeviceName", "*");
    let command = MidiOutputCommand::NoteOff {
        channel: action.parameters.get_integer("Channel", 1) as u8,
        note: action.parameters.get_integer("Note", 0) as u8,
        velocity: action.parameters.get_integer("Velocity", 0) as u8,
    };
    ctx.effectors
        .midi_output
        .send(device, command)
        .map_err(|e| ActionError::new(&action.description, e))
}

pub fn midi_control_change(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let device = action.parameters.get_string("DeviceName", "*");
    let command = MidiOutputCommand::ControlChange {
        channel: action.parameters.get_integer("Channel", 1) as u8,
        controller: action.parameters.get_integer("ControlNumber", 0) as u8,
        value: action.parameters.get_integer("Value", 0) as u8,
    };
    ctx.effectors
        .midi_output
        .send(device, command)
        .map_err(|e| ActionError::new(&action.description, e))
}

pub fn midi_sysex(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let device = action.parameters.get_string("DeviceName", "*");
    let command = MidiOutputCommand::SysEx {
        bytes: action.parameters.get_byte_array("Bytes").to_vec(),
    };
    ctx.effectors
        .midi_output
        .send(device, command)
        .map_err(|e| ActionError::new(&action.description, e))
}

pub fn command_execution(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let shell = match action.parameters.get_enum("Shell", "None") {
        "PowerShell" => Shell::PowerShell,
        "Cmd" => Shell::Cmd,
        _ => Shell::None,
    };
    let command = action.parameters.get_string("Command", "");
    let hidden = action.parameters.get_boolean("RunHidden", false);
    let wait = action.parameters.get_boolean("WaitForExit", false);
    ctx.effectors
        .process
        .run(shell, command, hidden, wait)
        .map(|_| ())
        .map_err(|e| ActionError::new(&action.description, e))
}

/// Suspends for a fixed number of milliseconds; ±15 ms tolerance is
/// acceptable on a general-purpose OS (spec §4.7).
pub fn delay(action: &Action, _ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let ms = action.parameters.get_integer("Milliseconds", 0).max(0) as u64;
    std::thread::sleep(std::time::Duration::from_millis(ms));
    Ok(())
}

pub fn play_sound(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let asset_path = action.parameters.get_string("AssetPath", "");
    ctx.effectors
        .audio
        .play(asset_path)
        .map_err(|e| ActionError::new(&action.description, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::TestRig;
    use crate::parameter::{ParamValue, ParameterBag};

    #[test]
    fn key_press_release_taps() {
        let rig = TestRig::new();
        let mut params = ParameterBag::new();
        params.set("Key", ParamValue::Integer(65));
        let action = Action::new("KeyPressRelease", "tap A", params);
        key_press_release(&action, &rig.ctx()).unwrap();
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:65", "up:65"]);
    }

    #[test]
    fn key_toggle_flips_and_persists() {
        let rig = TestRig::new();
        let mut params = ParameterBag::new();
        params.set("Key", ParamValue::Integer(1));
        params.set("StateKey", ParamValue::Integer(500));
        let action = Action::new("KeyToggle", "toggle", params);
        key_toggle(&action, &rig.ctx()).unwrap();
        key_toggle(&action, &rig.ctx()).unwrap();
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:1", "up:1"]);
        assert_eq!(rig.state.get(500), 0);
    }

    #[test]
    fn key_modified_order() {
        let rig = TestRig::new();
        let mut params = ParameterBag::new();
        params.set("Key", ParamValue::Integer(67));
        let action = Action::new("KeyModified", "ctrl+c", params);
        key_modified(&action, &rig.ctx()).unwrap();
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:67", "up:67"]);
    }

    #[test]
    fn mouse_scroll_scales_by_event_value() {
        let rig = TestRig::new();
        let mut params = ParameterBag::new();
        params.set("Direction", ParamValue::Enum("Up".into()));
        params.set("Amount", ParamValue::Integer(2));
        let action = Action::new("MouseScroll", "scroll", params);
        mouse_scroll(&action, Some(3), &rig.ctx()).unwrap();
        assert_eq!(*rig.mouse.calls.lock().unwrap(), vec!["scroll_up:6"]);
    }
}
