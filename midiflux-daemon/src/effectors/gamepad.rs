// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Virtual game controller output. Windows gets a real `vigem-client`-backed
//! effector; every other platform gets a stub that returns
//! `ActionError::EffectorUnavailable`, mirroring the teacher's
//! `cfg(target_os = "windows")` / `cfg(not(windows))` split for
//! platform-specific backends (`action_executor.rs`'s volume control is the
//! closest analogue: a real Windows path and a graceful "not implemented"
//! fallback elsewhere).

use midiflux_core::effectors::{GamepadAxis, GamepadButton, GamepadEffector};
use midiflux_core::error::ActionError;

#[cfg(target_os = "windows")]
pub use windows_impl::VigemGamepadEffector;

#[cfg(target_os = "windows")]
mod windows_impl {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use vigem_client::{Client, TargetId, XButtons, XGamepad, Xbox360Wired};

    fn to_xbutton(button: GamepadButton) -> u16 {
        match button {
            GamepadButton::A => XButtons::A,
            GamepadButton::B => XButtons::B,
            GamepadButton::X => XButtons::X,
            GamepadButton::Y => XButtons::Y,
            GamepadButton::LeftBumper => XButtons::LB,
            GamepadButton::RightBumper => XButtons::RB,
            GamepadButton::Back => XButtons::BACK,
            GamepadButton::Start => XButtons::START,
            GamepadButton::LeftThumb => XButtons::LTHUMB,
            GamepadButton::RightThumb => XButtons::RTHUMB,
            GamepadButton::DPadUp => XButtons::UP,
            GamepadButton::DPadDown => XButtons::DOWN,
            GamepadButton::DPadLeft => XButtons::LEFT,
            GamepadButton::DPadRight => XButtons::RIGHT,
        }
    }

    struct Pad {
        target: Xbox360Wired<Client>,
        state: XGamepad,
    }

    /// One virtual Xbox 360 pad per `pad_index`, created lazily on first use
    /// (spec §6 "virtual-pad effector"; ViGEmBus must already be installed
    /// on the host — `Client::connect` failing surfaces as
    /// `EffectorUnavailable`, never a panic).
    pub struct VigemGamepadEffector {
        client: Mutex<Option<Client>>,
        pads: Mutex<HashMap<u8, Pad>>,
    }

    impl VigemGamepadEffector {
        pub fn new() -> Self {
            VigemGamepadEffector { client: Mutex::new(None), pads: Mutex::new(HashMap::new()) }
        }

        fn with_pad<F>(&self, pad_index: u8, f: F) -> Result<(), ActionError>
        where
            F: FnOnce(&mut XGamepad),
        {
            let mut pads = self.pads.lock();
            if !pads.contains_key(&pad_index) {
                let mut client_guard = self.client.lock();
                if client_guard.is_none() {
                    let client = Client::connect()
                        .map_err(|e| ActionError::EffectorUnavailable(format!("ViGEmBus not available: {e}")))?;
                    *client_guard = Some(client);
                }
                let client = client_guard.take().unwrap();
                let mut target = Xbox360Wired::new(client, TargetId::XBOX360_WIRED);
                target
                    .plugin()
                    .map_err(|e| ActionError::EffectorUnavailable(format!("failed to plug in virtual pad {pad_index}: {e}")))?;
                target
                    .wait_ready()
                    .map_err(|e| ActionError::EffectorUnavailable(format!("virtual pad {pad_index} not ready: {e}")))?;
                pads.insert(pad_index, Pad { target, state: XGamepad::default() });
            }

            let pad = pads.get_mut(&pad_index).expect("pad just inserted");
            f(&mut pad.state);
            pad.target
                .update(&pad.state)
                .map_err(|e| ActionError::new(format!("update virtual pad {pad_index}"), e))
        }
    }

    impl GamepadEffector for VigemGamepadEffector {
        fn button_down(&self, pad_index: u8, button: GamepadButton) -> Result<(), ActionError> {
            self.with_pad(pad_index, |state| state.buttons.raw |= to_xbutton(button))
        }

        fn button_up(&self, pad_index: u8, button: GamepadButton) -> Result<(), ActionError> {
            self.with_pad(pad_index, |state| state.buttons.raw &= !to_xbutton(button))
        }

        fn set_axis(&self, pad_index: u8, axis: GamepadAxis, signed_value: i16) -> Result<(), ActionError> {
            self.with_pad(pad_index, |state| match axis {
                GamepadAxis::LeftX => state.thumb_lx = signed_value,
                GamepadAxis::LeftY => state.thumb_ly = signed_value,
                GamepadAxis::RightX => state.thumb_rx = signed_value,
                GamepadAxis::RightY => state.thumb_ry = signed_value,
                GamepadAxis::LeftTrigger => state.left_trigger = (signed_value >> 8) as u8,
                GamepadAxis::RightTrigger => state.right_trigger = (signed_value >> 8) as u8,
            })
        }
    }
}

/// Non-Windows stand-in: game-controller output has no cross-platform
/// virtual-HID API, so every call fails with `EffectorUnavailable` rather
/// than silently no-opping (spec §7: effector failures are reported per
/// action, not swallowed).
#[cfg(not(target_os = "windows"))]
pub struct NullGamepadEffector;

#[cfg(not(target_os = "windows"))]
impl NullGamepadEffector {
    pub fn new() -> Self {
        NullGamepadEffector
    }
}

#[cfg(not(target_os = "windows"))]
impl GamepadEffector for NullGamepadEffector {
    fn button_down(&self, _pad_index: u8, _button: GamepadButton) -> Result<(), ActionError> {
        Err(ActionError::EffectorUnavailable("virtual game controller output is Windows-only".into()))
    }

    fn button_up(&self, _pad_index: u8, _button: GamepadButton) -> Result<(), ActionError> {
        Err(ActionError::EffectorUnavailable("virtual game controller output is Windows-only".into()))
    }

    fn set_axis(&self, _pad_index: u8, _axis: GamepadAxis, _signed_value: i16) -> Result<(), ActionError> {
        Err(ActionError::EffectorUnavailable("virtual game controller output is Windows-only".into()))
    }
}

#[cfg(all(test, not(target_os = "windows")))]
mod tests {
    use super::*;

    #[test]
    fn null_effector_reports_unavailable() {
        let gamepad = NullGamepadEffector::new();
        let err = gamepad.button_down(0, GamepadButton::A).unwrap_err();
        assert!(matches!(err, ActionError::EffectorUnavailable(_)));
    }
}
