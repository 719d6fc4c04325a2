// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Concrete action kind implementations, dispatched by [`dispatch`] from
//! [`crate::action::Action::execute`].

pub mod alternating;
pub mod conditional;
pub mod relative_cc;
pub mod sequence;
pub mod simple;
pub mod stateful;

use crate::action::{Action, ExecutionContext};
use crate::error::ActionError;

/// Routes an action node to its kind's implementation by `action.kind`.
///
/// The loader (`profile::loader`) guarantees `kind` names a registered tag
/// before an `Action` is ever constructed (spec §4.4: unknown `$type`
/// fails the mapping at load time), so an unmatched kind here signals a
/// construction bug rather than a condition this function should recover
/// from — it is reported as an `ActionError` rather than panicking so a
/// single bad action tree can't take down the dispatcher.
pub fn dispatch(action: &Action, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    match action.kind.as_str() {
        "KeyPressRelease" => simple::key_press_release(action, ctx),
        "KeyDown" => simple::key_down(action, ctx),
        "KeyUp" => simple::key_up(action, ctx),
        "KeyToggle" => simple::key_toggle(action, ctx),
        "KeyModified" => simple::key_modified(action, ctx),
        "MouseClick" => simple::mouse_click(action, ctx),
        "MouseScroll" => simple::mouse_scroll(action, event_value, ctx),
        "GameControllerButtonDown" => simple::gamepad_button_down(action, ctx),
        "GameControllerButtonUp" => simple::gamepad_button_up(action, ctx),
        "GameControllerButton" => simple::gamepad_button_tap(action, ctx),
        "GameControllerAxis" => simple::gamepad_axis_action(action, event_value, ctx),
        "MidiNoteOn" => simple::midi_note_on(action, ctx),
        "MidiNoteOff" => simple::midi_note_off(action, ctx),
        "MidiControlChange" => simple::midi_control_change(action, ctx),
        "MidiSysEx" => simple::midi_sysex(action, ctx),
        "CommandExecution" => simple::command_execution(action, ctx),
        "Delay" => simple::delay(action, ctx),
        "PlaySound" => simple::play_sound(action, ctx),
        "SequenceAction" => sequence::execute(action, event_value, ctx),
        "ConditionalAction" => conditional::execute(action, event_value, ctx),
        "AlternatingAction" => alternating::execute(action, event_value, ctx),
        "RelativeCCAction" => relative_cc::execute(action, event_value, ctx),
        "StateSetAction" => stateful::state_set(action, ctx),
        "StateIncreaseAction" => stateful::state_increase(action, ctx),
        "StateDecreaseAction" => stateful::state_decrease(action, ctx),
        "StateConditionalAction" => stateful::state_conditional(action, event_value, ctx),
        other => Err(ActionError::new(
            &action.description,
            format!("unrecognized action kind '{other}' reached dispatch"),
        )),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::action::{Action, ExecutionContext};
    use crate::effectors::*;
    use crate::error::ActionError;
    use crate::parameter::{ParamValue, ParameterBag};
    use crate::state::StateStore;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    /// A keyboard effector that logs every call and fails `key_down` for
    /// any key code in `fail_on`, used to exercise sequence error handling
    /// without depending on a real keyboard.
    #[derive(Default)]
    pub struct RecordingKeyboard {
        pub calls: Mutex<Vec<String>>,
        pub fail_on: Mutex<HashSet<u32>>,
    }
    impl RecordingKeyboard {
        pub fn fail_on(&self, code: u32) {
            self.fail_on.lock().unwrap().insert(code);
        }
    }
    impl KeyboardEffector for RecordingKeyboard {
        fn key_down(&self, key: KeyCode) -> Result<(), ActionError> {
            self.calls.lock().unwrap().push(format!("down:{}", key.0));
            if self.fail_on.lock().unwrap().contains(&key.0) {
                return Err(ActionError::new("test keyboard", "forced failure"));
            }
            Ok(())
        }
        fn key_up(&self, key: KeyCode) -> Result<(), ActionError> {
            self.calls.lock().unwrap().push(format!("up:{}", key.0));
            Ok(())
        }
        fn modifier_down(&self, _m: ModifierKey) -> Result<(), ActionError> {
            Ok(())
        }
        fn modifier_up(&self, _m: ModifierKey) -> Result<(), ActionError> {
            Ok(())
        }
    }

    pub struct RecordingMouse {
        pub calls: Mutex<Vec<String>>,
    }
    impl Default for RecordingMouse {
        fn default() -> Self {
            RecordingMouse { calls: Mutex::new(Vec::new()) }
        }
    }
    impl MouseEffector for RecordingMouse {
        fn click(&self, button: MouseButton) -> Result<(), ActionError> {
            self.calls.lock().unwrap().push(format!("click:{button:?}"));
            Ok(())
        }
        fn scroll(&self, direction: ScrollDirection, amount: i32) -> Result<(), ActionError> {
            self.calls.lock().unwrap().push(format!("scroll_{direction:?}:{amount}").to_lowercase());
            Ok(())
        }
    }

    pub struct NoopGamepad;
    impl GamepadEffector for NoopGamepad {
        fn button_down(&self, _i: u8, _b: GamepadButton) -> Result<(), ActionError> {
            Ok(())
        }
        fn button_up(&self, _i: u8, _b: GamepadButton) -> Result<(), ActionError> {
            Ok(())
        }
        fn set_axis(&self, _i: u8, _a: GamepadAxis, _v: i16) -> Result<(), ActionError> {
            Ok(())
        }
    }
    pub struct NoopMidiOut;
    impl MidiOutputEffector for NoopMidiOut {
        fn send(&self, _d: &str, _c: MidiOutputCommand) -> Result<(), ActionError> {
            Ok(())
        }
    }
    pub struct NoopAudio;
    impl AudioEffector for NoopAudio {
        fn preload(&self, _p: &str) -> Result<String, ActionError> {
            Ok("asset".into())
        }
        fn play(&self, _a: &str) -> Result<(), ActionError> {
            Ok(())
        }
    }
    pub struct NoopProcess;
    impl ProcessEffector for NoopProcess {
        fn run(&self, _s: Shell, _c: &str, _h: bool, _w: bool) -> Result<Option<i32>, ActionError> {
            Ok(None)
        }
    }

    /// A fully-wired test rig: real `StateStore`, recording keyboard/mouse,
    /// no-op everything else. Own the rig for the test's lifetime and call
    /// `.ctx()` to get an `ExecutionContext` borrowing from it.
    pub struct TestRig {
        pub keyboard: Arc<RecordingKeyboard>,
        pub mouse: Arc<RecordingMouse>,
        pub effectors: EffectorSet,
        pub state: StateStore,
    }

    impl TestRig {
        pub fn new() -> Self {
            let keyboard = Arc::new(RecordingKeyboard::default());
            let mouse = Arc::new(RecordingMouse::default());
            let effectors = EffectorSet {
                keyboard: keyboard.clone(),
                mouse: mouse.clone(),
                gamepad: Arc::new(NoopGamepad),
                midi_output: Arc::new(NoopMidiOut),
                audio: Arc::new(NoopAudio),
                process: Arc::new(NoopProcess),
            };
            TestRig { keyboard, mouse, effectors, state: StateStore::new() }
        }

        pub fn ctx(&self) -> ExecutionContext<'_> {
            ExecutionContext { state: &self.state, effectors: &self.effectors }
        }
    }

    pub fn key_action(kind: &str, key: i64) -> Action {
        let mut params = ParameterBag::new();
        params.set("Key", ParamValue::Integer(key));
        Action::new(kind, format!("{kind}({key})"), params)
    }
}
