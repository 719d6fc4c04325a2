// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Concrete effector implementations (spec §6, SPEC_FULL.md §6).

pub mod audio;
pub mod gamepad;
pub mod keyboard_mouse;
pub mod midi_output;
pub mod process;

use midiflux_core::effectors::EffectorSet;
use midiflux_core::error::ActionError;
use std::sync::Arc;

/// Builds the real effector bundle the daemon hands to `ProfileManager`.
pub fn build_effector_set() -> Result<EffectorSet, ActionError> {
    let enigo = Arc::new(keyboard_mouse::EnigoEffector::new()?);

    #[cfg(target_os = "windows")]
    let gamepad: Arc<dyn midiflux_core::effectors::GamepadEffector> = Arc::new(gamepad::VigemGamepadEffector::new());
    #[cfg(not(target_os = "windows"))]
    let gamepad: Arc<dyn midiflux_core::effectors::GamepadEffector> = Arc::new(gamepad::NullGamepadEffector::new());

    let audio: Arc<dyn midiflux_core::effectors::AudioEffector> = Arc::new(audio::RodioAudioEffector::new()?);

    Ok(EffectorSet {
        keyboard: enigo.clone(),
        mouse: enigo,
        gamepad,
        midi_output: Arc::new(midi_output::MidirOutputEffector::new()),
        audio,
        process: Arc::new(process::CommandProcessEffector::new()),
    })
}
