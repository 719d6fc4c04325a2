// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! MIDIFlux — re-exports [`midiflux_core`] as the public entry point for
//! applications that embed the dispatch engine directly.
//!
//! The daemon binary (`midiflux-daemon`) is the reference host: it wires a
//! `midir`-backed hardware adapter and concrete effectors
//! (keyboard/mouse/game-controller/process/audio) around this engine's
//! [`EffectorSet`](midiflux_core::EffectorSet) trait.

pub use midiflux_core::*;
