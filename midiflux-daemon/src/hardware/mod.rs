// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Hardware Adapter (C1, SPEC_FULL.md §4.1): the `midir`-backed concrete
//! implementation of the contract `midiflux-core` treats as external.

pub mod midi_adapter;

pub use midi_adapter::MidirAdapter;

use midir::MidiInput;

/// Enumerates available MIDI input port names, for the daemon's wildcard
/// device block (`DeviceName: "*"`) and the diagnostic binary.
pub fn enumerate_input_names() -> Result<Vec<String>, String> {
    let midi_in = MidiInput::new("MIDIFlux Enumerate").map_err(|e| format!("failed to open MIDI input: {e}"))?;
    midi_in
        .ports()
        .iter()
        .map(|p| midi_in.port_name(p).map_err(|e| format!("failed to read port name: {e}")))
        .collect()
}
