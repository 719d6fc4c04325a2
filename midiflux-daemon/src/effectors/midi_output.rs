// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Outbound MIDI via `midir`, grounded on
//! `conductor-core::midi_output::MidiOutputManager` but trimmed to what
//! `MidiOutputEffector` needs: connect-by-name-or-first-available and send,
//! no virtual port creation (MIDIFlux only ever sends to real or
//! already-existing loopback ports; spec §6 names `send` as the only
//! operation).

use midiflux_core::effectors::{MidiOutputCommand, MidiOutputEffector};
use midiflux_core::error::ActionError;
use midir::{MidiOutput, MidiOutputConnection};
use parking_lot::Mutex;
use std::collections::HashMap;

fn encode(command: &MidiOutputCommand) -> Vec<u8> {
    match command {
        MidiOutputCommand::NoteOn { channel, note, velocity } => {
            vec![0x90 | (channel.saturating_sub(1) & 0x0F), *note, *velocity]
        }
        MidiOutputCommand::NoteOff { channel, note, velocity } => {
            vec![0x80 | (channel.saturating_sub(1) & 0x0F), *note, *velocity]
        }
        MidiOutputCommand::ControlChange { channel, controller, value } => {
            vec![0xB0 | (channel.saturating_sub(1) & 0x0F), *controller, *value]
        }
        MidiOutputCommand::SysEx { bytes } => bytes.clone(),
    }
}

pub struct MidirOutputEffector {
    connections: Mutex<HashMap<String, MidiOutputConnection>>,
}

impl MidirOutputEffector {
    pub fn new() -> Self {
        MidirOutputEffector { connections: Mutex::new(HashMap::new()) }
    }

    fn connect(&self, device_id: &str) -> Result<(), ActionError> {
        let midi_out =
            MidiOutput::new("MIDIFlux Output").map_err(|e| ActionError::new("open MIDI output", e))?;
        let ports = midi_out.ports();
        if ports.is_empty() {
            return Err(ActionError::MidiOutputNotStarted("no MIDI output ports available".into()));
        }

        let port = if device_id.is_empty() {
            &ports[0]
        } else {
            ports
                .iter()
                .find(|p| midi_out.port_name(p).map(|n| n == device_id).unwrap_or(false))
                .unwrap_or(&ports[0])
        };

        let connection = midi_out
            .connect(port, "midiflux-out")
            .map_err(|e| ActionError::new(format!("connect MIDI output `{device_id}`"), e))?;

        self.connections.lock().insert(device_id.to_string(), connection);
        Ok(())
    }
}

impl MidiOutputEffector for MidirOutputEffector {
    fn send(&self, device_id: &str, command: MidiOutputCommand) -> Result<(), ActionError> {
        if !self.connections.lock().contains_key(device_id) {
            self.connect(device_id)?;
        }

        let bytes = encode(&command);
        let mut connections = self.connections.lock();
        let connection = connections
            .get_mut(device_id)
            .ok_or_else(|| ActionError::MidiOutputNotStarted(device_id.to_string()))?;
        connection
            .send(&bytes)
            .map_err(|e| ActionError::new(format!("send to `{device_id}`"), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_encodes_status_byte_with_zero_based_channel() {
        let bytes = encode(&MidiOutputCommand::NoteOn { channel: 1, note: 60, velocity: 100 });
        assert_eq!(bytes, vec![0x90, 60, 100]);
    }

    #[test]
    fn control_change_on_channel_16_uses_high_nibble_f() {
        let bytes = encode(&MidiOutputCommand::ControlChange { channel: 16, controller: 7, value: 127 });
        assert_eq!(bytes, vec![0xBF, 7, 127]);
    }

    #[test]
    fn sysex_is_passed_through_unchanged() {
        let bytes = encode(&MidiOutputCommand::SysEx { bytes: vec![0xF0, 0x7E, 0xF7] });
        assert_eq!(bytes, vec![0xF0, 0x7E, 0xF7]);
    }
}
