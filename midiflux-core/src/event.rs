// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Normalized MIDI event model (C2, spec §4.2).
//!
//! A [`MidiEvent`] is the boundary type every hardware adapter produces and
//! the dispatcher consumes. Construction from raw bytes is the adapter's
//! job (`midiflux-daemon::hardware`); this module only defines the shape and
//! the handful of pure helpers the dispatcher and the complex actions need.

use serde::{Deserialize, Serialize};

/// MIDI channel, 1-based at the boundary (spec §3: "uniform at the
/// boundary"). Any zero-based wire representation is the adapter's concern.
pub type Channel = u8;

/// The kinds of mapping input a profile can bind to (spec §3 `MappingInput`).
///
/// `ControlChangeAbsolute`/`ControlChangeRelative` both arrive over the wire
/// as `ControlChange`; the distinction lives in the *mapping*, not the raw
/// event — a profile author declares whether a given CC number carries an
/// absolute value or a relative encoder delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    NoteOn,
    NoteOff,
    ControlChangeAbsolute,
    ControlChangeRelative,
    ProgramChange,
    PitchBend,
    ChannelPressure,
    PolyKeyPressure,
    SysEx,
}

/// Discriminated union for a single normalized MIDI event (spec §3, §4.2).
///
/// Invariant: exactly the fields defined for the event's kind are
/// populated — this is enforced by construction (each variant only carries
/// its own fields) rather than by a flat struct with optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn {
        device_id: String,
        channel: Channel,
        note: u8,
        velocity: u8,
        timestamp: u64,
    },
    NoteOff {
        device_id: String,
        channel: Channel,
        note: u8,
        velocity: u8,
        timestamp: u64,
    },
    ControlChange {
        device_id: String,
        channel: Channel,
        controller: u8,
        value: u8,
        timestamp: u64,
    },
    ProgramChange {
        device_id: String,
        channel: Channel,
        program: u8,
        timestamp: u64,
    },
    /// `value` is the 14-bit combined pitch-bend value, 0..16383, center 8192.
    PitchBend {
        device_id: String,
        channel: Channel,
        value: u16,
        timestamp: u64,
    },
    ChannelPressure {
        device_id: String,
        channel: Channel,
        pressure: u8,
        timestamp: u64,
    },
    PolyKeyPressure {
        device_id: String,
        channel: Channel,
        note: u8,
        pressure: u8,
        timestamp: u64,
    },
    /// `bytes` always begins with 0xF0 and ends with 0xF7.
    SysEx {
        device_id: String,
        bytes: Vec<u8>,
        timestamp: u64,
    },
    /// A recognized but otherwise unhandled MIDI message.
    Other { device_id: String, timestamp: u64 },
    /// Hardware-layer failure surfaced as an event rather than an error
    /// return, per §4.1/§7 ("device disconnect raises an event").
    Error {
        device_id: String,
        message: String,
        timestamp: u64,
    },
}

impl MidiEvent {
    pub fn device_id(&self) -> &str {
        match self {
            MidiEvent::NoteOn { device_id, .. }
            | MidiEvent::NoteOff { device_id, .. }
            | MidiEvent::ControlChange { device_id, .. }
            | MidiEvent::ProgramChange { device_id, .. }
            | MidiEvent::PitchBend { device_id, .. }
            | MidiEvent::ChannelPressure { device_id, .. }
            | MidiEvent::PolyKeyPressure { device_id, .. }
            | MidiEvent::SysEx { device_id, .. }
            | MidiEvent::Other { device_id, .. }
            | MidiEvent::Error { device_id, .. } => device_id,
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            MidiEvent::NoteOn { timestamp, .. }
            | MidiEvent::NoteOff { timestamp, .. }
            | MidiEvent::ControlChange { timestamp, .. }
            | MidiEvent::ProgramChange { timestamp, .. }
            | MidiEvent::PitchBend { timestamp, .. }
            | MidiEvent::ChannelPressure { timestamp, .. }
            | MidiEvent::PolyKeyPressure { timestamp, .. }
            | MidiEvent::SysEx { timestamp, .. }
            | MidiEvent::Other { timestamp, .. }
            | MidiEvent::Error { timestamp, .. } => *timestamp,
        }
    }

    pub fn channel(&self) -> Option<Channel> {
        match self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::ProgramChange { channel, .. }
            | MidiEvent::PitchBend { channel, .. }
            | MidiEvent::ChannelPressure { channel, .. }
            | MidiEvent::PolyKeyPressure { channel, .. } => Some(*channel),
            MidiEvent::SysEx { .. } | MidiEvent::Other { .. } | MidiEvent::Error { .. } => None,
        }
    }

    /// The `InputType` a mapping registry key should use for this event.
    ///
    /// `ControlChange` resolves to `ControlChangeAbsolute` here; the
    /// dispatcher additionally probes `ControlChangeRelative` at the same
    /// `(device, channel, controller)` key since the wire can't distinguish
    /// them (see `dispatcher.rs`).
    pub fn input_type(&self) -> Option<InputType> {
        match self {
            MidiEvent::NoteOn { .. } => Some(InputType::NoteOn),
            MidiEvent::NoteOff { .. } => Some(InputType::NoteOff),
            MidiEvent::ControlChange { .. } => Some(InputType::ControlChangeAbsolute),
            MidiEvent::ProgramChange { .. } => Some(InputType::ProgramChange),
            MidiEvent::PitchBend { .. } => Some(InputType::PitchBend),
            MidiEvent::ChannelPressure { .. } => Some(InputType::ChannelPressure),
            MidiEvent::PolyKeyPressure { .. } => Some(InputType::PolyKeyPressure),
            MidiEvent::SysEx { .. } => Some(InputType::SysEx),
            MidiEvent::Other { .. } | MidiEvent::Error { .. } => None,
        }
    }

    /// The registry `input_number` for this event: note/CC number, 0 for
    /// pitch-bend/pressure/SysEx (spec §3: "ignored for pitch-bend/pressure/SysEx").
    pub fn input_number(&self) -> u8 {
        match self {
            MidiEvent::NoteOn { note, .. }
            | MidiEvent::NoteOff { note, .. }
            | MidiEvent::PolyKeyPressure { note, .. } => *note,
            MidiEvent::ControlChange { controller, .. } => *controller,
            MidiEvent::ProgramChange { program, .. } => *program,
            _ => 0,
        }
    }

    /// The canonical numeric `event_value` fed to `Action::execute` (spec §4.7).
    pub fn event_value(&self) -> Option<i64> {
        match self {
            MidiEvent::NoteOn { velocity, .. } => Some(*velocity as i64),
            MidiEvent::NoteOff { velocity, .. } => Some(*velocity as i64),
            MidiEvent::ControlChange { value, .. } => Some(*value as i64),
            MidiEvent::ProgramChange { program, .. } => Some(*program as i64),
            MidiEvent::PitchBend { value, .. } => Some(*value as i64),
            MidiEvent::ChannelPressure { pressure, .. } => Some(*pressure as i64),
            MidiEvent::PolyKeyPressure { pressure, .. } => Some(*pressure as i64),
            MidiEvent::SysEx { .. } | MidiEvent::Other { .. } | MidiEvent::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MidiEvent::Error { .. })
    }

    pub fn sysex_bytes(&self) -> Option<&[u8]> {
        match self {
            MidiEvent::SysEx { bytes, .. } => Some(bytes),
            _ => None,
        }
    }
}
