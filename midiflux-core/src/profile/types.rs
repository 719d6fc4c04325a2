// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Profile data model (spec §3, §6).

use crate::action::Action;
use crate::event::InputType;
use crate::sysex::SysExPattern;
use std::collections::HashMap;

/// A single MIDI-input → action binding (spec §3 `MappingInput`).
#[derive(Debug, Clone)]
pub struct MappingInput {
    /// `"*"` denotes the wildcard device.
    pub device_name: String,
    /// `None` denotes the wildcard channel.
    pub channel: Option<u8>,
    pub input_type: InputType,
    /// 0..127 for note/CC; ignored (always 0) for pitch-bend/pressure/SysEx.
    pub input_number: u8,
    pub sysex_pattern: Option<SysExPattern>,
}

/// `id` (stable, unique within profile), `description`, `enabled`,
/// `input`, `action` (spec §3 `Mapping`).
#[derive(Debug, Clone)]
pub struct Mapping {
    pub id: String,
    pub description: String,
    pub enabled: bool,
    pub input: MappingInput,
    pub action: Action,
}

/// `device_name` (may be `"*"`) and its mappings (spec §3 `DeviceBlock`).
#[derive(Debug, Clone)]
pub struct DeviceBlock {
    pub device_name: String,
    pub description: Option<String>,
    pub mappings: Vec<Mapping>,
}

/// A complete MIDI-to-action mapping set (spec §3 `Profile`, §6 "Profile JSON").
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub description: Option<String>,
    /// state-key → initial value.
    pub initial_states: HashMap<i64, i64>,
    pub devices: Vec<DeviceBlock>,
}

impl Profile {
    /// All enabled mappings across all device blocks, each paired with its
    /// owning device's name (disabled mappings never reach this point —
    /// the loader filters them at decode time, spec §3).
    pub fn enabled_mappings(&self) -> impl Iterator<Item = (&str, &Mapping)> {
        self.devices
            .iter()
            .flat_map(|d| d.mappings.iter().map(move |m| (d.device_name.as_str(), m)))
    }
}
