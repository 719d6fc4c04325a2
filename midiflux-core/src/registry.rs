// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Mapping Registry (C3, spec §4.3).
//!
//! Built once per profile load and never mutated afterward — any "edit"
//! produces a new `Registry` instance, published via `ArcSwap` by the
//! Profile Manager (`profile_manager.rs`).

use crate::action::Action;
use crate::event::InputType;
use crate::sysex::SysExPattern;
use std::collections::HashMap;

const WILDCARD: &str = "*";

/// `(device_name|"*", channel|"*", input_type, input_number|0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub device_name: String,
    /// `None` represents the wildcard channel.
    pub channel: Option<u8>,
    pub input_type: InputType,
    pub input_number: u8,
}

impl LookupKey {
    pub fn new(device_name: impl Into<String>, channel: Option<u8>, input_type: InputType, input_number: u8) -> Self {
        LookupKey { device_name: device_name.into(), channel, input_type, input_number }
    }
}

/// One installed binding: the action to run plus (for SysEx mappings) the
/// pattern that must match before it fires.
#[derive(Debug, Clone)]
pub struct RegisteredAction {
    pub action: Action,
    pub sysex_pattern: Option<SysExPattern>,
    pub mapping_id: String,
}

/// Immutable lookup from a `LookupKey` to an ordered list of actions.
/// Construction preserves declaration order within a key.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<LookupKey, Vec<RegisteredAction>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Four-level wildcard fallback lookup (spec §4.3): exact,
    /// wildcard-channel, wildcard-device, both-wildcard, concatenated in
    /// that priority order.
    pub fn lookup(&self, device: &str, channel: u8, input_type: InputType, input_number: u8) -> Vec<&RegisteredAction> {
        let keys = [
            LookupKey::new(device, Some(channel), input_type, input_number),
            LookupKey::new(device, None, input_type, input_number),
            LookupKey::new(WILDCARD, Some(channel), input_type, input_number),
            LookupKey::new(WILDCARD, None, input_type, input_number),
        ];
        keys.iter()
            .filter_map(|k| self.entries.get(k))
            .flat_map(|v| v.iter())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates `(device_name, mapping)` pairs in insertion order, then
/// builds an immutable [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<LookupKey, Vec<RegisteredAction>>,
}

impl RegistryBuilder {
    pub fn insert(
        &mut self,
        device_name: &str,
        channel_wildcard: bool,
        channel: u8,
        input_type: InputType,
        input_number: u8,
        mapping_id: String,
        action: Action,
        sysex_pattern: Option<SysExPattern>,
    ) {
        let key = LookupKey::new(
            device_name,
            if channel_wildcard { None } else { Some(channel) },
            input_type,
            input_number,
        );
        self.entries.entry(key).or_default().push(RegisteredAction { action, sysex_pattern, mapping_id });
    }

    pub fn build(self) -> Registry {
        Registry { entries: self.entries }
    }
}
