// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Dispatcher / MidiActionEngine (C11, spec §4.11).

use crate::action::{Action, ExecutionContext};
use crate::effectors::EffectorSet;
use crate::event::{InputType, MidiEvent};
use crate::registry::Registry;
use crate::state::StateStore;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Latency warning threshold (spec §4.11 step 8): 5 ms by default, for
/// non-blocking dispatches.
pub const DEFAULT_LATENCY_THRESHOLD: Duration = Duration::from_millis(5);

pub struct Dispatcher {
    pub latency_threshold: Duration,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher { latency_threshold: DEFAULT_LATENCY_THRESHOLD }
    }
}

impl Dispatcher {
    pub fn new(latency_threshold: Duration) -> Self {
        Dispatcher { latency_threshold }
    }

    /// Handles one received event end to end: normalize → look up →
    /// execute, with per-action error isolation and latency logging.
    ///
    /// `registry` is a snapshot captured once by the caller at the start
    /// of dispatch (spec §5: "Readers capture the handle once at the
    /// start of dispatch and use that snapshot for the entire event").
    pub fn dispatch(&self, event: &MidiEvent, registry: &Registry, state: &StateStore, effectors: &EffectorSet) {
        let start = Instant::now();

        if event.is_error() {
            if let MidiEvent::Error { message, device_id, .. } = event {
                warn!(device = %device_id, %message, "hardware adapter reported an error event");
            }
            return;
        }

        let device = event.device_id();
        let channel = event.channel().unwrap_or(1);
        let input_number = event.input_number();

        let candidate_types = input_type_candidates(event);
        let mut matches = Vec::new();
        for input_type in candidate_types {
            matches.extend(registry.lookup(device, channel, input_type, input_number));
        }

        if let Some(sysex_bytes) = event.sysex_bytes() {
            matches.retain(|m| match &m.sysex_pattern {
                Some(pattern) => pattern.matches(sysex_bytes),
                None => true,
            });
        }

        let event_value = event.event_value();
        let ctx = ExecutionContext { state, effectors };
        let mut any_blocking = false;

        for registered in &matches {
            if contains_blocking(&registered.action) {
                any_blocking = true;
            }
            if let Err(e) = registered.action.execute(event_value, &ctx) {
                warn!(
                    mapping_id = %registered.mapping_id,
                    action = %registered.action.description,
                    error = %e,
                    "action execution failed"
                );
            }
        }

        let elapsed = start.elapsed();
        if !any_blocking && elapsed > self.latency_threshold {
            warn!(
                ?elapsed,
                threshold = ?self.latency_threshold,
                device = %device,
                "dispatch exceeded latency threshold"
            );
        } else {
            debug!(?elapsed, device = %device, matched = matches.len(), "dispatched event");
        }
    }
}

/// For `ControlChange` wire events the registry key alone can't tell
/// whether the profile author meant an absolute fader or a relative
/// encoder at this controller number — both mapping kinds are probed
/// (spec §4.7: "decoding is the action's job").
fn input_type_candidates(event: &MidiEvent) -> Vec<InputType> {
    match event {
        MidiEvent::ControlChange { .. } => vec![InputType::ControlChangeAbsolute, InputType::ControlChangeRelative],
        _ => event.input_type().into_iter().collect(),
    }
}

/// Whether `action` (or any of its sub-actions) is a suspension point
/// excluded from latency warnings (spec §4.11 step 8, §5).
fn contains_blocking(action: &Action) -> bool {
    if action.kind == "Delay" {
        return true;
    }
    if action.kind == "CommandExecution" && action.parameters.get_boolean("WaitForExit", false) {
        return true;
    }
    if let Some(sub) = action.parameters.get_sub_action("ThenAction").or_else(|| action.parameters.get_sub_action("PrimaryAction"))
    {
        if contains_blocking(sub) {
            return true;
        }
    }
    for name in ["ElseAction", "SecondaryAction", "PositiveAction", "NegativeAction"] {
        if let Some(sub) = action.parameters.get_sub_action(name) {
            if contains_blocking(sub) {
                return true;
            }
        }
    }
    action.parameters.get_sub_action_list("SubActions").iter().any(contains_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::TestRig;
    use crate::parameter::{ParamValue, ParameterBag};
    use crate::registry::Registry;

    fn key_action(key: i64) -> Action {
        let mut params = ParameterBag::new();
        params.set("Key", ParamValue::Integer(key));
        Action::new("KeyPressRelease", format!("tap {key}"), params)
    }

    #[test]
    fn error_event_is_logged_and_ignored() {
        let rig = TestRig::new();
        let registry = Registry::builder().build();
        let dispatcher = Dispatcher::default();
        let event = MidiEvent::Error { device_id: "dev".into(), message: "oops".into(), timestamp: 0 };
        dispatcher.dispatch(&event, &registry, &rig.state, &rig.effectors);
        assert!(rig.keyboard.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn scenario_1_dispatches_exact_then_wildcard() {
        let rig = TestRig::new();
        let mut builder = Registry::builder();
        builder.insert("MIDI Controller", false, 1, InputType::NoteOn, 60, "exact".into(), key_action(65), None);
        builder.insert("*", true, 0, InputType::NoteOn, 60, "wildcard".into(), key_action(66), None);
        let registry = builder.build();

        let dispatcher = Dispatcher::default();
        let event = MidiEvent::NoteOn {
            device_id: "MIDI Controller".into(),
            channel: 1,
            note: 60,
            velocity: 100,
            timestamp: 0,
        };
        dispatcher.dispatch(&event, &registry, &rig.state, &rig.effectors);
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:65", "up:65", "down:66", "up:66"]);
    }

    #[test]
    fn control_change_probes_both_absolute_and_relative() {
        let rig = TestRig::new();
        let mut builder = Registry::builder();
        builder.insert("dev", false, 4, InputType::ControlChangeAbsolute, 30, "abs".into(), key_action(1), None);
        builder.insert("dev", false, 4, InputType::ControlChangeRelative, 30, "rel".into(), key_action(2), None);
        let registry = builder.build();

        let dispatcher = Dispatcher::default();
        let event = MidiEvent::ControlChange { device_id: "dev".into(), channel: 4, controller: 30, value: 65, timestamp: 0 };
        dispatcher.dispatch(&event, &registry, &rig.state, &rig.effectors);
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:1", "up:1", "down:2", "up:2"]);
    }

    #[test]
    fn sysex_filters_by_pattern() {
        let rig = TestRig::new();
        let mut builder = Registry::builder();
        let pattern = crate::sysex::SysExPattern::new(vec![0xF0, 0xFF, 0xF7]).unwrap();
        builder.insert("dev", true, 0, InputType::SysEx, 0, "patterned".into(), key_action(9), Some(pattern));
        let registry = builder.build();

        let dispatcher = Dispatcher::default();
        let matching = MidiEvent::SysEx { device_id: "dev".into(), bytes: vec![0xF0, 0x42, 0xF7], timestamp: 0 };
        dispatcher.dispatch(&matching, &registry, &rig.state, &rig.effectors);
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:9", "up:9"]);

        rig.keyboard.calls.lock().unwrap().clear();
        let non_matching = MidiEvent::SysEx { device_id: "dev".into(), bytes: vec![0xF0, 0x42, 0x43, 0xF7], timestamp: 0 };
        dispatcher.dispatch(&non_matching, &registry, &rig.state, &rig.effectors);
        assert!(rig.keyboard.calls.lock().unwrap().is_empty());
    }
}
