// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Profile Loader & JSON codec (C4, spec §4.4, §6).
//!
//! The decoder walks a `$type`-discriminated JSON tree, looking each tag up
//! in the Action Type Registry (C5) and type-checking each declared
//! parameter against its schema. Unlike `conductor-core::config::loader`
//! (TOML, single struct, no discriminator), this format is recursive and
//! partial-success — see [`load_profile`]'s doc comment.

use crate::action::Action;
use crate::action_registry::{registry, ActionKindInfo};
use crate::error::{LoadDiagnostic, ProfileLoadError};
use crate::event::InputType;
use crate::parameter::{ParamKind, ParamValue, ParameterBag, ValueCondition};
use crate::profile::types::{DeviceBlock, Mapping, MappingInput, Profile};
use crate::sysex::SysExPattern;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Validates that `path` is an allowed location for profile load/save:
/// canonicalizes it and rejects anything outside the user's MIDIFlux
/// profile directory, grounded on
/// `conductor-core::config::loader::validate_config_path`'s
/// path-traversal/TOCTOU hardening.
pub fn validate_profile_path(path: &Path, allowed_root: &Path) -> Result<PathBuf, ProfileLoadError> {
    let canonical_root = allowed_root
        .canonicalize()
        .map_err(|e| ProfileLoadError::PathNotAllowed(format!("profile root unavailable: {e}")))?;

    // The file itself need not exist yet (save path); canonicalize its
    // parent instead and re-attach the file name.
    let parent = path.parent().unwrap_or(path);
    let canonical_parent = parent
        .canonicalize()
        .map_err(|e| ProfileLoadError::PathNotAllowed(format!("{}: {e}", parent.display())))?;

    if !canonical_parent.starts_with(&canonical_root) {
        return Err(ProfileLoadError::PathNotAllowed(format!(
            "{} escapes the profile directory {}",
            path.display(),
            canonical_root.display()
        )));
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| ProfileLoadError::PathNotAllowed("path has no file name".into()))?;
    Ok(canonical_parent.join(file_name))
}

/// Loads and decodes a profile from disk. Partial success is allowed
/// (spec §4.4): the returned [`Profile`] only contains mappings that
/// decoded cleanly; every rejected mapping and every non-fatal warning is
/// reported in the diagnostics vector.
pub fn load_profile(path: &Path) -> Result<(Profile, Vec<LoadDiagnostic>), ProfileLoadError> {
    let bytes = std::fs::read_to_string(path)?;
    decode_profile(&bytes)
}

pub fn decode_profile(json_text: &str) -> Result<(Profile, Vec<LoadDiagnostic>), ProfileLoadError> {
    let root: Value = serde_json::from_str(json_text)?;
    let mut diagnostics = Vec::new();

    let name = root.get("ProfileName").and_then(Value::as_str).unwrap_or("Untitled").to_string();
    let description = root.get("Description").and_then(Value::as_str).map(String::from);

    let mut initial_states = HashMap::new();
    if let Some(map) = root.get("InitialStates").and_then(Value::as_object) {
        for (k, v) in map {
            if let (Ok(key), Some(value)) = (k.parse::<i64>(), v.as_i64()) {
                initial_states.insert(key, value);
            }
        }
    }

    let mut devices = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();
    if let Some(device_list) = root.get("MidiDevices").and_then(Value::as_array) {
        for device_json in device_list {
            devices.push(decode_device_block(device_json, &mut seen_ids, &mut diagnostics));
        }
    }

    let referenced = referenced_state_keys(&devices);
    for key in initial_states.keys() {
        if !referenced.contains(key) {
            diagnostics.push(LoadDiagnostic::UnreferencedInitialState { key: *key });
        }
    }

    Ok((Profile { name, description, initial_states, devices }, diagnostics))
}

/// Collects every integer value passed under a `StateKey`-shaped parameter
/// name across every mapping's action tree (spec §3: initial_states keys
/// "referenced by at least one stateful action" — `AlternatingAction`'s
/// `StateKey`, `KeyToggle`'s `StateKey`, and `RelativeCCAction`'s
/// `AccelerationStateKey` all count as references, not just the four
/// dedicated stateful action kinds).
fn referenced_state_keys(devices: &[DeviceBlock]) -> std::collections::HashSet<i64> {
    let mut keys = std::collections::HashSet::new();
    for device in devices {
        for mapping in &device.mappings {
            crate::action::walk_actions(&mapping.action, &mut |action| {
                for name in ["StateKey", "AccelerationStateKey"] {
                    if let Some(k) = action.parameters.get(name).and_then(|v| v.as_integer()) {
                        keys.insert(k);
                    }
                }
            });
        }
    }
    keys
}

fn decode_device_block(
    json: &Value,
    seen_ids: &mut std::collections::HashSet<String>,
    diagnostics: &mut Vec<LoadDiagnostic>,
) -> DeviceBlock {
    let device_name = json.get("DeviceName").and_then(Value::as_str).unwrap_or("*").to_string();
    let description = json.get("Description").and_then(Value::as_str).map(String::from);

    let mut mappings = Vec::new();
    if let Some(mapping_list) = json.get("Mappings").and_then(Value::as_array) {
        for mapping_json in mapping_list {
            match decode_mapping(mapping_json, diagnostics) {
                Some(mapping) => {
                    if !seen_ids.insert(mapping.id.clone()) {
                        diagnostics.push(LoadDiagnostic::DuplicateMappingId { id: mapping.id.clone() });
                        continue;
                    }
                    if mapping.enabled {
                        mappings.push(mapping);
                    }
                }
                None => continue,
            }
        }
    }

    DeviceBlock { device_name, description, mappings }
}

fn input_type_from_str(s: &str) -> Option<InputType> {
    Some(match s {
        "NoteOn" => InputType::NoteOn,
        "NoteOff" => InputType::NoteOff,
        "ControlChangeAbsolute" => InputType::ControlChangeAbsolute,
        "ControlChangeRelative" => InputType::ControlChangeRelative,
        "ProgramChange" => InputType::ProgramChange,
        "PitchBend" => InputType::PitchBend,
        "ChannelPressure" => InputType::ChannelPressure,
        "PolyKeyPressure" => InputType::PolyKeyPressure,
        "SysEx" => InputType::SysEx,
        _ => return None,
    })
}

fn input_type_to_str(t: InputType) -> &'static str {
    match t {
        InputType::NoteOn => "NoteOn",
        InputType::NoteOff => "NoteOff",
        InputType::ControlChangeAbsolute => "ControlChangeAbsolute",
        InputType::ControlChangeRelative => "ControlChangeRelative",
        InputType::ProgramChange => "ProgramChange",
        InputType::PitchBend => "PitchBend",
        InputType::ChannelPressure => "ChannelPressure",
        InputType::PolyKeyPressure => "PolyKeyPressure",
        InputType::SysEx => "SysEx",
    }
}

fn decode_mapping(json: &Value, diagnostics: &mut Vec<LoadDiagnostic>) -> Option<Mapping> {
    let id = json.get("Id").and_then(Value::as_str)?.to_string();
    let description = json.get("Description").and_then(Value::as_str).unwrap_or("").to_string();
    let enabled = json.get("IsEnabled").and_then(Value::as_bool).unwrap_or(true);

    let input_type_str = json.get("InputType").and_then(Value::as_str)?;
    let input_type = input_type_from_str(input_type_str)?;

    let channel = json.get("Channel").and_then(Value::as_i64).map(|c| c as u8);

    let input_number = match input_type {
        InputType::NoteOn | InputType::NoteOff | InputType::PolyKeyPressure => {
            json.get("Note").and_then(Value::as_i64).unwrap_or(0) as u8
        }
        InputType::ControlChangeAbsolute | InputType::ControlChangeRelative => {
            json.get("ControlNumber").and_then(Value::as_i64).unwrap_or(0) as u8
        }
        _ => 0,
    };

    let sysex_pattern = match json.get("SysExPattern").and_then(Value::as_array) {
        Some(arr) => {
            let bytes: Vec<u8> = arr.iter().filter_map(|v| v.as_i64()).map(|v| v as u8).collect();
            match SysExPattern::new(bytes) {
                Ok(p) => Some(p),
                Err(reason) => {
                    diagnostics.push(LoadDiagnostic::InvalidSysExPattern { reason });
                    None
                }
            }
        }
        None => None,
    };

    let action_json = json.get("Action")?;
    let action = decode_action(action_json, diagnostics)?;

    Some(Mapping {
        id,
        description,
        enabled,
        input: MappingInput { device_name: String::new(), channel, input_type, input_number, sysex_pattern },
        action,
    })
}

/// Decode algorithm for a single action node (spec §4.4 steps 1–6).
fn decode_action(json: &Value, diagnostics: &mut Vec<LoadDiagnostic>) -> Option<Action> {
    let type_tag = json.get("$type").and_then(Value::as_str)?;
    let info: &ActionKindInfo = match registry().lookup(type_tag) {
        Some(info) => info,
        None => {
            diagnostics.push(LoadDiagnostic::UnknownActionType { type_tag: type_tag.to_string() });
            return None;
        }
    };

    let description = json.get("Description").and_then(Value::as_str).unwrap_or(info.display_name).to_string();
    let empty = serde_json::Map::new();
    let params_json = json.get("Parameters").and_then(Value::as_object).unwrap_or(&empty);

    let mut bag = ParameterBag::new();
    let mut ok = true;
    for spec in info.params {
        match params_json.get(spec.name) {
            Some(value) => match decode_param_value(spec, value, diagnostics, info.tag) {
                Some(v) => bag.set(spec.name, v),
                None => ok = false,
            },
            None => {
                if spec.required {
                    diagnostics.push(LoadDiagnostic::MissingParameter { kind: info.tag.to_string(), name: spec.name });
                    ok = false;
                }
            }
        }
    }

    for key in params_json.keys() {
        if !info.params.iter().any(|p| p.name == key) {
            diagnostics.push(LoadDiagnostic::UnknownParameter { kind: info.tag.to_string(), name: key.clone() });
        }
    }

    if !ok {
        return None;
    }
    Some(Action::new(info.tag, description, bag))
}

fn decode_param_value(
    spec: &crate::parameter::ParamSpec,
    value: &Value,
    diagnostics: &mut Vec<LoadDiagnostic>,
    kind: &str,
) -> Option<ParamValue> {
    match spec.kind {
        ParamKind::Integer => match value.as_i64() {
            Some(v) => Some(ParamValue::Integer(v)),
            None => {
                diagnostics.push(LoadDiagnostic::InvalidParameter {
                    kind: kind.to_string(),
                    name: spec.name,
                    reason: "expected an integer".to_string(),
                });
                None
            }
        },
        ParamKind::Enum => match value.as_str() {
            Some(v) if spec.enum_alternatives.is_empty() || spec.enum_alternatives.contains(&v) => {
                Some(ParamValue::Enum(v.to_string()))
            }
            Some(v) => {
                diagnostics.push(LoadDiagnostic::InvalidParameter {
                    kind: kind.to_string(),
                    name: spec.name,
                    reason: format!("'{v}' is not one of {:?}", spec.enum_alternatives),
                });
                None
            }
            None => {
                diagnostics.push(LoadDiagnostic::InvalidParameter {
                    kind: kind.to_string(),
                    name: spec.name,
                    reason: "expected a string".to_string(),
                });
                None
            }
        },
        ParamKind::Boolean => match value.as_bool() {
            Some(v) => Some(ParamValue::Boolean(v)),
            None => {
                diagnostics.push(LoadDiagnostic::InvalidParameter {
                    kind: kind.to_string(),
                    name: spec.name,
                    reason: "expected a boolean".to_string(),
                });
                None
            }
        },
        ParamKind::String => match value.as_str() {
            Some(v) => Some(ParamValue::String(v.to_string())),
            None => {
                diagnostics.push(LoadDiagnostic::InvalidParameter {
                    kind: kind.to_string(),
                    name: spec.name,
                    reason: "expected a string".to_string(),
                });
                None
            }
        },
        ParamKind::ByteArray => match value.as_array() {
            Some(arr) => Some(ParamValue::ByteArray(arr.iter().filter_map(|v| v.as_i64()).map(|v| v as u8).collect())),
            None => {
                diagnostics.push(LoadDiagnostic::InvalidParameter {
                    kind: kind.to_string(),
                    name: spec.name,
                    reason: "expected an array of bytes".to_string(),
                });
                None
            }
        },
        ParamKind::SubAction => decode_action(value, diagnostics).map(|a| ParamValue::SubAction(Box::new(a))),
        ParamKind::SubActionList => match value.as_array() {
            Some(arr) => {
                let children: Vec<Action> = arr.iter().filter_map(|v| decode_action(v, diagnostics)).collect();
                Some(ParamValue::SubActionList(children))
            }
            None => {
                diagnostics.push(LoadDiagnostic::InvalidParameter {
                    kind: kind.to_string(),
                    name: spec.name,
                    reason: "expected an array of actions".to_string(),
                });
                None
            }
        },
        ParamKind::ValueConditionList => match value.as_array() {
            Some(arr) => {
                let mut conditions = Vec::new();
                for entry in arr {
                    let min = entry.get("MinValue").and_then(Value::as_i64);
                    let max = entry.get("MaxValue").and_then(Value::as_i64);
                    let (Some(min), Some(max)) = (min, max) else {
                        diagnostics.push(LoadDiagnostic::InvalidValueCondition {
                            reason: "MinValue/MaxValue must be integers".to_string(),
                        });
                        continue;
                    };
                    if !(0 <= min && min <= max && max <= 127) {
                        diagnostics.push(LoadDiagnostic::InvalidValueCondition {
                            reason: format!("require 0 ≤ min ≤ max ≤ 127, got min={min} max={max}"),
                        });
                        continue;
                    }
                    let Some(action_json) = entry.get("Action") else {
                        diagnostics
                            .push(LoadDiagnostic::InvalidValueCondition { reason: "missing Action".to_string() });
                        continue;
                    };
                    let Some(action) = decode_action(action_json, diagnostics) else {
                        continue;
                    };
                    let description = entry.get("Description").and_then(Value::as_str).map(String::from);
                    conditions.push(ValueCondition { min, max, action: Box::new(action), description });
                }
                Some(ParamValue::ValueConditionList(conditions))
            }
            None => {
                diagnostics.push(LoadDiagnostic::InvalidParameter {
                    kind: kind.to_string(),
                    name: spec.name,
                    reason: "expected an array of conditions".to_string(),
                });
                None
            }
        },
    }
}

/// The exact inverse of [`decode_profile`]; must round-trip (spec §4.4,
/// §8 "Round-trip").
pub fn encode_profile(profile: &Profile) -> Value {
    let mut initial_states = serde_json::Map::new();
    for (k, v) in &profile.initial_states {
        initial_states.insert(k.to_string(), Value::from(*v));
    }

    let devices: Vec<Value> = profile
        .devices
        .iter()
        .map(|d| {
            serde_json::json!({
                "DeviceName": d.device_name,
                "Description": d.description,
                "Mappings": d.mappings.iter().map(encode_mapping).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "ProfileName": profile.name,
        "Description": profile.description,
        "InitialStates": initial_states,
        "MidiDevices": devices,
    })
}

fn encode_mapping(mapping: &Mapping) -> Value {
    let mut obj = serde_json::json!({
        "Id": mapping.id,
        "Description": mapping.description,
        "IsEnabled": mapping.enabled,
        "InputType": input_type_to_str(mapping.input.input_type),
        "Action": encode_action(&mapping.action),
    });
    let map = obj.as_object_mut().unwrap();
    if let Some(channel) = mapping.input.channel {
        map.insert("Channel".to_string(), Value::from(channel));
    }
    match mapping.input.input_type {
        InputType::NoteOn | InputType::NoteOff | InputType::PolyKeyPressure => {
            map.insert("Note".to_string(), Value::from(mapping.input.input_number));
        }
        InputType::ControlChangeAbsolute | InputType::ControlChangeRelative => {
            map.insert("ControlNumber".to_string(), Value::from(mapping.input.input_number));
        }
        _ => {}
    }
    if let Some(pattern) = &mapping.input.sysex_pattern {
        map.insert("SysExPattern".to_string(), Value::from(pattern.as_bytes().to_vec()));
    }
    obj
}

fn encode_action(action: &Action) -> Value {
    let mut params = serde_json::Map::new();
    for (name, value) in action.parameters.iter() {
        params.insert(name.clone(), encode_param_value(value));
    }
    serde_json::json!({
        "$type": action.kind,
        "Description": action.description,
        "Parameters": params,
    })
}

fn encode_param_value(value: &ParamValue) -> Value {
    match value {
        ParamValue::Integer(v) => Value::from(*v),
        ParamValue::Enum(v) => Value::from(v.clone()),
        ParamValue::Boolean(v) => Value::from(*v),
        ParamValue::String(v) => Value::from(v.clone()),
        ParamValue::ByteArray(v) => Value::from(v.clone()),
        ParamValue::SubAction(a) => encode_action(a),
        ParamValue::SubActionList(list) => Value::from(list.iter().map(encode_action).collect::<Vec<_>>()),
        ParamValue::ValueConditionList(list) => Value::from(
            list.iter()
                .map(|c| {
                    serde_json::json!({
                        "MinValue": c.min,
                        "MaxValue": c.max,
                        "Action": encode_action(&c.action),
                        "Description": c.description,
                    })
                })
                .collect::<Vec<_>>(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ProfileName": "Test",
        "InitialStates": { "1000": 0 },
        "MidiDevices": [
            { "DeviceName": "MIDI Controller",
              "Mappings": [
                { "Id": "m1", "Description": "Tap A", "InputType": "NoteOn", "Channel": 1, "Note": 60,
                  "Action": { "$type": "KeyPressRelease", "Description": "tap", "Parameters": { "Key": 65 } } },
                { "Id": "m2", "Description": "disabled", "IsEnabled": false, "InputType": "NoteOn", "Channel": 1, "Note": 61,
                  "Action": { "$type": "KeyPressRelease", "Parameters": { "Key": 66 } } }
              ]
            }
        ]
    }"#;

    #[test]
    fn decodes_enabled_mapping_and_skips_disabled() {
        let (profile, diagnostics) = decode_profile(SAMPLE).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(profile.devices.len(), 1);
        assert_eq!(profile.devices[0].mappings.len(), 1);
        assert_eq!(profile.devices[0].mappings[0].id, "m1");
    }

    #[test]
    fn unknown_type_tag_rejects_mapping_with_diagnostic() {
        let json = r#"{"ProfileName":"T","MidiDevices":[{"DeviceName":"d","Mappings":[
            {"Id":"m1","Description":"x","InputType":"NoteOn","Note":60,
             "Action":{"$type":"NotAKind","Parameters":{}}}
        ]}]}"#;
        let (profile, diagnostics) = decode_profile(json).unwrap();
        assert_eq!(profile.devices[0].mappings.len(), 0);
        assert!(diagnostics.iter().any(|d| matches!(d, LoadDiagnostic::UnknownActionType { .. })));
    }

    #[test]
    fn missing_required_parameter_rejects_mapping() {
        let json = r#"{"ProfileName":"T","MidiDevices":[{"DeviceName":"d","Mappings":[
            {"Id":"m1","Description":"x","InputType":"NoteOn","Note":60,
             "Action":{"$type":"KeyPressRelease","Parameters":{}}}
        ]}]}"#;
        let (profile, diagnostics) = decode_profile(json).unwrap();
        assert_eq!(profile.devices[0].mappings.len(), 0);
        assert!(diagnostics.iter().any(|d| matches!(d, LoadDiagnostic::MissingParameter { .. })));
    }

    #[test]
    fn duplicate_mapping_id_is_rejected() {
        let json = r#"{"ProfileName":"T","MidiDevices":[{"DeviceName":"d","Mappings":[
            {"Id":"dup","Description":"x","InputType":"NoteOn","Note":60,
             "Action":{"$type":"KeyPressRelease","Parameters":{"Key":1}}},
            {"Id":"dup","Description":"y","InputType":"NoteOn","Note":61,
             "Action":{"$type":"KeyPressRelease","Parameters":{"Key":2}}}
        ]}]}"#;
        let (profile, diagnostics) = decode_profile(json).unwrap();
        assert_eq!(profile.devices[0].mappings.len(), 1);
        assert!(diagnostics.iter().any(|d| matches!(d, LoadDiagnostic::DuplicateMappingId { .. })));
    }

    #[test]
    fn round_trip_preserves_structure() {
        let (profile, _) = decode_profile(SAMPLE).unwrap();
        let encoded = encode_profile(&profile);
        let reencoded_text = encoded.to_string();
        let (profile2, diagnostics2) = decode_profile(&reencoded_text).unwrap();
        assert!(diagnostics2.is_empty());
        assert_eq!(profile.name, profile2.name);
        assert_eq!(profile.devices.len(), profile2.devices.len());
        assert_eq!(profile.devices[0].mappings.len(), profile2.devices[0].mappings.len());
        assert_eq!(profile.devices[0].mappings[0].action.kind, profile2.devices[0].mappings[0].action.kind);
    }

    #[test]
    fn sequence_with_nested_sub_actions_round_trips() {
        let json = r#"{"ProfileName":"T","MidiDevices":[{"DeviceName":"d","Mappings":[
            {"Id":"m1","Description":"macro","InputType":"NoteOn","Channel":1,"Note":36,
             "Action":{"$type":"SequenceAction","Description":"ctrl+c","Parameters":{
                "ErrorHandling":"StopOnError",
                "SubActions":[
                    {"$type":"KeyDown","Parameters":{"Key":17}},
                    {"$type":"KeyPressRelease","Parameters":{"Key":67}},
                    {"$type":"KeyUp","Parameters":{"Key":17}}
                ]
             }}}
        ]}]}"#;
        let (profile, diagnostics) = decode_profile(json).unwrap();
        assert!(diagnostics.is_empty());
        let action = &profile.devices[0].mappings[0].action;
        assert_eq!(action.kind, "SequenceAction");
        assert_eq!(action.parameters.get_sub_action_list("SubActions").len(), 3);

        let encoded = encode_profile(&profile).to_string();
        let (profile2, diagnostics2) = decode_profile(&encoded).unwrap();
        assert!(diagnostics2.is_empty());
        assert_eq!(
            profile2.devices[0].mappings[0].action.parameters.get_sub_action_list("SubActions").len(),
            3
        );
    }

    #[test]
    fn unreferenced_initial_state_key_warns_but_does_not_fail() {
        let json = r#"{"ProfileName":"T","InitialStates":{"1":0,"2":0},"MidiDevices":[{"DeviceName":"d","Mappings":[
            {"Id":"m1","Description":"x","InputType":"NoteOn","Note":60,
             "Action":{"$type":"StateSetAction","Parameters":{"StateKey":1,"Value":1}}}
        ]}]}"#;
        let (profile, diagnostics) = decode_profile(json).unwrap();
        assert_eq!(profile.devices[0].mappings.len(), 1);
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, LoadDiagnostic::UnreferencedInitialState { key } if *key == 2)));
        assert!(!diagnostics
            .iter()
            .any(|d| matches!(d, LoadDiagnostic::UnreferencedInitialState { key } if *key == 1)));
    }

    #[test]
    fn acceleration_state_key_counts_as_a_reference() {
        let json = r#"{"ProfileName":"T","InitialStates":{"42":0},"MidiDevices":[{"DeviceName":"d","Mappings":[
            {"Id":"m1","Description":"jog","InputType":"ControlChangeRelative","ControlNumber":10,
             "Action":{"$type":"RelativeCCAction","Parameters":{
                "PositiveAction":{"$type":"KeyPressRelease","Parameters":{"Key":1}},
                "NegativeAction":{"$type":"KeyPressRelease","Parameters":{"Key":2}},
                "AccelerationStateKey":42
             }}}
        ]}]}"#;
        let (_profile, diagnostics) = decode_profile(json).unwrap();
        assert!(!diagnostics.iter().any(|d| matches!(d, LoadDiagnostic::UnreferencedInitialState { .. })));
    }

    #[test]
    fn invalid_sysex_pattern_is_reported() {
        let json = r#"{"ProfileName":"T","MidiDevices":[{"DeviceName":"d","Mappings":[
            {"Id":"m1","Description":"x","InputType":"SysEx","SysExPattern":[1,2,3],
             "Action":{"$type":"StateSetAction","Parameters":{"StateKey":1,"Value":1}}}
        ]}]}"#;
        let (_profile, diagnostics) = decode_profile(json).unwrap();
        assert!(diagnostics.iter().any(|d| matches!(d, LoadDiagnostic::InvalidSysExPattern { .. })));
    }
}
