// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Action Type Registry (C5, spec §4.5).
//!
//! A process-wide catalog populated once at startup, mirroring
//! `conductor-core`'s plugin-registry pattern (append-only map, O(1) tag
//! lookup, no locking on read) but for the closed set of built-in action
//! kinds rather than dynamically-loaded plugins — there is no runtime
//! unregistration here, only the one-time population in [`registry`].

use crate::parameter::{ParamKind, ParamSpec, ParameterBag};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Metadata for one action kind: its stable `$type` tag, a human display
/// name (spec §3 [SUPPLEMENT] "Display metadata"), a short description,
/// and its parameter schema.
#[derive(Debug, Clone)]
pub struct ActionKindInfo {
    pub tag: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

/// The process-wide catalog. Lookup by tag is O(1); registration happens
/// exactly once, lazily, on first access.
pub struct ActionTypeRegistry {
    kinds: HashMap<&'static str, ActionKindInfo>,
}

impl ActionTypeRegistry {
    fn build() -> Self {
        let mut kinds = HashMap::new();
        for info in all_builtin_kinds() {
            kinds.insert(info.tag, info);
        }
        ActionTypeRegistry { kinds }
    }

    pub fn lookup(&self, tag: &str) -> Option<&ActionKindInfo> {
        self.kinds.get(tag)
    }

    /// Enumerates every registered kind, for a future config editor (spec
    /// §3 [SUPPLEMENT]: "inspectable the way the module doc promises a
    /// Plugin Manager UI can enumerate plugins").
    pub fn list_kinds(&self) -> Vec<&ActionKindInfo> {
        let mut v: Vec<_> = self.kinds.values().collect();
        v.sort_by_key(|info| info.tag);
        v
    }

    /// A default, empty parameter bag for `tag` — step 2 of the decode
    /// algorithm ("instantiate a default action of that kind"), filled in
    /// by the loader as it reads each declared parameter.
    pub fn default_parameters(&self, tag: &str) -> Option<ParameterBag> {
        self.lookup(tag).map(|_| ParameterBag::new())
    }
}

static REGISTRY: OnceLock<ActionTypeRegistry> = OnceLock::new();

/// Returns the process-wide Action Type Registry, building it on first call.
pub fn registry() -> &'static ActionTypeRegistry {
    REGISTRY.get_or_init(ActionTypeRegistry::build)
}

fn all_builtin_kinds() -> Vec<ActionKindInfo> {
    use ParamKind::*;
    vec![
        ActionKindInfo {
            tag: "KeyPressRelease",
            display_name: "Key Press & Release",
            description: "Taps a single key.",
            params: &[ParamSpec::required("Key", Integer)],
        },
        ActionKindInfo {
            tag: "KeyDown",
            display_name: "Key Down",
            description: "Presses and holds a key.",
            params: &[ParamSpec::required("Key", Integer)],
        },
        ActionKindInfo {
            tag: "KeyUp",
            display_name: "Key Up",
            description: "Releases a held key.",
            params: &[ParamSpec::required("Key", Integer)],
        },
        ActionKindInfo {
            tag: "KeyToggle",
            display_name: "Key Toggle",
            description: "Flips a captured key state, persisted in the State Store.",
            params: &[ParamSpec::required("Key", Integer), ParamSpec::required("StateKey", Integer)],
        },
        ActionKindInfo {
            tag: "KeyModified",
            display_name: "Key With Modifiers",
            description: "Presses modifiers, taps a key, releases modifiers.",
            params: &[
                ParamSpec::required("Key", Integer),
                ParamSpec::optional("Modifiers", ByteArray),
            ],
        },
        ActionKindInfo {
            tag: "MouseClick",
            display_name: "Mouse Click",
            description: "Clicks a mouse button.",
            params: &[ParamSpec::enum_of("Button", &["Left", "Right", "Middle"], true)],
        },
        ActionKindInfo {
            tag: "MouseScroll",
            display_name: "Mouse Scroll",
            description: "Scrolls in a direction by an amount.",
            params: &[
                ParamSpec::enum_of("Direction", &["Up", "Down", "Left", "Right"], true),
                ParamSpec::required("Amount", Integer),
            ],
        },
        ActionKindInfo {
            tag: "GameControllerButtonDown",
            display_name: "Gamepad Button Down",
            description: "Presses a virtual gamepad button.",
            params: &[
                ParamSpec::optional("PadIndex", Integer),
                ParamSpec::required("Button", Integer),
            ],
        },
        ActionKindInfo {
            tag: "GameControllerButtonUp",
            display_name: "Gamepad Button Up",
            description: "Releases a virtual gamepad button.",
            params: &[
                ParamSpec::optional("PadIndex", Integer),
                ParamSpec::required("Button", Integer),
            ],
        },
        ActionKindInfo {
            tag: "GameControllerButton",
            display_name: "Gamepad Button Tap",
            description: "Presses then releases a virtual gamepad button.",
            params: &[
                ParamSpec::optional("PadIndex", Integer),
                ParamSpec::required("Button", Integer),
            ],
        },
        ActionKindInfo {
            tag: "GameControllerAxis",
            display_name: "Gamepad Axis",
            description: "Maps 0..127 onto a signed full-range axis value.",
            params: &[
                ParamSpec::optional("PadIndex", Integer),
                ParamSpec::required("Axis", Integer),
                ParamSpec::optional("MinValue", Integer),
                ParamSpec::optional("MaxValue", Integer),
                ParamSpec::optional("Invert", Boolean),
            ],
        },
        ActionKindInfo {
            tag: "MidiNoteOn",
            display_name: "MIDI Note On",
            description: "Sends an outbound Note On.",
            params: &[
                ParamSpec::optional("DeviceName", String),
                ParamSpec::required("Channel", Integer),
                ParamSpec::required("Note", Integer),
                ParamSpec::required("Velocity", Integer),
            ],
        },
        ActionKindInfo {
            tag: "MidiNoteOff",
            display_name: "MIDI Note Off",
            description: "Sends an outbound Note Off.",
            params: &[
                ParamSpec::optional("DeviceName", String),
                ParamSpec::required("Channel", Integer),
                ParamSpec::required("Note", Integer),
                ParamSpec::optional("Velocity", Integer),
            ],
        },
        ActionKindInfo {
            tag: "MidiControlChange",
            display_name: "MIDI Control Change",
            description: "Sends an outbound Control Change.",
            params: &[
                ParamSpec::optional("DeviceName", String),
                ParamSpec::required("Channel", Integer),
                ParamSpec::required("ControlNumber", Integer),
                ParamSpec::required("Value", Integer),
            ],
        },
        ActionKindInfo {
            tag: "MidiSysEx",
            display_name: "MIDI SysEx",
            description: "Sends an outbound SysEx message.",
            params: &[
                ParamSpec::optional("DeviceName", String),
                ParamSpec::required("Bytes", ByteArray),
            ],
        },
        ActionKindInfo {
            tag: "CommandExecution",
            display_name: "Run Command",
            description: "Launches an external process.",
            params: &[
                ParamSpec::enum_of("Shell", &["PowerShell", "Cmd", "None"], false),
                ParamSpec::required("Command", String),
                ParamSpec::optional("RunHidden", Boolean),
                ParamSpec::optional("WaitForExit", Boolean),
            ],
        },
        ActionKindInfo {
            tag: "Delay",
            display_name: "Delay",
            description: "Suspends for a fixed number of milliseconds.",
            params: &[ParamSpec::required("Milliseconds", Integer)],
        },
        ActionKindInfo {
            tag: "PlaySound",
            display_name: "Play Sound",
            description: "Plays a pre-loaded audio asset.",
            params: &[ParamSpec::required("AssetPath", String)],
        },
        ActionKindInfo {
            tag: "SequenceAction",
            display_name: "Sequence",
            description: "Executes a list of sub-actions in order.",
            params: &[
                ParamSpec::required("SubActions", SubActionList),
                ParamSpec::enum_of("ErrorHandling", &["StopOnError", "ContinueOnError"], false),
            ],
        },
        ActionKindInfo {
            tag: "ConditionalAction",
            display_name: "Conditional",
            description: "Executes the first condition whose range matches the event value.",
            params: &[ParamSpec::required("Conditions", ValueConditionList)],
        },
        ActionKindInfo {
            tag: "AlternatingAction",
            display_name: "Alternating",
            description: "Alternates between two sub-actions across invocations.",
            params: &[
                ParamSpec::required("PrimaryAction", SubAction),
                ParamSpec::required("SecondaryAction", SubAction),
                ParamSpec::optional("StartWithPrimary", Boolean),
                ParamSpec::optional("CycleCount", Integer),
                ParamSpec::required("StateKey", Integer),
            ],
        },
        ActionKindInfo {
            tag: "RelativeCCAction",
            display_name: "Relative CC",
            description: "Decodes a relative CC byte and forwards to Positive/NegativeAction.",
            params: &[
                ParamSpec::required("PositiveAction", SubAction),
                ParamSpec::required("NegativeAction", SubAction),
                ParamSpec::enum_of("Encoding", &["SignMagnitude", "TwosComplement", "BinaryOffset"], false),
                ParamSpec::optional("AccelerationStateKey", Integer),
                ParamSpec::optional("AccelerationThreshold", Integer),
                ParamSpec::optional("AccelerationMultiplier", Integer),
            ],
        },
        ActionKindInfo {
            tag: "StateSetAction",
            display_name: "Set State",
            description: "Sets a State Store key to a fixed value.",
            params: &[ParamSpec::required("StateKey", Integer), ParamSpec::required("Value", Integer)],
        },
        ActionKindInfo {
            tag: "StateIncreaseAction",
            display_name: "Increase State",
            description: "Adds to a State Store key.",
            params: &[ParamSpec::required("StateKey", Integer), ParamSpec::optional("Amount", Integer)],
        },
        ActionKindInfo {
            tag: "StateDecreaseAction",
            display_name: "Decrease State",
            description: "Subtracts from a State Store key.",
            params: &[ParamSpec::required("StateKey", Integer), ParamSpec::optional("Amount", Integer)],
        },
        ActionKindInfo {
            tag: "StateConditionalAction",
            display_name: "State Conditional",
            description: "Branches on a comparison against a State Store key.",
            params: &[
                ParamSpec::required("StateKey", Integer),
                ParamSpec::enum_of(
                    "ComparisonType",
                    &["Equals", "NotEquals", "LessThan", "LessOrEqual", "GreaterThan", "GreaterOrEqual"],
                    true,
                ),
                ParamSpec::required("Value", Integer),
                ParamSpec::required("ThenAction", SubAction),
                ParamSpec::optional("ElseAction", SubAction),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive_and_exact() {
        let r = registry();
        assert!(r.lookup("KeyPressRelease").is_some());
        assert!(r.lookup("keypressrelease").is_none());
        assert!(r.lookup("NotARealKind").is_none());
    }

    #[test]
    fn list_kinds_is_sorted_and_stable() {
        let r = registry();
        let kinds = r.list_kinds();
        assert!(kinds.windows(2).all(|w| w[0].tag <= w[1].tag));
        assert!(kinds.iter().any(|k| k.tag == "SequenceAction"));
        assert!(kinds.iter().any(|k| k.tag == "StateConditionalAction"));
    }

    #[test]
    fn every_kind_has_a_display_name() {
        for info in registry().list_kinds() {
            assert!(!info.display_name.is_empty());
        }
    }
}
