// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Action base (C5/C7, spec §3, §4.5, §4.7).
//!
//! `Action` is the one polymorphic node type in an action tree: it carries
//! a `kind` tag (matches the Action Type Registry key), a `description`,
//! and a schema-validated [`ParameterBag`]. The *behavior* for a kind
//! lives in `actions::simple`/`sequence`/`conditional`/`alternating`/
//! `relative_cc`/`stateful` as free functions keyed by `kind`, dispatched
//! through `Action::execute` — mirroring `conductor-core::actions`'s single
//! `Action` enum with a uniform `execute`-like contract, generalized here
//! from a fixed enum to an open, registry-driven kind tag so new action
//! kinds need no change to this type.

use crate::effectors::EffectorSet;
use crate::error::ActionError;
use crate::parameter::ParameterBag;
use crate::state::StateStore;

/// Capabilities an action's `execute` may reach for: the profile-scoped
/// State Store and the effector bundle. Held by reference for the
/// duration of one dispatch (spec §3 "Ownership": "shared with actions by
/// capability reference only").
pub struct ExecutionContext<'a> {
    pub state: &'a StateStore,
    pub effectors: &'a EffectorSet,
}

/// One node in an action tree (spec §3 `Action`).
#[derive(Debug, Clone)]
pub struct Action {
    pub kind: String,
    pub description: String,
    pub parameters: ParameterBag,
}

impl Action {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, parameters: ParameterBag) -> Self {
        Action {
            kind: kind.into(),
            description: description.into(),
            parameters,
        }
    }

    /// `execute(event_value: optional<int>) -> Result` (spec §4.7).
    ///
    /// Dispatches by `kind` to the concrete implementation in `actions::*`.
    /// Unknown kinds can't reach this point — the loader rejects them at
    /// decode time (spec §4.4) — so an unrecognized `kind` here is treated
    /// as a construction bug, not a runtime condition to recover from.
    pub fn execute(&self, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
        crate::actions::dispatch(self, event_value, ctx)
    }
}

/// Walks `action` and every sub-action reachable through its `SubAction`/
/// `SubActionList`/`ValueConditionList` parameters, calling `visit` on
/// each node (pre-order, parent before children). Shared by the profile
/// loader's unreferenced-state-key check and the Profile Manager's
/// `PlaySound` preload walk — both need every node in a mapping's action
/// tree, not just its root.
pub fn walk_actions<'a>(action: &'a Action, visit: &mut impl FnMut(&'a Action)) {
    visit(action);
    for name in ["ThenAction", "ElseAction", "PrimaryAction", "SecondaryAction", "PositiveAction", "NegativeAction"] {
        if let Some(a) = action.parameters.get_sub_action(name) {
            walk_actions(a, visit);
        }
    }
    for child in action.parameters.get_sub_action_list("SubActions") {
        walk_actions(child, visit);
    }
    for condition in action.parameters.get_value_condition_list("Conditions") {
        walk_actions(&condition.action, visit);
    }
}
