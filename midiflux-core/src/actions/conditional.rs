// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! ConditionalAction (spec §4.8).

use crate::action::{Action, ExecutionContext};
use crate::error::ActionError;

/// Executes the first condition whose `[min, max]` range contains
/// `event_value`; exactly one branch runs ("first-match-wins"). A `None`
/// value or no match is a no-op, not an error.
pub fn execute(action: &Action, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let Some(value) = event_value else {
        return Ok(());
    };
    let conditions = action.parameters.get_value_condition_list("Conditions");
    for condition in conditions {
        if condition.min <= value && value <= condition.max {
            return condition.action.execute(Some(value), ctx);
        }
    }
    Ok(())
}
