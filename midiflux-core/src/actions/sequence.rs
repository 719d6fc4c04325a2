// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! SequenceAction (spec §4.8).

use crate::action::{Action, ExecutionContext};
use crate::error::ActionError;

/// Executes `SubActions` in declaration order, forwarding `event_value`
/// unchanged to each child. `ErrorHandling` (default `ContinueOnError`)
/// decides whether a failing child aborts the sequence.
pub fn execute(action: &Action, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let children = action.parameters.get_sub_action_list("SubActions");
    let stop_on_error = action.parameters.get_enum("ErrorHandling", "ContinueOnError") == "StopOnError";

    let mut first_error: Option<ActionError> = None;
    for (index, child) in children.iter().enumerate() {
        if let Err(e) = child.execute(event_value, ctx) {
            let wrapped = ActionError::SequenceChildFailed {
                index,
                description: child.description.clone(),
                cause: e.to_string(),
            };
            if stop_on_error {
                return Err(wrapped);
            }
            if first_error.is_none() {
                first_error = Some(wrapped);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::{key_action, TestRig};
    use crate::parameter::{ParamValue, ParameterBag};

    #[test]
    fn continue_on_error_runs_every_child() {
        let rig = TestRig::new();
        rig.keyboard.fail_on(2);
        let mut params = ParameterBag::new();
        params.set(
            "SubActions",
            ParamValue::SubActionList(vec![
                key_action("KeyDown", 1),
                key_action("KeyDown", 2),
                key_action("KeyDown", 3),
            ]),
        );
        params.set("ErrorHandling", ParamValue::Enum("ContinueOnError".into()));
        let seq = Action::new("SequenceAction", "seq", params);
        let result = execute(&seq, None, &rig.ctx());
        assert!(result.is_err());
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:1", "down:2", "down:3"]);
    }

    #[test]
    fn stop_on_error_halts_at_failing_index() {
        let rig = TestRig::new();
        rig.keyboard.fail_on(2);
        let mut params = ParameterBag::new();
        params.set(
            "SubActions",
            ParamValue::SubActionList(vec![
                key_action("KeyDown", 1),
                key_action("KeyDown", 2),
                key_action("KeyDown", 3),
            ]),
        );
        params.set("ErrorHandling", ParamValue::Enum("StopOnError".into()));
        let seq = Action::new("SequenceAction", "seq", params);
        let result = execute(&seq, None, &rig.ctx());
        match result {
            Err(ActionError::SequenceChildFailed { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected SequenceChildFailed, got {other:?}"),
        }
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:1", "down:2"]);
    }

    #[test]
    fn scenario_2_ctrl_c_macro() {
        let rig = TestRig::new();
        let mut params = ParameterBag::new();
        params.set(
            "SubActions",
            ParamValue::SubActionList(vec![
                key_action("KeyDown", 17),
                key_action("KeyPressRelease", 67),
                key_action("KeyUp", 17),
            ]),
        );
        params.set("ErrorHandling", ParamValue::Enum("StopOnError".into()));
        let seq = Action::new("SequenceAction", "ctrl+c", params);
        execute(&seq, Some(127), &rig.ctx()).unwrap();
        assert_eq!(
            *rig.keyboard.calls.lock().unwrap(),
            vec!["down:17", "down:67", "up:67", "up:17"]
        );
    }
}
