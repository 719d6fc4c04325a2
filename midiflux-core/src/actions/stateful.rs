// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Stateful actions (spec §4.9).

use crate::action::{Action, ExecutionContext};
use crate::error::ActionError;

pub fn state_set(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = action.parameters.get_integer("StateKey", 0);
    let value = action.parameters.get_integer("Value", 0);
    ctx.state.set(key, value);
    Ok(())
}

pub fn state_increase(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = action.parameters.get_integer("StateKey", 0);
    let amount = action.parameters.get_integer("Amount", 1);
    ctx.state.add(key, amount);
    Ok(())
}

pub fn state_decrease(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = action.parameters.get_integer("StateKey", 0);
    let amount = action.parameters.get_integer("Amount", 1);
    ctx.state.add(key, -amount);
    Ok(())
}

/// Reads the current value, evaluates `ComparisonType` against `Value`,
/// and executes `ThenAction`/`ElseAction`. The read-then-branch is NOT
/// atomic with the subsequent sub-action execution (spec §5) — another
/// thread may mutate the same key between the read here and the branch
/// actually running.
pub fn state_conditional(action: &Action, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let key = action.parameters.get_integer("StateKey", 0);
    let comparison = action.parameters.get_enum("ComparisonType", "Equals");
    let target = action.parameters.get_integer("Value", 0);

    let current = ctx.state.get(key);
    let holds = match comparison {
        "Equals" => current == target,
        "NotEquals" => current != target,
        "LessThan" => current < target,
        "LessOrEqual" => current <= target,
        "GreaterThan" => current > target,
        "GreaterOrEqual" => current >= target,
        _ => false,
    };

    if holds {
        match action.parameters.get_sub_action("ThenAction") {
            Some(then_action) => then_action.execute(event_value, ctx),
            None => Ok(()),
        }
    } else {
        match action.parameters.get_sub_action("ElseAction") {
            Some(else_action) => else_action.execute(event_value, ctx),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::{key_action, TestRig};
    use crate::parameter::{ParamValue, ParameterBag};

    #[test]
    fn set_returns_ok_and_stores() {
        let rig = TestRig::new();
        let mut params = ParameterBag::new();
        params.set("StateKey", ParamValue::Integer(1));
        params.set("Value", ParamValue::Integer(42));
        let action = Action::new("StateSetAction", "set", params);
        state_set(&action, &rig.ctx()).unwrap();
        assert_eq!(rig.state.get(1), 42);
    }

    #[test]
    fn increase_defaults_to_one() {
        let rig = TestRig::new();
        let action = Action::new("StateIncreaseAction", "inc", {
            let mut p = ParameterBag::new();
            p.set("StateKey", ParamValue::Integer(1));
            p
        });
        state_increase(&action, &rig.ctx()).unwrap();
        state_increase(&action, &rig.ctx()).unwrap();
        assert_eq!(rig.state.get(1), 2);
    }

    #[test]
    fn decrease_subtracts_amount() {
        let rig = TestRig::new();
        let mut params = ParameterBag::new();
        params.set("StateKey", ParamValue::Integer(1));
        params.set("Amount", ParamValue::Integer(3));
        let action = Action::new("StateDecreaseAction", "dec", params);
        state_decrease(&action, &rig.ctx()).unwrap();
        assert_eq!(rig.state.get(1), -3);
    }

    #[test]
    fn conditional_picks_then_branch() {
        let rig = TestRig::new();
        rig.state.set(10, 5);
        let mut params = ParameterBag::new();
        params.set("StateKey", ParamValue::Integer(10));
        params.set("ComparisonType", ParamValue::Enum("GreaterThan".into()));
        params.set("Value", ParamValue::Integer(3));
        params.set("ThenAction", ParamValue::SubAction(Box::new(key_action("KeyDown", 1))));
        params.set("ElseAction", ParamValue::SubAction(Box::new(key_action("KeyDown", 2))));
        let action = Action::new("StateConditionalAction", "cond", params);
        state_conditional(&action, None, &rig.ctx()).unwrap();
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:1"]);
    }

    #[test]
    fn conditional_with_no_else_is_no_op_when_false() {
        let rig = TestRig::new();
        rig.state.set(10, 0);
        let mut params = ParameterBag::new();
        params.set("StateKey", ParamValue::Integer(10));
        params.set("ComparisonType", ParamValue::Enum("Equals".into()));
        params.set("Value", ParamValue::Integer(99));
        params.set("ThenAction", ParamValue::SubAction(Box::new(key_action("KeyDown", 1))));
        let action = Action::new("StateConditionalAction", "cond", params);
        state_conditional(&action, None, &rig.ctx()).unwrap();
        assert!(rig.keyboard.calls.lock().unwrap().is_empty());
    }
}
