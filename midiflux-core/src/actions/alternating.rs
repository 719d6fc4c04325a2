// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! AlternatingAction (spec §4.8).

use crate::action::{Action, ExecutionContext};
use crate::error::ActionError;

/// Maintains a counter in the State Store under `StateKey`. Each execution
/// picks `PrimaryAction` or `SecondaryAction` from `(counter / CycleCount)
/// % 2`, flipped if `StartWithPrimary=false`, then increments the counter.
pub fn execute(action: &Action, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let state_key = action.parameters.get_integer("StateKey", 0);
    let cycle_count = action.parameters.get_integer("CycleCount", 1).max(1);
    let start_with_primary = action.parameters.get_boolean("StartWithPrimary", true);

    let counter = ctx.state.get(state_key);
    let cycle = (counter.div_euclid(cycle_count)).rem_euclid(2);
    let use_primary = if start_with_primary { cycle == 0 } else { cycle != 0 };

    let result = if use_primary {
        let primary = action.parameters.get_sub_action("PrimaryAction");
        match primary {
            Some(a) => a.execute(event_value, ctx),
            None => Ok(()),
        }
    } else {
        let secondary = action.parameters.get_sub_action("SecondaryAction");
        match secondary {
            Some(a) => a.execute(event_value, ctx),
            None => Ok(()),
        }
    };

    ctx.state.add(state_key, 1);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::TestRig;
    use crate::parameter::{ParamValue, ParameterBag};

    fn alternating_action() -> Action {
        let mut play = ParameterBag::new();
        play.set("Key", ParamValue::Integer(32));
        let primary = Action::new("KeyPressRelease", "Play", play);

        let mut pause = ParameterBag::new();
        pause.set("Key", ParamValue::Integer(32));
        let secondary = Action::new("KeyPressRelease", "Pause", pause);

        let mut params = ParameterBag::new();
        params.set("PrimaryAction", ParamValue::SubAction(Box::new(primary)));
        params.set("SecondaryAction", ParamValue::SubAction(Box::new(secondary)));
        params.set("StartWithPrimary", ParamValue::Boolean(true));
        params.set("CycleCount", ParamValue::Integer(1));
        params.set("StateKey", ParamValue::Integer(1000));
        Action::new("AlternatingAction", "play/pause", params)
    }

    #[test]
    fn scenario_5_alternating_play_pause() {
        let rig = TestRig::new();
        let action = alternating_action();
        for _ in 0..5 {
            execute(&action, Some(127), &rig.ctx()).unwrap();
        }
        // Every tap is the same physical key (32); what alternates is which
        // branch ran, tracked via the counter, not the effector call shape.
        assert_eq!(rig.state.get(1000), 5);
        assert_eq!(
            *rig.keyboard.calls.lock().unwrap(),
            vec!["down:32", "up:32", "down:32", "up:32", "down:32", "up:32", "down:32", "up:32", "down:32", "up:32"]
        );
    }

    #[test]
    fn cycle_count_groups_executions() {
        let rig = TestRig::new();
        let mut primary_params = ParameterBag::new();
        primary_params.set("Key", ParamValue::Integer(1));
        let primary = Action::new("KeyDown", "primary", primary_params);
        let mut secondary_params = ParameterBag::new();
        secondary_params.set("Key", ParamValue::Integer(2));
        let secondary = Action::new("KeyDown", "secondary", secondary_params);

        let mut params = ParameterBag::new();
        params.set("PrimaryAction", ParamValue::SubAction(Box::new(primary)));
        params.set("SecondaryAction", ParamValue::SubAction(Box::new(secondary)));
        params.set("StartWithPrimary", ParamValue::Boolean(true));
        params.set("CycleCount", ParamValue::Integer(2));
        params.set("StateKey", ParamValue::Integer(3000));
        let action = Action::new("AlternatingAction", "grouped", params);

        // CycleCount=2: Primary, Primary, Secondary, Secondary.
        for _ in 0..4 {
            execute(&action, None, &rig.ctx()).unwrap();
        }
        assert_eq!(
            *rig.keyboard.calls.lock().unwrap(),
            vec!["down:1", "down:1", "down:2", "down:2"]
        );
    }

    #[test]
    fn start_with_secondary_flips_first_branch() {
        let rig = TestRig::new();
        let mut play = ParameterBag::new();
        play.set("Key", ParamValue::Integer(1));
        let primary = Action::new("KeyDown", "primary", play);
        let mut pause = ParameterBag::new();
        pause.set("Key", ParamValue::Integer(2));
        let secondary = Action::new("KeyDown", "secondary", pause);

        let mut params = ParameterBag::new();
        params.set("PrimaryAction", ParamValue::SubAction(Box::new(primary)));
        params.set("SecondaryAction", ParamValue::SubAction(Box::new(secondary)));
        params.set("StartWithPrimary", ParamValue::Boolean(false));
        params.set("CycleCount", ParamValue::Integer(1));
        params.set("StateKey", ParamValue::Integer(2000));
        let action = Action::new("AlternatingAction", "flipped", params);

        execute(&action, None, &rig.ctx()).unwrap();
        assert_eq!(*rig.keyboard.calls.lock().unwrap(), vec!["down:2"]);
    }
}
