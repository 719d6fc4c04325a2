// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! RelativeCCAction (spec §4.8).

use crate::action::{Action, ExecutionContext};
use crate::error::ActionError;

/// Decodes a raw CC byte (0..127) to a signed increment under one of the
/// three relative-encoder conventions (spec §4.8 table).
pub fn decode(raw: u8, encoding: &str) -> i64 {
    let n = raw as i64;
    match encoding {
        "TwosComplement" => {
            if n <= 64 {
                n
            } else {
                n - 128
            }
        }
        "BinaryOffset" => n - 64,
        // SignMagnitude is the default.
        _ => match n {
            0 => 0,
            1..=63 => n,
            64 => 0,
            65..=127 => -(n - 64),
            _ => 0,
        },
    }
}

/// Forwards `|increment|` repetitions to `PositiveAction`/`NegativeAction`
/// depending on sign; a zero decode is a no-op. Applies acceleration when
/// `AccelerationStateKey` is configured and the recent-activity counter has
/// crossed `AccelerationThreshold`.
pub fn execute(action: &Action, event_value: Option<i64>, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let Some(raw) = event_value else {
        return Ok(());
    };
    let encoding = action.parameters.get_enum("Encoding", "SignMagnitude");
    let increment = decode(raw.clamp(0, 127) as u8, encoding);
    if increment == 0 {
        return Ok(());
    }

    let multiplier = apply_acceleration(action, ctx);
    let repetitions = (increment.unsigned_abs() as i64 * multiplier).max(1);

    let target = if increment > 0 {
        action.parameters.get_sub_action("PositiveAction")
    } else {
        action.parameters.get_sub_action("NegativeAction")
    };
    let Some(target) = target else {
        return Ok(());
    };

    // The raw CC byte has already been consumed by `decode`; forwarding it
    // on would make value-scaled children (e.g. MouseScroll) double-count
    // it, so each repetition gets no event value of its own.
    for _ in 0..repetitions {
        target.execute(None, ctx)?;
    }
    Ok(())
}

/// Bumps the recent-activity counter under `AccelerationStateKey` (if
/// configured) and returns the multiplier to apply this call: `1` below
/// threshold, `AccelerationMultiplier` once the counter exceeds it.
fn apply_acceleration(action: &Action, ctx: &ExecutionContext<'_>) -> i64 {
    let Some(state_key) = action.parameters.get("AccelerationStateKey").and_then(|v| v.as_integer()) else {
        return 1;
    };
    let threshold = action.parameters.get_integer("AccelerationThreshold", i64::MAX);
    let multiplier = action.parameters.get_integer("AccelerationMultiplier", 1);

    let activity = ctx.state.add(state_key, 1);
    if activity > threshold {
        multiplier.max(1)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::TestRig;
    use crate::parameter::{ParamValue, ParameterBag};

    #[test]
    fn sign_magnitude_table() {
        assert_eq!(decode(0, "SignMagnitude"), 0);
        assert_eq!(decode(1, "SignMagnitude"), 1);
        assert_eq!(decode(63, "SignMagnitude"), 63);
        assert_eq!(decode(64, "SignMagnitude"), 0);
        assert_eq!(decode(65, "SignMagnitude"), -1);
        assert_eq!(decode(127, "SignMagnitude"), -63);
    }

    #[test]
    fn twos_complement_table() {
        assert_eq!(decode(0, "TwosComplement"), 0);
        assert_eq!(decode(64, "TwosComplement"), 64);
        assert_eq!(decode(65, "TwosComplement"), -63);
        assert_eq!(decode(127, "TwosComplement"), -1);
    }

    #[test]
    fn binary_offset_table() {
        assert_eq!(decode(64, "BinaryOffset"), 0);
        assert_eq!(decode(65, "BinaryOffset"), 1);
        assert_eq!(decode(66, "BinaryOffset"), 2);
        assert_eq!(decode(63, "BinaryOffset"), -1);
    }

    fn scroll_action(direction: &str) -> Action {
        let mut params = ParameterBag::new();
        params.set("Direction", ParamValue::Enum(direction.into()));
        params.set("Amount", ParamValue::Integer(2));
        Action::new("MouseScroll", format!("scroll {direction}"), params)
    }

    fn jog_action() -> Action {
        let mut params = ParameterBag::new();
        params.set("PositiveAction", ParamValue::SubAction(Box::new(scroll_action("Up"))));
        params.set("NegativeAction", ParamValue::SubAction(Box::new(scroll_action("Down"))));
        params.set("Encoding", ParamValue::Enum("BinaryOffset".into()));
        Action::new("RelativeCCAction", "jog", params)
    }

    #[test]
    fn scenario_4_relative_jog_to_scroll() {
        let rig = TestRig::new();
        let action = jog_action();
        // event_value forwarded to MouseScroll scales Amount; use raw event
        // values equal to the CC byte per the dispatcher contract (§4.7).
        execute(&action, Some(64), &rig.ctx()).unwrap();
        execute(&action, Some(65), &rig.ctx()).unwrap();
        execute(&action, Some(66), &rig.ctx()).unwrap();
        execute(&action, Some(63), &rig.ctx()).unwrap();

        // MouseScroll forwards the raw CC byte as event_value too, which
        // would scale Amount incorrectly for a relative control — so
        // RelativeCCAction forwards None downstream instead of the raw byte.
        assert_eq!(
            *rig.mouse.calls.lock().unwrap(),
            vec!["scroll_up:2", "scroll_up:2", "scroll_up:2", "scroll_down:2"]
        );
    }

    #[test]
    fn acceleration_applies_multiplier_past_threshold() {
        let rig = TestRig::new();
        let mut params = ParameterBag::new();
        params.set("PositiveAction", ParamValue::SubAction(Box::new(scroll_action("Up"))));
        params.set("NegativeAction", ParamValue::SubAction(Box::new(scroll_action("Down"))));
        params.set("Encoding", ParamValue::Enum("BinaryOffset".into()));
        params.set("AccelerationStateKey", ParamValue::Integer(42));
        params.set("AccelerationThreshold", ParamValue::Integer(2));
        params.set("AccelerationMultiplier", ParamValue::Integer(5));
        let action = Action::new("RelativeCCAction", "jog-accel", params);

        execute(&action, Some(65), &rig.ctx()).unwrap(); // activity=1, no accel
        execute(&action, Some(65), &rig.ctx()).unwrap(); // activity=2, no accel
        execute(&action, Some(65), &rig.ctx()).unwrap(); // activity=3, accel kicks in
        assert_eq!(rig.mouse.calls.lock().unwrap().len(), 1 + 1 + 5);
    }
}
