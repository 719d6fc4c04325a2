// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Process launcher backed by `std::process::Command`, grounded on
//! `midimon-daemon::action_executor::ActionExecutor::execute_shell`'s
//! per-platform shell selection but generalized to the explicit `Shell`
//! choice a `CommandExecution` action parameter carries instead of a
//! `cfg!`-only branch.

use midiflux_core::effectors::{ProcessEffector, Shell};
use midiflux_core::error::ActionError;
use std::process::{Command, Stdio};
use tracing::debug;

pub struct CommandProcessEffector;

impl CommandProcessEffector {
    pub fn new() -> Self {
        CommandProcessEffector
    }
}

impl ProcessEffector for CommandProcessEffector {
    fn run(&self, shell: Shell, command: &str, hidden: bool, wait_for_exit: bool) -> Result<Option<i32>, ActionError> {
        let mut proc = match shell {
            Shell::PowerShell => {
                let mut c = Command::new("powershell");
                c.args(["-NoProfile", "-Command", command]);
                c
            }
            Shell::Cmd => {
                let mut c = Command::new("cmd");
                c.args(["/C", command]);
                c
            }
            Shell::None => {
                let mut parts = command.split_whitespace();
                let program = parts.next().ok_or_else(|| ActionError::new("CommandExecution", "empty command"))?;
                let mut c = Command::new(program);
                c.args(parts);
                c
            }
        };

        if hidden {
            proc.stdout(Stdio::null()).stderr(Stdio::null());
        }

        debug!(%command, ?shell, wait_for_exit, "launching process");

        if wait_for_exit {
            let status = proc.status().map_err(|e| ActionError::new(format!("run `{command}`"), e))?;
            Ok(status.code())
        } else {
            proc.spawn().map_err(|e| ActionError::new(format!("spawn `{command}`"), e))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn none_shell_runs_program_directly_and_waits() {
        let effector = CommandProcessEffector::new();
        let code = effector.run(Shell::None, "true", true, true).unwrap();
        assert_eq!(code, Some(0));
    }

    #[test]
    #[cfg(unix)]
    fn non_waiting_run_returns_no_exit_code() {
        let effector = CommandProcessEffector::new();
        let code = effector.run(Shell::None, "true", true, false).unwrap();
        assert_eq!(code, None);
    }

    #[test]
    fn empty_none_command_is_rejected() {
        let effector = CommandProcessEffector::new();
        assert!(effector.run(Shell::None, "", true, true).is_err());
    }
}
