// src/exec/command.rs

//! Shell-command run actions for units declared in a manifest.

use std::process::{Command, Output};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::types::UnitId;
use crate::unit::RunAction;

/// A `cmd` string from the manifest, run through the platform shell.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    unit: UnitId,
    cmd: String,
}

impl ShellCommand {
    pub fn new(unit: impl Into<UnitId>, cmd: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            cmd: cmd.into(),
        }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Wrap this command as a [`RunAction`]. A non-zero exit is a failure.
    pub fn into_action(self) -> RunAction {
        RunAction::new(move || self.run())
    }

    /// Run the command to completion, logging its output.
    pub fn run(&self) -> Result<()> {
        info!(unit = %self.unit, cmd = %self.cmd, "starting unit command");

        let output = shell(&self.cmd)
            .output()
            .with_context(|| format!("spawning process for unit '{}'", self.unit))?;

        log_output(&self.unit, &output);

        if output.status.success() {
            return Ok(());
        }

        let code = output.status.code().unwrap_or(-1);
        match last_line(&output.stderr) {
            Some(line) => bail!("command `{}` exited with code {code}: {line}", self.cmd),
            None => bail!("command `{}` exited with code {code}", self.cmd),
        }
    }
}

// Build a shell command appropriate for the platform.
fn shell(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

fn log_output(unit: &str, output: &Output) {
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        debug!(unit = %unit, "stdout: {}", line);
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        debug!(unit = %unit, "stderr: {}", line);
    }
}

fn last_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.trim().to_string())
}
