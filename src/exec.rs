//! Sequential execution of the synthesized commands.

use eyre::{Result, WrapErr};
use std::{process::Command, thread, time::Duration};
use tracing::trace;
use yansi::Paint;

/// Runs verification commands one at a time, in order.
///
/// Each command is echoed, executed through `sh -c` (the commands embed a
/// `$(...)` substitution), and fully awaited before the next starts. A fixed
/// delay elapses between commands to respect verifier rate limits. Any
/// failure aborts the remaining run.
#[derive(Clone, Debug)]
pub struct CommandRunner {
    delay: Duration,
    dry_run: bool,
}

impl CommandRunner {
    pub fn new(delay: Duration, dry_run: bool) -> Self {
        Self { delay, dry_run }
    }

    /// Runs all commands, stopping at the first failure.
    pub fn run_all(&self, commands: &[String]) -> Result<()> {
        for (i, command) in commands.iter().enumerate() {
            println!("{}", command.bold());
            if self.dry_run {
                continue;
            }

            self.run_one(command)?;

            if i + 1 < commands.len() {
                thread::sleep(self.delay);
            }
        }
        Ok(())
    }

    fn run_one(&self, command: &str) -> Result<()> {
        trace!(target: "verify", "running `{command}`");
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .wrap_err_with(|| format!("Failed to spawn `{command}`"))?;

        if !output.status.success() {
            eyre::bail!(
                "Command exited with {}: `{command}`\n{}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        println!("{}", String::from_utf8_lossy(&output.stdout));
        Ok(())
    }
}
