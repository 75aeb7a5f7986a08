//! Timed external command execution.
//!
//! All probing commands run with the target directory as their working
//! directory and a fixed timeout. A command that exits non-zero or prints
//! nothing is treated as "no data" ([`Probe::Absent`]); a command that
//! cannot be spawned or exceeds the timeout is an unexpected failure
//! ([`Probe::Failed`]).

use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

use crate::models::Probe;

/// Fixed timeout applied to every external command.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a command in `dir`, capturing trimmed stdout.
pub async fn run_command(dir: &Path, program: &str, args: &[&str]) -> Probe<String> {
    let result = tokio::time::timeout(
        COMMAND_TIMEOUT,
        Command::new(program)
            .args(args)
            .current_dir(dir)
            .kill_on_drop(true)
            .output(),
    )
    .await;

    match result {
        Err(_) => Probe::Failed(format!(
            "`{} {}` timed out after {}s",
            program,
            args.join(" "),
            COMMAND_TIMEOUT.as_secs()
        )),
        Ok(Err(e)) => Probe::Failed(format!("failed to run `{}`: {}", program, e)),
        Ok(Ok(output)) => {
            if !output.status.success() {
                return Probe::Absent;
            }
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if stdout.is_empty() {
                Probe::Absent
            } else {
                Probe::Found(stdout)
            }
        }
    }
}

/// Run a git subcommand in `dir`.
pub async fn run_git(dir: &Path, args: &[&str]) -> Probe<String> {
    run_command(dir, "git", args).await
}
