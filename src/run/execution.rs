//! Harness process execution

use crate::error::{Error, Result};
use crate::run::request::RunRequest;
use crate::suite::Suite;
use std::process::{Command as StdCommand, ExitStatus, Stdio};

/// What happens to the harness's output streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Collect stdout and stderr into the outcome
    #[default]
    Capture,
    /// Let the harness write straight to the caller's streams
    Inherit,
}

/// Result of a harness run that got as far as spawning
///
/// A non-zero `status` means the harness reported failures. The output
/// buffers are exactly what the harness wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub suite: Suite,
    pub status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RunOutcome {
    /// Whether every test in the suite passed
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Spawn the harness for `request`, wait for it, and collect the outcome
pub fn execute_request(request: &RunRequest, mode: OutputMode) -> Result<RunOutcome> {
    let program = request.program();
    let mut command = StdCommand::new(&program);
    command
        .args(request.command_line())
        .current_dir(&request.base_dir)
        .stdin(Stdio::inherit());

    tracing::debug!(
        suite = %request.suite,
        cwd = %request.base_dir.display(),
        command = %request.display_command(),
        "spawning harness"
    );

    let program_name = program.to_string_lossy().to_string();
    let (status, stdout, stderr) = match mode {
        OutputMode::Capture => {
            let output = command
                .output()
                .map_err(|e| Error::invocation(&program_name, e))?;
            (output.status, output.stdout, output.stderr)
        }
        OutputMode::Inherit => {
            let status = command
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| Error::invocation(&program_name, e))?;
            (status, Vec::new(), Vec::new())
        }
    };

    let status = exit_code(status);
    tracing::debug!(suite = %request.suite, status, "harness exited");

    Ok(RunOutcome {
        suite: request.suite.clone(),
        status,
        stdout,
        stderr,
    })
}

/// Map an exit status to the code a shell would report
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
