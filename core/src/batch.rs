//! Test batch execution.
//!
//! The batch file is handed to the platform's script interpreter and runs in
//! the current working directory. Its output is captured and logged at debug level.

use std::path::Path;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::{debug, info, warn};

use vmtask_common::{error::TaskError, task::BatchRun};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpreter {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl Interpreter {
    pub const SH: Interpreter = Interpreter {
        program: "sh",
        args: &[],
    };

    pub const CMD: Interpreter = Interpreter {
        program: "cmd",
        args: &["/C"],
    };

    pub fn command(&self, file: &Path) -> Command {
        let mut command = Command::new(self.program);
        command
            .args(self.args)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    /// Runs `file` to completion.
    ///
    /// A non-zero exit status only fails the run when `strict` is set.
    pub async fn run(&self, file: &Path, strict: bool) -> Result<BatchRun, TaskError> {
        if !file.is_file() {
            return Err(TaskError::BatchNotFound(file.to_path_buf()));
        }

        match std::env::current_dir() {
            Ok(cwd) => info!("Executing {} at {}", file.display(), cwd.display()),
            Err(_) => info!("Executing {}", file.display()),
        }

        let output: Output = self
            .command(file)
            .output()
            .await
            .map_err(|source| TaskError::Spawn {
                program: self.program.to_string(),
                source,
            })?;

        log_output(&output);

        let run = BatchRun {
            path: file.to_path_buf(),
            exit_code: output.status.code(),
        };

        if !output.status.success() {
            if strict {
                return Err(TaskError::BatchFailed {
                    path: run.path,
                    status: output.status.to_string(),
                });
            }
            warn!("{run}");
        }

        Ok(run)
    }
}

fn log_output(output: &Output) {
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        debug!("stdout: {line}");
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        debug!("stderr: {line}");
    }
}
