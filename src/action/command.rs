// src/action/command.rs

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use super::{Action, ActionError};

/// Runs a single shell command synchronously.
///
/// Standard output is captured and kept on success; on failure it travels
/// inside the returned [`ActionError::Failed`]. Standard error is only logged.
#[derive(Debug, Clone)]
pub struct CmdAction {
    cmd: String,
    cwd: Option<PathBuf>,
    output: Option<Vec<u8>>,
    error: Option<String>,
}

impl CmdAction {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            cwd: None,
            output: None,
            error: None,
        }
    }

    /// Run the command with `dir` as its working directory.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Standard output captured by the last successful run.
    pub fn output(&self) -> Option<&[u8]> {
        self.output.as_deref()
    }

    /// Description of the last run's failure, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn shell_command(&self) -> Command {
        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        };

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Action for CmdAction {
    fn run(&mut self) -> Result<(), ActionError> {
        self.output = None;
        self.error = None;

        info!(cmd = %self.cmd, "running command");

        let result = self.shell_command().output().map_err(|source| ActionError::Spawn {
            cmd: self.cmd.clone(),
            source,
        });

        let out = match result {
            Ok(out) => out,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        for line in String::from_utf8_lossy(&out.stderr).lines() {
            debug!(cmd = %self.cmd, "stderr: {}", line);
        }

        if !out.status.success() {
            let err = ActionError::Failed {
                cmd: self.cmd.clone(),
                code: out.status.code(),
                stdout: out.stdout,
            };
            warn!(cmd = %self.cmd, error = %err, "command failed");
            self.error = Some(err.to_string());
            return Err(err);
        }

        debug!(
            cmd = %self.cmd,
            bytes = out.stdout.len(),
            "command succeeded"
        );
        self.output = Some(out.stdout);
        Ok(())
    }
}
