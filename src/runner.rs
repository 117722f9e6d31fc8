//! Capability interface for running external formatter tools

use std::io;
use std::process::Command;

use crate::error::{Result, StyleDiffError};

/// Captured output of an external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs an external command, `args[0]` being the executable
pub trait CommandRunner {
    fn run_command(&self, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs commands as child processes and waits for them
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run_command(&self, args: &[&str]) -> Result<CommandOutput> {
        let (executable, rest) = args.split_first().ok_or(StyleDiffError::EmptyCommand)?;

        let output = Command::new(executable)
            .args(rest)
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    StyleDiffError::ToolNotFound {
                        executable: (*executable).to_string(),
                        source,
                    }
                }
                _ => StyleDiffError::ToolFailed {
                    executable: (*executable).to_string(),
                    code: None,
                    stderr: source.to_string(),
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        // diagnostics without any regular output mean the tool itself failed
        if !stderr.is_empty() && stdout.is_empty() {
            return Err(StyleDiffError::ToolFailed {
                executable: (*executable).to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
