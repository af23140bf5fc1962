//! External command execution.
//!
//! Every query against a repository store goes through a `CommandRunner`:
//! one process per call, stdout fully buffered, exit status decides
//! success. `ProcessRunner` is the real implementation; tests swap in a
//! scripted runner.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{AppError, Result};

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and return its captured stdout.
    async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>>;

    /// Same as `run`, decoding stdout lossily. Output is not trimmed.
    async fn run_text(&self, program: &str, args: &[String]) -> Result<String> {
        let stdout = self.run(program, args).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Spawns real OS processes via tokio.
///
/// Children are killed when the awaiting future is dropped, so an
/// abandoned request does not leave a query running behind it.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>> {
        let command_line = format_command(program, args);
        tracing::debug!(command = %command_line, "spawning");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| AppError::Spawn {
            program: program.to_string(),
            source,
        })?;

        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| AppError::CommandTimeout {
                    command: command_line.clone(),
                    timeout,
                })??,
            None => child.wait_with_output().await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(command = %command_line, status = ?output.status, "command failed");
            return Err(AppError::CommandFailed {
                command: command_line,
                stderr,
            });
        }

        Ok(output.stdout)
    }
}

pub fn format_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
pub mod testing {
    //! Scripted runner: answers by exact command line and records calls.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum Reply {
        Stdout(Vec<u8>),
        Fail(String),
        SpawnError,
    }

    #[derive(Default)]
    pub struct ScriptedRunner {
        replies: HashMap<String, Reply>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn ok(mut self, command: &str, stdout: &str) -> Self {
            self.replies
                .insert(command.to_string(), Reply::Stdout(stdout.as_bytes().to_vec()));
            self
        }

        pub fn fail(mut self, command: &str, stderr: &str) -> Self {
            self.replies
                .insert(command.to_string(), Reply::Fail(stderr.to_string()));
            self
        }

        pub fn spawn_error(mut self, command: &str) -> Self {
            self.replies.insert(command.to_string(), Reply::SpawnError);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>> {
            let command = format_command(program, args);
            self.calls.lock().unwrap().push(command.clone());

            match self.replies.get(&command) {
                Some(Reply::Stdout(stdout)) => Ok(stdout.clone()),
                Some(Reply::Fail(stderr)) => Err(AppError::CommandFailed {
                    command,
                    stderr: stderr.clone(),
                }),
                Some(Reply::SpawnError) => Err(AppError::Spawn {
                    program: program.to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }),
                None => Err(AppError::CommandFailed {
                    command,
                    stderr: "unscripted command".to_string(),
                }),
            }
        }
    }
}
