use crate::host::HostLogger;
use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Arc;
use thiserror::Error;
use tokio::process::Command;

/// One external program invocation: program, argument vector and optional
/// working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    /// Run in `dir` instead of inheriting the caller's working directory
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a successful invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Failure of an invocation
///
/// Either the program could not be launched at all, or it ran and exited
/// unsuccessfully. Whatever output was captured travels with the error.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "Command '{command}' failed with exit code {}: {}",
        display_code(.exit_code),
        .stderr.trim()
    )]
    NonZeroExit {
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl ProcessError {
    pub fn command(&self) -> &str {
        match self {
            ProcessError::Spawn { command, .. } | ProcessError::NonZeroExit { command, .. } => {
                command
            }
        }
    }

    pub fn stdout(&self) -> &str {
        match self {
            ProcessError::Spawn { .. } => "",
            ProcessError::NonZeroExit { stdout, .. } => stdout,
        }
    }

    pub fn stderr(&self) -> &str {
        match self {
            ProcessError::Spawn { .. } => "",
            ProcessError::NonZeroExit { stderr, .. } => stderr,
        }
    }

    /// Exit code of the process; `None` for launch failures and signals
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProcessError::Spawn { .. } => None,
            ProcessError::NonZeroExit { exit_code, .. } => *exit_code,
        }
    }
}

/// Executes external programs
///
/// Everything that shells out goes through this trait so an in-memory fake
/// can stand in for real processes.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProcessError>;
}

#[async_trait]
impl<R: ProcessRunner + ?Sized> ProcessRunner for Arc<R> {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProcessError> {
        (**self).run(invocation).await
    }
}

/// Runs invocations as real OS processes
///
/// No timeout and no retry: a dispatched process runs to completion.
#[derive(Clone, Default)]
pub struct SystemRunner {
    logger: Option<Arc<dyn HostLogger>>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self { logger: None }
    }

    /// Also forward the dispatch/completion debug lines to a host logger
    pub fn with_logger(logger: Arc<dyn HostLogger>) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
        if let Some(logger) = &self.logger {
            logger.debug(message);
        }
    }

    fn process_output(
        &self,
        output: Output,
        command: String,
    ) -> Result<CommandOutput, ProcessError> {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(ProcessError::NonZeroExit {
                command,
                exit_code: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code: output.status.code().unwrap_or(0),
        })
    }
}

impl fmt::Debug for SystemRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemRunner")
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProcessError> {
        let command = invocation.to_string();
        let location = invocation
            .current_dir
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<inherited>".to_string());
        self.debug(&format!("execute command {} in path {}", command, location));

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(source) => {
                self.debug(&format!("command {} could not be launched: {}", command, source));
                return Err(ProcessError::Spawn { command, source });
            }
        };

        let result = self.process_output(output, command.clone());
        match &result {
            Ok(out) => self.debug(&format!(
                "command {} finished with exit code {}",
                command, out.exit_code
            )),
            Err(e) => self.debug(&format!("command {} failed: {}", command, e)),
        }
        result
    }
}
