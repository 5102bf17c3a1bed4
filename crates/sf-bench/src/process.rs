//! External process invocation
//!
//! Every external tool (meson, ninja, du, asv) is described by a
//! [`CommandSpec`] and executed through a [`ProcessRunner`]. Environment
//! overrides travel with the command and only reach the spawned child.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

// ============ Command Spec ============

/// A single external command: program, arguments, working directory and
/// environment overrides for the child
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
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
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs(mut self, vars: BTreeMap<String, OsString>) -> Self {
        self.env.extend(vars);
        self
    }

    /// Arguments as (lossy) strings
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// `program arg1 arg2 ...`, for diagnostics
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.arg_strings());
        parts.join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        cmd.envs(&self.env);
        cmd
    }
}

// ============ Status ============

/// Exit status of a finished child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code, `None` when the child was terminated by a signal
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signaled() -> Self {
        Self { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Code to propagate as this process's exit status
    pub fn exit_code(&self) -> i32 {
        match self.code {
            Some(code) if code != 0 => code,
            _ => 1,
        }
    }
}

impl From<ExitStatus> for ProcessStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Status plus captured standard output
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ProcessStatus,
    pub stdout: String,
}

// ============ Runner ============

/// Executes command specs, blocking until the child exits
pub trait ProcessRunner {
    /// Run with inherited stdio and return the exit status
    fn status(&self, spec: &CommandSpec) -> io::Result<ProcessStatus>;

    /// Run capturing standard output (stderr stays inherited)
    fn output(&self, spec: &CommandSpec) -> io::Result<CapturedOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn status(&self, spec: &CommandSpec) -> io::Result<ProcessStatus> {
        (**self).status(spec)
    }

    fn output(&self, spec: &CommandSpec) -> io::Result<CapturedOutput> {
        (**self).output(spec)
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn status(&self, spec: &CommandSpec) -> io::Result<ProcessStatus> {
        log::debug!("spawn: {}", spec.display());
        let status = spec.to_command().status()?;
        log::debug!("{} -> {}", spec.program, ProcessStatus::from(status));
        Ok(status.into())
    }

    fn output(&self, spec: &CommandSpec) -> io::Result<CapturedOutput> {
        log::debug!("spawn (captured): {}", spec.display());
        let out = spec.to_command().stderr(Stdio::inherit()).output()?;
        Ok(CapturedOutput {
            status: out.status.into(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_program_and_args() {
        let spec = CommandSpec::new("ninja").args(["-C", "build", "-j", "2"]);
        assert_eq!(spec.display(), "ninja -C build -j 2");
    }

    #[test]
    fn test_env_overrides_stay_on_command() {
        let spec = CommandSpec::new("asv")
            .env("MKL_NUM_THREADS", "1")
            .env("OPENBLAS_NUM_THREADS", "1");

        assert_eq!(spec.env.len(), 2);
        assert_eq!(spec.env["MKL_NUM_THREADS"], OsString::from("1"));
        assert_eq!(spec.to_command().get_envs().count(), 2);
    }

    #[test]
    fn test_status_success() {
        assert!(ProcessStatus::exited(0).success());
        assert!(!ProcessStatus::exited(1).success());
        assert!(!ProcessStatus::signaled().success());
        assert_eq!(ProcessStatus::exited(0).exit_code(), 1);
        assert_eq!(ProcessStatus::exited(42).exit_code(), 42);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ProcessStatus::exited(2).to_string(), "exit status 2");
        assert_eq!(ProcessStatus::signaled().to_string(), "terminated by signal");
    }
}
