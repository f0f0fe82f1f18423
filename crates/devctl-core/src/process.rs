//! Subprocess invocation for the container engine.
//!
//! Every external call goes through the [`Runner`] trait so command handlers
//! can be exercised without a container engine. Two modes exist:
//!
//! - [`Runner::run`]: stdio is inherited. Used for interactive shells, log
//!   streaming and anything whose output the user should see as it happens.
//!   A non-zero exit is an error carrying the tool's exit code.
//! - [`Runner::capture`]: stdin closed, stdout and stderr collected. The
//!   caller decides what the exit status means.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{DevError, Result};

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// True when the argument vector contains `needle` as a contiguous run.
    pub fn has_args(&self, needle: &[&str]) -> bool {
        needle.is_empty()
            || self
                .args
                .windows(needle.len())
                .any(|w| w.iter().zip(needle).all(|(a, b)| a == b))
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('"') {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Result of a captured invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub trait Runner {
    fn run(&self, inv: &Invocation) -> Result<()>;
    fn capture(&self, inv: &Invocation) -> Result<Captured>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, inv: &Invocation) -> Result<()> {
        tracing::debug!(command = %inv, "running");
        let status = inv
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| DevError::Spawn {
                program: inv.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(DevError::CommandFailed {
                command: inv.to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }

    fn capture(&self, inv: &Invocation) -> Result<Captured> {
        tracing::debug!(command = %inv, "capturing");
        let output = inv
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DevError::Spawn {
                program: inv.program.clone(),
                source,
            })?;
        Ok(Captured {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_args_with_spaces() {
        let inv = Invocation::new("docker")
            .args(["compose", "exec", "db", "psql", "-c"])
            .arg("SELECT 1;");
        assert_eq!(
            inv.to_string(),
            r#"docker compose exec db psql -c "SELECT 1;""#
        );
    }

    #[test]
    fn has_args_matches_contiguous_runs() {
        let inv = Invocation::new("docker").args(["compose", "down", "-v", "--remove-orphans"]);
        assert!(inv.has_args(&["down", "-v"]));
        assert!(!inv.has_args(&["down", "--remove-orphans"]));
        assert!(inv.has_args(&[]));
    }

    #[test]
    fn spawn_failure_is_reported() {
        let inv = Invocation::new("/nonexistent/devctl-test-binary");
        let err = SystemRunner.capture(&inv).unwrap_err();
        assert!(matches!(err, DevError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn run_reports_exit_code() {
        let inv = Invocation::new("sh").args(["-c", "exit 3"]);
        let err = SystemRunner.run(&inv).unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn capture_collects_output_and_env() {
        let inv = Invocation::new("sh")
            .args(["-c", "printf \"$GREETING\"; printf oops >&2; exit 1"])
            .env("GREETING", "hello");
        let out = SystemRunner.capture(&inv).unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(1));
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "oops");
    }
}
