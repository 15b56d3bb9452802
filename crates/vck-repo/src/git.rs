//! Running `git` against a single repository.
//!
//! Every invocation is a blocking child process pinned to one `--git-dir`.
//! Interactive prompts are disabled so a missing credential fails the
//! command instead of hanging the query.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{RepoError, Result};

/// Captured result of one git invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout and stderr joined, trimmed, for error messages.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.trim().to_string();
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr);
        }
        text
    }

    fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// A `git` runner bound to one repository.
#[derive(Clone, Debug)]
pub struct GitCommand {
    program: PathBuf,
    git_dir: PathBuf,
}

impl GitCommand {
    /// Run the `git` found on `PATH` against `git_dir`.
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("git"),
            git_dir: git_dir.into(),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("git {}", args.join(" "))
    }

    /// Run git with `args` and capture its output, whatever the exit code.
    pub fn run(&self, args: &[&str]) -> Result<GitOutput> {
        let description = self.describe(args);
        debug!(git_dir = %self.git_dir.display(), command = %description, "running git");

        let output = Command::new(&self.program)
            .arg("--git-dir")
            .arg(&self.git_dir)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RepoError::Spawn {
                command: description.clone(),
                source,
            })?;

        let result = GitOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(command = %description, code = ?result.code, "git finished");
        Ok(result)
    }

    /// Run git with `args`, failing unless it exits successfully.
    ///
    /// Returns stdout on success.
    pub fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(self.failure(args, &output))
        }
    }

    /// Build the error for a failed invocation.
    pub fn failure(&self, args: &[&str], output: &GitOutput) -> RepoError {
        RepoError::Git {
            command: self.describe(args),
            status: output.status_label(),
            output: output.combined(),
        }
    }
}
