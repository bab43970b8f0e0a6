//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A scratch working directory for one `ferry` invocation
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, contents: &str) {
        std::fs::write(self.path().join(name), contents).unwrap();
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(name)).unwrap()
    }

    pub fn lines(&self, name: &str) -> Vec<String> {
        self.read(name).lines().map(str::to_string).collect()
    }

    pub fn ferry(&self) -> Ferry {
        let mut cmd = Command::cargo_bin("ferry").unwrap();
        cmd.current_dir(self.path()).env_remove("RUST_LOG");
        Ferry { cmd }
    }
}

pub struct Ferry {
    cmd: Command,
}

impl Ferry {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(
            outcome.success,
            "expected success, stderr:\n{}",
            outcome.stderr
        );
        outcome
    }

    pub fn fails(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(
            !outcome.success,
            "expected failure, stdout:\n{}",
            outcome.stdout
        );
        outcome
    }
}

pub struct Outcome {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Outcome {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Outcome {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn code_is(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "stderr:\n{}", self.stderr);
        self
    }
}

impl Ferry {
    /// Run and hand back the raw `assert_cmd` assertion
    pub fn assert(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert()
    }
}
