//! External process execution behind a swappable interface.

use std::io;
use std::process::{Command, Stdio};

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.into(),
        }
    }
}

/// Runs external programs and hands URIs to the OS.
pub trait ProcessRunner: Send + Sync {
    /// Run `program` to completion. Spawn failures surface as `io::Error`.
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput>;

    /// Ask the OS to open `uri` with its registered handler.
    fn open_uri(&self, uri: &str) -> io::Result<()>;
}

/// Runner backed by real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn open_uri(&self, uri: &str) -> io::Result<()> {
        open::that(uri)
    }
}
