#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tempfile::TempDir;

use toolport_core::client::{Os, Platform, PolicyTable, TargetResolver, VsCodeDispatch};
use toolport_core::process::{ProcessOutput, ProcessRunner};
use toolport_core::types::ServerDetails;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Run { program: String, args: Vec<String> },
    Open(String),
}

/// Runner that never spawns anything.
///
/// Programs not marked installed fail to spawn with `NotFound`. Installed
/// programs succeed unless a failure is registered for them; `--version`
/// version checks always succeed for installed programs.
#[derive(Debug, Default)]
pub struct FakeRunner {
    installed: HashSet<String>,
    failures: HashMap<String, ProcessOutput>,
    open_error: Option<io::ErrorKind>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.installed.insert(program.to_string());
        self
    }

    pub fn with_failure(mut self, program: &str, output: ProcessOutput) -> Self {
        self.installed.insert(program.to_string());
        self.failures.insert(program.to_string(), output);
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.open_error = Some(io::ErrorKind::Other);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Open(uri) => Some(uri),
                Call::Run { .. } => None,
            })
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(Call::Run {
            program: program.to_string(),
            args: args.to_vec(),
        });
        if !self.installed.contains(program) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
        }
        if args.first().map(String::as_str) == Some("--version") {
            return Ok(ProcessOutput::ok());
        }
        Ok(self
            .failures
            .get(program)
            .cloned()
            .unwrap_or_else(ProcessOutput::ok))
    }

    fn open_uri(&self, uri: &str) -> io::Result<()> {
        self.calls.lock().unwrap().push(Call::Open(uri.to_string()));
        match self.open_error {
            Some(kind) => Err(io::Error::new(kind, "no handler registered")),
            None => Ok(()),
        }
    }
}

/// Temporary home directory with a Linux layout.
pub struct Sandbox {
    pub temp: TempDir,
    pub resolver: TargetResolver,
    pub policies: PolicyTable,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::with_dispatch(VsCodeDispatch::Protocol)
    }

    pub fn with_dispatch(dispatch: VsCodeDispatch) -> Self {
        let temp = TempDir::new().unwrap();
        let platform = Platform::with_home(Os::Linux, temp.path());
        Self {
            resolver: TargetResolver::new(platform, dispatch),
            policies: PolicyTable::default(),
            temp,
        }
    }

    pub fn home(&self) -> &Path {
        self.temp.path()
    }

    pub fn claude_path(&self) -> PathBuf {
        self.home()
            .join(".config")
            .join("Claude")
            .join("claude_desktop_config.json")
    }

    pub fn windsurf_path(&self) -> PathBuf {
        self.home()
            .join(".codeium")
            .join("windsurf")
            .join("mcp_config.json")
    }

    pub fn cursor_path(&self) -> PathBuf {
        self.home().join(".cursor").join("mcp.json")
    }

    /// Make a file client look installed by creating its config directory.
    pub fn install_dir(&self, config_path: &Path) {
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    }
}

pub fn write_json(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

pub fn details(tool_id: &str) -> ServerDetails {
    ServerDetails {
        server_id: tool_id.to_string(),
        endpoint: format!("https://sequencer-v2.heurist.xyz/tool{tool_id}"),
        mcp_endpoint: format!("https://sequencer-v2.heurist.xyz/tool{tool_id}/sse"),
        server_type: "sse".to_string(),
        supported_agents: vec!["SearchAgent".to_string()],
    }
}
