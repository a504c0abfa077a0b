//! Config store for reading and persisting client configuration.
//!
//! File clients get a read-merge-write of their JSON document. Protocol and
//! command clients own their storage, so entries are handed to them instead.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use super::document::ClientConfig;
use super::entry::ConfiguredServer;
use super::json::{load_json_map, save_json_map};
use crate::client::{ClientPolicy, InstallTarget, PolicyTable, TargetResolver};
use crate::error::{Error, Result};
use crate::process::ProcessRunner;
use crate::types::ClientKind;

/// Transport advertised to clients that take a server descriptor.
const DESCRIPTOR_TRANSPORT: &str = "sse";

/// What a write actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// JSON document written to disk.
    Written { path: PathBuf },
    /// Install URI handed to the OS.
    Dispatched { uri: String },
    /// Client executable invoked once per entry.
    Invoked { program: String, count: usize },
    /// No entries to hand over.
    Unchanged,
}

#[derive(Debug)]
pub struct ConfigStore<'a, R: ProcessRunner> {
    resolver: &'a TargetResolver,
    policies: &'a PolicyTable,
    runner: &'a R,
}

impl<'a, R: ProcessRunner> ConfigStore<'a, R> {
    pub fn new(resolver: &'a TargetResolver, policies: &'a PolicyTable, runner: &'a R) -> Self {
        Self {
            resolver,
            policies,
            runner,
        }
    }

    pub fn target(&self, kind: ClientKind) -> InstallTarget {
        self.resolver.resolve(kind)
    }

    pub fn policy(&self, kind: ClientKind) -> ClientPolicy {
        self.policies.policy(kind)
    }

    /// Read a client's configuration.
    ///
    /// Never fails: a missing, unreadable or malformed file reads as an empty
    /// document, so a corrupt config cannot block installation. The next
    /// write replaces whatever could not be parsed.
    pub fn read(&self, kind: ClientKind) -> ClientConfig {
        match self.target(kind) {
            InstallTarget::File { path } => {
                let policy = self.policy(kind);
                match load_json_map(&path) {
                    Ok(root) => ClientConfig::from_json(root, &policy),
                    Err(err) => {
                        tracing::warn!(
                            client = %kind,
                            path = %path.display(),
                            error = %err,
                            "ignoring unreadable client config"
                        );
                        ClientConfig::new()
                    }
                }
            }
            InstallTarget::Command { .. } | InstallTarget::Protocol { .. } => ClientConfig::new(),
        }
    }

    /// Persist `config` for a client.
    pub fn write(&self, config: &ClientConfig, kind: ClientKind) -> Result<WriteOutcome> {
        let policy = self.policy(kind);
        match self.target(kind) {
            InstallTarget::File { path } => write_file(&path, config, &policy),
            InstallTarget::Protocol { scheme, path, .. } => {
                self.dispatch_protocol(config, scheme, path)
            }
            InstallTarget::Command { program, add_flag } => {
                self.dispatch_command(config, &program, add_flag)
            }
        }
    }

    fn dispatch_protocol(
        &self,
        config: &ClientConfig,
        scheme: &str,
        path: &str,
    ) -> Result<WriteOutcome> {
        // Every entry writes into the same descriptor, so only the last one
        // survives. Installs produce a single entry; more is logged.
        let mut payload = Map::new();
        for (id, server) in config.servers.iter() {
            payload.insert("name".into(), json!(id));
            payload.insert("type".into(), json!(DESCRIPTOR_TRANSPORT));
            payload.insert("url".into(), json!(descriptor_url(id, server)?));
        }
        if payload.is_empty() {
            return Ok(WriteOutcome::Unchanged);
        }
        if config.servers.len() > 1 {
            let ids: Vec<&str> = config.servers.ids().collect();
            tracing::warn!(
                servers = ?ids,
                kept = ?payload.get("name"),
                "protocol install carries one server; earlier entries are dropped"
            );
        }

        let encoded = serde_json::to_string(&Value::Object(payload))?;
        let uri = format!("{scheme}:{path}?{}", urlencoding::encode(&encoded));
        tracing::debug!(%uri, "opening install uri");
        self.runner
            .open_uri(&uri)
            .map_err(|source| Error::ProtocolDispatch {
                uri: uri.clone(),
                source,
            })?;
        Ok(WriteOutcome::Dispatched { uri })
    }

    fn dispatch_command(
        &self,
        config: &ClientConfig,
        program: &str,
        add_flag: &str,
    ) -> Result<WriteOutcome> {
        let mut count = 0;
        for (id, server) in config.servers.iter() {
            let descriptor = json!({
                "name": id,
                "type": DESCRIPTOR_TRANSPORT,
                "url": descriptor_url(id, server)?,
            });
            let args = vec![add_flag.to_string(), serde_json::to_string(&descriptor)?];
            tracing::debug!(program, server = id, "registering server via command");

            let output = self.runner.run(program, &args).map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    Error::ExecutableNotFound {
                        command: program.to_string(),
                    }
                } else {
                    Error::CommandFailed {
                        command: program.to_string(),
                        message: err.to_string(),
                    }
                }
            })?;
            if !output.success {
                let message = if output.stderr.is_empty() {
                    match output.code {
                        Some(code) => format!("exit status {code}"),
                        None => "terminated by signal".to_string(),
                    }
                } else {
                    output.stderr
                };
                return Err(Error::CommandFailed {
                    command: program.to_string(),
                    message,
                });
            }
            count += 1;
        }
        if count == 0 {
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(WriteOutcome::Invoked {
            program: program.to_string(),
            count,
        })
    }
}

fn write_file(path: &Path, config: &ClientConfig, policy: &ClientPolicy) -> Result<WriteOutcome> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|err| Error::io("create directory", parent, err))?;
    }

    // Re-read right before writing to pick up edits made since `read`.
    let mut merged = load_json_map(path).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), error = %err, "replacing unreadable client config");
        Map::new()
    });
    for (key, value) in config.to_json(policy) {
        merged.insert(key, value);
    }

    save_json_map(path, &merged)?;
    tracing::debug!(path = %path.display(), "client config written");
    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
    })
}

fn descriptor_url(id: &str, server: &ConfiguredServer) -> Result<String> {
    let url = match server {
        ConfiguredServer::Known(entry) | ConfiguredServer::Loaded { entry, .. } => {
            entry.endpoint().map(String::from)
        }
        ConfiguredServer::Raw(value) => ["url", "serverUrl"]
            .iter()
            .find_map(|field| value.get(*field).and_then(Value::as_str))
            .map(String::from),
    };
    url.ok_or_else(|| Error::InvalidInput(format!("Server '{id}' has no URL to register")))
}
