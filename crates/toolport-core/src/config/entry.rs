//! Server entry shapes and their on-disk JSON form.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

/// A server entry this tool knows how to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEntry {
    /// Client connects to `url` directly.
    Url { url: String },
    /// Client spawns `command` with `args`.
    Command {
        command: String,
        args: Vec<String>,
        env: Option<BTreeMap<String, String>>,
    },
}

impl ServerEntry {
    pub fn url(url: impl Into<String>) -> Self {
        ServerEntry::Url { url: url.into() }
    }

    pub fn command<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ServerEntry::Command {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: None,
        }
    }

    /// Endpoint for URL entries.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ServerEntry::Url { url } => Some(url),
            ServerEntry::Command { .. } => None,
        }
    }

    /// Render with the client's name for the URL field.
    pub fn to_json(&self, url_field: &str) -> Value {
        match self {
            ServerEntry::Url { url } => {
                let mut obj = Map::new();
                obj.insert(url_field.to_string(), json!(url));
                Value::Object(obj)
            }
            ServerEntry::Command { command, args, env } => {
                let mut obj = Map::new();
                obj.insert("command".into(), json!(command));
                obj.insert("args".into(), json!(args));
                if let Some(env) = env {
                    obj.insert("env".into(), json!(env));
                }
                Value::Object(obj)
            }
        }
    }

    /// Parse an entry that has exactly one of the known shapes.
    ///
    /// Entries with extra fields are not recognized, so they can be kept
    /// verbatim instead of losing what we do not model.
    pub fn from_json(value: &Value, url_field: &str) -> Option<Self> {
        let obj = value.as_object()?;

        if obj.len() == 1
            && let Some(url) = obj.get(url_field)
        {
            return Some(ServerEntry::Url {
                url: url.as_str()?.to_string(),
            });
        }

        if !obj
            .keys()
            .all(|key| matches!(key.as_str(), "command" | "args" | "env"))
        {
            return None;
        }
        let command = obj.get("command")?.as_str()?.to_string();
        let args = obj
            .get("args")?
            .as_array()?
            .iter()
            .map(|arg| arg.as_str().map(String::from))
            .collect::<Option<Vec<_>>>()?;
        let env = match obj.get("env") {
            None => None,
            Some(env) => Some(
                env.as_object()?
                    .iter()
                    .map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
                    .collect::<Option<BTreeMap<_, _>>>()?,
            ),
        };
        Some(ServerEntry::Command { command, args, env })
    }
}

/// A server entry as found in, or headed for, a client document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfiguredServer {
    /// Entry created in this run, rendered from its typed form.
    Known(ServerEntry),
    /// Entry read from disk with a known shape; written back as `value`.
    Loaded { entry: ServerEntry, value: Value },
    /// Anything else, preserved as-is.
    Raw(Value),
}

impl ConfiguredServer {
    pub fn from_json(value: Value, url_field: &str) -> Self {
        match ServerEntry::from_json(&value, url_field) {
            Some(entry) => ConfiguredServer::Loaded { entry, value },
            None => ConfiguredServer::Raw(value),
        }
    }

    pub fn to_json(&self, url_field: &str) -> Value {
        match self {
            ConfiguredServer::Known(entry) => entry.to_json(url_field),
            ConfiguredServer::Loaded { value, .. } | ConfiguredServer::Raw(value) => value.clone(),
        }
    }

    pub fn as_entry(&self) -> Option<&ServerEntry> {
        match self {
            ConfiguredServer::Known(entry) | ConfiguredServer::Loaded { entry, .. } => Some(entry),
            ConfiguredServer::Raw(_) => None,
        }
    }
}

impl From<ServerEntry> for ConfiguredServer {
    fn from(entry: ServerEntry) -> Self {
        ConfiguredServer::Known(entry)
    }
}
